//! Field validation rules for user payloads.
//!
//! Rules are pure and run in a fixed order (presence, age, email shape,
//! contact shape), stopping at the first failure. Callers must not assume
//! failures are aggregated.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Philippine mobile numbers: 09 or +639 prefix followed by 9 digits
static CONTACT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(09|\+639)\d{9}$").unwrap());

/// Validate a full create payload.
pub fn validate_new_user(input: &CreateUser) -> UserResult<()> {
    if input.full_name.is_empty()
        || input.age == 0
        || input.address.is_empty()
        || input.email.is_empty()
        || input.contact_number.is_empty()
        || input.username.is_empty()
        || input.password.is_empty()
    {
        return fail("All fields are required.");
    }
    if input.age < 18 {
        return fail("Age must be 18 or older.");
    }
    if !EMAIL.is_match(&input.email) {
        return fail("Invalid email format.");
    }
    if !CONTACT_NUMBER.is_match(&input.contact_number) {
        return fail("Invalid contact number format.");
    }

    Ok(())
}

/// Validate a partial update payload; only supplied fields are checked.
pub fn validate_update(input: &UpdateUser) -> UserResult<()> {
    if let Some(age) = input.age() {
        if age < 18 {
            return fail("Age must be 18 or older.");
        }
    }
    if let Some(email) = input.email() {
        if !EMAIL.is_match(email) {
            return fail("Invalid email format.");
        }
    }
    if let Some(contact_number) = input.contact_number() {
        if !CONTACT_NUMBER.is_match(contact_number) {
            return fail("Invalid contact number format.");
        }
    }

    Ok(())
}

fn fail(message: &str) -> UserResult<()> {
    warn!("Validation error: {}", message);
    Err(UserError::Validation(message.to_string()))
}
