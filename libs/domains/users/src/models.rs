use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User entity as stored in the `users` collection.
///
/// The stored document carries the password hash; API responses use
/// [`UserResponse`], which omits it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, assigned at creation and immutable thereafter
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub address: String,
    /// Unique across all users
    pub email: String,
    pub contact_number: String,
    /// Unique handle, chosen by the user
    pub username: String,
    /// Argon2 hash; never exposed through the API
    pub password_hash: String,
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub age: i32,
    pub address: String,
    pub email: String,
    pub contact_number: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            age: user.age,
            address: user.address,
            email: user.email,
            contact_number: user.contact_number,
            username: user.username,
        }
    }
}

/// DTO for creating a new user.
///
/// Fields default when absent so that a missing field fails the presence
/// rule with its stable message instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUser {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// DTO for updating an existing user.
///
/// A supplied value replaces the stored one only when truthy; empty strings
/// and zero are treated like absent fields and leave the record unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn full_name(&self) -> Option<&str> {
        non_empty(&self.full_name)
    }

    pub fn age(&self) -> Option<i32> {
        self.age.filter(|age| *age != 0)
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(&self.address)
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn contact_number(&self) -> Option<&str> {
        non_empty(&self.contact_number)
    }

    pub fn username(&self) -> Option<&str> {
        non_empty(&self.username)
    }

    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

impl User {
    /// Create a new user (password already hashed by the service layer)
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            full_name: input.full_name,
            age: input.age,
            address: input.address,
            email: input.email,
            contact_number: input.contact_number,
            username: input.username,
            password_hash,
        }
    }

    /// Apply the supplied fields of an update (password already hashed if provided)
    pub fn apply_update(&mut self, update: &UpdateUser, new_password_hash: Option<String>) {
        if let Some(full_name) = update.full_name() {
            self.full_name = full_name.to_string();
        }
        if let Some(age) = update.age() {
            self.age = age;
        }
        if let Some(address) = update.address() {
            self.address = address.to_string();
        }
        if let Some(email) = update.email() {
            self.email = email.to_string();
        }
        if let Some(contact_number) = update.contact_number() {
            self.contact_number = contact_number.to_string();
        }
        if let Some(username) = update.username() {
            self.username = username.to_string();
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            CreateUser {
                full_name: "Juan dela Cruz".to_string(),
                age: 20,
                address: "Manila".to_string(),
                email: "juan@example.com".to_string(),
                contact_number: "09171234567".to_string(),
                username: "juandc".to_string(),
                password: "secret".to_string(),
            },
            "hashed".to_string(),
        )
    }

    #[test]
    fn test_apply_update_replaces_supplied_fields() {
        let mut user = sample_user();
        let update = UpdateUser {
            age: Some(25),
            address: Some("Cebu".to_string()),
            ..Default::default()
        };

        user.apply_update(&update, None);

        assert_eq!(user.age, 25);
        assert_eq!(user.address, "Cebu");
        assert_eq!(user.full_name, "Juan dela Cruz");
        assert_eq!(user.email, "juan@example.com");
        assert_eq!(user.password_hash, "hashed");
    }

    #[test]
    fn test_apply_update_ignores_falsy_values() {
        let mut user = sample_user();
        let update = UpdateUser {
            full_name: Some(String::new()),
            age: Some(0),
            ..Default::default()
        };

        user.apply_update(&update, None);

        assert_eq!(user.full_name, "Juan dela Cruz");
        assert_eq!(user.age, 20);
    }

    #[test]
    fn test_apply_update_replaces_password_hash() {
        let mut user = sample_user();
        user.apply_update(&UpdateUser::default(), Some("rehashed".to_string()));
        assert_eq!(user.password_hash, "rehashed");
    }

    #[test]
    fn test_response_omits_password_hash() {
        let response: UserResponse = sample_user().into();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "juandc");
    }

    #[test]
    fn test_create_user_defaults_missing_fields() {
        let input: CreateUser = serde_json::from_str(r#"{"full_name": "Juan"}"#).unwrap();
        assert_eq!(input.full_name, "Juan");
        assert_eq!(input.age, 0);
        assert!(input.email.is_empty());
    }

    #[test]
    fn test_stored_document_uses_id_key() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["password_hash"], "hashed");
    }
}
