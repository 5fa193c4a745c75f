use axum_helpers::RateUsage;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserResponse};
use crate::password;
use crate::repository::UserRepository;
use crate::usage;
use crate::validation;

/// Service layer implementing the user query and mutation operations.
///
/// Each operation is a single linear pipeline: record usage, validate,
/// check existence/duplicates, hash if needed, persist. The only write
/// happens at the end, after every check has passed, so an aborted
/// operation leaves nothing behind.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Return every stored user, unfiltered and unpaginated.
    pub async fn get_users(&self, usage: &RateUsage) -> UserResult<Vec<UserResponse>> {
        usage::record("get_users", usage);
        info!("Fetching all users");

        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Create a user from a full payload.
    ///
    /// Email collisions are reported before username collisions.
    pub async fn add_user(&self, input: CreateUser, usage: &RateUsage) -> UserResult<UserResponse> {
        usage::record("add_user", usage);

        validation::validate_new_user(&input)?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            warn!("Duplicate email error: {}", input.email);
            return Err(UserError::Duplicate {
                field: "Email",
                value: input.email,
            });
        }

        if self
            .repository
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            warn!("Duplicate username error: {}", input.username);
            return Err(UserError::Duplicate {
                field: "Username",
                value: input.username,
            });
        }

        let password_hash = password::hash(&input.password)?;
        let user = User::new(input, password_hash);

        let created = self.repository.insert(user).await?;
        info!("User added: {}", created.email);
        Ok(created.into())
    }

    /// Update the supplied fields of an existing user.
    ///
    /// Email and username are re-checked for duplicates only when they are
    /// supplied and differ from the stored values, so a no-op update to the
    /// same value never collides with the record itself. A supplied password
    /// is rehashed with a fresh salt; an omitted one keeps the stored hash.
    pub async fn update_user(
        &self,
        id: Uuid,
        input: UpdateUser,
        usage: &RateUsage,
    ) -> UserResult<UserResponse> {
        usage::record("update_user", usage);
        info!("Updating user: {}", id);

        validation::validate_update(&input)?;

        let mut user = self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("User not found: {}", id);
            UserError::Validation("User not found.".to_string())
        })?;

        if let Some(email) = input.email() {
            if email != user.email && self.repository.find_by_email(email).await?.is_some() {
                warn!("Duplicate email error during update: {}", email);
                return Err(UserError::Duplicate {
                    field: "Email",
                    value: email.to_string(),
                });
            }
        }

        if let Some(username) = input.username() {
            if username != user.username
                && self.repository.find_by_username(username).await?.is_some()
            {
                warn!("Duplicate username error during update: {}", username);
                return Err(UserError::Duplicate {
                    field: "Username",
                    value: username.to_string(),
                });
            }
        }

        let new_password_hash = match input.password() {
            Some(plaintext) => Some(password::hash(plaintext)?),
            None => None,
        };

        user.apply_update(&input, new_password_hash);

        let updated = self.repository.update(user).await?;
        info!("User updated: {}", updated.email);
        Ok(updated.into())
    }

    /// Delete a user, returning the record as it existed before deletion.
    pub async fn delete_user(&self, id: Uuid, usage: &RateUsage) -> UserResult<UserResponse> {
        usage::record("delete_user", usage);
        info!("Deleting user: {}", id);

        let user = self.repository.find_by_id(id).await?.ok_or_else(|| {
            warn!("User not found for deletion: {}", id);
            UserError::Validation("User not found.".to_string())
        })?;

        // The record can vanish between the lookup and the delete
        if !self.repository.delete(id).await? {
            return Err(UserError::Validation("User not found.".to_string()));
        }

        info!("User deleted: {}", user.email);
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockUserRepository;
    use crate::repository::InMemoryUserRepository;

    fn test_usage() -> RateUsage {
        RateUsage {
            client_id: "127.0.0.1".to_string(),
            current: 1,
            limit: 10_000,
        }
    }

    fn valid_input() -> CreateUser {
        CreateUser {
            full_name: "Ana Santos".to_string(),
            age: 20,
            address: "Makati".to_string(),
            email: "a@x.com".to_string(),
            contact_number: "09171234567".to_string(),
            username: "a1".to_string(),
            password: "p1".to_string(),
        }
    }

    fn service_with_repo() -> (UserService<InMemoryUserRepository>, InMemoryUserRepository) {
        let repo = InMemoryUserRepository::new();
        (UserService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_add_and_get_users() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.age, 20);

        let all = service.get_users(&usage).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].username, "a1");
    }

    #[tokio::test]
    async fn test_add_user_missing_field() {
        let (service, _) = service_with_repo();

        let input = CreateUser {
            address: String::new(),
            ..valid_input()
        };
        let err = service.add_user(input, &test_usage()).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(ref m) if m == "All fields are required."));
    }

    #[tokio::test]
    async fn test_add_user_age_boundary() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let underage = CreateUser {
            age: 17,
            ..valid_input()
        };
        let err = service.add_user(underage, &usage).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(ref m) if m == "Age must be 18 or older."));

        let exactly_18 = CreateUser {
            age: 18,
            ..valid_input()
        };
        let created = service.add_user(exactly_18, &usage).await.unwrap();
        assert_eq!(created.age, 18);
    }

    #[tokio::test]
    async fn test_add_user_email_persisted_unchanged() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let input = CreateUser {
            email: "User.Name+tag@Example.com".to_string(),
            ..valid_input()
        };
        let created = service.add_user(input, &usage).await.unwrap();
        assert_eq!(created.email, "User.Name+tag@Example.com");
    }

    #[tokio::test]
    async fn test_add_user_hashes_password() {
        let (service, repo) = service_with_repo();

        let created = service
            .add_user(valid_input(), &test_usage())
            .await
            .unwrap();

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "p1");
        assert!(password::verify("p1", &stored.password_hash).unwrap());
        assert!(!password::verify("p2", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_detected_first() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        service.add_user(valid_input(), &usage).await.unwrap();

        // Same email AND username: the email collision wins
        let err = service
            .add_user(valid_input(), &usage)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email \"a@x.com\" already exists.");
        assert_eq!(err.code(), "DUPLICATE_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_username_detected_second() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        service.add_user(valid_input(), &usage).await.unwrap();

        let input = CreateUser {
            email: "b@x.com".to_string(),
            ..valid_input()
        };
        let err = service.add_user(input, &usage).await.unwrap_err();
        assert_eq!(err.to_string(), "Username \"a1\" already exists.");
    }

    #[tokio::test]
    async fn test_update_single_field_leaves_rest_unchanged() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();

        let update = UpdateUser {
            age: Some(25),
            ..Default::default()
        };
        let updated = service.update_user(created.id, update, &usage).await.unwrap();

        assert_eq!(updated.age, 25);
        assert_eq!(updated.full_name, "Ana Santos");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.username, "a1");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let (service, _) = service_with_repo();

        let err = service
            .update_user(Uuid::now_v7(), UpdateUser::default(), &test_usage())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Validation(ref m) if m == "User not found."));
    }

    #[tokio::test]
    async fn test_update_underage_rejected() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();

        let update = UpdateUser {
            age: Some(17),
            ..Default::default()
        };
        let err = service
            .update_user(created.id, update, &usage)
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Validation(ref m) if m == "Age must be 18 or older."));

        let update = UpdateUser {
            age: Some(18),
            ..Default::default()
        };
        let updated = service.update_user(created.id, update, &usage).await.unwrap();
        assert_eq!(updated.age, 18);
    }

    #[tokio::test]
    async fn test_update_same_username_is_not_a_duplicate() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();

        let update = UpdateUser {
            username: Some("a1".to_string()),
            ..Default::default()
        };
        let updated = service.update_user(created.id, update, &usage).await.unwrap();
        assert_eq!(updated.username, "a1");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        service.add_user(valid_input(), &usage).await.unwrap();

        let other = CreateUser {
            email: "b@x.com".to_string(),
            username: "b1".to_string(),
            ..valid_input()
        };
        let second = service.add_user(other, &usage).await.unwrap();

        let update = UpdateUser {
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        let err = service
            .update_user(second.id, update, &usage)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email \"a@x.com\" already exists.");
    }

    #[tokio::test]
    async fn test_update_falsy_values_leave_record_unchanged() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();

        let update = UpdateUser {
            full_name: Some(String::new()),
            age: Some(0),
            ..Default::default()
        };
        let updated = service.update_user(created.id, update, &usage).await.unwrap();

        assert_eq!(updated.full_name, "Ana Santos");
        assert_eq!(updated.age, 20);
    }

    #[tokio::test]
    async fn test_update_password_rehashes_with_fresh_salt() {
        let (service, repo) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();
        let original_hash = repo
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        let update = UpdateUser {
            password: Some("p2".to_string()),
            ..Default::default()
        };
        service.update_user(created.id, update, &usage).await.unwrap();

        let new_hash = repo
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;
        assert_ne!(new_hash, original_hash);
        assert!(password::verify("p2", &new_hash).unwrap());
        assert!(!password::verify("p1", &new_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_stored_hash() {
        let (service, repo) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();
        let original_hash = repo
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;

        let update = UpdateUser {
            age: Some(30),
            ..Default::default()
        };
        service.update_user(created.id, update, &usage).await.unwrap();

        let hash_after = repo
            .find_by_id(created.id)
            .await
            .unwrap()
            .unwrap()
            .password_hash;
        assert_eq!(hash_after, original_hash);
    }

    #[tokio::test]
    async fn test_delete_returns_prior_record_once() {
        let (service, _) = service_with_repo();
        let usage = test_usage();

        let created = service.add_user(valid_input(), &usage).await.unwrap();

        let deleted = service.delete_user(created.id, &usage).await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert_eq!(deleted.email, "a@x.com");

        let err = service.delete_user(created.id, &usage).await.unwrap_err();
        assert!(matches!(err, UserError::Validation(ref m) if m == "User not found."));

        assert!(service.get_users(&usage).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_not_leaked() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|| {
            Err(UserError::Database {
                message: "connection reset by peer".to_string(),
                source: None,
            })
        });

        let service = UserService::new(repo);
        let err = service.get_users(&test_usage()).await.unwrap_err();
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }
}
