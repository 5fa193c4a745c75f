//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::{Collection, Database};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// MongoDB-backed user repository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoDB user repository
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection("users"),
        }
    }

    /// Create the unique indexes that back duplicate detection.
    ///
    /// The service-level duplicate checks are advisory; under concurrent
    /// writes these indexes are the authority, and violations surface as
    /// duplicate errors through [`map_write_error`].
    pub async fn create_indexes(&self) -> UserResult<()> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("users_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("users_username_unique".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

/// Map a write failure to a duplicate error when it is a unique-index
/// violation (server code 11000), otherwise pass it through as a store error.
fn map_write_error(err: mongodb::error::Error, user: &User) -> UserError {
    use mongodb::error::{ErrorKind, WriteFailure};

    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = &*err.kind {
        if write_error.code == 11000 {
            if write_error.message.contains("email") {
                return UserError::Duplicate {
                    field: "Email",
                    value: user.email.clone(),
                };
            }
            if write_error.message.contains("username") {
                return UserError::Duplicate {
                    field: "Username",
                    value: user.username.clone(),
                };
            }
        }
    }

    err.into()
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "_id": to_bson(&id)? })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, username))]
    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> UserResult<User> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, &user))?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        self.collection
            .replace_one(doc! { "_id": to_bson(&user.id)? }, &user)
            .await
            .map_err(|e| map_write_error(e, &user))?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": to_bson(&id)? })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
