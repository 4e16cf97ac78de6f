//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::StoreResult;
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// ```ignore
    /// let client = connect_from_config(&config).await?;
    /// let repo = MongoUserRepository::new(client.database(config.database()));
    /// repo.create_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Ensure unique indexes on `username` and `email`.
    ///
    /// Idempotent. Fails if existing documents already violate uniqueness.
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> StoreResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        let indexes = [
            IndexModel::builder()
                .keys(doc! { "username": 1 })
                .options(unique())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Unique user indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user(ObjectId::new());

        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> StoreResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> StoreResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": user.id }, &user)
            .await?;

        if result.matched_count > 0 {
            tracing::info!("User updated successfully");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> StoreResult<Option<User>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if removed.is_some() {
            tracing::info!("User deleted successfully");
        }
        Ok(removed)
    }
}
