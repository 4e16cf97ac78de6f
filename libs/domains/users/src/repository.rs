use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult, UniqueField};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
///
/// Implementations enforce uniqueness of `username` and `email` and report a
/// violation as [`StoreError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Every user, in store order
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Persist `user` over the record with the same id. `false` if none matched.
    async fn update(&self, user: User) -> StoreResult<bool>;

    /// Remove a user, returning the removed document
    async fn delete(&self, id: ObjectId) -> StoreResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Keeps insertion order, like a collection scan without a sort.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn conflict(users: &[User], candidate: &User) -> Option<UniqueField> {
        let others = || users.iter().filter(|u| u.id != candidate.id);

        if others().any(|u| u.username == candidate.username) {
            Some(UniqueField::Username)
        } else if others().any(|u| u.email == candidate.email) {
            Some(UniqueField::Email)
        } else {
            None
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let user = user.into_user(ObjectId::new());

        if let Some(field) = Self::conflict(&users, &user) {
            return Err(StoreError::Duplicate(field));
        }

        users.push(user.clone());
        tracing::info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn update(&self, user: User) -> StoreResult<bool> {
        let mut users = self.users.write().await;

        let Some(position) = users.iter().position(|u| u.id == user.id) else {
            return Ok(false);
        };

        if let Some(field) = Self::conflict(&users, &user) {
            return Err(StoreError::Duplicate(field));
        }

        tracing::info!(user_id = %user.id, "Updated user");
        users[position] = user;
        Ok(true)
    }

    async fn delete(&self, id: ObjectId) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;

        let removed = users
            .iter()
            .position(|u| u.id == id)
            .map(|position| users.remove(position));

        if removed.is_some() {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}
