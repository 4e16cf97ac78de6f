//! User Service - account business rules

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{Operation, RequiredField, UniqueField, UserError, UserResult};
use crate::models::{EditUserRequest, LoginRequest, NewUser, RegisterRequest, User};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

/// Registration, authentication and user record management.
///
/// Presence checks run before any store access; every store or hashing
/// failure is reported as [`UserError::Server`] tagged with the operation.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: self.hasher,
        }
    }
}

impl<R: UserRepository> UserService<R> {
    /// Service hashing at the default bcrypt cost
    pub fn new(repository: R) -> Self {
        Self::with_hasher(repository, PasswordHasher::default())
    }

    pub fn with_hasher(repository: R, hasher: PasswordHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    /// Create an account.
    ///
    /// Checks, in order: field presence, username taken, email taken,
    /// password confirmation. A unique index violation on insert is reported
    /// the same way as a failed pre-check.
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        let username = required(input.username, RequiredField::Username)?;
        let email = required(input.email, RequiredField::Email)?;
        let password = required(input.password, RequiredField::Password)?;
        let confirm_password = required(input.confirm_password, RequiredField::ConfirmPassword)?;

        let op = Operation::Register;

        if self
            .repository
            .find_by_username(&username)
            .await
            .map_err(|e| e.during(op))?
            .is_some()
        {
            return Err(UserError::Conflict(UniqueField::Username));
        }

        if self
            .repository
            .find_by_email(&email)
            .await
            .map_err(|e| e.during(op))?
            .is_some()
        {
            return Err(UserError::Conflict(UniqueField::Email));
        }

        if password != confirm_password {
            return Err(UserError::PasswordMismatch);
        }

        let password = self.hasher.hash(&password).await.map_err(|e| e.during(op))?;

        self.repository
            .create(NewUser {
                username,
                email,
                password,
            })
            .await
            .map_err(|e| e.during(op))
    }

    /// Check a username/password pair. Returns the submitted username.
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn authenticate(&self, input: LoginRequest) -> UserResult<String> {
        let username = required(input.username, RequiredField::Username)?;
        let password = required(input.password, RequiredField::Password)?;

        let op = Operation::Authenticate;

        let user = self
            .repository
            .find_by_username(&username)
            .await
            .map_err(|e| e.during(op))?
            .ok_or(UserError::UnknownUsername)?;

        let matches = self
            .hasher
            .verify(&password, &user.password)
            .await
            .map_err(|e| e.during(op))?;

        if !matches {
            return Err(UserError::IncorrectPassword);
        }

        tracing::info!("User authenticated");
        Ok(username)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository
            .list()
            .await
            .map_err(|e| e.during(Operation::List))
    }

    /// Look a user up by hex id. Ids that cannot be ObjectIds match nothing.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<User> {
        let Some(id) = parse_id(id) else {
            return Err(UserError::NotFound);
        };

        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.during(Operation::Details))?
            .ok_or(UserError::NotFound)
    }

    /// Overwrite username and email. Absent values become `""`; the password
    /// hash is left as stored.
    #[instrument(skip(self, input))]
    pub async fn edit_user(&self, id: &str, input: EditUserRequest) -> UserResult<User> {
        let op = Operation::Edit;

        let Some(object_id) = parse_id(id) else {
            return Err(UserError::server(op, format!("invalid user id {id:?}")));
        };

        let mut user = self
            .repository
            .find_by_id(object_id)
            .await
            .map_err(|e| e.during(op))?
            .ok_or_else(|| UserError::server(op, format!("no user with id {id}")))?;

        user.username = input.username.unwrap_or_default();
        user.email = input.email.unwrap_or_default();

        let matched = self
            .repository
            .update(user.clone())
            .await
            .map_err(|e| e.during(op))?;

        if !matched {
            return Err(UserError::server(op, format!("user {id} vanished before update")));
        }

        Ok(user)
    }

    /// Remove a user and return the removed record.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<User> {
        let op = Operation::Delete;

        let Some(object_id) = parse_id(id) else {
            return Err(UserError::server(op, format!("invalid user id {id:?}")));
        };

        self.repository
            .delete(object_id)
            .await
            .map_err(|e| e.during(op))?
            .ok_or_else(|| UserError::server(op, format!("no user with id {id}")))
    }
}

/// `None`, `null` and `""` are all missing.
fn required(value: Option<String>, field: RequiredField) -> UserResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(UserError::MissingField(field))
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    fn register_input(username: &str, email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            confirm_password: Some(confirm.into()),
        }
    }

    fn stored(username: &str, hash: &str) -> User {
        User {
            id: ObjectId::new(),
            username: username.into(),
            email: format!("{username}@x.com"),
            password: hash.into(),
        }
    }

    #[tokio::test]
    async fn test_register_reports_first_missing_field_without_touching_store() {
        // No expectations: any repository call panics.
        let service = UserService::with_hasher(MockUserRepository::new(), hasher());

        let cases = [
            (RegisterRequest::default(), RequiredField::Username),
            (
                RegisterRequest {
                    username: Some("ana".into()),
                    email: Some(String::new()),
                    ..Default::default()
                },
                RequiredField::Email,
            ),
            (
                RegisterRequest {
                    username: Some("ana".into()),
                    email: Some("ana@x.com".into()),
                    ..Default::default()
                },
                RequiredField::Password,
            ),
            (
                RegisterRequest {
                    confirm_password: None,
                    ..register_input("ana", "ana@x.com", "p1", "p1")
                },
                RequiredField::ConfirmPassword,
            ),
        ];

        for (input, field) in cases {
            let err = service.register(input).await.unwrap_err();
            assert!(
                matches!(err, UserError::MissingField(f) if f == field),
                "expected missing {field}, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_register_username_taken_wins_over_email_taken() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("ana"))
            .returning(|_| Ok(Some(stored("ana", "h"))));
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .register(register_input("ana", "ana@x.com", "p1", "p1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Conflict(UniqueField::Username)));
    }

    #[tokio::test]
    async fn test_register_conflicts_are_checked_before_password_mismatch() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored("bia", "h"))));
        repo.expect_create().never();

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .register(register_input("ana", "bia@x.com", "p1", "p2"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Conflict(UniqueField::Email)));
    }

    #[tokio::test]
    async fn test_register_password_mismatch_creates_nothing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().never();

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .register(register_input("ana", "ana@x.com", "p1", "p2"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|user| {
                user.username == "ana"
                    && user.email == "ana@x.com"
                    && user.password != "p1"
                    && bcrypt::verify("p1", &user.password).unwrap_or(false)
            })
            .times(1)
            .returning(|user| Ok(user.into_user(ObjectId::new())));

        let service = UserService::with_hasher(repo, hasher());
        let user = service
            .register(register_input("ana", "ana@x.com", "p1", "p1"))
            .await
            .unwrap();

        assert_eq!(user.username, "ana");
    }

    #[tokio::test]
    async fn test_register_insert_race_reports_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(StoreError::Duplicate(UniqueField::Email)));

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .register(register_input("ana", "ana@x.com", "p1", "p1"))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Conflict(UniqueField::Email)));
    }

    #[tokio::test]
    async fn test_register_store_failure_is_server_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(StoreError::Database("timeout".into())));

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .register(register_input("ana", "ana@x.com", "p1", "p1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UserError::Server { operation: Operation::Register, .. }
        ));
    }

    #[tokio::test]
    async fn test_authenticate_outcomes() {
        let hash = bcrypt::hash("p1", 4).unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("ana"))
            .returning(move |_| Ok(Some(stored("ana", &hash))));
        repo.expect_find_by_username()
            .with(eq("ghost"))
            .returning(|_| Ok(None));

        let service = UserService::with_hasher(repo, hasher());
        let login = |username: &str, password: &str| LoginRequest {
            username: Some(username.into()),
            password: Some(password.into()),
        };

        assert_eq!(service.authenticate(login("ana", "p1")).await.unwrap(), "ana");
        assert!(matches!(
            service.authenticate(login("ana", "wrong")).await,
            Err(UserError::IncorrectPassword)
        ));
        assert!(matches!(
            service.authenticate(login("ghost", "p1")).await,
            Err(UserError::UnknownUsername)
        ));
        assert!(matches!(
            service
                .authenticate(LoginRequest {
                    username: Some("ana".into()),
                    password: None,
                })
                .await,
            Err(UserError::MissingField(RequiredField::Password))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_with_corrupt_hash_is_server_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored("ana", "plaintext"))));

        let service = UserService::with_hasher(repo, hasher());
        let err = service
            .authenticate(LoginRequest {
                username: Some("ana".into()),
                password: Some("plaintext".into()),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UserError::Server { operation: Operation::Authenticate, .. }
        ));
    }

    #[tokio::test]
    async fn test_list_failure_is_tagged_with_list() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(StoreError::Database("no primary".into())));

        let service = UserService::new(repo);
        let err = service.list_users().await.unwrap_err();

        assert!(matches!(err, UserError::Server { operation: Operation::List, .. }));
    }

    #[tokio::test]
    async fn test_get_user_with_malformed_id_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let service = UserService::new(repo);
        assert!(matches!(
            service.get_user("not-an-id").await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_edit_overwrites_identity_and_keeps_hash() {
        let existing = stored("ana", "$2b$04$keep");
        let id = existing.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(move |user| {
                user.id == id
                    && user.username == "ana2"
                    && user.email.is_empty()
                    && user.password == "$2b$04$keep"
            })
            .times(1)
            .returning(|_| Ok(true));

        let service = UserService::new(repo);
        let updated = service
            .edit_user(
                &id.to_hex(),
                EditUserRequest {
                    username: Some("ana2".into()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "ana2");
    }

    #[tokio::test]
    async fn test_edit_missing_user_is_server_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = UserService::new(repo);
        let err = service
            .edit_user(&ObjectId::new().to_hex(), EditUserRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Server { operation: Operation::Edit, .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_server_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(None));

        let service = UserService::new(repo);
        let err = service
            .delete_user(&ObjectId::new().to_hex())
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Server { operation: Operation::Delete, .. }));
    }
}
