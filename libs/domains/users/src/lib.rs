//! Users Domain
//!
//! Account registration, credential checks and user record management.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, { "msg": ... } responses
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Presence checks, uniqueness, bcrypt
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents and request/response DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{
    HashError, Operation, RequiredField, StoreError, StoreResult, UniqueField, UserError,
    UserResult,
};
pub use handlers::ApiDoc;
pub use models::{
    AuthenticatedResponse, EditUserRequest, LoginRequest, NewUser, RegisterRequest, User,
    UserListResponse, UserRecord, UserResponse,
};
pub use self::mongodb::MongoUserRepository;
pub use password::{DEFAULT_COST, PasswordHasher};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
