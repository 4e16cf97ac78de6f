use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;
use thiserror::Error;

/// MongoDB server code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

/// Request fields that must be present and non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl RequiredField {
    pub fn message(self) -> &'static str {
        match self {
            RequiredField::Username => "Nome de usuário é obrigatorio!",
            RequiredField::Email => "Email é obrigatorio!",
            RequiredField::Password => "A senha é obrigatoria!",
            RequiredField::ConfirmPassword => "A confirmação da senha é obrigatoria!",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Username => "username",
            RequiredField::Email => "email",
            RequiredField::Password => "password",
            RequiredField::ConfirmPassword => "confirmPassword",
        })
    }
}

/// Fields backed by a unique index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn conflict_message(self) -> &'static str {
        match self {
            UniqueField::Username => "Nome de usuário ja utilizado",
            UniqueField::Email => "Email ja utilizado",
        }
    }

    /// Document key, which is also the prefix of the index name
    pub fn key(self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The operation a server-side failure happened in. Picks the client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Authenticate,
    List,
    Details,
    Edit,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Register | Operation::Authenticate => {
                axum_helpers::errors::messages::INTERNAL_ERROR
            }
            Operation::List => "Nao foi possivel encontrar a lista de usuarios!",
            Operation::Details | Operation::Edit => "Usuario nao encontrado!",
            Operation::Delete => "Nao foi possivel deletar o usuário, tentre novamente!",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Register => "register",
            Operation::Authenticate => "authenticate",
            Operation::List => "list users",
            Operation::Details => "user details",
            Operation::Edit => "edit user",
            Operation::Delete => "delete user",
        })
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("missing required field: {0}")]
    MissingField(RequiredField),

    #[error("{0} already in use")]
    Conflict(UniqueField),

    #[error("password and confirmation differ")]
    PasswordMismatch,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("no user with that username")]
    UnknownUsername,

    #[error("user not found")]
    NotFound,

    #[error("{operation} failed: {reason}")]
    Server { operation: Operation, reason: String },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn server(operation: Operation, reason: impl Into<String>) -> Self {
        UserError::Server {
            operation,
            reason: reason.into(),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingField(field) => AppError::UnprocessableEntity(field.message().into()),
            UserError::Conflict(field) => {
                AppError::UnprocessableEntity(field.conflict_message().into())
            }
            UserError::PasswordMismatch => {
                AppError::UnprocessableEntity("As senhas precisam ser iguais".into())
            }
            UserError::IncorrectPassword => AppError::UnprocessableEntity("Senha incorreta!".into()),
            UserError::UnknownUsername => AppError::NotFound("Usuário não existente!".into()),
            UserError::NotFound => AppError::NotFound("Usuario nao encontrado!".into()),
            UserError::Server { operation, reason } => {
                tracing::error!(%operation, %reason, "User operation failed");
                AppError::InternalServerError(operation.failure_message().into())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Failures reported by a [`UserRepository`](crate::repository::UserRepository)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate {0}")]
    Duplicate(UniqueField),

    #[error("database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Attribute a store failure to `operation`. Unique violations stay conflicts.
    pub fn during(self, operation: Operation) -> UserError {
        match self {
            StoreError::Duplicate(field) => UserError::Conflict(field),
            StoreError::Database(reason) => UserError::server(operation, reason),
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
                StoreError::Duplicate(duplicated_field(&write.message))
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Read the violated index out of an `E11000` message.
///
/// `E11000 duplicate key error collection: test.users index: email_1 dup key: { ... }`
fn duplicated_field(message: &str) -> UniqueField {
    let index = message
        .split_once("index: ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .unwrap_or_default();

    if index.starts_with(UniqueField::Email.key()) {
        UniqueField::Email
    } else {
        UniqueField::Username
    }
}

/// Password hashing failures
#[derive(Debug, Error)]
pub enum HashError {
    #[error("bcrypt: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl HashError {
    pub fn during(self, operation: Operation) -> UserError {
        UserError::server(operation, self.to_string())
    }
}
