use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored user document
///
/// `password` always holds a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A user ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn into_user(self, id: ObjectId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

/// User as rendered in API responses, with `_id` as a hex string.
///
/// The password hash is part of the record; it is never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0ffee0000000000abcd")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
            password: user.password,
        }
    }
}

/// Body of `POST /auth/register`
///
/// Every field is optional on the wire so a missing one can be reported by
/// name. `null` and `""` count as missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

/// Body of `POST /auth`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `PATCH /users/edit/{id}`. Absent fields overwrite with `""`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct EditUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedResponse {
    #[schema(example = "Usuário autenticado")]
    pub msg: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    #[schema(example = "Usuarios listados com sucesso!")]
    pub msg: String,
    pub users: Vec<UserRecord>,
}

/// A message plus a single user snapshot (details and delete)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub msg: String,
    pub user: UserRecord,
}
