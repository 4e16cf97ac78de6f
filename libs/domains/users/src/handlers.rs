use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_helpers::{JsonBody, MessageResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    AuthenticatedResponse, EditUserRequest, LoginRequest, RegisterRequest, UserListResponse,
    UserRecord, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the accounts endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, authenticate, list_users, get_user, edit_user, delete_user),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        EditUserRequest,
        UserRecord,
        AuthenticatedResponse,
        UserListResponse,
        UserResponse,
        MessageResponse
    )),
    tags(
        (name = "Auth", description = "Registration and credential checks"),
        (name = "Users", description = "User record management (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Routes for `/auth/*` and `/users/*`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth", post(authenticate))
        .route("/users", get(list_users))
        .route("/users/details/{id}", get(get_user))
        .route("/users/edit/{id}", patch(edit_user))
        .route("/users/delete/{id}", delete(delete_user))
        .with_state(shared_service)
}

/// Create an account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Malformed JSON", body = MessageResponse),
        (status = 422, description = "Missing field, taken username/email or password mismatch", body = MessageResponse),
        (status = 500, description = "Store or hashing failure", body = MessageResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Usuário criado com sucesso!")),
    ))
}

/// Verify a username/password pair
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthenticatedResponse),
        (status = 404, description = "Unknown username", body = MessageResponse),
        (status = 422, description = "Missing field or wrong password", body = MessageResponse),
        (status = 500, description = "Store or hashing failure", body = MessageResponse)
    )
)]
async fn authenticate<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> UserResult<Json<AuthenticatedResponse>> {
    let username = service.authenticate(input).await?;
    Ok(Json(AuthenticatedResponse {
        msg: "Usuário autenticado".to_string(),
        username,
    }))
}

/// List every user
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserListResponse>> {
    let users = service.list_users().await?;
    Ok(Json(UserListResponse {
        msg: "Usuarios listados com sucesso!".to_string(),
        users: users.into_iter().map(UserRecord::from).collect(),
    }))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/details/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No such user", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(&id).await?;
    Ok(Json(UserResponse {
        msg: "Usuarios encontrado com sucesso!".to_string(),
        user: user.into(),
    }))
}

/// Overwrite a user's username and email
#[utoipa::path(
    patch,
    path = "/users/edit/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 422, description = "Username or email taken", body = MessageResponse),
        (status = 500, description = "No such user or store failure", body = MessageResponse)
    )
)]
async fn edit_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<EditUserRequest>,
) -> UserResult<Json<MessageResponse>> {
    service.edit_user(&id, input).await?;
    Ok(Json(MessageResponse::new("Usuarios encontrado com sucesso!")))
}

/// Delete a user, returning the removed record
#[utoipa::path(
    delete,
    path = "/users/delete/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (hex)")),
    responses(
        (status = 200, description = "User deleted", body = UserResponse),
        (status = 500, description = "No such user or store failure", body = MessageResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.delete_user(&id).await?;
    Ok(Json(UserResponse {
        msg: "Usuarios deletado com sucesso!".to_string(),
        user: user.into(),
    }))
}
