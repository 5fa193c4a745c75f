use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use axum_helpers::{RateUsage, UuidPath};
use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// Create the users router with all HTTP endpoints.
///
/// The rate-usage snapshot is taken from request extensions, where the
/// accounting middleware put it, and passed explicitly to every operation.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// List all users
///
/// GET /users
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(usage): Extension<RateUsage>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.get_users(&usage).await?;
    Ok(Json(users))
}

/// Create a new user
///
/// POST /users
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Extension(usage): Extension<RateUsage>,
    Json(input): Json<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.add_user(input, &usage).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update the supplied fields of a user
///
/// PUT /users/{id}
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    Extension(usage): Extension<RateUsage>,
    Json(input): Json<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input, &usage).await?;
    Ok(Json(user))
}

/// Delete a user, returning the record as it existed before deletion
///
/// DELETE /users/{id}
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    Extension(usage): Extension<RateUsage>,
) -> UserResult<Json<UserResponse>> {
    let user = service.delete_user(id, &usage).await?;
    Ok(Json(user))
}
