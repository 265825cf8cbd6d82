//! JSON REST handlers for users.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use portal_app::ports::UserRepository;
use portal_domain::user::User;

use crate::api::model::UserModel;
use crate::api::params::UserIdParam;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<UserModel>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
///
/// A missing user is a bare 404 without an error body, unlike delete.
pub enum GetResponse {
    Ok(Json<UserModel>),
    NotFound,
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Response carrying a single user, shared by create, update and delete.
pub enum UserResponse {
    Ok(Json<UserModel>),
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::Ok(Json(UserModel::from(user)))
    }
}

/// `GET /user/getAllUsers`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = state.user_service.list_users().await?;
    Ok(ListResponse::Ok(Json(
        users.into_iter().map(UserModel::from).collect(),
    )))
}

/// `GET /user/getUserById?userId=<int>`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    UserIdParam(id): UserIdParam,
) -> Result<GetResponse, ApiError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let response = match state.user_service.find_user(id).await? {
        Some(user) => GetResponse::Ok(Json(UserModel::from(user))),
        None => GetResponse::NotFound,
    };
    Ok(response)
}

/// `POST /user/addUser`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<UserModel>, JsonRejection>,
) -> Result<UserResponse, ApiError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(model) = payload?;
    let created = state.user_service.create_user(User::from(model)).await?;
    Ok(created.into())
}

/// `PUT /user/updateUser`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<UserModel>, JsonRejection>,
) -> Result<UserResponse, ApiError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(model) = payload?;
    let updated = state.user_service.update_user(User::from(model)).await?;
    Ok(updated.into())
}

/// `DELETE /user/deleteUser?userId=<int>`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    UserIdParam(id): UserIdParam,
) -> Result<UserResponse, ApiError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let deleted = state.user_service.delete_user(id).await?;
    Ok(deleted.into())
}
