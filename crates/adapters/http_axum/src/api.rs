//! JSON REST API handler modules.

pub mod model;
pub mod params;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{delete, get, post, put};

use portal_app::ports::UserRepository;

use crate::state::AppState;

/// Prefix every user route is nested under.
pub const USER_BASE_PATH: &str = "/user";
pub const GET_ALL_USERS: &str = "/getAllUsers";
pub const GET_USER_BY_ID: &str = "/getUserById";
pub const ADD_USER: &str = "/addUser";
pub const UPDATE_USER: &str = "/updateUser";
pub const DELETE_USER: &str = "/deleteUser";

/// Build the `/user` sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(GET_ALL_USERS, get(users::list::<R>))
        .route(GET_USER_BY_ID, get(users::get::<R>))
        .route(ADD_USER, post(users::create::<R>))
        .route(UPDATE_USER, put(users::update::<R>))
        .route(DELETE_USER, delete(users::delete::<R>))
}
