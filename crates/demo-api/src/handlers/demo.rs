//! Demo handlers
//!
//! Plain-text endpoints. Each one makes at most one repository call, and so
//! holds at most one pooled connection.

use axum::extract::State;
use demo_core::NewDemoUser;
use validator::Validate;

use crate::extractors::{IdPath, PathParam};
use crate::response::ApiResult;
use crate::state::AppState;

/// Greeting returned by the index route
pub const WELCOME: &str = "Welcome to the demo app";

/// Body for a lookup that matched no row
pub const UNKNOWN_USER: &str = "Unknown user id";

/// Static greeting, no database access
///
/// GET /
pub async fn index() -> &'static str {
    WELCOME
}

/// Insert a user and report its generated id
///
/// GET /post/{username}
pub async fn post_user(
    State(state): State<AppState>,
    PathParam(username): PathParam<String>,
) -> ApiResult<String> {
    let new_user = NewDemoUser::new(username);
    new_user.validate()?;

    let user = state.repo().create(&new_user).await?;
    Ok(format!("Inserted {} with id {}", user.username, user.id))
}

/// Look up a username by id
///
/// GET /user/{id}
pub async fn show_username(
    State(state): State<AppState>,
    PathParam(id): IdPath,
) -> ApiResult<String> {
    let user = state.repo().find_by_id(id).await?;
    Ok(user.map_or_else(|| UNKNOWN_USER.to_string(), |user| user.username))
}
