//! User CRUD endpoints
//!
//! | Method | Path         |                                   |
//! |--------|--------------|-----------------------------------|
//! | GET    | /users       | list with `count`/`start` params  |
//! | POST   | /user        | create from JSON body             |
//! | GET    | /user/{id}   | fetch by numeric id               |
//! | PUT    | /user/{id}   | full-replace update by numeric id |
//! | DELETE | /user/{id}   | delete by numeric id              |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::users::{ListWindow, NewUser, User, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Parse a path id: digits only, and it must fit in an i64.
fn parse_user_id(raw: &str) -> Result<i64, ApiError> {
    if !ID_PATTERN.is_match(raw) {
        return Err(ApiError::InvalidId);
    }
    raw.parse::<i64>().map_err(|_| ApiError::InvalidId)
}

/// Raw listing parameters; kept as strings so unparsable values can
/// silently default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
struct ListParams {
    count: Option<String>,
    start: Option<String>,
}

fn int_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// GET /users - list a window of users ordered by id
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let window = ListWindow::clamped(
        int_or_zero(params.start.as_deref()),
        int_or_zero(params.count.as_deref()),
    );
    let users = UserRepo::new(&state.pool).list(window).await?;

    Ok(Json(users))
}

/// POST /user - create a user, store assigns the id
async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(fields) = body.map_err(|_| ApiError::InvalidPayload)?;
    let user = UserRepo::new(&state.pool).create(fields).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /user/{id} - fetch a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = UserRepo::new(&state.pool).get(id).await?;

    Ok(Json(user))
}

/// PUT /user/{id} - full-replace update; the path id wins over any body id
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&id)?;
    let Json(fields) = body.map_err(|_| ApiError::InvalidPayload)?;
    let user = UserRepo::new(&state.pool).update(id, fields).await?;

    Ok(Json(user))
}

/// DELETE /user/{id} - idempotent delete
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_user_id(&id)?;
    UserRepo::new(&state.pool).delete(id).await?;

    Ok(Json(json!({ "result": "success" })))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route(
            "/user/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
