//! User endpoints

use std::sync::Arc;

use axum::{extract::State, routing::{get, put}, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUserId};
use crate::http::server::AppState;
use crate::models::NewUser;

/// Create/update user request
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

impl UserRequest {
    fn validate(&self) -> Result<NewUser, ApiError> {
        Ok(NewUser::new(&self.name, &self.email)?)
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Write acknowledgement, e.g. `{"result":"created"}`
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: &'static str,
}

impl ResultResponse {
    fn json(result: &'static str) -> Json<Self> {
        Json(Self { result })
    }
}

/// GET /users - every user, newest id first
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users - create a user; the new id is not returned
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UserRequest>,
) -> Result<Json<ResultResponse>, ApiError> {
    let user = req.validate()?;
    UserRepo::new(&state.pool).create(&user).await?;
    Ok(ResultResponse::json("created"))
}

/// PUT /users/{id} - replace name and email
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
    ValidJson(req): ValidJson<UserRequest>,
) -> Result<Json<ResultResponse>, ApiError> {
    let user = req.validate()?;
    UserRepo::new(&state.pool).update(id, &user).await?;
    Ok(ResultResponse::json("updated"))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidUserId(id): ValidUserId,
) -> Result<Json<ResultResponse>, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(ResultResponse::json("deleted"))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
