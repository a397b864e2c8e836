/// User API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use userhub_core::{CreateUser, User, UserId};

/// POST /users
/// Create a user from a `{"name": ...}` payload
pub async fn create_user(
    State(app_state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let body = body.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let req = decode_create_user(&body)?;

    let user = app_state.store.create_user(req).await?;
    tracing::info!(user_id = user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/:id
/// Fetch one user
pub async fn get_user(
    State(app_state): State<AppState>,
    id: std::result::Result<Path<UserId>, PathRejection>,
) -> Result<Json<User>> {
    let Path(id) = id.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let user = app_state.store.get_user(id).await?;
    Ok(Json(user))
}

/// GET /users
/// List all users; always an array, empty when there are none
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = app_state.store.get_all_users().await?;
    Ok(Json(users))
}

/// Decode the first JSON value of the body, whatever its content type.
/// A `null` body is an empty payload.
fn decode_create_user(body: &[u8]) -> Result<CreateUser> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<CreateUser>>();
    match values.next() {
        Some(Ok(payload)) => Ok(payload.unwrap_or_default()),
        Some(Err(e)) => Err(ServerError::BadRequest(e.to_string())),
        None => Err(ServerError::BadRequest("empty request body".to_string())),
    }
}
