use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateItemRequest, ItemResponse, UpdateItemRequest},
    repo,
};
use crate::{auth::CurrentUser, error::ApiError, state::AppState};

const ITEM_NOT_FOUND: &str = "Item not found";

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn list_items(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = repo::list_by_owner(&state.db, user.id).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn create_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = repo::create(
        &state.db,
        user.id,
        &payload.title,
        payload.description.as_deref(),
    )
    .await?;
    info!(item_id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn get_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = repo::find_owned(&state.db, id, user.id)
        .await?
        .ok_or(ApiError::NotFound(ITEM_NOT_FOUND))?;
    Ok(Json(item.into()))
}

#[instrument(skip(state, user, payload), fields(user_id = user.id))]
pub async fn update_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = repo::update_owned(
        &state.db,
        id,
        user.id,
        payload.title.as_deref(),
        payload.description_change(),
    )
    .await?
    .ok_or(ApiError::NotFound(ITEM_NOT_FOUND))?;

    info!(item_id = item.id, "item updated");
    Ok(Json(item.into()))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub async fn delete_item(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !repo::delete_owned(&state.db, id, user.id).await? {
        return Err(ApiError::NotFound(ITEM_NOT_FOUND));
    }

    info!(item_id = id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
