use crate::api::AppState;
use crate::db::{Store, entries};
use crate::errors::AppError;
use crate::models::{Entry, EntryInput};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};

#[tracing::instrument(skip(store, data))]
pub async fn create_entry_handler(
    State(store): State<Store>,
    Json(data): Json<EntryInput>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = store
        .run(move |conn| entries::create_entry(conn, data))
        .await?;
    tracing::info!(id = entry.id, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[tracing::instrument(skip(store, data))]
pub async fn update_entry_handler(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(data): Json<EntryInput>,
) -> Result<Json<Entry>, AppError> {
    let entry = store
        .run(move |conn| entries::update_entry(conn, id, data))
        .await?;
    Ok(Json(entry))
}

#[tracing::instrument(skip(store))]
pub async fn delete_entry_handler(
    State(store): State<Store>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    store
        .run(move |conn| entries::delete_entry(conn, id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_entry_handler))
        .route("/:id", put(update_entry_handler).delete(delete_entry_handler))
}
