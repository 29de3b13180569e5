use crate::api::AppState;
use crate::db::{Store, timers};
use crate::errors::AppError;
use crate::models::{ActiveTimer, TimerInput};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
};

#[tracing::instrument(skip(store, data))]
pub async fn create_timer_handler(
    State(store): State<Store>,
    Json(data): Json<TimerInput>,
) -> Result<(StatusCode, Json<ActiveTimer>), AppError> {
    let timer = store
        .run(move |conn| timers::create_timer(conn, data))
        .await?;
    tracing::info!(id = %timer.id, "timer started");
    Ok((StatusCode::CREATED, Json(timer)))
}

#[tracing::instrument(skip(store))]
pub async fn delete_timer_handler(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.run(move |conn| timers::delete_timer(conn, &id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_timer_handler))
        .route("/:id", delete(delete_timer_handler))
}
