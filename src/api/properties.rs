use crate::api::AppState;
use crate::db::{Store, properties};
use crate::errors::AppError;
use crate::models::{Property, PropertyInput};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};

#[tracing::instrument(skip(store, data))]
pub async fn create_property_handler(
    State(store): State<Store>,
    Json(data): Json<PropertyInput>,
) -> Result<(StatusCode, Json<Property>), AppError> {
    let property = store
        .run(move |conn| properties::create_property(conn, data))
        .await?;
    tracing::info!(id = property.id, "property created");
    Ok((StatusCode::CREATED, Json(property)))
}

#[tracing::instrument(skip(store, data))]
pub async fn update_property_handler(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Json(data): Json<PropertyInput>,
) -> Result<Json<Property>, AppError> {
    let property = store
        .run(move |conn| properties::update_property(conn, id, data))
        .await?;
    Ok(Json(property))
}

/// Deletes by address, not id: entries only know the address.
#[tracing::instrument(skip(store))]
pub async fn delete_property_handler(
    State(store): State<Store>,
    Path(address): Path<String>,
) -> Result<StatusCode, AppError> {
    store
        .run(move |conn| properties::delete_property(conn, &address))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_property_handler)).route(
        "/:key",
        put(update_property_handler).delete(delete_property_handler),
    )
}
