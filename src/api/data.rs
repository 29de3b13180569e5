use crate::api::AppState;
use crate::db::{self, Store};
use crate::errors::AppError;
use crate::models::AllData;
use axum::{Json, Router, extract::State, routing::get};

#[tracing::instrument(skip(store))]
pub async fn get_all_data_handler(State(store): State<Store>) -> Result<Json<AllData>, AppError> {
    let data = store.run(db::data::load_all).await?;
    Ok(Json(data))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_all_data_handler))
}
