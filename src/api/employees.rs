use crate::api::AppState;
use crate::db::{Store, employees};
use crate::errors::AppError;
use crate::models::{Employee, EmployeeContact, NewEmployee};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};

/// Idempotent: an existing name answers 201 as well.
#[tracing::instrument(skip(store))]
pub async fn create_employee_handler(
    State(store): State<Store>,
    Json(data): Json<NewEmployee>,
) -> Result<(StatusCode, Json<NewEmployee>), AppError> {
    let name = data.name.clone();
    let inserted = store
        .run(move |conn| employees::create_employee(conn, &name))
        .await?;
    if !inserted {
        tracing::debug!(name = %data.name, "employee already present");
    }
    Ok((StatusCode::CREATED, Json(data)))
}

#[tracing::instrument(skip(store))]
pub async fn update_employee_handler(
    State(store): State<Store>,
    Path(name): Path<String>,
    Json(data): Json<EmployeeContact>,
) -> Result<Json<Employee>, AppError> {
    let employee = store
        .run(move |conn| employees::update_employee(conn, &name, &data))
        .await?;
    Ok(Json(employee))
}

#[tracing::instrument(skip(store))]
pub async fn delete_employee_handler(
    State(store): State<Store>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    store
        .run(move |conn| employees::delete_employee(conn, &name))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_employee_handler)).route(
        "/:name",
        put(update_employee_handler).delete(delete_employee_handler),
    )
}
