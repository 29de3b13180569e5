//! HTTP surface: JSON endpoints under `/api`, a health probe and the landing page.

use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod context;
pub mod data;
pub mod employees;
pub mod entries;
pub mod error;
pub mod health;
pub mod properties;
pub mod timers;

pub use context::AppState;

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .nest("/data", data::router())
        .nest("/entries", entries::router())
        .nest("/properties", properties::router())
        .nest("/employees", employees::router())
        .nest("/timers", timers::router());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .merge(health::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
