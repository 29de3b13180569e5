use crate::db::Store;
use axum::extract::FromRef;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}
