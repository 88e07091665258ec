pub mod health;
pub mod market;
pub mod prediction;
pub mod search;
pub mod trades;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/market", market::router())
        .nest("/api/prediction", prediction::router())
        .nest("/api/search", search::router())
        .nest("/api/trades", trades::router())
}
