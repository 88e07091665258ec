//! Ticker autocomplete endpoint.

use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;

use super::ApiResponse;
use crate::services::symbols;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Create the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

/// GET /api/search?q=
async fn search(Query(params): Query<SearchQuery>) -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::new(symbols::search(&params.q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_handler() {
        let Json(response) = search(Query(SearchQuery {
            q: "wip".to_string(),
        }))
        .await;
        assert_eq!(response.data, vec!["WIPRO"]);
    }
}
