//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::catalog::CatalogStats;
use crate::planner::{Planner, SearchError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search_flights))
        .route("/airports", get(list_airports))
        .route("/stats", get(catalog_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search for itineraries.
async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.into_query(state.config.strict)?;
    let catalog = state.catalog.snapshot().await;

    let result = Planner::new(&catalog, &state.config).search(&query)?;

    let results = result
        .itineraries
        .iter()
        .map(ItineraryResult::from_itinerary)
        .collect();

    Ok(Json(SearchResponse {
        results,
        total_candidates: result.total_candidates,
    }))
}

/// List every airport in the catalog.
async fn list_airports(State(state): State<AppState>) -> Json<AirportsResponse> {
    let catalog = state.catalog.snapshot().await;
    let airports = catalog.airports().map(|a| a.to_string()).collect();
    Json(AirportsResponse { airports })
}

/// Catalog size, index and load statistics.
async fn catalog_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.catalog.snapshot().await.stats())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogStore};
    use crate::planner::SearchConfig;

    const DATASET: &str = "\
(flight 2025 8 9 JFK ATL 100 0900 1100)
(flight 2025 8 9 ATL LAX 150 1230 1500)
(flight 2025 8 9 JFK LAX 400 0800 1400)
(flight 2025 8 9 JFK)
";

    fn state(config: SearchConfig) -> AppState {
        let catalog = Catalog::from_lines(DATASET.lines());
        AppState::new(CatalogStore::new(catalog), config)
    }

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        let query: String = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let uri: axum::http::Uri = format!("/search?{query}").parse().unwrap();
        let Query(params) = Query::<SearchParams>::try_from_uri(&uri).unwrap();
        params
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn search_with_connections() {
        let app = state(SearchConfig::default());
        let Json(response) = search_flights(
            State(app),
            Query(params(&[
                ("source", "JFK"),
                ("destination", "LAX"),
                ("year", "2025"),
                ("month", "8"),
                ("day", "9"),
                ("include_connections", "true"),
            ])),
        )
        .await
        .unwrap();

        assert_eq!(response.total_candidates, 2);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].kind, ItineraryKind::Connecting);
        assert_eq!(response.results[0].cost_cents, 250);
        assert_eq!(response.results[1].kind, ItineraryKind::Direct);
    }

    #[tokio::test]
    async fn invalid_query_is_bad_request() {
        let app = state(SearchConfig::default());
        let err = search_flights(
            State(app),
            Query(params(&[("source", "JFK"), ("destination", "jfk")])),
        )
        .await
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("source and destination must differ")
        );
    }

    #[tokio::test]
    async fn unknown_priority_follows_mode() {
        let strict = state(SearchConfig::default());
        let err = search_flights(State(strict), Query(params(&[("priority", "fastest")])))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let lenient = state(SearchConfig {
            strict: false,
            ..SearchConfig::default()
        });
        let Json(response) = search_flights(
            State(lenient),
            Query(params(&[("source", "JFK"), ("priority", "fastest")])),
        )
        .await
        .unwrap();
        let costs: Vec<u64> = response.results.iter().map(|r| r.cost_cents).collect();
        assert_eq!(costs, vec![100, 400]);
    }

    #[tokio::test]
    async fn airports_sorted() {
        let app = state(SearchConfig::default());
        let Json(response) = list_airports(State(app)).await;
        assert_eq!(response.airports, vec!["ATL", "JFK", "LAX"]);
    }

    #[tokio::test]
    async fn stats_count_dropped_records() {
        let app = state(SearchConfig::default());
        let Json(stats) = catalog_stats(State(app)).await;
        assert_eq!(stats.total_flights, 3);
        assert_eq!(stats.total_airports, 3);
        assert_eq!(stats.load.dropped, 1);
    }

    #[tokio::test]
    async fn router_builds() {
        let _router = create_router(state(SearchConfig::default()));
    }
}
