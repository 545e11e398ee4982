//! HTTP/WebSocket API for the bracket server.
//!
//! Every tournament lives under its own path prefix and is created on first
//! reference, so there is no explicit "create tournament" call.
//!
//! # Modules
//!
//! - [`teams`]: Team registration, listing and roster joins
//! - [`matches`]: Match scheduling, scoring and bracket views
//! - [`events`]: WebSocket feed of bracket events for one tournament
//! - [`request_id`]: Request correlation, logging and HTTP metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health                          - Server health status
//! GET  /t/{tid}/teams                   - List teams
//! POST /t/{tid}/teams                   - Create team
//! POST /t/{tid}/teams/join              - Join a team by code
//! GET  /t/{tid}/matches                 - List matches
//! POST /t/{tid}/matches                 - Create or overwrite a match
//! POST /t/{tid}/matches/{mid}/start     - Start a scheduled match
//! POST /t/{tid}/matches/{mid}/score     - Submit a final score
//! GET  /t/{tid}/bracket                 - Matches grouped by round
//! GET  /t/{tid}/nownext                 - Live and upcoming matches
//! GET  /t/{tid}/schedule                - Court and start time per match
//! GET  /t/{tid}/rules                   - Rules page (HTML)
//! GET  /t/{tid}/events                  - WebSocket event feed
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cornhole::{BracketConfig, BracketManager, InMemoryStore};
//! use cornhole_server::api::{AppState, create_router};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BracketManager::new(Arc::new(InMemoryStore::new()), BracketConfig::default());
//! let app = create_router(AppState::new(manager));
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively so a browser frontend on another origin
//! can call the API.

pub mod events;
pub mod matches;
pub mod request_id;
pub mod teams;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use cornhole::{BracketError, BracketManager, ErrorKind};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::DEFAULT_RULES;
use crate::metrics;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<BracketManager>,
    /// HTML served by the rules page
    pub rules: Arc<str>,
}

impl AppState {
    pub fn new(manager: BracketManager) -> Self {
        Self::with_rules(manager, DEFAULT_RULES)
    }

    pub fn with_rules(manager: BracketManager, rules: impl Into<Arc<str>>) -> Self {
        Self {
            manager: Arc::new(manager),
            rules: rules.into(),
        }
    }

    /// Refresh the tournaments gauge; any tournament route may have created one
    pub(crate) async fn record_tournaments(&self) {
        metrics::tournaments_tracked(self.manager.tournament_count().await);
    }
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let tournament_routes = Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/join", post(teams::join_team))
        .route(
            "/matches",
            get(matches::list_matches).post(matches::create_match),
        )
        .route("/matches/{match_id}/start", post(matches::start_match))
        .route("/matches/{match_id}/score", post(matches::submit_score))
        .route("/bracket", get(matches::bracket))
        .route("/nownext", get(matches::now_next))
        .route("/schedule", get(matches::schedule))
        .route("/rules", get(rules))
        .route("/events", get(events::events_handler));

    Router::new()
        .route("/health", get(health_check))
        .nest("/t/{tournament_id}", tournament_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_id::request_id_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/health
/// # {"status":"ok","version":"0.1.0","tournaments":2,"timestamp":"2026-04-11T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let tournaments = state.manager.tournament_count().await;

    let response = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "tournaments": tournaments,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}

/// Rules page for a tournament.
///
/// Every tournament shares the server-wide rules text.
async fn rules(State(state): State<AppState>) -> Html<String> {
    Html(state.rules.to_string())
}

/// Success envelope: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Bracket error carried out of a handler
#[derive(Debug)]
pub struct ApiError(pub BracketError);

impl From<BracketError> for ApiError {
    fn from(err: BracketError) -> Self {
        Self(err)
    }
}

/// Blank optional strings count as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// HTTP status for an error category
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::CapacityExceeded => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        tracing::debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornhole::tournament::{MatchStatus, Slot};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                BracketError::TeamNotFound {
                    slot: Slot::A,
                    team_id: "x".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (BracketError::JoinCodeNotFound, StatusCode::NOT_FOUND),
            (
                BracketError::InvalidScore { a: 1, b: 1 },
                StatusCode::BAD_REQUEST,
            ),
            (
                BracketError::NotScorable {
                    status: MatchStatus::Final,
                },
                StatusCode::CONFLICT,
            ),
            (BracketError::RosterFull { cap: 3 }, StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }
}
