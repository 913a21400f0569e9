//! HTTP surface: the `POST /` route and the mapping from solve errors to
//! responses.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use dispatch_core::{InvalidInputError, RoutingEngine, SolutionReport, SolveError, solve_json};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

/// Routing engine shared by every request handler.
pub type SharedEngine = Arc<dyn RoutingEngine>;

/// Message returned in place of internal error details.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Largest request body accepted by [`router`], in bytes.
///
/// Leaves room for a dense matrix of a few thousand locations.
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024 * 1024;

/// Build the service router around `engine` with [`DEFAULT_BODY_LIMIT`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use dispatch_server::router;
/// use dispatch_solver_vrp::VrpEngine;
///
/// let app = router(Arc::new(VrpEngine::new()));
/// # let _ = app;
/// ```
#[must_use]
pub fn router(engine: SharedEngine) -> Router {
    router_with_body_limit(engine, DEFAULT_BODY_LIMIT)
}

/// Build the service router around `engine`, accepting bodies of at most
/// `body_limit` bytes.
///
/// Larger bodies are answered with 422 and a `{"message"}` body.
#[must_use]
pub fn router_with_body_limit(engine: SharedEngine, body_limit: usize) -> Router {
    Router::new()
        .route("/", post(solve))
        .with_state(engine)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Solve the posted payload on the blocking pool.
///
/// The body is taken as raw bytes so that malformed JSON reaches the
/// pipeline and is reported as invalid input.
async fn solve(
    State(engine): State<SharedEngine>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<Json<SolutionReport>, ApiError> {
    let body = payload.map_err(|rejection| unreadable_body(&rejection))?;
    let report = tokio::task::spawn_blocking(move || solve_json(&body, engine.as_ref()))
        .await
        .map_err(|err| SolveError::internal(format!("solve task failed: {err}")))??;
    Ok(Json(report))
}

fn unreadable_body(rejection: &BytesRejection) -> SolveError {
    tracing::debug!(status = %rejection.status(), "request body rejected");
    SolveError::InvalidInput(InvalidInputError::Malformed(rejection.body_text()))
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
}

/// A solve failure on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(SolveError);

impl ApiError {
    /// Status code for this failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            SolveError::InvalidInput(_) | SolveError::NoSolution => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SolveError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client; internal details stay in the logs.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.0 {
            SolveError::Internal(_) => INTERNAL_MESSAGE.to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<SolveError> for ApiError {
    fn from(error: SolveError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SolveError::Internal(detail) => tracing::error!(%detail, "solve failed internally"),
            other => tracing::debug!(error = %other, "request rejected"),
        }
        let body = ErrorBody {
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
