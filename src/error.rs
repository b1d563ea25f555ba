use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Crate-wide error taxonomy. Every failure is caught at the request
/// boundary and converted to the uniform `{success: false, error}` envelope;
/// none crash the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or empty required input. Not retryable.
    #[error("{0}")]
    InvalidInput(String),
    /// The external embedding capability failed. Surfaced verbatim.
    #[error("embedding request failed: {0:#}")]
    UpstreamEmbedding(#[source] anyhow::Error),
    /// The external generation capability failed or returned no usable text.
    #[error("generation request failed: {0:#}")]
    UpstreamGeneration(#[source] anyhow::Error),
    /// Malformed candidate or context document shape.
    #[error("{0}")]
    InternalScoring(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamEmbedding(_)
            | Error::UpstreamGeneration(_)
            | Error::InternalScoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{self:#}");
        }
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// Uniform success envelope: `{success: true, data: {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
