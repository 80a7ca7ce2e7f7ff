//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

/// definitions for the ghibliscape application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GhibliscapeError {
    /// When a required request parameter is missing
    BadRequest,
    /// When the catalog holds no images at all
    EmptyCatalog,
    /// When a requested image id does not exist
    NotFound(String),
    /// When a film filter matches no images
    FilmEmpty(String),
    /// When the catalog file cannot be read or parsed at startup
    LoadFailure(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl std::fmt::Display for GhibliscapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest => write!(f, "Missing required parameter: 'id' or 'q'"),
            Self::EmptyCatalog => write!(f, "No images available"),
            Self::NotFound(id) => write!(f, "Image with ID '{}' not found", id),
            Self::FilmEmpty(code) => write!(f, "No images found for film '{}'", code),
            Self::LoadFailure(message) => write!(f, "Catalog load failure: {}", message),
            Self::InternalServerError(message) => write!(f, "Internal server error: {}", message),
        }
    }
}

impl std::error::Error for GhibliscapeError {}

impl IntoResponse for GhibliscapeError {
    fn into_response(self) -> axum::response::Response {
        match self {
            GhibliscapeError::BadRequest => {
                info!("Bad request received");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Missing required parameter: 'id' or 'q'"})),
                )
                    .into_response()
            }
            GhibliscapeError::EmptyCatalog => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "No images available"})),
            )
                .into_response(),
            GhibliscapeError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("Image with ID '{}' not found", id)})),
            )
                .into_response(),
            GhibliscapeError::FilmEmpty(code) => (
                StatusCode::NOT_FOUND,
                Json(json!({"error": format!("No images found for film '{}'", code)})),
            )
                .into_response(),
            GhibliscapeError::LoadFailure(message) => {
                tracing::error!("Catalog load failure: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Catalog unavailable"})),
                )
                    .into_response()
            }
            GhibliscapeError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
