//! HTTP error mapping
//!
//! Validation and not-found outcomes are routine and only logged at debug.
//! Render failures are logged in full and answered with a generic body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

use crate::catalog::CatalogKind;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Path id was empty after trimming
    #[error("{} ID is required", .0.label())]
    MissingId(CatalogKind),

    #[error("{} '{id}' not found", .kind.label())]
    NotFound { kind: CatalogKind, id: String },

    /// Query string value could not be parsed
    #[error("{0}")]
    BadQuery(String),

    /// Path under a catalog prefix that no handler serves
    #[error("Not found")]
    UnknownRoute,

    #[error("Failed to generate markdown")]
    Render {
        kind: CatalogKind,
        id: String,
        #[source]
        source: fmt::Error,
    },

    #[error("Failed to generate catalog index")]
    IndexRender(#[source] fmt::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingId(_) | ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::Render { .. } | ApiError::IndexRender(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn log(&self) {
        match self {
            ApiError::Render { kind, id, source } => {
                error!(%kind, %id, error = %source, "Markdown generation failed");
            }
            ApiError::IndexRender(source) => {
                error!(error = %source, "Catalog index generation failed");
            }
            other => debug!(status = %other.status(), "{}", other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), self.to_string()).into_response()
    }
}

/// Same mapping as `ApiError`, with a `{"error": "..."}` JSON body
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl From<ApiError> for JsonError {
    fn from(err: ApiError) -> Self {
        JsonError(err)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        self.0.log();
        let body = serde_json::json!({ "error": self.0.to_string() });
        (self.0.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::MissingId(CatalogKind::Components).to_string(),
            "Component ID is required"
        );
        assert_eq!(
            ApiError::MissingId(CatalogKind::Blocks).to_string(),
            "Block ID is required"
        );
        assert_eq!(
            ApiError::NotFound {
                kind: CatalogKind::Components,
                id: "does-not-exist".to_string()
            }
            .to_string(),
            "Component 'does-not-exist' not found"
        );
    }

    #[test]
    fn test_render_error_hides_detail() {
        let err = ApiError::Render {
            kind: CatalogKind::Blocks,
            id: "sign-in-01".to_string(),
            source: fmt::Error,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to generate markdown");

        let err = ApiError::IndexRender(fmt::Error);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to generate catalog index");
    }
}
