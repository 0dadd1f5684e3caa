//! Resolution errors as RFC 9457 problem responses

use crate::contract::PageableError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

const OPAQUE_DETAIL: &str = "An unexpected error occurred";

/// Base of the problem type URIs this module emits
pub const PROBLEM_TYPE_BASE: &str = "https://httpstatuses.io";

/// RFC 9457 problem document returned when pagination cannot be resolved
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request path the problem occurred on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Problem {
            type_uri: format!("{}/{}", PROBLEM_TYPE_BASE, status.as_u16()),
            status: status.as_u16(),
            title: title.into(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Problem {
            detail: Some(detail.into()),
            ..self
        }
    }

    pub fn with_instance(self, instance: impl Into<String>) -> Self {
        Problem {
            instance: Some(instance.into()),
            ..self
        }
    }

    /// Route has no resolver binding for the requested extractor
    pub fn not_configured(what: &str) -> Self {
        tracing::error!("No {} binding installed on route", what);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Pagination Not Configured")
            .with_detail(OPAQUE_DETAIL)
    }

    /// Request carried nothing a pageable could be resolved from
    pub fn pagination_required(page_parameter: &str, size_parameter: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Pagination Required").with_detail(format!(
            "Provide the '{}' and '{}' query parameters",
            page_parameter, size_parameter
        ))
    }

    /// Like [`Self::pagination_required`] when the query parameter names are unknown
    pub fn pagination_required_for(handler_parameter: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Pagination Required").with_detail(format!(
            "Provide pagination for '{}'",
            handler_parameter
        ))
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/problem+json"))],
            Json(self),
        )
            .into_response()
    }
}

/// Problem for a failed resolution: client mistakes are 400, declaration
/// and configuration mistakes are an opaque 500
pub fn map_domain_error(error: PageableError) -> Problem {
    if !error.is_client_error() {
        tracing::error!(error = %error, "Pageable resolution misconfigured");
        return Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            .with_detail(OPAQUE_DETAIL);
    }

    let title = match &error {
        PageableError::InvalidDirection { .. } => "Invalid Sort Direction",
        _ => "Invalid Page Request",
    };
    Problem::new(StatusCode::BAD_REQUEST, title).with_detail(error.to_string())
}
