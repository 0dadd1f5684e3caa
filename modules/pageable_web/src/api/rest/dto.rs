//! REST DTOs with serde derives for HTTP API

use crate::domain::PageLinks;
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Paging metadata of a page response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMetadataDto {
    /// Requested page size
    #[schema(example = 20)]
    pub size: u32,

    /// Zero-based page number
    #[schema(example = 0)]
    pub number: u32,

    /// Total number of elements across all pages
    #[schema(example = 135)]
    pub total_elements: u64,

    /// Total number of pages
    #[schema(example = 7)]
    pub total_pages: u64,

    /// Sort the page was produced with; omitted when unsorted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortOrderDto>,
}

/// Page response: content plus paging metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub page: PageMetadataDto,
}

/// Single sort order as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortOrderDto {
    #[schema(example = "createdAt")]
    pub property: String,

    #[schema(example = "desc")]
    pub direction: String,

    #[serde(default)]
    pub ignore_case: bool,
}

/// Pagination query parameters (OpenAPI documentation)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageableQueryParams {
    /// Zero-based page index
    #[param(minimum = 0, example = 0)]
    pub page: Option<u32>,

    /// Page size, capped by the server's maximum
    #[param(minimum = 1, example = 20)]
    pub size: Option<u32>,

    /// Sort expression `property[,property...][,asc|desc][,ignorecase]`; repeatable
    #[param(example = "name,desc")]
    pub sort: Option<String>,
}

/// JSON page response with an optional RFC 8288 `Link` header
#[derive(Debug, Clone)]
pub struct PagedJson<T> {
    pub body: PageDto<T>,
    pub links: Option<PageLinks>,
}

impl<T> PagedJson<T> {
    pub fn new(body: PageDto<T>) -> Self {
        Self { body, links: None }
    }

    pub fn with_links(mut self, links: PageLinks) -> Self {
        self.links = Some(links);
        self
    }
}

impl<T: Serialize> IntoResponse for PagedJson<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        if let Some(links) = self.links {
            match HeaderValue::from_str(&links.to_link_header()) {
                Ok(value) => {
                    response.headers_mut().insert(header::LINK, value);
                }
                Err(err) => tracing::warn!(error = %err, "Dropping unrepresentable Link header"),
            }
        }
        response
    }
}
