//! Request context handed to resolvers

use axum::http::{request::Parts, HeaderMap, Uri};
use std::collections::HashMap;

/// View over an incoming HTTP request: decoded query parameters, headers, URI
#[derive(Debug, Clone, Default)]
pub struct WebRequest {
    uri: Option<Uri>,
    headers: HeaderMap,
    parameters: HashMap<String, Vec<String>>,
}

impl WebRequest {
    /// Capture the request line and headers of an axum request
    pub fn from_parts(parts: &Parts) -> Self {
        let mut request = Self::from_query(parts.uri.query().unwrap_or_default());
        request.uri = Some(parts.uri.clone());
        request.headers = parts.headers.clone();
        request
    }

    /// Request carrying only the parameters of a raw `application/x-www-form-urlencoded` query
    pub fn from_query(query: &str) -> Self {
        let mut parameters: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            parameters
                .entry(name.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self {
            uri: None,
            headers: HeaderMap::new(),
            parameters,
        }
    }

    /// Append a parameter value
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// First value of a parameter
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of a parameter in request order, empty when absent
    pub fn parameter_values(&self, name: &str) -> &[String] {
        self.parameters
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_query_decoding_keeps_repeated_values() {
        let request = WebRequest::from_query("sort=name%2Cdesc&sort=id&page=2&q=a+b");
        assert_eq!(request.parameter("page"), Some("2"));
        assert_eq!(request.parameter_values("sort"), ["name,desc", "id"]);
        assert_eq!(request.parameter("q"), Some("a b"));
        assert!(request.parameter_values("size").is_empty());
        assert!(!request.has_parameter("size"));
    }

    #[test]
    fn test_from_parts_captures_uri_and_headers() {
        let (parts, _) = Request::builder()
            .uri("/orders?page=1&size=5")
            .header("x-request-id", "abc")
            .body(())
            .unwrap()
            .into_parts();

        let request = WebRequest::from_parts(&parts);
        assert_eq!(request.parameter("size"), Some("5"));
        assert_eq!(request.header("x-request-id"), Some("abc"));
        assert_eq!(request.uri().map(|u| u.path()), Some("/orders"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let request = WebRequest::from_query("sort=");
        assert!(request.has_parameter("sort"));
        assert_eq!(request.parameter("sort"), Some(""));
    }
}
