//! Common test utilities and a shared book catalog

#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response};
use serde::Serialize;
use tower::ServiceExt;

/// Book stored in the in-memory catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub year: u32,
}

/// Realistic catalog for paging tests: 42 books, ids 1..=42
pub fn catalog() -> Vec<Book> {
    (1..=42)
        .map(|id| Book {
            id,
            title: format!("Volume {:02}", id),
            year: 1980 + (id % 30),
        })
        .collect()
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Send a GET request through `router` and return status, headers and JSON body
pub async fn get(router: axum::Router, uri: &str) -> (Response<()>, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    println!("   GET {} -> {} {}", uri, parts.status, json);
    (Response::from_parts(parts, ()), json)
}
