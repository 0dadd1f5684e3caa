//! Catalog server: paged, sorted book listings over HTTP
//!
//! ```text
//! cargo run -p pageable_web --example catalog_server
//! curl -i 'http://127.0.0.1:8080/books?page=1&size=5&sort=year,desc'
//! curl 'http://127.0.0.1:8080/titles?sort=title,desc,ignorecase'
//! ```
//!
//! Set `CATALOG_CONFIG` to a YAML file or `PAGEABLE_*` variables to change
//! parameter names, limits and the fallback.

use axum::{extract::OriginalUri, routing::get, Router};
use pageable_web::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

const ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize)]
struct Book {
    id: u32,
    title: String,
    year: u32,
}

fn catalog() -> Vec<Book> {
    let titles = [
        "Dune", "Neuromancer", "Hyperion", "Foundation", "Solaris", "Ubik", "Contact",
        "Blindsight", "Anathem", "Accelerando", "Snow Crash", "The Dispossessed",
    ];
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Book {
            id: i as u32 + 1,
            title: title.to_string(),
            year: 1951 + (i as u32 * 7) % 60,
        })
        .collect()
}

fn compare(a: &Book, b: &Book, order: &Order) -> Ordering {
    let ordering = match order.property.as_str() {
        "title" if order.ignore_case => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        "title" => a.title.cmp(&b.title),
        "year" => a.year.cmp(&b.year),
        _ => a.id.cmp(&b.id),
    };
    match order.direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

fn sorted(mut books: Vec<Book>, sort: &Sort) -> Vec<Book> {
    books.sort_by(|a, b| {
        sort.iter()
            .map(|order| compare(a, b, order))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    books
}

#[derive(Clone)]
struct Catalog {
    resolver: Arc<PageableResolver>,
}

async fn list_books(
    axum::extract::State(catalog_state): axum::extract::State<Catalog>,
    OriginalUri(uri): OriginalUri,
    ResolvedPageable(pageable): ResolvedPageable,
) -> PagedJson<Book> {
    let page = Page::paginate(sorted(catalog(), pageable.sort()), &pageable);
    let mut response = PagedJson::new(page.clone().into());
    match Url::parse(&format!("http://{}{}", ADDRESS, uri)) {
        Ok(base) => {
            let links = PageLinks::for_page(&base, &catalog_state.resolver, None, &page);
            response = response.with_links(links);
        }
        Err(err) => tracing::warn!(error = %err, "Cannot build page links"),
    }
    response
}

async fn list_titles(ResolvedSort(sort): ResolvedSort) -> axum::Json<Vec<String>> {
    axum::Json(
        sorted(catalog(), &sort)
            .into_iter()
            .map(|book| book.title)
            .collect(),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,pageable_web=debug")),
        )
        .init();

    let config_path = std::env::var_os("CATALOG_CONFIG").map(PathBuf::from);
    let module = PageableWebModule::from_sources(config_path.as_deref())?;

    let books = HandlerMethod::new("list_books")
        .with_parameter(
            ParameterSpec::pageable("pageable")
                .with_pageable_default(PageableDefault::new().size(5))
                .with_sort_default(SortDefault::new(["id"])),
        )
        .into_shared();
    let titles = HandlerMethod::new("list_titles")
        .with_parameter(ParameterSpec::sort("sort").with_sort_default(SortDefault::new(["title"])))
        .into_shared();

    let app = Router::new()
        .route("/books", module.bind(get(list_books), &books)?)
        .route("/titles", module.bind(get(list_titles), &titles)?)
        .with_state(Catalog {
            resolver: module.resolver()?,
        });

    let listener = tokio::net::TcpListener::bind(ADDRESS).await?;
    tracing::info!(address = ADDRESS, "Catalog server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
