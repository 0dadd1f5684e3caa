//! Navigation links for paged resources
//!
//! Writes a pageable back into a URL using the same parameter names the
//! [`PageableResolver`] reads, so following a link resolves to that pageable.

use super::pageable_resolver::PageableResolver;
use crate::contract::{MethodParameter, Page, Pageable};
use url::Url;

/// `self`/`first`/`prev`/`next`/`last` links of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub self_link: Url,
    pub first: Option<Url>,
    pub prev: Option<Url>,
    pub next: Option<Url>,
    pub last: Option<Url>,
}

impl PageLinks {
    /// Replace the pagination parameters of `url` with those of `pageable`.
    /// Unrelated query parameters are kept in order.
    pub fn enhance(
        url: &mut Url,
        resolver: &PageableResolver,
        parameter: Option<&MethodParameter>,
        pageable: &Pageable,
    ) {
        let page_name = resolver.page_parameter_name(parameter);
        let size_name = resolver.size_parameter_name(parameter);
        let sort_name = resolver.sort_resolver().sort_parameter_name(parameter);

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| name != &page_name && name != &size_name && name != &sort_name)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        let mut pairs = kept;
        if let Some(request) = pageable.page_request() {
            let page = if resolver.is_one_indexed() {
                u64::from(request.page_number()) + 1
            } else {
                u64::from(request.page_number())
            };
            pairs.push((page_name, page.to_string()));
            pairs.push((
                size_name,
                request.page_size().min(resolver.max_page_size()).to_string(),
            ));
        }
        for value in resolver.sort_resolver().to_parameter_values(pageable.sort()) {
            pairs.push((sort_name.clone(), value));
        }

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    /// Links for `page`, relative to the URL the page was requested with
    pub fn for_page<T>(
        base: &Url,
        resolver: &PageableResolver,
        parameter: Option<&MethodParameter>,
        page: &Page<T>,
    ) -> Self {
        let link = |pageable: &Pageable| {
            let mut url = base.clone();
            Self::enhance(&mut url, resolver, parameter, pageable);
            url
        };

        let pageable = page.pageable();
        let paged = pageable.is_paged();
        Self {
            self_link: link(pageable),
            first: paged.then(|| link(&pageable.first())),
            prev: page.previous_pageable().map(|p| link(&p)),
            next: page.next_pageable().map(|p| link(&p)),
            last: page.last_pageable().map(|p| link(&p)),
        }
    }

    /// Present links as `(rel, url)` pairs
    pub fn relations(&self) -> Vec<(&'static str, &Url)> {
        let mut relations = vec![("self", &self.self_link)];
        let optional = [
            ("first", &self.first),
            ("prev", &self.prev),
            ("next", &self.next),
            ("last", &self.last),
        ];
        relations.extend(
            optional
                .into_iter()
                .filter_map(|(rel, url)| url.as_ref().map(|url| (rel, url))),
        );
        relations
    }

    /// RFC 8288 `Link` header value
    pub fn to_link_header(&self) -> String {
        self.relations()
            .into_iter()
            .map(|(rel, url)| format!("<{}>; rel=\"{}\"", url, rel))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
