//! Pageable resolution from `page`, `size` and `sort` query parameters
//!
//! Handler defaults come from the parameter's [`PageableDefault`]; without one
//! the resolver's fallback applies. Several pageable parameters on one handler
//! are told apart by qualifier: `?foo_page=1&bar_page=3`.

use super::sort_resolver::SortResolver;
use crate::config::{Config, FallbackMode};
use crate::contract::{
    MethodParameter, PageRequest, Pageable, PageableArgumentResolver, PageableDefault,
    PageableError, Sort, WebRequest,
};

/// Outcome when neither request nor handler define paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPageable {
    Paged(PageRequest),
    Unpaged,
    Absent,
}

impl FallbackPageable {
    fn from_config(config: &Config) -> Result<Self, PageableError> {
        Ok(match config.fallback {
            FallbackMode::Paged => Self::Paged(PageRequest::of(0, config.fallback_page_size)?),
            FallbackMode::Unpaged => Self::Unpaged,
            FallbackMode::Absent => Self::Absent,
        })
    }
}

/// Default [`PageableArgumentResolver`] reading query parameters
#[derive(Debug, Clone)]
pub struct PageableResolver {
    sort_resolver: SortResolver,
    page_parameter: String,
    size_parameter: String,
    prefix: String,
    qualifier_delimiter: String,
    max_page_size: u32,
    one_indexed_parameters: bool,
    fallback: FallbackPageable,
}

impl PageableResolver {
    /// Build a resolver from validated configuration
    pub fn from_config(config: &Config) -> Result<Self, PageableError> {
        config.validate()?;
        Ok(Self {
            sort_resolver: SortResolver::from_config(config),
            page_parameter: config.page_parameter.clone(),
            size_parameter: config.size_parameter.clone(),
            prefix: config.prefix.clone(),
            qualifier_delimiter: config.qualifier_delimiter.clone(),
            max_page_size: config.max_page_size,
            one_indexed_parameters: config.one_indexed_parameters,
            fallback: FallbackPageable::from_config(config)?,
        })
    }

    pub fn with_sort_resolver(mut self, sort_resolver: SortResolver) -> Self {
        self.sort_resolver = sort_resolver;
        self
    }

    pub fn with_page_parameter(mut self, name: impl Into<String>) -> Self {
        self.page_parameter = name.into();
        self
    }

    pub fn with_size_parameter(mut self, name: impl Into<String>) -> Self {
        self.size_parameter = name.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_qualifier_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.qualifier_delimiter = delimiter.into();
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    pub fn with_one_indexed_parameters(mut self, one_indexed: bool) -> Self {
        self.one_indexed_parameters = one_indexed;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPageable) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn sort_resolver(&self) -> &SortResolver {
        &self.sort_resolver
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    pub fn is_one_indexed(&self) -> bool {
        self.one_indexed_parameters
    }

    pub fn fallback(&self) -> &FallbackPageable {
        &self.fallback
    }

    /// Name of the page parameter for `parameter` (prefix and qualifier applied)
    pub fn page_parameter_name(&self, parameter: Option<&MethodParameter>) -> String {
        self.parameter_name(&self.page_parameter, parameter)
    }

    /// Name of the size parameter for `parameter` (prefix and qualifier applied)
    pub fn size_parameter_name(&self, parameter: Option<&MethodParameter>) -> String {
        self.parameter_name(&self.size_parameter, parameter)
    }

    fn parameter_name(&self, source: &str, parameter: Option<&MethodParameter>) -> String {
        let mut name = self.prefix.clone();
        if let Some(qualifier) = parameter.and_then(MethodParameter::qualifier) {
            name.push_str(qualifier);
            name.push_str(&self.qualifier_delimiter);
        }
        name.push_str(source);
        name
    }

    /// Handler default or paged fallback; `None` when neither exists
    fn default_from_parameter_or_fallback(
        &self,
        parameter: &MethodParameter,
    ) -> Result<Option<PageRequest>, PageableError> {
        match parameter.pageable_default() {
            Some(default) => default_page_request(parameter, default).map(Some),
            None => Ok(match &self.fallback {
                FallbackPageable::Paged(request) => Some(request.clone()),
                FallbackPageable::Unpaged | FallbackPageable::Absent => None,
            }),
        }
    }

    /// Parse an index parameter: blank is absent, garbage is 0, result is
    /// clamped into `[0, upper]`
    fn parse_and_apply_boundaries(
        &self,
        value: Option<&str>,
        upper: u32,
        shift_index: bool,
    ) -> Option<u32> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        let parsed = match value.parse::<i64>() {
            Ok(parsed) => parsed,
            Err(_) => return Some(0),
        };
        let parsed = if shift_index && self.one_indexed_parameters {
            parsed.saturating_sub(1)
        } else {
            parsed
        };
        Some(parsed.clamp(0, i64::from(upper)) as u32)
    }
}

fn default_page_request(
    parameter: &MethodParameter,
    default: &PageableDefault,
) -> Result<PageRequest, PageableError> {
    if default.size < 1 {
        return Err(PageableError::InvalidDefault {
            method: parameter.method_name().to_string(),
            reason: "default page size must not be less than one".to_string(),
        });
    }
    let sort = if default.sort.is_empty() {
        Sort::unsorted()
    } else {
        Sort::by(default.direction, default.sort.iter().cloned())
    };
    PageRequest::of_sorted(default.page, default.size, sort)
}

impl Default for PageableResolver {
    fn default() -> Self {
        Self {
            sort_resolver: SortResolver::new(),
            page_parameter: "page".to_string(),
            size_parameter: "size".to_string(),
            prefix: String::new(),
            qualifier_delimiter: "_".to_string(),
            max_page_size: 2000,
            one_indexed_parameters: false,
            fallback: FallbackPageable::Paged(PageRequest::default()),
        }
    }
}

impl PageableArgumentResolver for PageableResolver {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        parameter.is_pageable()
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        parameter
            .method()
            .assert_qualifier_uniqueness(parameter.kind())?;

        let default = self.default_from_parameter_or_fallback(parameter)?;

        let page = self.parse_and_apply_boundaries(
            request.parameter(&self.page_parameter_name(Some(parameter))),
            u32::MAX,
            true,
        );
        let size = self
            .parse_and_apply_boundaries(
                request.parameter(&self.size_parameter_name(Some(parameter))),
                self.max_page_size,
                false,
            )
            .filter(|size| *size >= 1);

        let sort = self.sort_resolver.resolve_sort(parameter, request);

        let (page, size, sort) = match (page, size, default) {
            (Some(page), Some(size), default) => {
                let sort = match default {
                    Some(default) if sort.is_unsorted() => default.sort().clone(),
                    _ => sort,
                };
                (page, size, sort)
            }
            (page, size, Some(default)) => {
                let sort = if sort.is_sorted() { sort } else { default.sort().clone() };
                (
                    page.unwrap_or(default.page_number()),
                    size.unwrap_or(default.page_size()),
                    sort,
                )
            }
            (_, _, None) => {
                let resolved = match self.fallback {
                    FallbackPageable::Absent => None,
                    _ => Some(Pageable::unpaged_sorted(sort)),
                };
                tracing::debug!(
                    handler = parameter.method_name(),
                    parameter = parameter.name(),
                    ?resolved,
                    "No page parameters and no default, using fallback"
                );
                return Ok(resolved);
            }
        };

        let request = PageRequest::of_sorted(page, size.min(self.max_page_size), sort)?;
        tracing::debug!(
            handler = parameter.method_name(),
            parameter = parameter.name(),
            page = request.page_number(),
            size = request.page_size(),
            sort = %request.sort(),
            "Resolved pageable"
        );
        Ok(Some(Pageable::Paged(request)))
    }

    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        Some((
            self.page_parameter_name(Some(parameter)),
            self.size_parameter_name(Some(parameter)),
        ))
    }
}
