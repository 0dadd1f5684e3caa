//! axum extractors backed by the resolver traits
//!
//! A route opts in by carrying a [`PageableBinding`] (or [`SortBinding`]) in
//! its request extensions, see [`super::routes::bind_pageable`]. The binding
//! names the resolver and the handler parameter it resolves for.

use super::error::{map_domain_error, Problem};
use crate::contract::{
    MethodParameter, Pageable, PageableArgumentResolver, PageableError, Sort,
    SortArgumentResolver, WebRequest,
};
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;

/// Resolver and handler parameter attached to a route
#[derive(Clone)]
pub struct PageableBinding {
    resolver: Arc<dyn PageableArgumentResolver>,
    parameter: MethodParameter,
    /// `(page, size)` names reported when a required pageable is missing
    parameter_names: Option<(String, String)>,
}

impl PageableBinding {
    /// Binding reporting the query parameter names `resolver` reads for `parameter`
    pub fn new(resolver: Arc<dyn PageableArgumentResolver>, parameter: MethodParameter) -> Self {
        let parameter_names = resolver.query_parameter_names(&parameter);
        Self {
            resolver,
            parameter,
            parameter_names,
        }
    }

    /// Override the parameter names reported when a required pageable is missing
    pub fn with_parameter_names(
        mut self,
        page_parameter: impl Into<String>,
        size_parameter: impl Into<String>,
    ) -> Self {
        self.parameter_names = Some((page_parameter.into(), size_parameter.into()));
        self
    }

    pub fn parameter(&self) -> &MethodParameter {
        &self.parameter
    }

    /// Resolve for `request`; never calls the resolver for unsupported parameters
    pub fn resolve(&self, request: &WebRequest) -> Result<Option<Pageable>, Problem> {
        if !self.resolver.supports_parameter(&self.parameter) {
            tracing::warn!(
                handler = self.parameter.method_name(),
                parameter = self.parameter.name(),
                "Bound resolver does not support parameter"
            );
            return Err(unsupported_problem(&self.parameter));
        }
        self.resolver
            .resolve_argument(&self.parameter, request)
            .map_err(map_domain_error)
    }

    fn missing(&self) -> Problem {
        match &self.parameter_names {
            Some((page, size)) => Problem::pagination_required(page, size),
            None => Problem::pagination_required_for(self.parameter.name()),
        }
    }
}

impl std::fmt::Debug for PageableBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageableBinding")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

/// Sort resolver and handler parameter attached to a route
#[derive(Clone)]
pub struct SortBinding {
    resolver: Arc<dyn SortArgumentResolver>,
    parameter: MethodParameter,
}

impl SortBinding {
    pub fn new(resolver: Arc<dyn SortArgumentResolver>, parameter: MethodParameter) -> Self {
        Self {
            resolver,
            parameter,
        }
    }

    pub fn parameter(&self) -> &MethodParameter {
        &self.parameter
    }

    pub fn resolve(&self, request: &WebRequest) -> Result<Sort, Problem> {
        if !self.resolver.supports_parameter(&self.parameter) {
            tracing::warn!(
                handler = self.parameter.method_name(),
                parameter = self.parameter.name(),
                "Bound sort resolver does not support parameter"
            );
            return Err(unsupported_problem(&self.parameter));
        }
        self.resolver
            .resolve_argument(&self.parameter, request)
            .map_err(map_domain_error)
    }
}

impl std::fmt::Debug for SortBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortBinding")
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}

fn unsupported_problem(parameter: &MethodParameter) -> Problem {
    map_domain_error(PageableError::UnsupportedParameter {
        method: parameter.method_name().to_string(),
        parameter: parameter.name().to_string(),
    })
}

fn pageable_binding(parts: &Parts) -> Result<PageableBinding, Problem> {
    parts
        .extensions
        .get::<PageableBinding>()
        .cloned()
        .ok_or_else(|| Problem::not_configured("pageable"))
}

/// Pageable resolved for the route's bound handler parameter.
///
/// Rejects with `400 Pagination Required` when the resolver produces nothing;
/// use `Option<ResolvedPageable>` to accept that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPageable(pub Pageable);

impl<S> FromRequestParts<S> for ResolvedPageable
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let binding = pageable_binding(parts)?;
        let request = WebRequest::from_parts(parts);
        match binding.resolve(&request)? {
            Some(pageable) => Ok(Self(pageable)),
            None => Err(binding.missing().with_instance(parts.uri.path())),
        }
    }
}

impl<S> OptionalFromRequestParts<S> for ResolvedPageable
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let binding = pageable_binding(parts)?;
        let request = WebRequest::from_parts(parts);
        Ok(binding.resolve(&request)?.map(Self))
    }
}

/// Sort resolved for the route's bound handler parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSort(pub Sort);

impl<S> FromRequestParts<S> for ResolvedSort
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let binding = parts
            .extensions
            .get::<SortBinding>()
            .cloned()
            .ok_or_else(|| Problem::not_configured("sort"))?;
        let request = WebRequest::from_parts(parts);
        binding.resolve(&request).map(Self)
    }
}
