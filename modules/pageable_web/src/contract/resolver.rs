//! Resolver capabilities queried per handler parameter
//!
//! A [`PageableArgumentResolver`] either resolves a [`Pageable`] itself or
//! wraps another resolver and post-processes its result. Resolution yields a
//! pageable or `None` when no pageable can be resolved.

use super::error::PageableError;
use super::model::{Pageable, Sort};
use super::parameter::MethodParameter;
use super::request::WebRequest;
use std::sync::Arc;

/// Extracts a [`Pageable`] from a [`WebRequest`] for a handler parameter
pub trait PageableArgumentResolver: Send + Sync {
    /// Whether this resolver can produce a value for `parameter`.
    ///
    /// Callers must not invoke [`resolve_argument`](Self::resolve_argument)
    /// for parameters this returns `false` for.
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool;

    /// Resolve the pageable for `parameter`; `Ok(None)` when it cannot be resolved
    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError>;

    /// `(page, size)` query parameter names read for `parameter`, when the
    /// resolver reads named query parameters at all
    fn query_parameter_names(&self, _parameter: &MethodParameter) -> Option<(String, String)> {
        None
    }
}

/// Extracts a [`Sort`] from a [`WebRequest`] for a handler parameter
pub trait SortArgumentResolver: Send + Sync {
    /// Whether this resolver can produce a value for `parameter`
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool;

    /// Resolve the sort for `parameter`; unsorted when nothing applies
    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Sort, PageableError>;
}

impl<T: PageableArgumentResolver + ?Sized> PageableArgumentResolver for Arc<T> {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        (**self).supports_parameter(parameter)
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        (**self).resolve_argument(parameter, request)
    }

    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        (**self).query_parameter_names(parameter)
    }
}

impl<T: PageableArgumentResolver + ?Sized> PageableArgumentResolver for Box<T> {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        (**self).supports_parameter(parameter)
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        (**self).resolve_argument(parameter, request)
    }

    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        (**self).query_parameter_names(parameter)
    }
}

impl<T: SortArgumentResolver + ?Sized> SortArgumentResolver for Arc<T> {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        (**self).supports_parameter(parameter)
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Sort, PageableError> {
        (**self).resolve_argument(parameter, request)
    }
}
