//! Resolvers composed from other resolvers
//!
//! Each type here holds an inner [`PageableArgumentResolver`] (or several) and
//! forwards to it, post-processing the result.

use crate::contract::{
    MethodParameter, Order, Pageable, PageableArgumentResolver, PageableError, WebRequest,
};
use std::sync::Arc;

/// Applies a closure to every pageable the inner resolver produces.
/// Returning `None` from the closure drops the value.
pub struct PostProcessingResolver<R, F> {
    inner: R,
    post_process: F,
}

impl<R, F> PostProcessingResolver<R, F>
where
    R: PageableArgumentResolver,
    F: Fn(Pageable, &MethodParameter, &WebRequest) -> Option<Pageable> + Send + Sync,
{
    pub fn new(inner: R, post_process: F) -> Self {
        Self {
            inner,
            post_process,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R, F> PageableArgumentResolver for PostProcessingResolver<R, F>
where
    R: PageableArgumentResolver,
    F: Fn(Pageable, &MethodParameter, &WebRequest) -> Option<Pageable> + Send + Sync,
{
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        self.inner.supports_parameter(parameter)
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        Ok(self
            .inner
            .resolve_argument(parameter, request)?
            .and_then(|pageable| (self.post_process)(pageable, parameter, request)))
    }

    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        self.inner.query_parameter_names(parameter)
    }
}

/// Appends a tie-breaker order so that pages over non-unique sort keys are
/// deterministic. Nothing is appended when the sort already covers the
/// tie-breaker property.
pub struct StableSortResolver<R> {
    inner: R,
    tie_breaker: Order,
}

impl<R: PageableArgumentResolver> StableSortResolver<R> {
    pub fn new(inner: R, tie_breaker: Order) -> Self {
        Self { inner, tie_breaker }
    }

    pub fn tie_breaker(&self) -> &Order {
        &self.tie_breaker
    }
}

impl<R: PageableArgumentResolver> PageableArgumentResolver for StableSortResolver<R> {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        self.inner.supports_parameter(parameter)
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        let resolved = self.inner.resolve_argument(parameter, request)?;
        Ok(resolved.map(|pageable| {
            if pageable.sort().order_for(&self.tie_breaker.property).is_some() {
                return pageable;
            }
            let mut sort = pageable.sort().clone();
            sort.push(self.tie_breaker.clone());
            pageable.with_sort(sort)
        }))
    }

    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        self.inner.query_parameter_names(parameter)
    }
}

/// Ordered composite of resolvers.
///
/// Supporting members are asked in order; the first present result wins.
/// Errors stop the chain.
#[derive(Default, Clone)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn PageableArgumentResolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(mut self, resolver: R) -> Self
    where
        R: PageableArgumentResolver + 'static,
    {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn with_shared(mut self, resolver: Arc<dyn PageableArgumentResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PageableArgumentResolver for ResolverChain {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        self.resolvers
            .iter()
            .any(|resolver| resolver.supports_parameter(parameter))
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Option<Pageable>, PageableError> {
        for resolver in self
            .resolvers
            .iter()
            .filter(|resolver| resolver.supports_parameter(parameter))
        {
            if let Some(pageable) = resolver.resolve_argument(parameter, request)? {
                return Ok(Some(pageable));
            }
        }
        tracing::debug!(
            handler = parameter.method_name(),
            parameter = parameter.name(),
            "No resolver in chain produced a pageable"
        );
        Ok(None)
    }

    /// Names of the first supporting member that reads named parameters
    fn query_parameter_names(&self, parameter: &MethodParameter) -> Option<(String, String)> {
        self.resolvers
            .iter()
            .filter(|resolver| resolver.supports_parameter(parameter))
            .find_map(|resolver| resolver.query_parameter_names(parameter))
    }
}
