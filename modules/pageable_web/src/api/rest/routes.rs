//! Route helpers attaching resolver bindings to axum method routers

use super::extract::{PageableBinding, SortBinding};
use axum::{routing::MethodRouter, Extension};

/// Make [`ResolvedPageable`](super::extract::ResolvedPageable) available to the
/// handlers of `route`
pub fn bind_pageable<S>(route: MethodRouter<S>, binding: PageableBinding) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    tracing::debug!(
        handler = binding.parameter().method_name(),
        parameter = binding.parameter().name(),
        "Binding pageable resolver to route"
    );
    route.layer(Extension(binding))
}

/// Make [`ResolvedSort`](super::extract::ResolvedSort) available to the
/// handlers of `route`
pub fn bind_sort<S>(route: MethodRouter<S>, binding: SortBinding) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    tracing::debug!(
        handler = binding.parameter().method_name(),
        parameter = binding.parameter().name(),
        "Binding sort resolver to route"
    );
    route.layer(Extension(binding))
}
