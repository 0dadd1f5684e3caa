//! Module declaration and lifecycle implementation

use crate::api::rest::extract::{PageableBinding, SortBinding};
use crate::api::rest::routes::{bind_pageable, bind_sort};
use crate::config::Config;
use crate::contract::{HandlerMethod, MethodParameter, PageableArgumentResolver};
use crate::domain::PageableResolver;
use anyhow::Result;
use axum::routing::MethodRouter;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

/// Pageable web module: owns the configured resolvers and hands out route bindings
pub struct PageableWebModule {
    config: RwLock<Config>,
    resolver: RwLock<Option<Arc<PageableResolver>>>,
}

impl Default for PageableWebModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            resolver: RwLock::new(None),
        }
    }
}

impl PageableWebModule {
    /// Module initialized with `config`
    pub fn with_config(config: Config) -> Result<Self> {
        let module = Self::default();
        module.init(config)?;
        Ok(module)
    }

    /// Module initialized from an optional YAML file and `PAGEABLE_*` env vars
    pub fn from_sources(path: Option<&Path>) -> Result<Self> {
        Self::with_config(Config::load(path)?)
    }

    /// Validate `config` and (re)build the resolvers
    pub fn init(&self, config: Config) -> Result<()> {
        let resolver = Arc::new(PageableResolver::from_config(&config)?);

        tracing::info!(
            page_parameter = %config.page_parameter,
            size_parameter = %config.size_parameter,
            sort_parameter = %config.sort_parameter,
            max_page_size = config.max_page_size,
            one_indexed = config.one_indexed_parameters,
            fallback = ?config.fallback,
            "Pageable web module initialized"
        );

        *self.config.write() = config;
        *self.resolver.write() = Some(resolver);
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// The configured default resolver
    pub fn resolver(&self) -> Result<Arc<PageableResolver>> {
        self.resolver
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Pageable resolver not initialized"))
    }

    /// Binding of the default resolver to `parameter`
    pub fn pageable_binding(&self, parameter: MethodParameter) -> Result<PageableBinding> {
        let resolver = self.resolver()?;
        self.binding_with(resolver, parameter)
    }

    /// Binding of a custom (e.g. decorated) resolver to `parameter`
    pub fn binding_with(
        &self,
        resolver: Arc<dyn PageableArgumentResolver>,
        parameter: MethodParameter,
    ) -> Result<PageableBinding> {
        if !resolver.supports_parameter(&parameter) {
            anyhow::bail!(
                "Parameter '{}' of handler '{}' cannot be resolved as pageable",
                parameter.name(),
                parameter.method_name()
            );
        }
        Ok(PageableBinding::new(resolver, parameter))
    }

    /// Binding of the default sort resolver to `parameter`
    pub fn sort_binding(&self, parameter: MethodParameter) -> Result<SortBinding> {
        if !parameter.is_sort() {
            anyhow::bail!(
                "Parameter '{}' of handler '{}' cannot be resolved as sort",
                parameter.name(),
                parameter.method_name()
            );
        }
        let sort_resolver = Arc::new(self.resolver()?.sort_resolver().clone());
        Ok(SortBinding::new(sort_resolver, parameter))
    }

    /// Attach the default resolvers to `route` for the pageable and sort
    /// parameters `method` declares.
    ///
    /// A route carries one binding per kind; handlers with several qualified
    /// pageables resolve the extra ones through [`Self::resolver`].
    pub fn bind<S>(
        &self,
        route: MethodRouter<S>,
        method: &Arc<HandlerMethod>,
    ) -> Result<MethodRouter<S>>
    where
        S: Clone + Send + Sync + 'static,
    {
        let pageables: Vec<MethodParameter> =
            method.parameters().filter(MethodParameter::is_pageable).collect();
        let sorts: Vec<MethodParameter> =
            method.parameters().filter(MethodParameter::is_sort).collect();
        if pageables.len() > 1 || sorts.len() > 1 {
            anyhow::bail!(
                "Handler '{}' declares several pageable or sort parameters; bind them individually",
                method.name()
            );
        }

        let mut route = route;
        if let Some(parameter) = pageables.into_iter().next() {
            route = bind_pageable(route, self.pageable_binding(parameter)?);
        }
        if let Some(parameter) = sorts.into_iter().next() {
            route = bind_sort(route, self.sort_binding(parameter)?);
        }
        Ok(route)
    }
}
