//! Pageable Web Module
//!
//! Resolves pagination (page number, page size, sort order) from HTTP
//! requests for handler parameters. Resolution is a pluggable strategy: a
//! [`PageableArgumentResolver`] either resolves a [`Pageable`] itself or wraps
//! another resolver and post-processes its result.

// Public exports
pub mod contract;
pub use contract::{
    Direction, HandlerMethod, MethodParameter, Order, Page, PageRequest, Pageable,
    PageableArgumentResolver, PageableDefault, PageableError, ParameterKind, ParameterSpec, Sort,
    SortArgumentResolver, SortDefault, WebRequest,
};

pub mod domain;
pub use domain::{
    FallbackPageable, PageLinks, PageableResolver, PostProcessingResolver, ResolverChain,
    SortResolver, StableSortResolver,
};

pub mod module;
pub use module::PageableWebModule;

pub mod config;
pub use config::{Config, FallbackMode};

pub mod api;
pub use api::rest::{
    dto::{PageDto, PageMetadataDto, PagedJson, PageableQueryParams, SortOrderDto},
    error::Problem,
    extract::{PageableBinding, ResolvedPageable, ResolvedSort, SortBinding},
    mapper::sort_to_dto,
    routes::{bind_pageable, bind_sort},
};
