//! Contract layer - public API shared by resolvers and data-access code
//!
//! Transport-agnostic models, handler parameter metadata, the request view
//! and the resolver traits.

pub mod error;
pub mod model;
pub mod page;
pub mod parameter;
pub mod request;
pub mod resolver;

pub use error::PageableError;
pub use model::{Direction, Order, PageRequest, Pageable, Sort};
pub use page::Page;
pub use parameter::{
    HandlerMethod, MethodParameter, PageableDefault, ParameterKind, ParameterSpec, SortDefault,
};
pub use request::WebRequest;
pub use resolver::{PageableArgumentResolver, SortArgumentResolver};
