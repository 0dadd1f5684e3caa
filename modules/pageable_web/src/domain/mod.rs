//! Domain layer - resolution strategies and their composition

pub mod decorators;
pub mod links;
pub mod pageable_resolver;
pub mod sort_resolver;

pub use decorators::{PostProcessingResolver, ResolverChain, StableSortResolver};
pub use links::PageLinks;
pub use pageable_resolver::{FallbackPageable, PageableResolver};
pub use sort_resolver::SortResolver;
