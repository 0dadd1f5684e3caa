//! Handler parameter metadata
//!
//! Describes the formal parameters of an HTTP handler so resolvers can decide
//! whether they apply and which defaults and qualifiers to honor. A
//! [`MethodParameter`] is a handle to one parameter of a shared
//! [`HandlerMethod`], which lets resolvers inspect sibling parameters.

use super::error::PageableError;
use super::model::Direction;
use std::collections::HashSet;
use std::sync::Arc;

/// What a handler parameter expects to receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// A pagination descriptor
    Pageable,
    /// A sort specification
    Sort,
    /// Anything else, identified by a type name
    Other(String),
}

/// Default pagination applied when a request carries no (valid) page parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageableDefault {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
    pub direction: Direction,
}

impl PageableDefault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn sort<I, P>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.sort = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl Default for PageableDefault {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: Vec::new(),
            direction: Direction::Asc,
        }
    }
}

/// Default sort applied when a request carries no (valid) sort parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDefault {
    pub sort: Vec<String>,
    pub direction: Direction,
    pub case_sensitive: bool,
}

impl SortDefault {
    pub fn new<I, P>(properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            sort: properties.into_iter().map(Into::into).collect(),
            direction: Direction::Asc,
            case_sensitive: true,
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }
}

/// Declaration of a single handler parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
    /// Distinguishes several pageable/sort parameters on one handler
    pub qualifier: Option<String>,
    pub pageable_default: Option<PageableDefault>,
    /// Applied in declaration order
    pub sort_defaults: Vec<SortDefault>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            qualifier: None,
            pageable_default: None,
            sort_defaults: Vec::new(),
        }
    }

    pub fn pageable(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Pageable)
    }

    pub fn sort(name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Sort)
    }

    pub fn other(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Other(type_name.into()))
    }

    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_pageable_default(mut self, default: PageableDefault) -> Self {
        self.pageable_default = Some(default);
        self
    }

    pub fn with_sort_default(mut self, default: SortDefault) -> Self {
        self.sort_defaults.push(default);
        self
    }
}

/// Signature of an HTTP handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerMethod {
    name: String,
    parameters: Vec<ParameterSpec>,
}

impl HandlerMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_specs(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Freeze the signature so parameter handles can share it
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Handle to parameter `index`, `None` when out of range
    pub fn parameter(self: &Arc<Self>, index: usize) -> Option<MethodParameter> {
        (index < self.parameters.len()).then(|| MethodParameter {
            method: Arc::clone(self),
            index,
        })
    }

    /// Handle to the parameter called `name`
    pub fn parameter_named(self: &Arc<Self>, name: &str) -> Option<MethodParameter> {
        let index = self.parameters.iter().position(|p| p.name == name)?;
        self.parameter(index)
    }

    /// Handles to all parameters in declaration order
    pub fn parameters(self: &Arc<Self>) -> impl Iterator<Item = MethodParameter> + '_ {
        (0..self.parameters.len()).map(move |index| MethodParameter {
            method: Arc::clone(self),
            index,
        })
    }

    /// Several parameters of `kind` must each carry a distinct qualifier
    pub fn assert_qualifier_uniqueness(&self, kind: &ParameterKind) -> Result<(), PageableError> {
        let candidates: Vec<&ParameterSpec> =
            self.parameters.iter().filter(|p| &p.kind == kind).collect();
        if candidates.len() <= 1 {
            return Ok(());
        }

        let mut seen = HashSet::new();
        let unique = candidates.iter().all(|p| match &p.qualifier {
            Some(qualifier) => seen.insert(qualifier.as_str()),
            None => false,
        });

        if unique {
            Ok(())
        } else {
            Err(PageableError::AmbiguousParameters {
                method: self.name.clone(),
                kind: kind_label(kind),
            })
        }
    }
}

fn kind_label(kind: &ParameterKind) -> String {
    match kind {
        ParameterKind::Pageable => "pageable".to_string(),
        ParameterKind::Sort => "sort".to_string(),
        ParameterKind::Other(type_name) => type_name.clone(),
    }
}

/// Handle to one parameter of a [`HandlerMethod`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParameter {
    method: Arc<HandlerMethod>,
    index: usize,
}

impl MethodParameter {
    fn spec(&self) -> &ParameterSpec {
        // index is checked when the handle is created and the method is immutable
        &self.method.parameters[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.spec().name
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.spec().kind
    }

    pub fn is_pageable(&self) -> bool {
        self.kind() == &ParameterKind::Pageable
    }

    pub fn is_sort(&self) -> bool {
        self.kind() == &ParameterKind::Sort
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.spec().qualifier.as_deref()
    }

    pub fn pageable_default(&self) -> Option<&PageableDefault> {
        self.spec().pageable_default.as_ref()
    }

    pub fn sort_defaults(&self) -> &[SortDefault] {
        &self.spec().sort_defaults
    }

    pub fn method(&self) -> &Arc<HandlerMethod> {
        &self.method
    }

    pub fn method_name(&self) -> &str {
        self.method.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(parameters: Vec<ParameterSpec>) -> Arc<HandlerMethod> {
        parameters
            .into_iter()
            .fold(HandlerMethod::new("list_orders"), HandlerMethod::with_parameter)
            .into_shared()
    }

    #[test]
    fn test_parameter_handles() {
        let method = handler(vec![
            ParameterSpec::other("tenant", "String"),
            ParameterSpec::pageable("pageable").qualifier("orders"),
        ]);

        let parameter = method.parameter(1).unwrap();
        assert!(parameter.is_pageable());
        assert_eq!(parameter.qualifier(), Some("orders"));
        assert_eq!(parameter.method_name(), "list_orders");
        assert!(method.parameter(2).is_none());
        assert_eq!(method.parameter_named("tenant").map(|p| p.index()), Some(0));
        assert_eq!(method.parameters().count(), 2);
    }

    #[test]
    fn test_single_pageable_needs_no_qualifier() {
        let method = handler(vec![ParameterSpec::pageable("pageable")]);
        assert!(method.assert_qualifier_uniqueness(&ParameterKind::Pageable).is_ok());
    }

    #[test]
    fn test_multiple_pageables_need_unique_qualifiers() {
        let missing = handler(vec![
            ParameterSpec::pageable("first").qualifier("foo"),
            ParameterSpec::pageable("second"),
        ]);
        assert!(matches!(
            missing.assert_qualifier_uniqueness(&ParameterKind::Pageable),
            Err(PageableError::AmbiguousParameters { .. })
        ));

        let duplicate = handler(vec![
            ParameterSpec::pageable("first").qualifier("foo"),
            ParameterSpec::pageable("second").qualifier("foo"),
        ]);
        assert!(duplicate
            .assert_qualifier_uniqueness(&ParameterKind::Pageable)
            .is_err());

        let unique = handler(vec![
            ParameterSpec::pageable("first").qualifier("foo"),
            ParameterSpec::pageable("second").qualifier("bar"),
        ]);
        assert!(unique
            .assert_qualifier_uniqueness(&ParameterKind::Pageable)
            .is_ok());
    }

    #[test]
    fn test_pageable_default_builder() {
        let default = PageableDefault::new()
            .size(50)
            .sort(["createdAt"])
            .direction(Direction::Desc);
        assert_eq!(default.page, 0);
        assert_eq!(default.size, 50);
        assert_eq!(default.sort, vec!["createdAt".to_string()]);
    }
}
