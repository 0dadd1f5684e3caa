//! Contract models for pagination and sorting
//!
//! Transport-agnostic value types handed from resolvers to data-access code.

use super::error::PageableError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction of a single order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (smallest first)
    #[default]
    Asc,
    /// Descending order (largest first)
    Desc,
}

impl Direction {
    /// Parse a direction token case-insensitively, `None` when it is not one
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Asc
    }

    pub fn is_descending(self) -> bool {
        self == Self::Desc
    }

    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Lowercase token as used in query parameters
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = PageableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| PageableError::InvalidDirection {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering on a single property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
    #[serde(default)]
    pub ignore_case: bool,
}

impl Order {
    pub fn new(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction,
            ignore_case: false,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(Direction::Asc, property)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(Direction::Desc, property)
    }

    /// Same order with case-insensitive comparison
    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.direction.as_str().to_uppercase())?;
        if self.ignore_case {
            f.write_str(" (ignore case)")?;
        }
        Ok(())
    }
}

/// Sort specification: an ordered list of property orders
///
/// An empty sort is "unsorted" and leaves ordering to the data store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sort by the given properties, all in the same direction
    pub fn by<I, P>(direction: Direction, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            orders: properties
                .into_iter()
                .map(|p| Order::new(direction, p))
                .collect(),
        }
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Orders of `self` followed by the orders of `other`
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    /// Append a single order
    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// The order for `property`, if this sort mentions it
    pub fn order_for(&self, property: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.property == property)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

impl FromIterator<Order> for Sort {
    fn from_iter<T: IntoIterator<Item = Order>>(iter: T) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return f.write_str("UNSORTED");
        }
        let rendered: Vec<String> = self.orders.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(","))
    }
}

/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A concrete page request: zero-based page index, page size and sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
    #[serde(default)]
    sort: Sort,
}

impl Default for PageRequest {
    /// First page of [`DEFAULT_PAGE_SIZE`] elements, unsorted
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

impl PageRequest {
    /// Create an unsorted page request. `size` must be at least one.
    pub fn of(page: u32, size: u32) -> Result<Self, PageableError> {
        Self::of_sorted(page, size, Sort::unsorted())
    }

    /// Create a sorted page request. `size` must be at least one.
    pub fn of_sorted(page: u32, size: u32, sort: Sort) -> Result<Self, PageableError> {
        if size < 1 {
            return Err(PageableError::InvalidPageRequest {
                reason: "page size must not be less than one".to_string(),
            });
        }
        Ok(Self { page, size, sort })
    }

    pub fn page_number(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of elements to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn next(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    pub fn previous_or_first(&self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }

    pub fn first(&self) -> Self {
        self.with_page(0)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    pub fn with_sort(&self, sort: Sort) -> Self {
        Self {
            page: self.page,
            size: self.size,
            sort,
        }
    }
}

/// Pagination descriptor consumed by data-access code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pageable {
    /// A bounded page of results
    Paged(PageRequest),
    /// All results, optionally sorted
    Unpaged {
        #[serde(default)]
        sort: Sort,
    },
}

impl Pageable {
    /// Unpaged and unsorted
    pub fn unpaged() -> Self {
        Self::Unpaged {
            sort: Sort::unsorted(),
        }
    }

    pub fn unpaged_sorted(sort: Sort) -> Self {
        Self::Unpaged { sort }
    }

    /// Shortcut for `Pageable::Paged(PageRequest::of(page, size)?)`
    pub fn of(page: u32, size: u32) -> Result<Self, PageableError> {
        PageRequest::of(page, size).map(Self::Paged)
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Paged(_))
    }

    pub fn is_unpaged(&self) -> bool {
        !self.is_paged()
    }

    pub fn page_request(&self) -> Option<&PageRequest> {
        match self {
            Self::Paged(request) => Some(request),
            Self::Unpaged { .. } => None,
        }
    }

    pub fn page_number(&self) -> Option<u32> {
        self.page_request().map(PageRequest::page_number)
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_request().map(PageRequest::page_size)
    }

    pub fn offset(&self) -> Option<u64> {
        self.page_request().map(PageRequest::offset)
    }

    pub fn sort(&self) -> &Sort {
        match self {
            Self::Paged(request) => request.sort(),
            Self::Unpaged { sort } => sort,
        }
    }

    /// The sort of this pageable, or `fallback` when it is unsorted
    pub fn sort_or(&self, fallback: Sort) -> Sort {
        if self.sort().is_sorted() {
            self.sort().clone()
        } else {
            fallback
        }
    }

    /// Same pagination with a different sort
    pub fn with_sort(&self, sort: Sort) -> Self {
        match self {
            Self::Paged(request) => Self::Paged(request.with_sort(sort)),
            Self::Unpaged { .. } => Self::Unpaged { sort },
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_request().is_some_and(PageRequest::has_previous)
    }

    /// Next page; unpaged stays unpaged
    pub fn next(&self) -> Self {
        match self {
            Self::Paged(request) => Self::Paged(request.next()),
            unpaged => unpaged.clone(),
        }
    }

    pub fn previous_or_first(&self) -> Self {
        match self {
            Self::Paged(request) => Self::Paged(request.previous_or_first()),
            unpaged => unpaged.clone(),
        }
    }

    pub fn first(&self) -> Self {
        match self {
            Self::Paged(request) => Self::Paged(request.first()),
            unpaged => unpaged.clone(),
        }
    }
}

impl Default for Pageable {
    fn default() -> Self {
        Self::unpaged()
    }
}

impl From<PageRequest> for Pageable {
    fn from(request: PageRequest) -> Self {
        Self::Paged(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing_is_case_insensitive() {
        assert_eq!(Direction::from_token("DESC"), Some(Direction::Desc));
        assert_eq!(Direction::from_token(" asc "), Some(Direction::Asc));
        assert_eq!(Direction::from_token("name"), None);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!("Desc".parse::<Direction>(), Ok(Direction::Desc));
    }

    #[test]
    fn test_page_request_rejects_zero_size() {
        let result = PageRequest::of(0, 0);
        assert!(matches!(
            result,
            Err(PageableError::InvalidPageRequest { .. })
        ));
    }

    #[test]
    fn test_page_request_navigation() {
        let request = PageRequest::of(2, 25).unwrap();
        assert_eq!(request.offset(), 50);
        assert!(request.has_previous());
        assert_eq!(request.next().page_number(), 3);
        assert_eq!(request.previous_or_first().page_number(), 1);
        assert_eq!(request.first().page_number(), 0);
        assert_eq!(request.first().previous_or_first().page_number(), 0);
    }

    #[test]
    fn test_offset_does_not_overflow() {
        let request = PageRequest::of(u32::MAX, 2000).unwrap();
        assert_eq!(request.offset(), u64::from(u32::MAX) * 2000);
        assert_eq!(request.next().page_number(), u32::MAX);
    }

    #[test]
    fn test_unpaged_accessors() {
        let pageable = Pageable::unpaged_sorted(Sort::by(Direction::Desc, ["name"]));
        assert!(pageable.is_unpaged());
        assert_eq!(pageable.page_number(), None);
        assert_eq!(pageable.offset(), None);
        assert!(!pageable.has_previous());
        assert_eq!(pageable.next(), pageable);
        assert_eq!(pageable.sort().len(), 1);
    }

    #[test]
    fn test_sort_composition() {
        let sort = Sort::by(Direction::Asc, ["lastname", "firstname"])
            .and(Sort::from_orders(vec![Order::desc("id")]));
        assert_eq!(sort.len(), 3);
        assert_eq!(sort.order_for("id").map(|o| o.direction), Some(Direction::Desc));
        assert_eq!(sort.to_string(), "lastname: ASC,firstname: ASC,id: DESC");
        assert_eq!(Sort::unsorted().to_string(), "UNSORTED");
    }

    #[test]
    fn test_sort_or_prefers_own_sort() {
        let fallback = Sort::by(Direction::Asc, ["id"]);
        assert_eq!(Pageable::of(0, 10).unwrap().sort_or(fallback.clone()), fallback);

        let own = Sort::by(Direction::Desc, ["name"]);
        let pageable = Pageable::of(0, 10).unwrap().with_sort(own.clone());
        assert_eq!(pageable.sort_or(fallback), own);
    }

    #[test]
    fn test_pageable_serializes_with_kind_tag() {
        let json = serde_json::to_value(Pageable::of(1, 5).unwrap()).unwrap();
        assert_eq!(json["kind"], "paged");
        assert_eq!(json["page"], 1);
        assert_eq!(json["size"], 5);

        let json = serde_json::to_value(Pageable::unpaged()).unwrap();
        assert_eq!(json["kind"], "unpaged");
    }
}
