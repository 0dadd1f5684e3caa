//! Sort resolution from `sort` query parameters
//!
//! Expressions have the form `property[,property...][,asc|desc][,ignorecase]`;
//! the parameter may repeat. Example: `?sort=lastname,firstname,desc&sort=id`.

use crate::config::Config;
use crate::contract::{
    Direction, MethodParameter, Order, PageableError, Sort, SortArgumentResolver, WebRequest,
};

const IGNORE_CASE_TOKEN: &str = "ignorecase";

/// Resolves [`Sort`] values from request parameters and handler defaults
#[derive(Debug, Clone)]
pub struct SortResolver {
    sort_parameter: String,
    property_delimiter: String,
    qualifier_delimiter: String,
    fallback_sort: Sort,
}

impl Default for SortResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SortResolver {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            sort_parameter: config.sort_parameter.clone(),
            property_delimiter: config.property_delimiter.clone(),
            qualifier_delimiter: config.qualifier_delimiter.clone(),
            fallback_sort: Sort::unsorted(),
        }
    }

    pub fn with_sort_parameter(mut self, name: impl Into<String>) -> Self {
        self.sort_parameter = name.into();
        self
    }

    pub fn with_property_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.property_delimiter = delimiter.into();
        self
    }

    pub fn with_qualifier_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.qualifier_delimiter = delimiter.into();
        self
    }

    /// Sort used when neither request nor handler define one
    pub fn with_fallback_sort(mut self, sort: Sort) -> Self {
        self.fallback_sort = sort;
        self
    }

    pub fn property_delimiter(&self) -> &str {
        &self.property_delimiter
    }

    /// Name of the sort parameter for `parameter`, honoring its qualifier
    pub fn sort_parameter_name(&self, parameter: Option<&MethodParameter>) -> String {
        match parameter.and_then(MethodParameter::qualifier) {
            Some(qualifier) => format!(
                "{}{}{}",
                qualifier, self.qualifier_delimiter, self.sort_parameter
            ),
            None => self.sort_parameter.clone(),
        }
    }

    /// Resolve the sort for any parameter kind; used by the pageable resolver too
    pub fn resolve_sort(&self, parameter: &MethodParameter, request: &WebRequest) -> Sort {
        let values = request.parameter_values(&self.sort_parameter_name(Some(parameter)));

        if values.is_empty() || (values.len() == 1 && values[0].trim().is_empty()) {
            return self.default_from_parameter_or_fallback(parameter);
        }

        let sort = self.parse_sort(values);
        if sort.is_sorted() {
            sort
        } else {
            self.default_from_parameter_or_fallback(parameter)
        }
    }

    /// Parse raw sort expressions, skipping blank properties and bare directions
    pub fn parse_sort<S: AsRef<str>>(&self, values: &[S]) -> Sort {
        let mut orders = Vec::new();
        for value in values {
            let mut tokens: Vec<&str> = value
                .as_ref()
                .split(self.property_delimiter.as_str())
                .map(str::trim)
                .collect();

            let ignore_case = match tokens.last() {
                Some(last) if last.eq_ignore_ascii_case(IGNORE_CASE_TOKEN) => {
                    tokens.pop();
                    true
                }
                _ => false,
            };

            let direction = match tokens.last().and_then(|last| Direction::from_token(last)) {
                Some(direction) => {
                    tokens.pop();
                    direction
                }
                None => Direction::Asc,
            };

            for property in tokens.into_iter().filter(|t| !t.is_empty()) {
                let order = Order::new(direction, property);
                orders.push(if ignore_case { order.ignoring_case() } else { order });
            }
        }
        Sort::from_orders(orders)
    }

    /// Render a sort as parameter values, one per run of orders sharing
    /// direction and case handling
    pub fn to_parameter_values(&self, sort: &Sort) -> Vec<String> {
        let mut values = Vec::new();
        let mut properties: Vec<&str> = Vec::new();
        let mut current: Option<(Direction, bool)> = None;

        for order in sort {
            let key = (order.direction, order.ignore_case);
            if current.is_some_and(|c| c != key) {
                if let Some(run) = current {
                    values.push(self.fold_expression(&properties, run));
                }
                properties.clear();
            }
            current = Some(key);
            properties.push(&order.property);
        }
        if let Some(run) = current {
            values.push(self.fold_expression(&properties, run));
        }
        values
    }

    fn fold_expression(
        &self,
        properties: &[&str],
        (direction, ignore_case): (Direction, bool),
    ) -> String {
        let mut tokens: Vec<&str> = properties.to_vec();
        tokens.push(direction.as_str());
        if ignore_case {
            tokens.push(IGNORE_CASE_TOKEN);
        }
        tokens.join(&self.property_delimiter)
    }

    fn default_from_parameter_or_fallback(&self, parameter: &MethodParameter) -> Sort {
        let defaults = parameter.sort_defaults();
        if defaults.is_empty() {
            return self.fallback_sort.clone();
        }

        let mut sort = Sort::unsorted();
        for default in defaults {
            for property in &default.sort {
                let order = Order::new(default.direction, property.as_str());
                sort.push(if default.case_sensitive {
                    order
                } else {
                    order.ignoring_case()
                });
            }
        }
        sort
    }
}

impl SortArgumentResolver for SortResolver {
    fn supports_parameter(&self, parameter: &MethodParameter) -> bool {
        parameter.is_sort()
    }

    fn resolve_argument(
        &self,
        parameter: &MethodParameter,
        request: &WebRequest,
    ) -> Result<Sort, PageableError> {
        parameter
            .method()
            .assert_qualifier_uniqueness(parameter.kind())?;

        let sort = self.resolve_sort(parameter, request);
        tracing::debug!(
            handler = parameter.method_name(),
            parameter = parameter.name(),
            %sort,
            "Resolved sort"
        );
        Ok(sort)
    }
}
