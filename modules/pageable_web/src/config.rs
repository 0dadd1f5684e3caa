//! Configuration for pageable web module

use crate::contract::{model::DEFAULT_PAGE_SIZE, PageableError};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PAGEABLE_";

/// Keys read from `PAGEABLE_*` variables; other variables with the prefix are ignored
const ENV_KEYS: &[&str] = &[
    "page_parameter",
    "size_parameter",
    "sort_parameter",
    "prefix",
    "qualifier_delimiter",
    "property_delimiter",
    "max_page_size",
    "one_indexed_parameters",
    "fallback",
    "fallback_page_size",
];

/// What a resolver produces when a request carries no usable page parameters
/// and the handler declares no default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// First page of `fallback_page_size` elements
    #[default]
    Paged,
    /// All elements (sort still applies)
    Unpaged,
    /// No pageable at all
    Absent,
}

/// Pageable web configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Query parameter carrying the page index
    #[serde(default = "default_page_parameter")]
    pub page_parameter: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_size_parameter")]
    pub size_parameter: String,

    /// Query parameter carrying sort expressions
    #[serde(default = "default_sort_parameter")]
    pub sort_parameter: String,

    /// Prefix prepended to page and size parameter names
    #[serde(default)]
    pub prefix: String,

    /// Separator between a parameter qualifier and the parameter name
    #[serde(default = "default_qualifier_delimiter")]
    pub qualifier_delimiter: String,

    /// Separator between properties and direction inside a sort expression
    #[serde(default = "default_property_delimiter")]
    pub property_delimiter: String,

    /// Upper bound for requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    /// Page parameters start at 1 instead of 0
    #[serde(default)]
    pub one_indexed_parameters: bool,

    /// Behaviour when neither request nor handler define paging
    #[serde(default)]
    pub fallback: FallbackMode,

    /// Page size of the paged fallback
    #[serde(default = "default_fallback_page_size")]
    pub fallback_page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_parameter: default_page_parameter(),
            size_parameter: default_size_parameter(),
            sort_parameter: default_sort_parameter(),
            prefix: String::new(),
            qualifier_delimiter: default_qualifier_delimiter(),
            property_delimiter: default_property_delimiter(),
            max_page_size: default_max_page_size(),
            one_indexed_parameters: false,
            fallback: FallbackMode::default(),
            fallback_page_size: default_fallback_page_size(),
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the optional YAML file, then
    /// `PAGEABLE_*` environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce well-formed page requests
    pub fn validate(&self) -> Result<(), PageableError> {
        if self.max_page_size < 1 {
            return Err(invalid("max_page_size must be at least 1"));
        }
        if self.fallback_page_size < 1 {
            return Err(invalid("fallback_page_size must be at least 1"));
        }
        if self.property_delimiter.is_empty() {
            return Err(invalid("property_delimiter must not be empty"));
        }

        let names = [
            ("page_parameter", &self.page_parameter),
            ("size_parameter", &self.size_parameter),
            ("sort_parameter", &self.sort_parameter),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(invalid(&format!("{} must not be empty", field)));
            }
        }
        if self.page_parameter == self.size_parameter
            || self.page_parameter == self.sort_parameter
            || self.size_parameter == self.sort_parameter
        {
            return Err(invalid("page, size and sort parameters must be distinct"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> PageableError {
    PageableError::Configuration {
        message: message.to_string(),
    }
}

fn default_page_parameter() -> String {
    "page".to_string()
}

fn default_size_parameter() -> String {
    "size".to_string()
}

fn default_sort_parameter() -> String {
    "sort".to_string()
}

fn default_qualifier_delimiter() -> String {
    "_".to_string()
}

fn default_property_delimiter() -> String {
    ",".to_string()
}

fn default_max_page_size() -> u32 {
    2000
}

fn default_fallback_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::Write;

    /// Serializes tests that read or write `PAGEABLE_*` variables
    static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_page_size, 2000);
        assert_eq!(config.fallback, FallbackMode::Paged);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = Figment::new()
            .merge(Yaml::string("max_page_size: 100\nfallback: absent\n"))
            .extract()
            .unwrap();
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.fallback, FallbackMode::Absent);
        assert_eq!(config.page_parameter, "page");
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<Config, _> = Figment::new()
            .merge(Yaml::string("page_size_limit: 10\n"))
            .extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_LOCK.lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix: \"p_\"\none_indexed_parameters: true").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.prefix, "p_");
        assert!(config.one_indexed_parameters);
    }

    #[test]
    fn test_env_overrides_yaml_and_ignores_unrelated_variables() {
        let _guard = ENV_LOCK.lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_page_size: 100\nprefix: \"y_\"").unwrap();

        std::env::set_var("PAGEABLE_MAX_PAGE_SIZE", "50");
        std::env::set_var("PAGEABLE_WEB_LOG", "debug");
        let loaded = Config::load(Some(file.path()));
        std::env::remove_var("PAGEABLE_MAX_PAGE_SIZE");
        std::env::remove_var("PAGEABLE_WEB_LOG");

        let config = loaded.unwrap();
        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.prefix, "y_");
        assert_eq!(config.page_parameter, "page");
    }

    #[test]
    fn test_validation_failures() {
        let config = Config {
            max_page_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PageableError::Configuration { .. })
        ));

        let config = Config {
            size_parameter: "page".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            sort_parameter: " ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
