//! Backend filter grammar.
//!
//! A filter is written `field:value`, where `field` is `name` (backend
//! name) or `proxy` / `proxy_name` (owning HAProxy instance). A backend is
//! kept when `value` is a case-sensitive substring of that field.

use std::fmt;

use crate::model::Backend;

/// Fields a filter may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Proxy,
}

impl FilterField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(FilterField::Name),
            "proxy" | "proxy_name" => Some(FilterField::Proxy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Proxy => "proxy",
        }
    }

    fn value<'a>(&self, backend: &'a Backend) -> &'a str {
        match self {
            FilterField::Name => backend.name(),
            FilterField::Proxy => &backend.proxy_name,
        }
    }
}

/// Rejected filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No `:` separator.
    MissingSeparator(String),
    /// Field name is not `name` or `proxy`.
    UnknownField(String),
    /// Nothing after the separator.
    EmptyValue(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MissingSeparator(input) => {
                write!(f, "invalid filter '{}': expected field:value", input)
            }
            FilterError::UnknownField(field) => {
                write!(f, "invalid filter field '{}': expected name or proxy", field)
            }
            FilterError::EmptyValue(input) => write!(f, "invalid filter '{}': empty value", input),
        }
    }
}

impl std::error::Error for FilterError {}

/// A validated `field:value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: FilterField,
    pub value: String,
}

impl Filter {
    /// Parses user input. Blank input means "no filter" and is always valid.
    pub fn parse(input: &str) -> Result<Option<Filter>, FilterError> {
        let input = input.trim_matches(' ');
        if input.is_empty() {
            return Ok(None);
        }

        let (field, value) = input
            .split_once(':')
            .ok_or_else(|| FilterError::MissingSeparator(input.to_string()))?;
        let field =
            FilterField::parse(field).ok_or_else(|| FilterError::UnknownField(field.to_string()))?;
        if value.is_empty() {
            return Err(FilterError::EmptyValue(input.to_string()));
        }

        Ok(Some(Filter {
            field,
            value: value.to_string(),
        }))
    }

    pub fn matches(&self, backend: &Backend) -> bool {
        self.field.value(backend).contains(self.value.as_str())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::backend;

    #[test]
    fn test_blank_input_is_no_filter() {
        assert_eq!(Filter::parse(""), Ok(None));
        assert_eq!(Filter::parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_qualified_filter() {
        let f = Filter::parse(" name:web ").unwrap().unwrap();
        assert_eq!(f.field, FilterField::Name);
        assert_eq!(f.value, "web");
        assert_eq!(f.to_string(), "name:web");

        let f = Filter::parse("proxy_name:lb01").unwrap().unwrap();
        assert_eq!(f.field, FilterField::Proxy);
        assert_eq!(f.to_string(), "proxy:lb01");
    }

    #[test]
    fn test_value_may_contain_separator() {
        let f = Filter::parse("proxy:lb01:8080").unwrap().unwrap();
        assert_eq!(f.value, "lb01:8080");
    }

    #[test]
    fn test_rejects_unqualified_input() {
        assert_eq!(
            Filter::parse("xyz"),
            Err(FilterError::MissingSeparator("xyz".into()))
        );
    }

    #[test]
    fn test_rejects_unknown_field_and_empty_value() {
        assert_eq!(
            Filter::parse("status:UP"),
            Err(FilterError::UnknownField("status".into()))
        );
        assert_eq!(
            Filter::parse(":web"),
            Err(FilterError::UnknownField("".into()))
        );
        assert_eq!(
            Filter::parse("name:"),
            Err(FilterError::EmptyValue("name:".into()))
        );
    }

    #[test]
    fn test_matches_is_case_sensitive_substring() {
        let web = backend("web-frontend", "UP", "lb01", &[]);
        let name = |v: &str| Filter {
            field: FilterField::Name,
            value: v.to_string(),
        };

        assert!(name("web").matches(&web));
        assert!(name("front").matches(&web));
        assert!(!name("WEB").matches(&web));

        let proxy = Filter {
            field: FilterField::Proxy,
            value: "lb0".to_string(),
        };
        assert!(proxy.matches(&web));
        assert!(!proxy.matches(&backend("api", "UP", "edge", &[])));
    }
}
