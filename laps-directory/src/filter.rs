//! Search filters.
//!
//! A [`SearchFilter`] pairs an object class with one [`Criterion`]. It renders
//! in two forms:
//!
//! - [`Display`](std::fmt::Display): the directory form used in paths, logs and
//!   documentation, `(&(objectClass=computer)((name=HOST01)))`.
//! - [`SearchFilter::to_rfc4515`]: the strict form put on the wire,
//!   `(&(objectClass=computer)(name=HOST01))`.
//!
//! Both escape assertion values, and [`SearchFilter::matches`] evaluates the
//! same filter against a [`DirectoryObject`] for in-memory directories.

use std::fmt;

use crate::types::DirectoryObject;

/// A single match condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// `(attribute=value)`, compared case-insensitively.
    Equals { attribute: String, value: String },
    /// `(attribute=*)`: the attribute has at least one value.
    Present { attribute: String },
    /// `(&...)`: every nested criterion matches.
    And(Vec<Criterion>),
}

impl Criterion {
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn present(attribute: impl Into<String>) -> Self {
        Self::Present {
            attribute: attribute.into(),
        }
    }

    fn matches(&self, object: &DirectoryObject) -> bool {
        match self {
            Self::Equals { attribute, value } => object
                .values(attribute)
                .is_some_and(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value))),
            Self::Present { attribute } => object.has_attribute(attribute),
            Self::And(criteria) => criteria.iter().all(|c| c.matches(object)),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals { attribute, value } => {
                write!(f, "({attribute}={})", escape_filter_value(value))
            }
            Self::Present { attribute } => write!(f, "({attribute}=*)"),
            Self::And(criteria) => {
                f.write_str("(&")?;
                for c in criteria {
                    write!(f, "{c}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Object class plus criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    object_class: String,
    criterion: Criterion,
}

impl SearchFilter {
    pub fn new(object_class: impl Into<String>, criterion: Criterion) -> Self {
        Self {
            object_class: object_class.into(),
            criterion,
        }
    }

    /// Strict RFC 4515 text for the LDAP client.
    pub fn to_rfc4515(&self) -> String {
        format!(
            "(&(objectClass={}){})",
            escape_filter_value(&self.object_class),
            self.criterion
        )
    }

    /// Evaluate the filter against an object.
    pub fn matches(&self, object: &DirectoryObject) -> bool {
        Criterion::equals("objectClass", self.object_class.as_str()).matches(object)
            && self.criterion.matches(object)
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(&(objectClass={})({}))",
            escape_filter_value(&self.object_class),
            self.criterion
        )
    }
}

/// Escape special characters in LDAP filter values (RFC 4515).
///
/// Characters that must be escaped: `*` `(` `)` `\` NUL
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\5c"),
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
