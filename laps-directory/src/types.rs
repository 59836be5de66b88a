use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};
use crate::filter::SearchFilter;
use crate::path::LdapPath;

// ============ Directory Objects ============

/// One object returned by a directory search.
///
/// Attribute names are case-insensitive in LDAP; they are stored lowercased so
/// that `name`, `Name` and `NAME` all address the same values. Values keep the
/// order the server returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDirectoryObject")]
pub struct DirectoryObject {
    /// Distinguished name of the object.
    pub dn: String,
    attributes: HashMap<String, Vec<String>>,
}

/// Wire form of [`DirectoryObject`] before attribute names are normalised.
#[derive(Deserialize)]
struct RawDirectoryObject {
    #[serde(default)]
    dn: String,
    #[serde(default)]
    attributes: HashMap<String, Vec<String>>,
}

impl From<RawDirectoryObject> for DirectoryObject {
    fn from(raw: RawDirectoryObject) -> Self {
        Self::from_attributes(raw.dn, raw.attributes)
    }
}

impl DirectoryObject {
    /// Create an object with no attributes.
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Build an object from a raw attribute map, as returned by an LDAP client.
    ///
    /// Keys differing only in case are merged.
    pub fn from_attributes(dn: impl Into<String>, attributes: HashMap<String, Vec<String>>) -> Self {
        let mut object = Self::new(dn);
        for (name, values) in attributes {
            object.insert(&name, values);
        }
        object
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_attribute<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(name, values.into_iter().map(Into::into).collect());
        self
    }

    /// Append values to an attribute.
    pub fn insert(&mut self, name: &str, values: Vec<String>) {
        self.attributes
            .entry(name.to_ascii_lowercase())
            .or_default()
            .extend(values);
    }

    /// All values of an attribute, looked up case-insensitively.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// First value of an attribute, if the attribute has any.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether the attribute is present with at least one value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.values(name).is_some_and(|values| !values.is_empty())
    }

    /// Copy of this object restricted to the given attributes.
    ///
    /// An empty list keeps every attribute, like an LDAP search with no
    /// attribute selection.
    #[must_use]
    pub fn project(&self, attributes: &[String]) -> Self {
        if attributes.is_empty() {
            return self.clone();
        }
        let wanted: Vec<String> = attributes.iter().map(|a| a.to_ascii_lowercase()).collect();
        Self {
            dn: self.dn.clone(),
            attributes: self
                .attributes
                .iter()
                .filter(|(name, _)| wanted.contains(name))
                .map(|(name, values)| (name.clone(), values.clone()))
                .collect(),
        }
    }

    /// Whether this object sits at or below `base_dn` (case-insensitive).
    pub fn is_within(&self, base_dn: &str) -> bool {
        let dn = self.dn.to_ascii_lowercase();
        let base = base_dn.to_ascii_lowercase();
        dn == base || dn.ends_with(&format!(",{base}"))
    }
}

// ============ Search Requests ============

/// Username and password used for a simple bind.
///
/// The `Debug` implementation never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct BindCredentials {
    /// Bind name, e.g. `admin@example.com` or `EXAMPLE\admin`.
    pub username: String,
    /// Bind password.
    pub password: String,
}

impl BindCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BindCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A single search against a directory.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Where to search.
    pub path: LdapPath,
    /// What to match.
    pub filter: SearchFilter,
    /// Attributes to return. Empty means all.
    pub attributes: Vec<String>,
    /// Bind credentials; `None` uses the calling identity.
    pub credentials: Option<BindCredentials>,
}

// ============ Connection Settings ============

/// Default port for plain LDAP and StartTLS.
pub const LDAP_PORT: u16 = 389;
/// Default port for LDAP over TLS.
pub const LDAPS_PORT: u16 = 636;

/// Connection settings for the LDAP backend.
///
/// All fields have defaults, so a partial JSON object deserializes fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectoryConfig {
    /// Port override. Defaults to 389, or 636 with [`use_ldaps`](Self::use_ldaps).
    pub port: Option<u16>,
    /// Connect with `ldaps://`.
    pub use_ldaps: bool,
    /// Upgrade a plain connection with StartTLS.
    pub use_starttls: bool,
    /// Skip server certificate verification.
    pub no_tls_verify: bool,
    /// Connect timeout. `None` keeps the client default.
    pub connect_timeout_secs: Option<u64>,
}

impl DirectoryConfig {
    /// Effective port.
    pub fn port(&self) -> u16 {
        self.port
            .unwrap_or(if self.use_ldaps { LDAPS_PORT } else { LDAP_PORT })
    }

    /// Connection URL for `host`.
    pub fn url_for(&self, host: &str) -> String {
        let scheme = if self.use_ldaps { "ldaps" } else { "ldap" };
        format!("{scheme}://{host}:{}", self.port())
    }

    /// Reject combinations the backend cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.use_ldaps && self.use_starttls {
            return Err(DirectoryError::InvalidConfig {
                detail: "useLdaps and useStarttls are mutually exclusive".to_string(),
            });
        }
        if self.port == Some(0) {
            return Err(DirectoryError::InvalidConfig {
                detail: "port must be greater than 0".to_string(),
            });
        }
        let wants_tls = self.use_ldaps || self.use_starttls || self.no_tls_verify;
        if wants_tls && !cfg!(any(feature = "native-tls", feature = "rustls")) {
            return Err(DirectoryError::InvalidConfig {
                detail: "TLS requested but no TLS backend was compiled in".to_string(),
            });
        }
        Ok(())
    }
}
