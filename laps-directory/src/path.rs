//! LDAP search roots built from a DNS domain name.

use std::fmt;

use crate::error::{DirectoryError, Result};

/// Characters with meaning inside a DN (RFC 4514). Domain labels never
/// contain them, so they are rejected rather than escaped.
const DN_SPECIAL: &[char] = &[',', '=', '+', '\\', '"', '<', '>', ';', '#', '\0'];

/// Location of a directory search root.
///
/// Rendered as `LDAP://[server/]DC=<c1>,DC=<c2>,...`: the domain name split on
/// `.` gives one `DC=` component per label, and a specific server, when
/// given, is prefixed with a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapPath {
    domain: String,
    server: Option<String>,
    components: Vec<String>,
}

impl LdapPath {
    /// Build a path for `domain_name`, optionally pinned to `server_name`.
    ///
    /// A blank server name is treated as absent. The domain must be non-empty,
    /// free of DN special characters (`,` `=` `+` `\` ...), and must not
    /// contain empty labels (`example..com`).
    pub fn new(domain_name: &str, server_name: Option<&str>) -> Result<Self> {
        let domain = domain_name.trim();
        if domain.is_empty() {
            return Err(DirectoryError::InvalidPath {
                detail: "domain name is empty".to_string(),
            });
        }

        let components: Vec<String> = domain.split('.').map(str::to_string).collect();
        if components.iter().any(|c| c.trim().is_empty()) {
            return Err(DirectoryError::InvalidPath {
                detail: format!("domain name '{domain}' has an empty component"),
            });
        }
        if let Some(bad) = domain.chars().find(|c| DN_SPECIAL.contains(c)) {
            return Err(DirectoryError::InvalidPath {
                detail: format!("domain name '{domain}' contains '{bad}'"),
            });
        }

        let server = server_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            domain: domain.to_string(),
            server,
            components,
        })
    }

    /// The pinned server, if any.
    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Host to connect to: the pinned server, else the domain itself so that
    /// DNS picks a domain controller.
    pub fn host(&self) -> &str {
        self.server.as_deref().unwrap_or(&self.domain)
    }

    /// Base DN, e.g. `DC=example,DC=com`.
    pub fn base_dn(&self) -> String {
        self.components
            .iter()
            .map(|c| format!("DC={c}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for LdapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LDAP://")?;
        if let Some(server) = &self.server {
            write!(f, "{server}/")?;
        }
        f.write_str(&self.base_dn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_without_server() {
        let path = LdapPath::new("example.com", None).unwrap();
        assert_eq!(path.to_string(), "LDAP://DC=example,DC=com");
        assert_eq!(path.host(), "example.com");
    }

    #[test]
    fn path_with_server() {
        let path = LdapPath::new("example.com", Some("dc1.example.com")).unwrap();
        assert_eq!(path.to_string(), "LDAP://dc1.example.com/DC=example,DC=com");
        assert_eq!(path.host(), "dc1.example.com");
        assert_eq!(path.base_dn(), "DC=example,DC=com");
    }

    #[test]
    fn blank_server_is_ignored() {
        let path = LdapPath::new("corp.example.com", Some("  ")).unwrap();
        assert_eq!(path.server(), None);
        assert_eq!(path.to_string(), "LDAP://DC=corp,DC=example,DC=com");
    }

    #[test]
    fn single_label_domain() {
        let path = LdapPath::new("lab", None).unwrap();
        assert_eq!(path.to_string(), "LDAP://DC=lab");
    }

    #[test]
    fn empty_domain_rejected() {
        assert!(matches!(
            LdapPath::new("  ", None),
            Err(DirectoryError::InvalidPath { .. })
        ));
    }

    #[test]
    fn empty_component_rejected() {
        assert!(matches!(
            LdapPath::new("example..com", None),
            Err(DirectoryError::InvalidPath { .. })
        ));
        assert!(matches!(
            LdapPath::new("example.com.", None),
            Err(DirectoryError::InvalidPath { .. })
        ));
    }

    #[test]
    fn dn_special_characters_rejected() {
        for domain in ["ex,ample.com", "example.com=x", "a+b.com", "a\\b.com", "a;b.com"] {
            assert!(
                matches!(
                    LdapPath::new(domain, None),
                    Err(DirectoryError::InvalidPath { .. })
                ),
                "{domain}"
            );
        }
    }

    #[test]
    fn hyphenated_labels_are_fine() {
        let path = LdapPath::new("corp-eu.example.com", None).unwrap();
        assert_eq!(path.base_dn(), "DC=corp-eu,DC=example,DC=com");
    }
}
