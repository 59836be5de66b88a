use laps_directory::{BindCredentials, LdapPath};

use crate::error::{CoreError, CoreResult};

/// Where and as whom to search.
///
/// `credentials: None` searches as the calling identity.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTarget {
    pub domain_name: String,
    pub server_name: Option<String>,
    pub credentials: Option<BindCredentials>,
}

impl DirectoryTarget {
    pub fn new(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_server(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: BindCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the LDAP path, rejecting a blank domain name.
    pub fn path(&self) -> CoreResult<LdapPath> {
        if self.domain_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "domain name must not be empty".to_string(),
            ));
        }
        Ok(LdapPath::new(&self.domain_name, self.server_name.as_deref())?)
    }
}
