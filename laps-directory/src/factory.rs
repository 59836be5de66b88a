//! Searcher factory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backends::{InMemoryDirectory, LdapDirectory};
use crate::error::Result;
use crate::traits::DirectorySearcher;
use crate::types::DirectoryConfig;

/// Which directory implementation to search.
#[derive(Debug, Clone)]
pub enum DirectoryBackend {
    /// A live LDAP server, reached with the given settings.
    Ldap(DirectoryConfig),
    /// A JSON fixture file served from memory.
    Fixture(PathBuf),
}

/// Creates a [`DirectorySearcher`] for the selected backend.
///
/// The searcher is wrapped in `Arc<dyn DirectorySearcher>` so callers can hold
/// it without knowing the concrete backend.
///
/// # Examples
///
/// ```rust,no_run
/// use laps_directory::{create_searcher, DirectoryBackend, DirectoryConfig, DirectorySearcher};
///
/// # async fn demo() -> laps_directory::Result<()> {
/// let searcher = create_searcher(DirectoryBackend::Ldap(DirectoryConfig::default())).await?;
/// assert_eq!(searcher.id(), "ldap");
/// # Ok(())
/// # }
/// ```
pub async fn create_searcher(backend: DirectoryBackend) -> Result<Arc<dyn DirectorySearcher>> {
    match backend {
        DirectoryBackend::Ldap(config) => Ok(Arc::new(LdapDirectory::new(config)?)),
        DirectoryBackend::Fixture(path) => Ok(Arc::new(InMemoryDirectory::load(path).await?)),
    }
}
