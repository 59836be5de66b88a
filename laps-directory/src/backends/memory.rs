//! In-memory directory backed by a fixed set of objects.
//!
//! Used for tests and for offline runs against a JSON fixture file. The
//! search semantics follow LDAP: subtree scope under the path's base DN,
//! case-insensitive matching, and attribute selection. Credentials are
//! accepted and ignored.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{DirectoryError, Result};
use crate::traits::DirectorySearcher;
use crate::types::{DirectoryObject, SearchRequest};

/// Directory searcher over a read-only list of objects.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    objects: Vec<DirectoryObject>,
}

impl InMemoryDirectory {
    pub fn new(objects: Vec<DirectoryObject>) -> Self {
        Self { objects }
    }

    /// Parse a fixture document: a JSON array of `{ "dn", "attributes" }` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let objects: Vec<DirectoryObject> =
            serde_json::from_str(json).map_err(|e| DirectoryError::FixtureError {
                detail: format!("invalid fixture format: {e}"),
            })?;
        Ok(Self::new(objects))
    }

    /// Load a fixture document from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DirectoryError::FixtureError {
                    detail: format!("failed to read {}: {e}", path.display()),
                })?;
        let directory = Self::from_json(&content)?;
        if directory.is_empty() {
            log::warn!("Fixture {} contains no directory objects", path.display());
        } else {
            log::debug!(
                "Loaded {} directory objects from {}",
                directory.len(),
                path.display()
            );
        }
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl DirectorySearcher for InMemoryDirectory {
    fn id(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self, request: &SearchRequest) -> Result<Vec<DirectoryObject>> {
        let base_dn = request.path.base_dn();
        log::debug!("Searching {} with filter {}", request.path, request.filter);

        Ok(self
            .objects
            .iter()
            .filter(|object| object.is_within(&base_dn) && request.filter.matches(object))
            .map(|object| object.project(&request.attributes))
            .collect())
    }
}
