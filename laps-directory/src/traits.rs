use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DirectoryObject, SearchRequest};

/// 目录搜索 Trait
///
/// Each call opens its own connection, runs exactly one query and releases the
/// connection before returning, on success and on failure alike.
#[async_trait]
pub trait DirectorySearcher: Send + Sync {
    /// 后端标识符
    fn id(&self) -> &'static str;

    /// Run the search and return every matching object, fully materialised.
    ///
    /// An empty result is `Ok(vec![])`, not an error.
    async fn find_all(&self, request: &SearchRequest) -> Result<Vec<DirectoryObject>>;

    /// Run the search and return the first matching object, if any.
    ///
    /// 默认实现调用 `find_all()` 并取第一条结果。
    async fn find_one(&self, request: &SearchRequest) -> Result<Option<DirectoryObject>> {
        Ok(self.find_all(request).await?.into_iter().next())
    }
}
