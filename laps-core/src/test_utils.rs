//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use async_trait::async_trait;
use laps_directory::{DirectoryError, DirectoryObject, DirectorySearcher, SearchRequest};
use tokio::sync::Mutex;

// ===== MockSearcher =====

/// 记录每次请求并返回预设结果的目录搜索器
pub struct MockSearcher {
    result: Result<Vec<DirectoryObject>, DirectoryError>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearcher {
    pub fn returning(objects: Vec<DirectoryObject>) -> Self {
        Self {
            result: Ok(objects),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DirectoryError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl DirectorySearcher for MockSearcher {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn find_all(&self, request: &SearchRequest) -> laps_directory::Result<Vec<DirectoryObject>> {
        self.requests.lock().await.push(request.clone());
        self.result.clone()
    }
}

// ===== 工厂方法 =====

/// 创建一个计算机对象
pub fn computer(name: &str, password: Option<&str>, expiration: Option<&str>) -> DirectoryObject {
    let mut object = DirectoryObject::new(format!("CN={name},OU=Workstations,DC=example,DC=com"))
        .with_attribute("objectClass", ["top", "computer"])
        .with_attribute("name", [name]);
    if let Some(password) = password {
        object = object.with_attribute("ms-mcs-admpwd", [password]);
    }
    if let Some(expiration) = expiration {
        object = object.with_attribute("ms-mcs-admpwdexpirationtime", [expiration]);
    }
    object
}
