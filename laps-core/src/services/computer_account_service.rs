//! 计算机账户查询服务

use std::sync::Arc;

use laps_directory::{Criterion, DirectorySearcher, SearchFilter, SearchRequest};

use crate::error::{CoreError, CoreResult};
use crate::types::{
    ATTR_ADMIN_PASSWORD, ATTR_NAME, ComputerAccount, DirectoryTarget, LAPS_ATTRIBUTES,
};

const COMPUTER_CLASS: &str = "computer";

/// `(&(objectClass=computer)((name=<computer_name>)))`
#[must_use]
pub fn computer_by_name_filter(computer_name: &str) -> SearchFilter {
    SearchFilter::new(COMPUTER_CLASS, Criterion::equals(ATTR_NAME, computer_name))
}

/// `(&(objectClass=computer)((ms-mcs-admpwd=*)))`
#[must_use]
pub fn laps_enabled_filter() -> SearchFilter {
    SearchFilter::new(COMPUTER_CLASS, Criterion::present(ATTR_ADMIN_PASSWORD))
}

/// 计算机账户查询服务
pub struct ComputerAccountService {
    searcher: Arc<dyn DirectorySearcher>,
}

impl ComputerAccountService {
    /// 创建查询服务实例
    #[must_use]
    pub fn new(searcher: Arc<dyn DirectorySearcher>) -> Self {
        Self { searcher }
    }

    /// Look up one computer by name.
    ///
    /// Fails with [`CoreError::ComputerNotFound`] when nothing matches.
    pub async fn get_computer_account(
        &self,
        computer_name: &str,
        target: &DirectoryTarget,
    ) -> CoreResult<ComputerAccount> {
        if computer_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "computer name must not be empty".to_string(),
            ));
        }

        let request = self.request(target, computer_by_name_filter(computer_name))?;
        log::debug!(
            "Looking up {computer_name} at {} via {}",
            request.path,
            self.searcher.id()
        );

        let object = self
            .searcher
            .find_one(&request)
            .await?
            .ok_or_else(|| CoreError::ComputerNotFound(computer_name.to_string()))?;

        ComputerAccount::from_directory_object(&object)
    }

    /// List every computer that has a LAPS password set.
    ///
    /// Expired passwords are included. One bad object fails the whole call.
    pub async fn get_computer_accounts(
        &self,
        target: &DirectoryTarget,
    ) -> CoreResult<Vec<ComputerAccount>> {
        let request = self.request(target, laps_enabled_filter())?;
        log::debug!(
            "Listing LAPS computers at {} via {}",
            request.path,
            self.searcher.id()
        );

        let objects = self.searcher.find_all(&request).await?;
        let accounts = objects
            .iter()
            .map(ComputerAccount::from_directory_object)
            .collect::<CoreResult<Vec<_>>>()?;

        log::info!("Found {} LAPS computers in {}", accounts.len(), request.path);
        Ok(accounts)
    }

    fn request(&self, target: &DirectoryTarget, filter: SearchFilter) -> CoreResult<SearchRequest> {
        Ok(SearchRequest {
            path: target.path()?,
            filter,
            attributes: LAPS_ATTRIBUTES.iter().map(|a| (*a).to_string()).collect(),
            credentials: target.credentials.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockSearcher, computer};
    use laps_directory::{BindCredentials, DirectoryError};

    fn target() -> DirectoryTarget {
        DirectoryTarget::new("example.com")
    }

    #[test]
    fn filters_render_in_directory_form() {
        assert_eq!(
            computer_by_name_filter("HOST01").to_string(),
            "(&(objectClass=computer)((name=HOST01)))"
        );
        assert_eq!(
            laps_enabled_filter().to_string(),
            "(&(objectClass=computer)((ms-mcs-admpwd=*)))"
        );
    }

    #[tokio::test]
    async fn get_sends_one_request_with_laps_attributes() {
        let mock = Arc::new(MockSearcher::returning(vec![computer(
            "HOST01",
            Some("pw"),
            Some("132223200000000000"),
        )]));
        let service = ComputerAccountService::new(mock.clone());
        let target = DirectoryTarget::new("example.com")
            .with_server("dc1.example.com")
            .with_credentials(BindCredentials::new("admin@example.com", "secret"));

        let account = service.get_computer_account("HOST01", &target).await.unwrap();
        assert_eq!(account.computer_name(), "HOST01");

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.path.to_string(),
            "LDAP://dc1.example.com/DC=example,DC=com"
        );
        assert_eq!(
            request.filter.to_string(),
            "(&(objectClass=computer)((name=HOST01)))"
        );
        assert_eq!(
            request.attributes,
            vec!["name", "ms-mcs-admpwd", "ms-mcs-admpwdexpirationtime"]
        );
        assert_eq!(
            request.credentials.as_ref().map(|c| c.username.as_str()),
            Some("admin@example.com")
        );
    }

    #[tokio::test]
    async fn get_without_credentials_uses_calling_identity() {
        let mock = Arc::new(MockSearcher::returning(vec![computer("HOST01", None, None)]));
        let service = ComputerAccountService::new(mock.clone());

        service.get_computer_account("HOST01", &target()).await.unwrap();
        assert!(mock.requests().await[0].credentials.is_none());
    }

    #[tokio::test]
    async fn get_searches_for_name_as_supplied() {
        let mock = Arc::new(MockSearcher::returning(vec![computer("HOST01", None, None)]));
        let service = ComputerAccountService::new(mock.clone());

        service.get_computer_account(" HOST01", &target()).await.unwrap();
        assert_eq!(
            mock.requests().await[0].filter.to_string(),
            "(&(objectClass=computer)((name= HOST01)))"
        );
    }

    #[tokio::test]
    async fn get_not_found_names_computer() {
        let service = ComputerAccountService::new(Arc::new(MockSearcher::returning(vec![])));

        match service.get_computer_account("HOST01", &target()).await {
            Err(CoreError::ComputerNotFound(name)) => assert_eq!(name, "HOST01"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_rejects_blank_input_before_searching() {
        let mock = Arc::new(MockSearcher::returning(vec![]));
        let service = ComputerAccountService::new(mock.clone());

        assert!(matches!(
            service.get_computer_account(" ", &target()).await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            service
                .get_computer_account("HOST01", &DirectoryTarget::new(""))
                .await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn get_propagates_directory_errors() {
        let mock = MockSearcher::failing(DirectoryError::InvalidCredentials {
            host: "example.com".to_string(),
            raw_message: None,
        });
        let service = ComputerAccountService::new(Arc::new(mock));

        assert!(matches!(
            service.get_computer_account("HOST01", &target()).await,
            Err(CoreError::Directory(DirectoryError::InvalidCredentials { .. }))
        ));
    }

    #[tokio::test]
    async fn get_fails_on_object_without_name() {
        let nameless = laps_directory::DirectoryObject::new("CN=X,DC=example,DC=com")
            .with_attribute("ms-mcs-admpwd", ["pw"]);
        let service = ComputerAccountService::new(Arc::new(MockSearcher::returning(vec![nameless])));

        assert!(matches!(
            service.get_computer_account("X", &target()).await,
            Err(CoreError::MissingAttribute(_))
        ));
    }

    #[tokio::test]
    async fn list_uses_presence_filter_and_keeps_order() {
        let mock = Arc::new(MockSearcher::returning(vec![
            computer("HOST01", Some("a"), Some("132223200000000000")),
            computer("HOST02", Some("b"), None),
        ]));
        let service = ComputerAccountService::new(mock.clone());

        let accounts = service.get_computer_accounts(&target()).await.unwrap();
        let names: Vec<&str> = accounts.iter().map(ComputerAccount::computer_name).collect();
        assert_eq!(names, vec!["HOST01", "HOST02"]);

        let requests = mock.requests().await;
        assert_eq!(
            requests[0].filter.to_string(),
            "(&(objectClass=computer)((ms-mcs-admpwd=*)))"
        );
        assert_eq!(requests[0].path.to_string(), "LDAP://DC=example,DC=com");
    }

    #[tokio::test]
    async fn list_empty_is_not_an_error() {
        let service = ComputerAccountService::new(Arc::new(MockSearcher::returning(vec![])));
        assert!(service.get_computer_accounts(&target()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_fails_when_any_object_is_invalid() {
        let mock = MockSearcher::returning(vec![
            computer("HOST01", Some("a"), None),
            computer("HOST02", Some("b"), Some("not-a-number")),
        ]);
        let service = ComputerAccountService::new(Arc::new(mock));

        assert!(matches!(
            service.get_computer_accounts(&target()).await,
            Err(CoreError::InvalidAttribute { .. })
        ));
    }
}
