//! LDAP / Active Directory 后端实现

use std::time::Duration;

use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapError, LdapResult, Scope, SearchEntry};

use crate::error::{DirectoryError, Result};
use crate::traits::DirectorySearcher;
use crate::types::{BindCredentials, DirectoryConfig, DirectoryObject, SearchRequest};

/// LDAP result code `invalidCredentials`.
const RC_INVALID_CREDENTIALS: u32 = 49;

/// Directory searcher backed by a live LDAP server.
///
/// Holds only connection settings; every search connects, binds, queries and
/// unbinds on its own.
#[derive(Debug, Clone)]
pub struct LdapDirectory {
    config: DirectoryConfig,
}

impl LdapDirectory {
    /// Create a searcher after validating `config`.
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn settings(&self) -> LdapConnSettings {
        let mut settings = LdapConnSettings::new();
        if let Some(secs) = self.config.connect_timeout_secs {
            settings = settings.set_conn_timeout(Duration::from_secs(secs));
        }
        #[cfg(any(feature = "native-tls", feature = "rustls"))]
        {
            settings = settings
                .set_starttls(self.config.use_starttls)
                .set_no_tls_verify(self.config.no_tls_verify);
        }
        settings
    }

    async fn connect(&self, host: &str) -> Result<Ldap> {
        let url = self.config.url_for(host);
        log::debug!("Connecting to {url}");

        let (conn, ldap) = LdapConnAsync::with_settings(self.settings(), &url)
            .await
            .map_err(|e| DirectoryError::ConnectionFailed {
                host: host.to_string(),
                detail: e.to_string(),
            })?;

        // 连接驱动在后台运行，unbind 之后自行退出
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                log::warn!("LDAP connection driver error: {e}");
            }
        });

        Ok(ldap)
    }

    async fn bind(
        ldap: &mut Ldap,
        host: &str,
        credentials: Option<&BindCredentials>,
    ) -> Result<()> {
        let Some(creds) = credentials else {
            return Self::bind_as_caller(ldap, host).await;
        };

        log::debug!("Binding to {host} as {}", creds.username);
        ldap.simple_bind(&creds.username, &creds.password)
            .await
            .and_then(LdapResult::success)
            .map_err(|e| map_bind_error(host, e))?;
        Ok(())
    }

    #[cfg(feature = "gssapi")]
    async fn bind_as_caller(ldap: &mut Ldap, host: &str) -> Result<()> {
        log::debug!("Binding to {host} with GSSAPI as the current user");
        ldap.sasl_gssapi_bind(host)
            .await
            .and_then(LdapResult::success)
            .map_err(|e| map_bind_error(host, e))?;
        Ok(())
    }

    #[cfg(not(feature = "gssapi"))]
    #[allow(clippy::unused_async)]
    async fn bind_as_caller(_ldap: &mut Ldap, host: &str) -> Result<()> {
        // 未启用 gssapi 时无法代表当前用户绑定，退化为匿名查询
        log::debug!("No credentials supplied, searching {host} anonymously");
        Ok(())
    }

    async fn search(ldap: &mut Ldap, request: &SearchRequest) -> Result<Vec<DirectoryObject>> {
        let base_dn = request.path.base_dn();
        let filter = request.filter.to_rfc4515();
        log::debug!("Searching {} with filter {filter}", request.path);

        let (entries, _) = ldap
            .search(
                &base_dn,
                Scope::Subtree,
                &filter,
                request.attributes.clone(),
            )
            .await
            .and_then(ldap3::SearchResult::success)
            .map_err(|e| DirectoryError::SearchFailed {
                host: request.path.host().to_string(),
                filter: filter.clone(),
                detail: e.to_string(),
            })?;

        // 跳过 referral 和中间响应，只保留真正的条目
        let objects: Vec<DirectoryObject> = entries
            .into_iter()
            .filter(|entry| !entry.is_ref() && !entry.is_intermediate())
            .map(SearchEntry::construct)
            .map(|entry| DirectoryObject::from_attributes(entry.dn, entry.attrs))
            .collect();

        log::debug!("Search on {} returned {} entries", request.path, objects.len());
        Ok(objects)
    }
}

/// Map a failed bind onto a [`DirectoryError`], singling out rejected credentials.
fn map_bind_error(host: &str, err: LdapError) -> DirectoryError {
    match err {
        LdapError::LdapResult { result } if result.rc == RC_INVALID_CREDENTIALS => {
            DirectoryError::InvalidCredentials {
                host: host.to_string(),
                raw_message: Some(result.text).filter(|text| !text.is_empty()),
            }
        }
        other => DirectoryError::ConnectionFailed {
            host: host.to_string(),
            detail: other.to_string(),
        },
    }
}

#[async_trait]
impl DirectorySearcher for LdapDirectory {
    fn id(&self) -> &'static str {
        "ldap"
    }

    async fn find_all(&self, request: &SearchRequest) -> Result<Vec<DirectoryObject>> {
        let host = request.path.host();
        let mut ldap = self.connect(host).await?;

        let result = match Self::bind(&mut ldap, host, request.credentials.as_ref()).await {
            Ok(()) => Self::search(&mut ldap, request).await,
            Err(e) => Err(e),
        };

        // 无论成功与否都释放连接
        if let Err(e) = ldap.unbind().await {
            log::warn!("Error during LDAP unbind on {host}: {e}");
        }

        result
    }
}
