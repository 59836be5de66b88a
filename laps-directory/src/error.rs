use serde::{Deserialize, Serialize};

/// Unified error type for all directory search operations.
///
/// Variants carry the host (server or domain) the operation was aimed at plus
/// the directory client's own message, preserved verbatim. Nothing here is
/// retried; every error surfaces to the immediate caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DirectoryError {
    /// The connection to the directory server could not be established
    /// (DNS resolution failure, connection refused, TLS handshake, etc.).
    ConnectionFailed {
        /// Host the connection was attempted against.
        host: String,
        /// Error details from the directory client.
        detail: String,
    },

    /// The directory rejected the supplied bind credentials.
    InvalidCredentials {
        /// Host that rejected the bind.
        host: String,
        /// Diagnostic message returned by the server, if any.
        raw_message: Option<String>,
    },

    /// The search request itself failed after a successful bind.
    SearchFailed {
        /// Host the search ran against.
        host: String,
        /// Filter that was sent.
        filter: String,
        /// Error details from the directory client.
        detail: String,
    },

    /// The domain or server name cannot be turned into an LDAP path.
    InvalidPath {
        /// Description of what's wrong.
        detail: String,
    },

    /// The connection settings are inconsistent or need a disabled feature.
    InvalidConfig {
        /// Description of what's wrong.
        detail: String,
    },

    /// A fixture file could not be read or parsed.
    FixtureError {
        /// Description of what's wrong.
        detail: String,
    },
}

impl DirectoryError {
    /// 是否为预期行为（用户输入错误、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::InvalidPath { .. } | Self::InvalidConfig { .. }
        )
    }
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed { host, detail } => {
                write!(f, "[{host}] Connection failed: {detail}")
            }
            Self::InvalidCredentials { host, raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{host}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{host}] Invalid credentials")
                }
            }
            Self::SearchFailed {
                host,
                filter,
                detail,
            } => {
                write!(f, "[{host}] Search '{filter}' failed: {detail}")
            }
            Self::InvalidPath { detail } => write!(f, "Invalid LDAP path: {detail}"),
            Self::InvalidConfig { detail } => {
                write!(f, "Invalid directory configuration: {detail}")
            }
            Self::FixtureError { detail } => write!(f, "Fixture error: {detail}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Convenience type alias for `Result<T, DirectoryError>`.
pub type Result<T> = std::result::Result<T, DirectoryError>;
