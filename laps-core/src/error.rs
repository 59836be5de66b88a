//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use laps_directory::DirectoryError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required attribute is absent or empty on the directory object
    #[error("Required attribute '{0}' is missing")]
    MissingAttribute(String),

    /// An attribute value could not be interpreted
    #[error("Invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute { attribute: String, value: String },

    /// No computer object matched the requested name
    #[error("Computer not found: {0}")]
    ComputerNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Directory error (converting from library)
    #[error("{0}")]
    Directory(#[from] DirectoryError),
}

impl CoreError {
    /// 是否为预期行为（用户输入、计算机不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，返回 `false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ComputerNotFound(_) | Self::ValidationError(_) => true,
            Self::Directory(e) => e.is_expected(),
            Self::MissingAttribute(_) | Self::InvalidAttribute { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
