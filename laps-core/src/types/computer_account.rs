//! LAPS computer account record.

use chrono::{DateTime, Utc};
use laps_directory::DirectoryObject;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::utils::filetime;

/// Computer name attribute.
pub const ATTR_NAME: &str = "name";

/// LAPS managed local administrator password.
pub const ATTR_ADMIN_PASSWORD: &str = "ms-mcs-admpwd";

/// LAPS password expiration, as a Windows file time.
pub const ATTR_ADMIN_PASSWORD_EXPIRATION: &str = "ms-mcs-admpwdexpirationtime";

/// Attributes requested for every computer account search.
pub const LAPS_ATTRIBUTES: [&str; 3] = [
    ATTR_NAME,
    ATTR_ADMIN_PASSWORD,
    ATTR_ADMIN_PASSWORD_EXPIRATION,
];

/// Unix seconds of `0001-01-01T00:00:00Z`.
pub const NO_EXPIRATION_TIMESTAMP: i64 = -62_135_596_800;

/// Expiration used when the directory carries none.
#[must_use]
pub fn no_expiration() -> DateTime<Utc> {
    DateTime::from_timestamp(NO_EXPIRATION_TIMESTAMP, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A computer's LAPS password and its expiration.
///
/// The computer name is never empty. Records are immutable once built; go
/// through [`ComputerAccount::new`], [`ComputerAccount::from_directory_object`]
/// or deserialization, all of which enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ComputerAccountDocument")]
pub struct ComputerAccount {
    computer_name: String,
    computer_admin_password: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    computer_admin_password_expiration_date_time: DateTime<Utc>,
}

/// Unvalidated wire shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputerAccountDocument {
    computer_name: String,
    computer_admin_password: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    computer_admin_password_expiration_date_time: DateTime<Utc>,
}

impl TryFrom<ComputerAccountDocument> for ComputerAccount {
    type Error = CoreError;

    fn try_from(doc: ComputerAccountDocument) -> CoreResult<Self> {
        Self::new(
            doc.computer_name,
            doc.computer_admin_password,
            doc.computer_admin_password_expiration_date_time,
        )
    }
}

impl ComputerAccount {
    /// Build a record, rejecting an empty computer name.
    pub fn new(
        computer_name: impl Into<String>,
        computer_admin_password: Option<String>,
        computer_admin_password_expiration_date_time: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let computer_name = computer_name.into();
        if computer_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "computerName must not be empty".to_string(),
            ));
        }
        Ok(Self {
            computer_name,
            computer_admin_password,
            computer_admin_password_expiration_date_time,
        })
    }

    /// Map one directory result onto a record.
    ///
    /// Only the first value of each attribute is read. A missing password is
    /// allowed; a missing expiration becomes [`no_expiration`].
    pub fn from_directory_object(object: &DirectoryObject) -> CoreResult<Self> {
        let computer_name = object
            .first_value(ATTR_NAME)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| CoreError::MissingAttribute(ATTR_NAME.to_string()))?;

        let password = object.first_value(ATTR_ADMIN_PASSWORD).map(str::to_string);

        let expiration = match object.first_value(ATTR_ADMIN_PASSWORD_EXPIRATION) {
            Some(raw) => parse_expiration(raw)?,
            None => no_expiration(),
        };

        Self::new(computer_name, password, expiration)
    }

    pub fn computer_name(&self) -> &str {
        &self.computer_name
    }

    pub fn computer_admin_password(&self) -> Option<&str> {
        self.computer_admin_password.as_deref()
    }

    pub fn computer_admin_password_expiration_date_time(&self) -> DateTime<Utc> {
        self.computer_admin_password_expiration_date_time
    }

    /// `false` when the directory had no expiration for this computer.
    pub fn has_expiration(&self) -> bool {
        self.computer_admin_password_expiration_date_time != no_expiration()
    }
}

impl TryFrom<&DirectoryObject> for ComputerAccount {
    type Error = CoreError;

    fn try_from(object: &DirectoryObject) -> CoreResult<Self> {
        Self::from_directory_object(object)
    }
}

fn parse_expiration(raw: &str) -> CoreResult<DateTime<Utc>> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(filetime::to_datetime)
        .ok_or_else(|| CoreError::InvalidAttribute {
            attribute: ATTR_ADMIN_PASSWORD_EXPIRATION.to_string(),
            value: raw.to_string(),
        })
}
