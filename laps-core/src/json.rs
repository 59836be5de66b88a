//! JSON round-trip helper.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Provided JSON conversions for any serde type.
///
/// Writing works for unsized values too, so a `[ComputerAccount]` slice
/// serializes without copying into a `Vec`. Reading needs an owned type.
/// Errors come straight from `serde_json`.
pub trait JsonDocument: Serialize {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn from_json(json: &str) -> serde_json::Result<Self>
    where
        Self: Sized + DeserializeOwned,
    {
        serde_json::from_str(json)
    }
}

impl<T: Serialize + ?Sized> JsonDocument for T {}
