//! LAPS Core Library
//!
//! Business logic for reading LAPS (Local Administrator Password Solution)
//! passwords out of Active Directory:
//! - [`ComputerAccount`]: the validated record built from a directory result
//! - [`ComputerAccountService`]: single-computer and bulk lookups
//! - [`JsonDocument`]: JSON round-trip for records and collections
//!
//! Directory access goes through the [`laps_directory::DirectorySearcher`]
//! trait, so the same service runs against a live domain controller or an
//! in-memory fixture.

pub mod error;
pub mod json;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use json::JsonDocument;
pub use services::ComputerAccountService;
pub use types::{ComputerAccount, DirectoryTarget};
