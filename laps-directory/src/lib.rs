//! # laps-directory
//!
//! Directory search abstraction used to read LAPS (Local Administrator
//! Password Solution) attributes from Active Directory.
//!
//! ## Backends
//!
//! | Backend | Type | Notes |
//! |---------|------|-------|
//! | LDAP / Active Directory | [`LdapDirectory`] | Built on [`ldap3`](https://docs.rs/ldap3). One connection per search. |
//! | In-memory | [`InMemoryDirectory`] | Serves a fixed object list or a JSON fixture file. |
//!
//! Pick one at configuration time with [`DirectoryBackend`] and
//! [`create_searcher`], or construct the backend directly.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ### Authentication
//!
//! - **`gssapi`**: Bind with Kerberos as the calling user when no credentials
//!   are supplied. Without it, such searches run anonymously.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use laps_directory::{
//!     create_searcher, BindCredentials, Criterion, DirectoryBackend, DirectoryConfig,
//!     DirectorySearcher, LdapPath, SearchFilter, SearchRequest,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let searcher = create_searcher(DirectoryBackend::Ldap(DirectoryConfig::default())).await?;
//!
//!     let request = SearchRequest {
//!         path: LdapPath::new("example.com", Some("dc1.example.com"))?,
//!         filter: SearchFilter::new("computer", Criterion::equals("name", "HOST01")),
//!         attributes: vec!["name".into(), "ms-mcs-admpwd".into()],
//!         credentials: Some(BindCredentials::new("admin@example.com", "secret")),
//!     };
//!
//!     if let Some(object) = searcher.find_one(&request).await? {
//!         println!("{} -> {:?}", object.dn, object.first_value("ms-mcs-admpwd"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, DirectoryError>`](DirectoryError). Client
//! failures keep the directory client's message verbatim and are never
//! retried.

mod backends;
mod error;
mod factory;
mod filter;
mod path;
mod traits;
mod types;

// Re-export error types
pub use error::{DirectoryError, Result};

// Re-export factory
pub use factory::{DirectoryBackend, create_searcher};

// Re-export core trait
pub use traits::DirectorySearcher;

// Re-export types
pub use filter::{Criterion, SearchFilter, escape_filter_value};
pub use path::LdapPath;
pub use types::{
    BindCredentials, DirectoryConfig, DirectoryObject, LDAP_PORT, LDAPS_PORT, SearchRequest,
};

// Re-export concrete backends
pub use backends::{InMemoryDirectory, LdapDirectory};
