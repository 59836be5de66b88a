//! Directory searcher implementations

mod ldap;
mod memory;

pub use ldap::LdapDirectory;
pub use memory::InMemoryDirectory;
