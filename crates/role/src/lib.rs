//! Contacts field of an opportunity-like record.
//!
//! Links carry a role, one contact is primary (persisted as
//! `contactId`/`contactName`), and the host's parent link narrows the picker
//! and seeds newly created contacts.

pub mod error;
pub mod field;
pub mod filters;
#[cfg(test)]
mod tests;

pub use error::{Result, RoleError};
pub use field::{PRIMARY_LINK, RoleAwareField, RoleAwareOptions};
pub use filters::{FilterData, FilterKind, SelectFilter, SelectFilters};
