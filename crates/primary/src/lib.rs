//! Primary selection for multi-link fields.
//!
//! A multi-link field links several records; exactly one of them may be
//! designated primary and is persisted as a `<link>Id`/`<link>Name` pair on
//! the host record.
//!
//! * [`PrimarySelector`] - the state machine: set, clear, auto-resolve and switch the primary
//! * [`LinkCapability`] - what the selector needs from a field, implemented for every [`RelationField`]
//! * [`PrimaryField`] - a base relation field composed with a selector
//!
//! # State machine
//!
//! ```text
//!              link added / reconcile (first toggle)
//!  NoPrimary ─────────────────────────────────────────► HasPrimary(id)
//!      ▲                                                   │    ▲
//!      │            primary link removed                   │    │ switch_primary(other)
//!      └───────────────────────────────────────────────────┘    │
//!                                                          └────┘
//! ```
//!
//! External changes of `<link>Id` overwrite the state directly, without
//! auto-resolution and without a change event.
//!
//! [`RelationField`]: linkfield_links::RelationField

pub mod capability;
pub mod error;
pub mod field;
#[cfg(test)]
mod invariants;
pub mod selector;

pub use capability::LinkCapability;
pub use error::{PrimaryError, Result};
pub use field::PrimaryField;
pub use selector::{PrimarySelector, PrimaryState};
