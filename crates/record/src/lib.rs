//! Host data record shared between a field and the rest of the application.
//!
//! * [`Record`] - ordered attribute bag with synchronous per-key change listeners
//! * [`Subscription`] - listener guard released on drop
//! * [`LinkAttrs`] / [`MultiLinkAttrs`] - declared attribute schemas for field backing attributes

pub mod error;
pub mod record;
pub mod schema;

use std::cell::RefCell;
use std::rc::Rc;

pub use error::{RecordError, Result};
pub use record::{Attributes, ListenerId, Record, RecordChange, Subscription, subscribe};
pub use schema::{LinkAttrs, MultiLinkAttrs};
pub use serde_json::Value;

/// Record handle shared between the host and every field bound to it.
pub type SharedRecord = Rc<RefCell<Record>>;
