//! Multi-valued link fields.
//!
//! * [`LinkSet`] - ordered linked ids with a name lookup
//! * [`LinkSurface`] - headless render state: rendered items and their primary toggles
//! * [`RelationField`] - contract of a base relation field
//! * [`LinkMultiple`] / [`LinkMultipleWithRole`] - base field implementations

pub mod error;
pub mod events;
pub mod field;
pub mod link_set;
pub mod mode;
pub mod multiple;
pub mod surface;
pub mod with_role;

pub use error::{FieldError, Result};
pub use events::{ChangeSource, FieldEvent, FieldEvents};
pub use field::{DetailLink, RelationField};
pub use link_set::LinkSet;
pub use mode::FieldMode;
pub use multiple::{LinkMultiple, LinkMultipleOptions};
pub use surface::{LinkItem, LinkSurface, PrimaryToggle};
pub use with_role::{LinkMultipleWithRole, RoleOptions};
