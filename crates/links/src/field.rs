use linkfield_record::{Attributes, MultiLinkAttrs, Record};

use crate::error::Result;
use crate::events::FieldEvents;
use crate::link_set::LinkSet;
use crate::mode::FieldMode;
use crate::surface::{LinkItem, LinkSurface};

/// Read-only link fragment shown in detail and list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLink {
	pub id: String,
	pub name: String,
	/// Route of the linked record's detail view.
	pub url: String,
}

/// Contract of a base multi-valued relation field.
///
/// The base field owns the linked ids, the rendered items and the pending
/// events. Decorating fields compose it instead of overriding it, calling
/// these methods explicitly in the order they need.
pub trait RelationField {
	fn attrs(&self) -> &MultiLinkAttrs;
	fn mode(&self) -> FieldMode;
	fn links(&self) -> &LinkSet;
	fn surface(&self) -> &LinkSurface;
	fn surface_mut(&mut self) -> &mut LinkSurface;
	fn events_mut(&mut self) -> &mut FieldEvents;

	/// Record attributes this field reads and writes.
	fn attribute_list(&self) -> Vec<String>;

	/// Links `id` without rendering it. Returns `false` if it was already linked.
	fn insert_link(&mut self, id: &str, name: Option<&str>) -> bool;

	/// Renders one item and returns it for decoration.
	fn add_link_html(&mut self, id: &str, name: &str) -> &mut LinkItem;

	/// Removes the rendered item of `id`, if any.
	fn delete_link_html(&mut self, id: &str);

	/// Unrenders and unlinks `id`.
	fn delete_link(&mut self, id: &str);

	/// Attribute payload of the field's current value.
	fn fetch(&self) -> Attributes;

	/// Read-only link for `id`; `name` overrides the stored name.
	fn detail_link(&self, id: &str, name: Option<&str>) -> DetailLink;

	/// Re-reads the linked ids from the record.
	fn reload(&mut self, record: &Record) -> Result<()>;

	fn is_search_mode(&self) -> bool {
		self.mode() == FieldMode::Search
	}

	fn is_detail_mode(&self) -> bool {
		self.mode() == FieldMode::Detail
	}

	fn is_list_mode(&self) -> bool {
		self.mode() == FieldMode::List
	}
}
