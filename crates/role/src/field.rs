use linkfield_links::{FieldMode, LinkMultipleOptions, LinkMultipleWithRole, RoleOptions};
use linkfield_primary::{PrimaryField, PrimarySelector};
use linkfield_record::{Attributes, LinkAttrs, Record, SharedRecord, Value};

use crate::error::Result;
use crate::filters::{SelectFilter, SelectFilters};

/// Link holding the primary contact.
pub const PRIMARY_LINK: &str = "contact";

/// Setup options of a [`RoleAwareField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAwareOptions {
	pub field: String,
	pub foreign_entity: String,
	pub mode: FieldMode,
	/// Never build primary toggles. The primary is still read and fetched.
	pub suppress_primary: bool,
	/// Link of the parent record on the host, e.g. `account`.
	pub parent_link: String,
	/// Picker attribute filtered by the parent, e.g. `accounts`.
	pub parent_filter: String,
	pub role: RoleOptions,
}

impl Default for RoleAwareOptions {
	fn default() -> Self {
		Self {
			field: "contacts".to_string(),
			foreign_entity: "Contact".to_string(),
			mode: FieldMode::default(),
			suppress_primary: false,
			parent_link: "account".to_string(),
			parent_filter: "accounts".to_string(),
			role: RoleOptions::default(),
		}
	}
}

/// Contacts field with per-link roles and a primary contact.
pub struct RoleAwareField {
	field: PrimaryField<LinkMultipleWithRole>,
	parent: LinkAttrs,
	parent_filter: String,
}

impl RoleAwareField {
	pub fn setup(options: &RoleAwareOptions, record: &SharedRecord) -> Result<Self> {
		let link_options = LinkMultipleOptions::new(&options.field, &options.foreign_entity).with_mode(options.mode);
		let base = LinkMultipleWithRole::setup(&link_options, options.role.clone(), &record.borrow())?;
		let selector =
			PrimarySelector::setup(LinkAttrs::new(PRIMARY_LINK)?, record).with_buttons(!options.suppress_primary);
		let parent = LinkAttrs::new(&options.parent_link)?;
		tracing::debug!(
			field = %options.field,
			parent = parent.link(),
			suppress_primary = options.suppress_primary,
			"role-aware field setup"
		);
		Ok(Self {
			field: PrimaryField::new(base, selector, record),
			parent,
			parent_filter: options.parent_filter.clone(),
		})
	}

	pub fn field(&self) -> &PrimaryField<LinkMultipleWithRole> {
		&self.field
	}

	pub fn field_mut(&mut self) -> &mut PrimaryField<LinkMultipleWithRole> {
		&mut self.field
	}

	pub fn suppress_primary(&self) -> bool {
		!self.field.selector().buttons()
	}

	pub fn set_role(&mut self, id: &str, role: Option<&str>) -> Result<bool> {
		Ok(self.field.base_mut().set_role(id, role)?)
	}

	/// Limits the picker to records linked with the host's parent, if it has one.
	pub fn select_filters(&self, record: &Record) -> Option<SelectFilters> {
		let id = record.get_str(self.parent.id_field())?;
		let name = record.get_str(self.parent.name_field());
		Some(SelectFilters::from([(self.parent_filter.clone(), SelectFilter::linked_with(id, name))]))
	}

	/// Parent link attributes for records created from the picker.
	pub fn create_attributes(&self, record: &Record) -> Option<Attributes> {
		let id = record.get_str(self.parent.id_field())?;
		let name = record.get(self.parent.name_field()).cloned().unwrap_or(Value::Null);
		let mut attributes = Attributes::new();
		attributes.insert(self.parent.id_field().to_owned(), Value::String(id.to_owned()));
		attributes.insert(self.parent.name_field().to_owned(), name);
		Some(attributes)
	}
}
