use linkfield_record::{Attributes, MultiLinkAttrs, Record, Value};

use crate::error::{FieldError, Result};
use crate::events::{ChangeSource, FieldEvents};
use crate::field::{DetailLink, RelationField};
use crate::link_set::LinkSet;
use crate::mode::FieldMode;
use crate::surface::{LinkItem, LinkSurface};

/// Setup options of a [`LinkMultiple`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMultipleOptions {
	/// Field name; backing attributes are `<field>Ids` and `<field>Names`.
	pub field: String,
	/// Entity type of the linked records, used for detail routes.
	pub foreign_entity: String,
	pub mode: FieldMode,
}

impl LinkMultipleOptions {
	pub fn new(field: impl Into<String>, foreign_entity: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			foreign_entity: foreign_entity.into(),
			mode: FieldMode::default(),
		}
	}

	pub fn with_mode(mut self, mode: FieldMode) -> Self {
		self.mode = mode;
		self
	}
}

/// Plain multi-valued link field.
#[derive(Debug, Clone)]
pub struct LinkMultiple {
	attrs: MultiLinkAttrs,
	foreign_entity: String,
	mode: FieldMode,
	links: LinkSet,
	surface: LinkSurface,
	events: FieldEvents,
}

impl LinkMultiple {
	/// Builds the field and reads its linked ids from `record`.
	pub fn setup(options: &LinkMultipleOptions, record: &Record) -> Result<Self> {
		let attrs = MultiLinkAttrs::new(&options.field)?;
		let links = read_links(&attrs, record)?;
		tracing::debug!(field = attrs.field(), linked = links.len(), "link field setup");
		Ok(Self {
			attrs,
			foreign_entity: options.foreign_entity.clone(),
			mode: options.mode,
			links,
			surface: LinkSurface::new(),
			events: FieldEvents::default(),
		})
	}

	pub fn foreign_entity(&self) -> &str {
		&self.foreign_entity
	}

	/// Switches the view mode. Rendered items are dropped and must be re-rendered.
	pub fn set_mode(&mut self, mode: FieldMode) {
		if self.mode != mode {
			self.mode = mode;
			self.surface.clear();
		}
	}

	/// Links and renders `id`.
	pub fn add_link(&mut self, id: &str, name: &str) -> bool {
		if !self.insert_link(id, Some(name)) {
			return false;
		}
		self.add_link_html(id, name);
		true
	}

	/// Renders every linked id in stored order.
	pub fn render_links(&mut self) {
		let items: Vec<(String, String)> = self
			.links
			.ids()
			.map(|id| (id.to_owned(), self.links.display_name(id).to_owned()))
			.collect();
		for (id, name) in items {
			self.add_link_html(&id, &name);
		}
	}
}

impl RelationField for LinkMultiple {
	fn attrs(&self) -> &MultiLinkAttrs {
		&self.attrs
	}

	fn mode(&self) -> FieldMode {
		self.mode
	}

	fn links(&self) -> &LinkSet {
		&self.links
	}

	fn surface(&self) -> &LinkSurface {
		&self.surface
	}

	fn surface_mut(&mut self) -> &mut LinkSurface {
		&mut self.surface
	}

	fn events_mut(&mut self) -> &mut FieldEvents {
		&mut self.events
	}

	fn attribute_list(&self) -> Vec<String> {
		vec![self.attrs.ids_field().to_owned(), self.attrs.names_field().to_owned()]
	}

	fn insert_link(&mut self, id: &str, name: Option<&str>) -> bool {
		let inserted = self.links.insert(id, name);
		if inserted {
			tracing::trace!(field = self.attrs.field(), id, "link added");
			self.events.changed(ChangeSource::Links);
		}
		inserted
	}

	fn add_link_html(&mut self, id: &str, name: &str) -> &mut LinkItem {
		self.surface.push(LinkItem::new(id, name))
	}

	fn delete_link_html(&mut self, id: &str) {
		self.surface.remove(id);
	}

	fn delete_link(&mut self, id: &str) {
		self.delete_link_html(id);
		if self.links.remove(id) {
			tracing::trace!(field = self.attrs.field(), id, "link removed");
			self.events.changed(ChangeSource::Links);
		}
	}

	fn fetch(&self) -> Attributes {
		let mut data = Attributes::new();
		data.insert(self.attrs.ids_field().to_owned(), self.links.ids_value());
		data.insert(self.attrs.names_field().to_owned(), self.links.names_value());
		data
	}

	fn detail_link(&self, id: &str, name: Option<&str>) -> DetailLink {
		let name = name.filter(|n| !n.is_empty()).unwrap_or_else(|| self.links.display_name(id));
		DetailLink {
			id: id.to_owned(),
			name: name.to_owned(),
			url: format!("#{}/view/{}", self.foreign_entity, id),
		}
	}

	fn reload(&mut self, record: &Record) -> Result<()> {
		self.links = read_links(&self.attrs, record)?;
		tracing::debug!(field = self.attrs.field(), linked = self.links.len(), "links reloaded");
		Ok(())
	}
}

/// Reads `<field>Ids` and `<field>Names` from `record`; absent attributes mean no links.
pub(crate) fn read_links(attrs: &MultiLinkAttrs, record: &Record) -> Result<LinkSet> {
	let ids = match record.get(attrs.ids_field()) {
		None => Vec::new(),
		Some(Value::Array(values)) => values
			.iter()
			.map(|v| v.as_str().map(str::to_owned))
			.collect::<Option<Vec<_>>>()
			.ok_or_else(|| malformed(attrs.ids_field(), "an array of string ids"))?,
		Some(_) => return Err(malformed(attrs.ids_field(), "an array of string ids")),
	};

	let names = match record.get(attrs.names_field()) {
		None => Vec::new(),
		Some(Value::Object(map)) => map
			.iter()
			.filter_map(|(id, name)| Some((id.clone(), name.as_str()?.to_owned())))
			.collect(),
		Some(_) => return Err(malformed(attrs.names_field(), "an object of id to name")),
	};

	Ok(LinkSet::from_parts(ids, names))
}

pub(crate) fn malformed(attribute: &str, expected: &'static str) -> FieldError {
	FieldError::MalformedAttribute {
		attribute: attribute.to_owned(),
		expected,
	}
}
