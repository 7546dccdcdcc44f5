use linkfield_record::{Attributes, MultiLinkAttrs, Record, Value};
use rustc_hash::FxHashMap;
use serde_json::Map;

use crate::error::{FieldError, Result};
use crate::events::{ChangeSource, FieldEvents};
use crate::field::{DetailLink, RelationField};
use crate::link_set::LinkSet;
use crate::mode::FieldMode;
use crate::multiple::{LinkMultiple, LinkMultipleOptions, malformed};
use crate::surface::{LinkItem, LinkSurface};

/// Role column options of a [`LinkMultipleWithRole`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOptions {
	/// Key of the role inside each `<field>Columns` entry.
	pub column: String,
	/// Allowed roles. Empty means any role is accepted.
	pub options: Vec<String>,
}

impl Default for RoleOptions {
	fn default() -> Self {
		Self {
			column: "role".to_string(),
			options: Vec::new(),
		}
	}
}

/// Multi-link field whose links each carry an optional role.
///
/// Roles are stored in `<field>Columns` as `{ id: { <column>: role } }`.
#[derive(Debug, Clone)]
pub struct LinkMultipleWithRole {
	inner: LinkMultiple,
	role: RoleOptions,
	roles: FxHashMap<String, String>,
}

impl LinkMultipleWithRole {
	pub fn setup(options: &LinkMultipleOptions, role: RoleOptions, record: &Record) -> Result<Self> {
		let inner = LinkMultiple::setup(options, record)?;
		let roles = read_roles(inner.attrs(), &role.column, record)?;
		Ok(Self { inner, role, roles })
	}

	pub fn role(&self, id: &str) -> Option<&str> {
		self.roles.get(id).map(String::as_str)
	}

	pub fn set_mode(&mut self, mode: FieldMode) {
		self.inner.set_mode(mode);
	}

	/// Assigns or clears the role of a linked id.
	///
	/// Returns `Ok(false)` when the role is unchanged.
	pub fn set_role(&mut self, id: &str, role: Option<&str>) -> Result<bool> {
		let role = role.filter(|r| !r.is_empty());
		if !self.inner.links().contains(id) {
			return Err(FieldError::NotLinked(id.to_owned()));
		}
		if let Some(role) = role
			&& !self.role.options.is_empty()
			&& !self.role.options.iter().any(|o| o == role)
		{
			return Err(FieldError::UnknownRole {
				id: id.to_owned(),
				role: role.to_owned(),
			});
		}
		if self.role(id) == role {
			return Ok(false);
		}

		match role {
			Some(role) => self.roles.insert(id.to_owned(), role.to_owned()),
			None => self.roles.remove(id),
		};
		if let Some(item) = self.inner.surface_mut().get_mut(id) {
			item.role = role.map(str::to_owned);
		}
		tracing::trace!(field = self.inner.attrs().field(), id, ?role, "role changed");
		self.inner.events_mut().changed(ChangeSource::Role);
		Ok(true)
	}
}

impl RelationField for LinkMultipleWithRole {
	fn attrs(&self) -> &MultiLinkAttrs {
		self.inner.attrs()
	}

	fn mode(&self) -> FieldMode {
		self.inner.mode()
	}

	fn links(&self) -> &LinkSet {
		self.inner.links()
	}

	fn surface(&self) -> &LinkSurface {
		self.inner.surface()
	}

	fn surface_mut(&mut self) -> &mut LinkSurface {
		self.inner.surface_mut()
	}

	fn events_mut(&mut self) -> &mut FieldEvents {
		self.inner.events_mut()
	}

	fn attribute_list(&self) -> Vec<String> {
		let mut list = self.inner.attribute_list();
		list.push(self.inner.attrs().columns_field().to_owned());
		list
	}

	fn insert_link(&mut self, id: &str, name: Option<&str>) -> bool {
		self.inner.insert_link(id, name)
	}

	fn add_link_html(&mut self, id: &str, name: &str) -> &mut LinkItem {
		let role = self.roles.get(id).cloned();
		let item = self.inner.add_link_html(id, name);
		item.role = role;
		item
	}

	fn delete_link_html(&mut self, id: &str) {
		self.inner.delete_link_html(id);
	}

	fn delete_link(&mut self, id: &str) {
		self.roles.remove(id);
		self.inner.delete_link(id);
	}

	fn fetch(&self) -> Attributes {
		let mut data = self.inner.fetch();
		let columns: Map<String, Value> = self
			.inner
			.links()
			.ids()
			.map(|id| {
				let role = self.roles.get(id).map_or(Value::Null, |r| Value::String(r.clone()));
				let mut column = Map::new();
				column.insert(self.role.column.clone(), role);
				(id.to_owned(), Value::Object(column))
			})
			.collect();
		data.insert(self.inner.attrs().columns_field().to_owned(), Value::Object(columns));
		data
	}

	fn detail_link(&self, id: &str, name: Option<&str>) -> DetailLink {
		self.inner.detail_link(id, name)
	}

	fn reload(&mut self, record: &Record) -> Result<()> {
		self.inner.reload(record)?;
		self.roles = read_roles(self.inner.attrs(), &self.role.column, record)?;
		Ok(())
	}
}

fn read_roles(attrs: &MultiLinkAttrs, column: &str, record: &Record) -> Result<FxHashMap<String, String>> {
	let expected = "an object of id to column object";
	match record.get(attrs.columns_field()) {
		None => Ok(FxHashMap::default()),
		Some(Value::Object(map)) => {
			let mut roles = FxHashMap::default();
			for (id, entry) in map {
				let Value::Object(entry) = entry else {
					return Err(malformed(attrs.columns_field(), expected));
				};
				if let Some(role) = entry.get(column).and_then(Value::as_str).filter(|r| !r.is_empty()) {
					roles.insert(id.clone(), role.to_owned());
				}
			}
			Ok(roles)
		}
		Some(_) => Err(malformed(attrs.columns_field(), expected)),
	}
}
