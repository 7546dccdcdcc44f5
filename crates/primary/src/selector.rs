use std::cell::RefCell;
use std::rc::Rc;

use linkfield_links::{DetailLink, FieldMode, LinkSet, PrimaryToggle, RelationField};
use linkfield_record::{Attributes, LinkAttrs, SharedRecord, Subscription, Value, subscribe};

use crate::capability::LinkCapability;
use crate::error::{PrimaryError, Result};

/// Observable primary state of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryState {
	NoPrimary,
	HasPrimary(String),
}

/// Cached primary id and name. `name` is `None` whenever `id` is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PrimarySlot {
	id: Option<String>,
	name: Option<String>,
}

impl PrimarySlot {
	fn read<'a>(attrs: &LinkAttrs, get: impl Fn(&str) -> Option<&'a str>) -> Self {
		let id = get(attrs.id_field()).map(str::to_owned);
		let name = id.as_ref().and_then(|_| get(attrs.name_field())).map(str::to_owned);
		Self { id, name }
	}
}

/// Tracks which linked id is primary and keeps rendered toggles consistent with it.
///
/// The selector does not own the links; every operation borrows the field
/// through [`LinkCapability`].
pub struct PrimarySelector {
	attrs: LinkAttrs,
	slot: Rc<RefCell<PrimarySlot>>,
	buttons: bool,
	_inbound: Option<Subscription>,
}

impl std::fmt::Debug for PrimarySelector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PrimarySelector")
			.field("link", &self.attrs.link())
			.field("slot", &*self.slot.borrow())
			.field("buttons", &self.buttons)
			.finish()
	}
}

impl PrimarySelector {
	/// Creates a selector with no primary and no record binding.
	pub fn new(attrs: LinkAttrs) -> Self {
		Self {
			attrs,
			slot: Rc::default(),
			buttons: true,
			_inbound: None,
		}
	}

	/// Creates a selector bound to `record`.
	///
	/// The initial primary is read from `<link>Id`/`<link>Name`, and both are
	/// re-read whenever `<link>Id` changes on the record. The binding lasts as
	/// long as the selector.
	pub fn setup(attrs: LinkAttrs, record: &SharedRecord) -> Self {
		let initial = {
			let record = record.borrow();
			PrimarySlot::read(&attrs, |key| record.get_str(key))
		};
		let slot = Rc::new(RefCell::new(initial));

		let weak = Rc::downgrade(&slot);
		let sync_attrs = attrs.clone();
		let inbound = subscribe(record, attrs.id_field(), move |change| {
			let Some(slot) = weak.upgrade() else {
				return;
			};
			let next = PrimarySlot::read(&sync_attrs, |key| change.get_str(key));
			tracing::debug!(link = sync_attrs.link(), id = ?next.id, "primary synced from record");
			match slot.try_borrow_mut() {
				Ok(mut slot) => *slot = next,
				Err(_) => tracing::warn!(link = sync_attrs.link(), "primary busy, record change dropped"),
			}
		});

		Self {
			attrs,
			slot,
			buttons: true,
			_inbound: Some(inbound),
		}
	}

	/// Enables or disables construction of primary toggles.
	///
	/// Without toggles the primary is still tracked and serialized, but
	/// rendering never auto-resolves it.
	pub fn with_buttons(mut self, buttons: bool) -> Self {
		self.buttons = buttons;
		self
	}

	pub fn buttons(&self) -> bool {
		self.buttons
	}

	pub fn attrs(&self) -> &LinkAttrs {
		&self.attrs
	}

	pub fn primary_id(&self) -> Option<String> {
		self.slot.borrow().id.clone()
	}

	pub fn primary_name(&self) -> Option<String> {
		self.slot.borrow().name.clone()
	}

	pub fn state(&self) -> PrimaryState {
		match self.primary_id() {
			Some(id) => PrimaryState::HasPrimary(id),
			None => PrimaryState::NoPrimary,
		}
	}

	pub fn is_primary(&self, id: &str) -> bool {
		self.slot.borrow().id.as_deref() == Some(id)
	}

	/// Sets or clears the primary and emits one change notification.
	///
	/// The id must be linked; otherwise nothing changes and
	/// [`PrimaryError::NotLinked`] is returned. The cached name comes from the
	/// field's name lookup and stays `None` while the name is unknown.
	pub fn set_primary_id<C: LinkCapability + ?Sized>(&mut self, field: &mut C, id: Option<&str>) -> Result<()> {
		let next = match id {
			None => PrimarySlot::default(),
			Some(id) => {
				let links = field.link_set();
				if !links.contains(id) {
					return Err(PrimaryError::NotLinked(id.to_owned()));
				}
				PrimarySlot {
					id: Some(id.to_owned()),
					name: links.name(id).map(str::to_owned),
				}
			}
		};
		tracing::debug!(link = self.attrs.link(), id = ?next.id, "primary set");
		*self.slot.borrow_mut() = next;
		self.refresh_toggles(field);
		field.mark_changed();
		Ok(())
	}

	/// Ids in render order: the primary first when it is linked, then the
	/// remaining ids in stored order.
	pub fn render_order(&self, links: &LinkSet) -> Vec<String> {
		let slot = self.slot.borrow();
		let primary = slot.id.as_deref().filter(|id| links.contains(id));
		primary
			.into_iter()
			.chain(links.ids().filter(|id| Some(*id) != primary))
			.map(str::to_owned)
			.collect()
	}

	/// Renders every linked id in render order.
	pub fn render_links<C: LinkCapability + ?Sized>(&mut self, field: &mut C) {
		let items: Vec<(String, String)> = {
			let links = field.link_set();
			let slot = self.slot.borrow();
			self.render_order(links)
				.into_iter()
				.map(|id| {
					let name = match (&slot.id, &slot.name) {
						(Some(primary), Some(name)) if *primary == id => name.clone(),
						_ => links.display_name(&id).to_owned(),
					};
					(id, name)
				})
				.collect()
		};
		for (id, name) in items {
			self.add_link_html(field, &id, &name);
		}
	}

	/// Read-only links in render order for detail and list views.
	///
	/// Returns `None` outside of read-only modes and when nothing is linked.
	pub fn value_for_display<F: RelationField + ?Sized>(&self, field: &F) -> Option<Vec<DetailLink>> {
		if !field.mode().is_read_only() || field.links().is_empty() {
			return None;
		}
		let slot = self.slot.borrow();
		let links = self
			.render_order(field.links())
			.into_iter()
			.map(|id| match (&slot.id, &slot.name) {
				(Some(primary), name) if *primary == id => field.detail_link(&id, name.as_deref()),
				_ => field.detail_link(&id, None),
			})
			.collect();
		Some(links)
	}

	/// Clears the primary if `id` is about to be unlinked.
	///
	/// Call before the base field removes `id`. Returns `true` if the primary was cleared.
	pub fn release<C: LinkCapability + ?Sized>(&mut self, field: &mut C, id: &str) -> bool {
		if !self.is_primary(id) {
			return false;
		}
		// Clearing is always accepted.
		let _ = self.set_primary_id(field, None);
		true
	}

	/// Unlinks `id` through the base field, clearing the primary first when `id` is primary.
	///
	/// Reconciliation is left to the caller.
	pub fn delete_link<F: RelationField + ?Sized>(&mut self, field: &mut F, id: &str) {
		self.release(field, id);
		field.delete_link(id);
	}

	/// Renders one item with its primary toggle, then reconciles.
	///
	/// Search mode and disabled buttons render the plain item only.
	pub fn add_link_html<C: LinkCapability + ?Sized>(&mut self, field: &mut C, id: &str, name: &str) {
		let name = if name.is_empty() { id } else { name };
		if field.view_mode() == FieldMode::Search || !self.buttons {
			field.render_item(id, name);
			return;
		}

		let active = self.is_primary(id);
		let item = field.render_item(id, name);
		item.primary = Some(PrimaryToggle { active, hidden: true });
		self.manage_primary_button(field);
	}

	/// Removes one rendered item, then reconciles.
	pub fn delete_link_html<C: LinkCapability + ?Sized>(&mut self, field: &mut C, id: &str) {
		field.unrender_item(id);
		self.manage_primary_button(field);
	}

	/// Reconciles rendered toggles after a structural change.
	///
	/// Toggles are shown only when there is more than one, and only the
	/// primary's toggle is active. When the primary is not rendered, the first
	/// rendered linked item becomes primary. Returns the auto-selected id.
	pub fn manage_primary_button<C: LinkCapability + ?Sized>(&mut self, field: &mut C) -> Option<String> {
		if !self.buttons {
			return None;
		}

		let surface = field.rendered_mut();
		let hidden = surface.toggles().count() <= 1;
		for toggle in surface.toggles_mut() {
			toggle.hidden = hidden;
		}
		self.refresh_toggles(field);
		if field.rendered().active_ids().next().is_some() {
			return None;
		}

		let links = field.link_set();
		let candidate = field
			.rendered()
			.toggles()
			.map(|(id, _)| id)
			.find(|id| links.contains(id))?
			.to_owned();

		if let Err(err) = self.set_primary_id(field, Some(candidate.as_str())) {
			tracing::warn!(link = self.attrs.link(), error = %err, "auto-resolution rejected");
			return None;
		}
		tracing::debug!(link = self.attrs.link(), id = %candidate, "primary auto-resolved");
		Some(candidate)
	}

	/// Makes `id` primary on user request.
	///
	/// Returns `Ok(false)` without notifying when `id` already is the primary.
	pub fn switch_primary<C: LinkCapability + ?Sized>(&mut self, field: &mut C, id: &str) -> Result<bool> {
		let toggle_active = field.rendered().toggle(id).map(|t| t.active);
		if self.is_primary(id) && toggle_active.unwrap_or(true) {
			return Ok(false);
		}
		self.set_primary_id(field, Some(id))?;
		Ok(true)
	}

	/// Aligns toggle activity with the current primary without notifying.
	pub fn refresh_toggles<C: LinkCapability + ?Sized>(&self, field: &mut C) {
		let slot = self.slot.borrow();
		field.rendered_mut().set_active(slot.id.as_deref());
	}

	/// Adds the primary attribute pair to a fetch payload.
	pub fn fetch_into(&self, data: &mut Attributes) {
		let slot = self.slot.borrow();
		data.insert(self.attrs.id_field().to_owned(), string_or_null(slot.id.as_deref()));
		data.insert(self.attrs.name_field().to_owned(), string_or_null(slot.name.as_deref()));
	}

	/// Adds the primary attribute pair to a field's attribute list.
	pub fn extend_attribute_list(&self, list: &mut Vec<String>) {
		list.push(self.attrs.id_field().to_owned());
		list.push(self.attrs.name_field().to_owned());
	}
}

fn string_or_null(value: Option<&str>) -> Value {
	value.map_or(Value::Null, |v| Value::String(v.to_owned()))
}
