use std::cell::Cell;
use std::rc::Rc;

use linkfield_links::{DetailLink, FieldEvent, RelationField};
use linkfield_record::{Attributes, LinkAttrs, Record, SharedRecord, Subscription, subscribe};

use crate::error::Result;
use crate::selector::{PrimarySelector, PrimaryState};

/// A base relation field composed with a primary selector.
///
/// Every operation calls the base field and the selector explicitly, in the
/// order the primary rules require.
pub struct PrimaryField<F> {
	base: F,
	selector: PrimarySelector,
	links_stale: Rc<Cell<bool>>,
	_links_sync: Subscription,
}

impl<F: RelationField> PrimaryField<F> {
	/// Binds `base` to a selector for `primary_link` on `record`.
	pub fn setup(base: F, primary_link: &str, record: &SharedRecord) -> Result<Self> {
		let selector = PrimarySelector::setup(LinkAttrs::new(primary_link)?, record);
		Ok(Self::new(base, selector, record))
	}

	/// Composes an existing selector with `base`.
	///
	/// Changes of the record's `<field>Ids` mark the links stale until the
	/// next [`Self::sync`].
	pub fn new(base: F, selector: PrimarySelector, record: &SharedRecord) -> Self {
		let links_stale = Rc::new(Cell::new(false));
		let flag = Rc::downgrade(&links_stale);
		let links_sync = subscribe(record, base.attrs().ids_field(), move |_| {
			if let Some(flag) = flag.upgrade() {
				flag.set(true);
			}
		});
		Self {
			base,
			selector,
			links_stale,
			_links_sync: links_sync,
		}
	}

	pub fn base(&self) -> &F {
		&self.base
	}

	pub fn base_mut(&mut self) -> &mut F {
		&mut self.base
	}

	pub fn selector(&self) -> &PrimarySelector {
		&self.selector
	}

	pub fn primary_id(&self) -> Option<String> {
		self.selector.primary_id()
	}

	pub fn primary_name(&self) -> Option<String> {
		self.selector.primary_name()
	}

	pub fn state(&self) -> PrimaryState {
		self.selector.state()
	}

	/// Base attributes followed by the primary pair.
	pub fn attribute_list(&self) -> Vec<String> {
		let mut list = self.base.attribute_list();
		self.selector.extend_attribute_list(&mut list);
		list
	}

	/// Base payload plus the primary pair.
	pub fn fetch(&self) -> Attributes {
		let mut data = self.base.fetch();
		self.selector.fetch_into(&mut data);
		data
	}

	pub fn set_primary_id(&mut self, id: Option<&str>) -> Result<()> {
		self.selector.set_primary_id(&mut self.base, id)
	}

	pub fn switch_primary(&mut self, id: &str) -> Result<bool> {
		self.selector.switch_primary(&mut self.base, id)
	}

	/// Links and renders `id`. Returns `false` if it was already linked.
	pub fn add_link(&mut self, id: &str, name: &str) -> bool {
		if !self.base.insert_link(id, Some(name)) {
			return false;
		}
		self.selector.add_link_html(&mut self.base, id, name);
		true
	}

	/// Unlinks `id`, clearing the primary first when `id` is primary.
	///
	/// Reconciliation is left to the next [`Self::reconcile`] or render.
	pub fn delete_link(&mut self, id: &str) {
		self.selector.delete_link(&mut self.base, id);
	}

	pub fn add_link_html(&mut self, id: &str, name: &str) {
		self.selector.add_link_html(&mut self.base, id, name);
	}

	pub fn delete_link_html(&mut self, id: &str) {
		self.selector.delete_link_html(&mut self.base, id);
	}

	/// Redraws all items from scratch.
	pub fn render(&mut self) {
		self.base.surface_mut().clear();
		self.render_links();
	}

	pub fn render_links(&mut self) {
		self.selector.render_links(&mut self.base);
	}

	/// Runs toggle reconciliation and auto-resolution. Returns the auto-selected id.
	pub fn reconcile(&mut self) -> Option<String> {
		self.selector.manage_primary_button(&mut self.base)
	}

	pub fn render_order(&self) -> Vec<String> {
		self.selector.render_order(self.base.links())
	}

	pub fn value_for_display(&self) -> Option<Vec<DetailLink>> {
		self.selector.value_for_display(&self.base)
	}

	/// Applies record changes observed since the last call.
	///
	/// When `<field>Ids` changed the links are reloaded and re-rendered.
	/// Otherwise only toggle activity is realigned with a primary that may
	/// have been changed on the record; no auto-resolution runs. Returns
	/// `true` if the links were reloaded.
	pub fn sync(&mut self, record: &Record) -> Result<bool> {
		if !self.links_stale.get() {
			self.selector.refresh_toggles(&mut self.base);
			return Ok(false);
		}
		self.base.reload(record)?;
		self.links_stale.set(false);
		self.render();
		Ok(true)
	}

	pub fn pending_events(&mut self) -> &[FieldEvent] {
		self.base.events_mut().pending()
	}

	pub fn drain_events(&mut self) -> Vec<FieldEvent> {
		self.base.events_mut().drain()
	}
}
