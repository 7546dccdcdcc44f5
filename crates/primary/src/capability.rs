use linkfield_links::{ChangeSource, FieldMode, LinkItem, LinkSet, LinkSurface, RelationField};

/// What a field offers to a [`crate::PrimarySelector`]: its links, its
/// rendered items and its change notification.
pub trait LinkCapability {
	/// Linked ids and their names.
	fn link_set(&self) -> &LinkSet;
	fn view_mode(&self) -> FieldMode;
	fn rendered(&self) -> &LinkSurface;
	fn rendered_mut(&mut self) -> &mut LinkSurface;
	/// Renders one item through the field's own item renderer.
	fn render_item(&mut self, id: &str, name: &str) -> &mut LinkItem;
	fn unrender_item(&mut self, id: &str);
	/// Emits the field's generic change notification.
	fn mark_changed(&mut self);
}

impl<F: RelationField + ?Sized> LinkCapability for F {
	fn link_set(&self) -> &LinkSet {
		self.links()
	}

	fn view_mode(&self) -> FieldMode {
		self.mode()
	}

	fn rendered(&self) -> &LinkSurface {
		self.surface()
	}

	fn rendered_mut(&mut self) -> &mut LinkSurface {
		self.surface_mut()
	}

	fn render_item(&mut self, id: &str, name: &str) -> &mut LinkItem {
		self.add_link_html(id, name)
	}

	fn unrender_item(&mut self, id: &str) {
		self.delete_link_html(id);
	}

	fn mark_changed(&mut self) {
		self.events_mut().changed(ChangeSource::Primary);
	}
}
