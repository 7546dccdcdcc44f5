//! Headless render state of a link field.

/// "Make primary" control attached to a rendered item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryToggle {
	/// The item is the resolved primary; its star is not muted.
	pub active: bool,
	/// Controls are hidden while there is no choice to make.
	pub hidden: bool,
}

/// A single rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkItem {
	pub id: String,
	pub name: String,
	/// Role column, for fields that carry one.
	pub role: Option<String>,
	/// Primary control, absent when the field builds none.
	pub primary: Option<PrimaryToggle>,
}

impl LinkItem {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			role: None,
			primary: None,
		}
	}
}

/// Rendered items in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSurface {
	items: Vec<LinkItem>,
}

impl LinkSurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `item`, replacing an earlier rendering of the same id.
	pub fn push(&mut self, item: LinkItem) -> &mut LinkItem {
		self.remove(&item.id);
		self.items.push(item);
		let last = self.items.len() - 1;
		&mut self.items[last]
	}

	pub fn remove(&mut self, id: &str) -> Option<LinkItem> {
		let idx = self.items.iter().position(|item| item.id == id)?;
		Some(self.items.remove(idx))
	}

	pub fn clear(&mut self) {
		self.items.clear();
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn items(&self) -> &[LinkItem] {
		&self.items
	}

	/// Rendered ids in render order.
	pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.items.iter().map(|item| item.id.as_str())
	}

	pub fn get(&self, id: &str) -> Option<&LinkItem> {
		self.items.iter().find(|item| item.id == id)
	}

	pub fn get_mut(&mut self, id: &str) -> Option<&mut LinkItem> {
		self.items.iter_mut().find(|item| item.id == id)
	}

	/// Rendered primary toggles with their item ids, in render order.
	pub fn toggles(&self) -> impl Iterator<Item = (&str, &PrimaryToggle)> + '_ {
		self.items
			.iter()
			.filter_map(|item| item.primary.as_ref().map(|toggle| (item.id.as_str(), toggle)))
	}

	pub fn toggles_mut(&mut self) -> impl Iterator<Item = &mut PrimaryToggle> + '_ {
		self.items.iter_mut().filter_map(|item| item.primary.as_mut())
	}

	pub fn toggle(&self, id: &str) -> Option<&PrimaryToggle> {
		self.get(id)?.primary.as_ref()
	}

	/// Activates the toggle of `primary` and deactivates every other toggle.
	pub fn set_active(&mut self, primary: Option<&str>) {
		for item in &mut self.items {
			if let Some(toggle) = item.primary.as_mut() {
				toggle.active = primary == Some(item.id.as_str());
			}
		}
	}

	/// Ids whose toggle is active.
	pub fn active_ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.toggles().filter(|(_, toggle)| toggle.active).map(|(id, _)| id)
	}
}
