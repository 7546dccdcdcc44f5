use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

/// Ordered set of linked ids with an optional display name per id.
///
/// Insertion order is display order. Ids without a known name display as
/// the id itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
	ids: IndexSet<String>,
	names: FxHashMap<String, String>,
}

impl LinkSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a set from ids and names. Repeated ids keep their first position;
	/// names for ids that are not linked are dropped.
	pub fn from_parts(ids: impl IntoIterator<Item = String>, names: impl IntoIterator<Item = (String, String)>) -> Self {
		let ids: IndexSet<String> = ids.into_iter().collect();
		let names = names.into_iter().filter(|(id, _)| ids.contains(id)).collect();
		Self { ids, names }
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	/// Linked ids in display order.
	pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.ids.iter().map(String::as_str)
	}

	pub fn position(&self, id: &str) -> Option<usize> {
		self.ids.get_index_of(id)
	}

	/// Known display name of `id`, if any.
	pub fn name(&self, id: &str) -> Option<&str> {
		self.names.get(id).map(String::as_str)
	}

	/// Display name of `id`, falling back to the id.
	pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
		self.name(id).unwrap_or(id)
	}

	/// Links `id` at the end of the set.
	///
	/// Returns `false` and keeps the stored name if `id` was already linked.
	pub fn insert(&mut self, id: &str, name: Option<&str>) -> bool {
		if !self.ids.insert(id.to_owned()) {
			return false;
		}
		if let Some(name) = name {
			self.names.insert(id.to_owned(), name.to_owned());
		}
		true
	}

	/// Unlinks `id`, keeping the order of the remaining ids.
	pub fn remove(&mut self, id: &str) -> bool {
		self.names.remove(id);
		self.ids.shift_remove(id)
	}

	/// Ids as a JSON array, for the `<field>Ids` attribute.
	pub fn ids_value(&self) -> Value {
		Value::Array(self.ids.iter().cloned().map(Value::String).collect())
	}

	/// Known names as a JSON object in display order, for the `<field>Names` attribute.
	pub fn names_value(&self) -> Value {
		let names: Map<String, Value> = self
			.ids
			.iter()
			.filter_map(|id| Some((id.clone(), Value::String(self.names.get(id)?.clone()))))
			.collect();
		Value::Object(names)
	}
}
