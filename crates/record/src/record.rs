use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::error::{RecordError, Result};

/// Attribute map backing a [`Record`].
pub type Attributes = serde_json::Map<String, Value>;

/// Handle returned by [`Record::on_change`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&RecordChange<'_>)>;

struct Listener {
	id: ListenerId,
	key: String,
	callback: Callback,
}

/// A single attribute change delivered to listeners.
///
/// Listeners run while the record is mutably borrowed, so they read sibling
/// attributes through this view rather than through the record itself.
pub struct RecordChange<'a> {
	/// Changed attribute key.
	pub key: &'a str,
	/// New value, [`Value::Null`] when the attribute was removed.
	pub value: &'a Value,
	attributes: &'a Attributes,
}

impl RecordChange<'_> {
	/// Reads any attribute of the record as it is after the change.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key).filter(|v| !v.is_null())
	}

	/// Reads a string attribute of the record as it is after the change.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}
}

/// Key-value host record with synchronous per-key change notification.
///
/// `null` and absent attributes are equivalent: [`Record::get`] returns `None`
/// for both, and switching between them is not a change.
#[derive(Default)]
pub struct Record {
	attributes: Attributes,
	listeners: Vec<Listener>,
	next_listener: u64,
}

impl fmt::Debug for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Record")
			.field("attributes", &self.attributes)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl Record {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_attributes(attributes: Attributes) -> Self {
		Self {
			attributes,
			..Self::default()
		}
	}

	/// Parses a JSON object into a record.
	pub fn from_json(input: &str) -> Result<Self> {
		match serde_json::from_str::<Value>(input)? {
			Value::Object(attributes) => Ok(Self::from_attributes(attributes)),
			other => Err(RecordError::NotAnObject(value_kind(&other))),
		}
	}

	/// Wraps the record for sharing with fields.
	pub fn into_shared(self) -> crate::SharedRecord {
		Rc::new(RefCell::new(self))
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.attributes.get(key).filter(|v| !v.is_null())
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Returns the raw attribute map.
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// Sets one attribute, notifying listeners when the value changed.
	///
	/// Returns `true` if the value changed.
	pub fn set(&mut self, key: impl Into<String>, value: Value) -> bool {
		let key = key.into();
		if !self.apply(&key, value) {
			return false;
		}
		self.notify(&key);
		true
	}

	/// Sets several attributes at once.
	///
	/// All values are applied before any listener runs, so a listener reacting
	/// to one key observes every other key of the same batch. Returns the
	/// changed keys in notification order.
	pub fn set_many(&mut self, attributes: Attributes) -> Vec<String> {
		let changed: Vec<String> = attributes
			.into_iter()
			.filter_map(|(key, value)| self.apply(&key, value).then_some(key))
			.collect();
		for key in &changed {
			self.notify(key);
		}
		changed
	}

	/// Registers a listener for changes of `key`.
	pub fn on_change(&mut self, key: impl Into<String>, callback: impl FnMut(&RecordChange<'_>) + 'static) -> ListenerId {
		let id = ListenerId(self.next_listener);
		self.next_listener += 1;
		self.listeners.push(Listener {
			id,
			key: key.into(),
			callback: Box::new(callback),
		});
		id
	}

	/// Removes a listener. Returns `false` if it was already gone.
	pub fn off(&mut self, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|l| l.id != id);
		self.listeners.len() != before
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	fn apply(&mut self, key: &str, value: Value) -> bool {
		let current = self.attributes.get(key).unwrap_or(&Value::Null);
		if *current == value {
			return false;
		}
		if value.is_null() {
			self.attributes.remove(key);
		} else {
			self.attributes.insert(key.to_owned(), value);
		}
		true
	}

	fn notify(&mut self, key: &str) {
		let value = self.attributes.get(key).unwrap_or(&Value::Null);
		let change = RecordChange {
			key,
			value,
			attributes: &self.attributes,
		};
		for listener in self.listeners.iter_mut().filter(|l| l.key == key) {
			tracing::trace!(key, listener = listener.id.0, "record change");
			(listener.callback)(&change);
		}
	}
}

/// Listener registration that is removed from its record on drop.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
	record: Weak<RefCell<Record>>,
	id: ListenerId,
}

impl Subscription {
	pub fn id(&self) -> ListenerId {
		self.id
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		let Some(record) = self.record.upgrade() else {
			return;
		};
		match record.try_borrow_mut() {
			Ok(mut record) => {
				record.off(self.id);
			}
			Err(_) => tracing::warn!(listener = self.id.0, "record busy, listener not removed"),
		}
	}
}

/// Registers `callback` on a shared record and ties its lifetime to the returned guard.
pub fn subscribe(
	record: &Rc<RefCell<Record>>,
	key: impl Into<String>,
	callback: impl FnMut(&RecordChange<'_>) + 'static,
) -> Subscription {
	let id = record.borrow_mut().on_change(key, callback);
	Subscription {
		record: Rc::downgrade(record),
		id,
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
