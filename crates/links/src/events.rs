/// What caused a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
	/// A link was added or removed.
	Links,
	/// The primary designation was set or cleared.
	Primary,
	/// A role column changed.
	Role,
}

impl ChangeSource {
	pub fn name(self) -> &'static str {
		match self {
			Self::Links => "links",
			Self::Primary => "primary",
			Self::Role => "role",
		}
	}
}

/// Notification emitted by a field towards its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
	/// Field value changed; the host marks the field dirty and may fetch.
	Changed(ChangeSource),
}

/// Pending field events, drained by the host after each interaction.
#[derive(Debug, Clone, Default)]
pub struct FieldEvents {
	queue: Vec<FieldEvent>,
}

impl FieldEvents {
	pub fn changed(&mut self, source: ChangeSource) {
		self.queue.push(FieldEvent::Changed(source));
	}

	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	pub fn pending(&self) -> &[FieldEvent] {
		&self.queue
	}

	pub fn drain(&mut self) -> Vec<FieldEvent> {
		std::mem::take(&mut self.queue)
	}
}
