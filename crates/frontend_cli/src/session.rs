//! Drives a configured field through scenario steps, the way a form host would.

use std::fmt;

use anyhow::{Context, bail};
use linkfield_config::{FieldConfig, Step};
use linkfield_links::{DetailLink, FieldEvent, LinkMultiple, RelationField};
use linkfield_primary::PrimaryField;
use linkfield_record::{Attributes, Record, SharedRecord, Value};
use linkfield_role::RoleAwareField;
use serde::Serialize;
use serde_json::json;

enum SessionField {
	WithPrimary(PrimaryField<LinkMultiple>),
	RoleAware(RoleAwareField),
}

/// A host record and the field bound to it.
pub struct Session {
	record: SharedRecord,
	field: SessionField,
}

/// What the host observes after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
	pub step: &'static str,
	pub primary: Option<String>,
	pub order: Vec<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub events: Vec<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl Session {
	pub fn start(config: &FieldConfig, attributes: Attributes) -> anyhow::Result<Self> {
		let record = Record::from_attributes(attributes).into_shared();
		let field = match config {
			FieldConfig::WithPrimary(config) => {
				let base = LinkMultiple::setup(&config.link_options(), &record.borrow())
					.with_context(|| format!("reading field {:?}", config.name))?;
				SessionField::WithPrimary(PrimaryField::setup(base, &config.primary_link, &record)?)
			}
			FieldConfig::RoleAware(config) => SessionField::RoleAware(
				RoleAwareField::setup(&config.options(), &record)
					.with_context(|| format!("reading field {:?}", config.name))?,
			),
		};
		Ok(Self { record, field })
	}

	pub fn record(&self) -> &SharedRecord {
		&self.record
	}

	/// Runs one step. Rejected steps are reported, not fatal.
	pub fn run(&mut self, step: &Step) -> StepReport {
		let (result, (primary, order, events)) = match &mut self.field {
			SessionField::WithPrimary(field) => {
				let result = apply(field, &self.record, step);
				(result, observe(field))
			}
			SessionField::RoleAware(field) => {
				let result = apply_role_aware(field, &self.record, step);
				(result, observe(field.field_mut()))
			}
		};
		let (output, error) = match result {
			Ok(output) => (output, None),
			Err(err) => {
				tracing::warn!(step = step.name(), error = %err, "step rejected");
				(None, Some(format!("{err:#}")))
			}
		};
		StepReport {
			step: step.name(),
			primary,
			order,
			events,
			output,
			error,
		}
	}

	pub fn run_all(&mut self, steps: &[Step]) -> Vec<StepReport> {
		steps.iter().map(|step| self.run(step)).collect()
	}
}

fn apply<F: RelationField>(field: &mut PrimaryField<F>, record: &SharedRecord, step: &Step) -> anyhow::Result<Option<Value>> {
	match step {
		Step::Add { id, name } => {
			if !field.add_link(id, name) {
				tracing::info!(id = %id, "already linked");
			}
		}
		Step::Remove { id } => field.delete_link(id),
		Step::Switch { id } => {
			field.switch_primary(id)?;
		}
		Step::SetPrimary { id } => field.set_primary_id(id.as_deref())?,
		Step::SetRole { .. } | Step::Filters => bail!("`{}` needs a role-aware field", step.name()),
		Step::External { set, clear } => {
			let mut changes = set.clone();
			for key in clear {
				changes.insert(key.clone(), Value::Null);
			}
			let changed = record.borrow_mut().set_many(changes);
			tracing::debug!(?changed, "record changed externally");
		}
		Step::Render => field.render(),
		Step::Reconcile => return Ok(field.reconcile().map(Value::String)),
		Step::Sync => return Ok(Some(Value::Bool(field.sync(&record.borrow())?))),
		Step::Display => {
			return Ok(field
				.value_for_display()
				.map(|links| links.iter().map(detail_json).collect()));
		}
		Step::Fetch => return Ok(Some(Value::Object(field.fetch()))),
	}
	Ok(None)
}

fn apply_role_aware(field: &mut RoleAwareField, record: &SharedRecord, step: &Step) -> anyhow::Result<Option<Value>> {
	match step {
		Step::SetRole { id, role } => {
			field.set_role(id, role.as_deref())?;
			Ok(None)
		}
		Step::Filters => {
			let record = record.borrow();
			let filters = serde_json::to_value(field.select_filters(&record))?;
			let create = field.create_attributes(&record).map_or(Value::Null, Value::Object);
			Ok(Some(json!({ "select_filters": filters, "create_attributes": create })))
		}
		_ => apply(field.field_mut(), record, step),
	}
}

fn observe<F: RelationField>(field: &mut PrimaryField<F>) -> (Option<String>, Vec<String>, Vec<&'static str>) {
	let events = field
		.drain_events()
		.into_iter()
		.map(|FieldEvent::Changed(source)| source.name())
		.collect();
	(field.primary_id(), field.render_order(), events)
}

fn detail_json(link: &DetailLink) -> Value {
	json!({ "id": link.id, "name": link.name, "url": link.url })
}

impl fmt::Display for StepReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{:<12} primary={} order=[{}]",
			self.step,
			self.primary.as_deref().unwrap_or("-"),
			self.order.join(", ")
		)?;
		if !self.events.is_empty() {
			write!(f, " changed={}", self.events.join(","))?;
		}
		if let Some(output) = &self.output {
			write!(f, " => {output}")?;
		}
		if let Some(error) = &self.error {
			write!(f, " !! {error}")?;
		}
		Ok(())
	}
}
