use linkfield_links::{ChangeSource, FieldEvent, FieldMode, LinkMultiple, LinkMultipleOptions, RelationField};
use linkfield_record::{Record, SharedRecord, Value};
use serde_json::json;

use crate::PrimaryField;

fn field_with(ids: &[&str]) -> (SharedRecord, PrimaryField<LinkMultiple>) {
	let mut record = Record::new();
	record.set("contactsIds", json!(ids));
	let record = record.into_shared();
	let options = LinkMultipleOptions::new("contacts", "Contact").with_mode(FieldMode::Edit);
	let base = LinkMultiple::setup(&options, &record.borrow()).unwrap();
	let field = PrimaryField::setup(base, "contact", &record).unwrap();
	(record, field)
}

/// Must keep at most one primary toggle active.
///
/// - Enforced in: `PrimarySelector::set_primary_id`, `LinkSurface::set_active`
/// - Failure symptom: Two items show a filled star and fetch serializes only one of them.
#[cfg_attr(test, test)]
pub(crate) fn test_single_active_toggle() {
	let (_record, mut field) = field_with(&["1", "2", "3"]);
	field.render();
	field.switch_primary("2").unwrap();
	field.switch_primary("3").unwrap();
	let active: Vec<&str> = field.base().surface().active_ids().collect();
	assert_eq!(active, vec!["3"]);
}

/// Must clear the primary before its id is unlinked.
///
/// - Enforced in: `PrimarySelector::release`, `PrimaryField::delete_link`
/// - Failure symptom: Fetch serializes a primary that is no longer linked.
#[cfg_attr(test, test)]
pub(crate) fn test_primary_cleared_before_unlink() {
	let (_record, mut field) = field_with(&["1", "2"]);
	field.render();
	field.drain_events();
	field.delete_link("1");
	assert_eq!(field.primary_id(), None);
	assert_eq!(field.fetch().get("contactId"), Some(&Value::Null));
	assert_eq!(
		field.drain_events(),
		vec![FieldEvent::Changed(ChangeSource::Primary), FieldEvent::Changed(ChangeSource::Links)],
		"primary must be cleared before the link is removed"
	);
}

/// Must keep the cached primary name absent whenever the primary id is.
///
/// - Enforced in: `PrimarySlot::read`, `PrimarySelector::set_primary_id`
/// - Failure symptom: Fetch writes a dangling `<link>Name` next to a null `<link>Id`.
#[cfg_attr(test, test)]
pub(crate) fn test_name_absent_without_id() {
	let (record, mut field) = field_with(&["1"]);
	record.borrow_mut().set("contactName", json!("Orphan"));
	record.borrow_mut().set("contactId", json!("1"));
	record.borrow_mut().set("contactId", Value::Null);
	assert_eq!(field.primary_name(), None);

	field.render();
	field.set_primary_id(None).unwrap();
	assert_eq!(field.primary_name(), None);
}

/// Must not emit a change event for primary changes observed on the record.
///
/// - Enforced in: `PrimarySelector::setup`, `PrimaryField::sync`
/// - Failure symptom: The host marks the form dirty right after loading a record.
#[cfg_attr(test, test)]
pub(crate) fn test_inbound_sync_is_silent() {
	let (record, mut field) = field_with(&["1", "2"]);
	field.render();
	field.drain_events();
	record.borrow_mut().set("contactId", json!("2"));
	field.sync(&record.borrow()).unwrap();
	assert!(field.drain_events().is_empty());
	assert_eq!(field.primary_id().as_deref(), Some("2"));
}
