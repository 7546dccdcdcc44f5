use linkfield_links::{FieldError, FieldMode, RelationField, RoleOptions};
use linkfield_record::{Record, SharedRecord, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::{RoleAwareField, RoleAwareOptions, RoleError};

fn record(value: Value) -> SharedRecord {
	let Value::Object(attributes) = value else {
		panic!("fixture must be an object");
	};
	Record::from_attributes(attributes).into_shared()
}

fn options(suppress_primary: bool) -> RoleAwareOptions {
	RoleAwareOptions {
		mode: FieldMode::Edit,
		suppress_primary,
		role: RoleOptions {
			options: vec!["Decision Maker".to_string(), "Influencer".to_string()],
			..RoleOptions::default()
		},
		..RoleAwareOptions::default()
	}
}

fn two_contacts() -> SharedRecord {
	record(json!({
		"contactsIds": ["c1", "c2"],
		"contactsNames": { "c1": "Ann", "c2": "Bob" },
		"contactsColumns": { "c1": { "role": "Influencer" }, "c2": { "role": null } },
	}))
}

#[test]
fn setup_reads_primary_and_roles() {
	let record = two_contacts();
	record.borrow_mut().set("contactId", json!("c2"));
	record.borrow_mut().set("contactName", json!("Bob"));
	let mut field = RoleAwareField::setup(&options(false), &record).unwrap();

	field.field_mut().render();

	assert_eq!(field.field().render_order(), vec!["c2", "c1"]);
	let surface = field.field().base().surface();
	assert_eq!(surface.get("c1").and_then(|i| i.role.as_deref()), Some("Influencer"));
	assert_eq!(surface.get("c2").and_then(|i| i.role.as_deref()), None);
	assert_eq!(surface.active_ids().collect::<Vec<_>>(), vec!["c2"]);
	assert!(field.field_mut().drain_events().is_empty());
}

#[rstest]
#[case::toggles_built(false, Some("c1"), 2)]
#[case::toggles_suppressed(true, None, 0)]
fn suppress_primary_controls_toggles(
	#[case] suppress: bool,
	#[case] primary: Option<&str>,
	#[case] toggles: usize,
) {
	let record = two_contacts();
	let mut field = RoleAwareField::setup(&options(suppress), &record).unwrap();

	field.field_mut().render();

	assert_eq!(field.suppress_primary(), suppress);
	assert_eq!(field.field().primary_id().as_deref(), primary);
	assert_eq!(field.field().base().surface().toggles().count(), toggles);
	assert_eq!(field.field().base().surface().len(), 2);
}

#[test]
fn suppressed_primary_is_still_fetched() {
	let record = two_contacts();
	record.borrow_mut().set("contactId", json!("c2"));
	record.borrow_mut().set("contactName", json!("Bob"));
	let mut field = RoleAwareField::setup(&options(true), &record).unwrap();

	field.field_mut().render();

	assert_eq!(field.field().render_order(), vec!["c2", "c1"]);
	assert_eq!(
		Value::Object(field.field().fetch()),
		json!({
			"contactsIds": ["c1", "c2"],
			"contactsNames": { "c1": "Ann", "c2": "Bob" },
			"contactsColumns": { "c1": { "role": "Influencer" }, "c2": { "role": null } },
			"contactId": "c2",
			"contactName": "Bob",
		})
	);
}

#[test]
fn select_filters_follow_parent_account() {
	let record = two_contacts();
	let field = RoleAwareField::setup(&options(false), &record).unwrap();
	assert_eq!(field.select_filters(&record.borrow()), None);

	record.borrow_mut().set("accountId", json!("a1"));
	record.borrow_mut().set("accountName", json!("Acme"));
	let filters = field.select_filters(&record.borrow()).unwrap();
	assert_eq!(
		serde_json::to_value(&filters).unwrap(),
		json!({
			"accounts": {
				"type": "linkedWith",
				"value": ["a1"],
				"data": { "type": "anyOf", "nameHash": { "a1": "Acme" } },
			}
		})
	);
}

#[test]
fn create_attributes_copy_parent_link() {
	let record = two_contacts();
	let field = RoleAwareField::setup(&options(false), &record).unwrap();
	assert_eq!(field.create_attributes(&record.borrow()), None);

	record.borrow_mut().set("accountId", json!("a1"));
	let attributes = field.create_attributes(&record.borrow()).unwrap();
	assert_eq!(Value::Object(attributes), json!({ "accountId": "a1", "accountName": null }));

	record.borrow_mut().set("accountName", json!("Acme"));
	let attributes = field.create_attributes(&record.borrow()).unwrap();
	assert_eq!(Value::Object(attributes), json!({ "accountId": "a1", "accountName": "Acme" }));
}

#[test]
fn set_role_validates_options() {
	let record = two_contacts();
	let mut field = RoleAwareField::setup(&options(false), &record).unwrap();
	field.field_mut().render();

	assert!(field.set_role("c2", Some("Decision Maker")).unwrap());
	assert!(!field.set_role("c2", Some("Decision Maker")).unwrap());
	assert_eq!(
		field.field().base().surface().get("c2").and_then(|i| i.role.as_deref()),
		Some("Decision Maker")
	);

	let err = field.set_role("c2", Some("Sponsor")).unwrap_err();
	assert!(matches!(err, RoleError::Field(FieldError::UnknownRole { .. })));
	let err = field.set_role("c9", None).unwrap_err();
	assert!(matches!(err, RoleError::Field(FieldError::NotLinked(id)) if id == "c9"));
}

#[test]
fn deleting_primary_drops_its_role() {
	let record = two_contacts();
	record.borrow_mut().set("contactId", json!("c1"));
	record.borrow_mut().set("contactName", json!("Ann"));
	let mut field = RoleAwareField::setup(&options(false), &record).unwrap();
	field.field_mut().render();

	field.field_mut().delete_link("c1");
	assert_eq!(field.field().primary_id(), None);
	assert_eq!(field.field().base().role("c1"), None);
	assert_eq!(
		field.field().fetch().get("contactsColumns"),
		Some(&json!({ "c2": { "role": null } }))
	);

	assert_eq!(field.field_mut().reconcile().as_deref(), Some("c2"));
	assert_eq!(field.field().primary_name().as_deref(), Some("Bob"));
}

#[test]
fn attribute_list_includes_columns_and_primary() {
	let record = two_contacts();
	let field = RoleAwareField::setup(&options(false), &record).unwrap();
	assert_eq!(
		field.field().attribute_list(),
		vec!["contactsIds", "contactsNames", "contactsColumns", "contactId", "contactName"]
	);
}

#[test]
fn invalid_parent_link_is_rejected() {
	let record = two_contacts();
	let options = RoleAwareOptions {
		parent_link: "Account-1".to_string(),
		..options(false)
	};
	assert!(matches!(RoleAwareField::setup(&options, &record), Err(RoleError::Record(_))));
}
