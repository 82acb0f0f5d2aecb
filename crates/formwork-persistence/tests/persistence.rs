//! Repository behavior over both bundled stores.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use formwork_model::{FieldType, FieldValidation, FieldValue, FormField, FormSchema};
use formwork_persistence::{
    BlobStore, DEFAULT_COLLECTION_KEY, FileStore, MemoryStore, SchemaRepository,
};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Metadata};

fn contact_schema(name: &str) -> FormSchema {
    let mut schema = FormSchema::new(name);
    schema
        .add_field(
            FormField::new("email", "Email", FieldType::Text).with_validation(FieldValidation {
                required: true,
                email: true,
                ..FieldValidation::default()
            }),
        )
        .expect("add email");
    schema
}

/// Counts WARN events so degraded loads can be asserted on.
struct WarnCount(Arc<AtomicUsize>);

impl tracing::Subscriber for WarnCount {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

#[test]
fn append_then_resolve_by_name_round_trips() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    let schema = contact_schema("Contact");
    repo.append(schema.clone()).expect("append");

    let resolved = repo.resolve(Some("Contact")).expect("resolve by name");
    assert_eq!(resolved, schema);
}

#[test]
fn explicit_empty_default_survives_append_and_resolve() {
    let mut schema = FormSchema::new("Consent");
    schema
        .add_field(
            FormField::new("agree", "Agree", FieldType::Checkbox).with_default(FieldValue::Empty),
        )
        .expect("add agree");

    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.append(schema.clone()).expect("append");

    assert_eq!(repo.resolve(Some("Consent")), Some(schema));
}

#[test]
fn resolve_prefers_position_for_numeric_selectors() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.append(contact_schema("First")).expect("append first");
    repo.append(contact_schema("Second")).expect("append second");

    assert_eq!(repo.resolve(Some("0")).map(|s| s.name), Some("First".to_string()));
    assert_eq!(repo.resolve(Some("1")).map(|s| s.name), Some("Second".to_string()));
}

#[test]
fn out_of_range_position_falls_back_to_name_match() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.append(contact_schema("7")).expect("append");

    // "7" is out of range as an index (one schema saved), but matches the
    // schema named "7".
    assert_eq!(repo.resolve(Some("7")).map(|s| s.name), Some("7".to_string()));
    assert_eq!(repo.resolve(Some("99")), None);
}

#[test]
fn no_selector_means_latest() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    assert_eq!(repo.resolve(None), None);

    repo.append(contact_schema("Old")).expect("append old");
    repo.append(contact_schema("New")).expect("append new");
    assert_eq!(repo.resolve(None).map(|s| s.name), Some("New".to_string()));
}

#[test]
fn missing_content_warns_and_loads_as_empty() {
    let warnings = Arc::new(AtomicUsize::new(0));
    let subscriber = WarnCount(Arc::clone(&warnings));
    let loaded = tracing::subscriber::with_default(subscriber, || {
        SchemaRepository::new(MemoryStore::new()).load_all()
    });
    assert!(loaded.is_empty());
    assert_eq!(warnings.load(Ordering::Relaxed), 1);
}

#[test]
fn corrupt_content_loads_as_empty() {
    let mut store = MemoryStore::new();
    store
        .set(DEFAULT_COLLECTION_KEY, "{not json".to_string())
        .expect("seed corrupt content");
    let repo = SchemaRepository::new(store);
    assert!(repo.load_all().is_empty());
}

#[test]
fn non_array_content_loads_as_empty() {
    let mut store = MemoryStore::new();
    store
        .set(DEFAULT_COLLECTION_KEY, r#"{"name":"not a list"}"#.to_string())
        .expect("seed object content");
    let repo = SchemaRepository::new(store);
    assert!(repo.load_all().is_empty());
}

#[test]
fn save_all_replaces_the_collection() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.append(contact_schema("Doomed")).expect("append");
    repo.save_all(&[contact_schema("Only")]).expect("replace");

    let names: Vec<String> = repo.load_all().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Only".to_string()]);
}

#[test]
fn listing_reports_metadata_in_stored_order() {
    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.append(contact_schema("A")).expect("append a");
    let mut bigger = contact_schema("B");
    bigger
        .add_field(FormField::new("note", "Note", FieldType::Textarea))
        .expect("add note");
    repo.append(bigger).expect("append b");

    let summaries = repo.list();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "A");
    assert_eq!(summaries[0].field_count, 1);
    assert_eq!(summaries[1].name, "B");
    assert_eq!(summaries[1].field_count, 2);
    assert!(summaries[0].created_at.is_some());
}

#[test]
fn alternate_keys_keep_collections_apart() {
    let mut drafts = SchemaRepository::new(MemoryStore::new()).with_key("drafts");
    drafts.append(contact_schema("Draft")).expect("append");
    assert!(drafts.store().get("drafts").is_some());
    assert_eq!(drafts.store().get(DEFAULT_COLLECTION_KEY), None);
}

#[test]
fn file_store_survives_reopening() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schema = contact_schema("Persisted");

    {
        let store = FileStore::new(dir.path()).expect("open store");
        let mut repo = SchemaRepository::new(store);
        repo.append(schema.clone()).expect("append");
    }

    let store = FileStore::new(dir.path()).expect("reopen store");
    let repo = SchemaRepository::new(store);
    assert_eq!(repo.resolve(Some("Persisted")), Some(schema));
}

#[test]
fn file_store_corruption_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("forms.json"), b"\x00\xffgarbage").expect("seed garbage");

    let store = FileStore::new(dir.path()).expect("open store");
    let repo = SchemaRepository::new(store);
    assert!(repo.load_all().is_empty());
}

#[test]
fn persisted_payload_shape_is_stable() {
    let schema = FormSchema {
        name: "Contact".to_string(),
        created_at: None,
        fields: vec![
            FormField::new("email", "Email", FieldType::Text).with_validation(FieldValidation {
                required: true,
                email: true,
                ..FieldValidation::default()
            }),
        ],
    };
    let mut repo = SchemaRepository::new(MemoryStore::new());
    repo.save_all(&[schema]).expect("save");

    let compact = serde_json::to_string(&repo.load_all()).expect("reserialize");
    insta::assert_snapshot!(
        compact,
        @r#"[{"name":"Contact","fields":[{"id":"email","label":"Email","type":"text","validation":{"required":true,"email":true}}]}]"#
    );
}
