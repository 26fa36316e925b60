//! Integration tests for the layered override semantics.
//!
//! The contract under test: the system pass completes before any application
//! pass, application roots load in the order they were added, and within one
//! pass directories load in sorted name order. Whenever two entries collide
//! on an id, the last written value wins. There is no qualifier best-match
//! scoring.

use rescope::prelude::*;

fn strings_doc(name: &str, value: &str) -> String {
    format!(r#"<resources><string name="{name}">{value}</string></resources>"#)
}

fn store_with(system: Option<&Memory>, apps: &[&Memory]) -> ResourceStore {
    let mut builder = ResourceStoreBuilder::new()
        .register_text(
            "app",
            "int string app_name 0x7f040000\n\
             int string system_only 0x7f040001\n\
             int raw blob 0x7f080000",
        )
        .unwrap();
    if let Some(system) = system {
        builder = builder.system_root(system.root()).system_package("app");
    }
    for app in apps {
        builder = builder.app_root(app.root(), "app");
    }
    builder.build()
}

fn lookup(store: &ResourceStore, entry: &str) -> Option<String> {
    let id = store.resolve_id(&ResourceName::new("app", ResourceKind::String, entry))?;
    store.string(id).unwrap().map(|s| s.to_string())
}

#[test]
fn app_root_overrides_system_root() {
    let system = Memory::new();
    system
        .add_file("values/strings.xml", strings_doc("app_name", "System App"))
        .unwrap();
    system
        .add_file("values/extra.xml", strings_doc("system_only", "Base"))
        .unwrap();

    let app = Memory::new();
    app.add_file("values/strings.xml", strings_doc("app_name", "My App"))
        .unwrap();

    let store = store_with(Some(&system), &[&app]);

    // Id present in both roots: the application value wins.
    assert_eq!(lookup(&store, "app_name").as_deref(), Some("My App"));
    // Id present only in the system root: unaffected by the app pass.
    assert_eq!(lookup(&store, "system_only").as_deref(), Some("Base"));
}

#[test]
fn later_app_roots_override_earlier_ones() {
    let first = Memory::new();
    first
        .add_file("values/strings.xml", strings_doc("app_name", "First"))
        .unwrap();
    let second = Memory::new();
    second
        .add_file("values/strings.xml", strings_doc("app_name", "Second"))
        .unwrap();

    let store = store_with(None, &[&first, &second]);
    assert_eq!(lookup(&store, "app_name").as_deref(), Some("Second"));

    let store = store_with(None, &[&second, &first]);
    assert_eq!(lookup(&store, "app_name").as_deref(), Some("First"));
}

#[test]
fn qualified_directory_overrides_base_within_one_root() {
    let app = Memory::new();
    app.add_file("values/strings.xml", strings_doc("app_name", "Default"))
        .unwrap();
    app.add_file("values-en/strings.xml", strings_doc("app_name", "English"))
        .unwrap();

    // "values" sorts before "values-en", so the qualified variant is applied
    // last and wins. No locale matching is involved.
    let store = store_with(None, &[&app]);
    assert_eq!(lookup(&store, "app_name").as_deref(), Some("English"));
}

#[test]
fn raw_resources_follow_the_same_override_rule() {
    let first = Memory::new();
    first.add_file("raw/blob.bin", b"first").unwrap();
    let second = Memory::new();
    second.add_file("raw/blob.bin", b"second").unwrap();

    let store = store_with(None, &[&first, &second]);
    let id = store
        .resolve_id(&ResourceName::new("app", ResourceKind::Raw, "blob"))
        .unwrap();
    let handle = store.raw(id).unwrap().unwrap();
    assert_eq!(&*handle.data().unwrap(), b"second");
}

#[test]
fn missing_roots_and_categories_are_silent() {
    // An application root with no values directory at all, and no system
    // root: loading is a no-op, not an error.
    let app = Memory::new();
    app.add_file("layout/main.xml", "<LinearLayout/>").unwrap();

    let store = store_with(None, &[&app]);
    assert_eq!(lookup(&store, "app_name"), None);
    assert!(!store.diagnostics().has_errors());
}

#[test]
fn initialize_is_idempotent() {
    let system = Memory::new();
    system
        .add_file("values/strings.xml", strings_doc("app_name", "System App"))
        .unwrap();
    let app = Memory::new();
    app.add_file("values/strings.xml", strings_doc("app_name", "My App"))
        .unwrap();

    let store = store_with(Some(&system), &[&app]);
    store.initialize().unwrap();
    let first = lookup(&store, "app_name");
    let first_diagnostics = store.diagnostics().count();

    // A second initialize is a no-op: same values, no re-load, no new
    // diagnostics.
    store.initialize().unwrap();
    assert_eq!(lookup(&store, "app_name"), first);
    assert_eq!(store.diagnostics().count(), first_diagnostics);
}

#[test]
fn explicit_initialize_matches_lazy_initialize() {
    let app = Memory::new();
    app.add_file("values/strings.xml", strings_doc("app_name", "My App"))
        .unwrap();

    let eager = store_with(None, &[&app]);
    eager.initialize().unwrap();

    let lazy = store_with(None, &[&app]);
    // No explicit initialize: the lookup itself triggers the load.
    assert_eq!(lookup(&lazy, "app_name"), lookup(&eager, "app_name"));
}
