use i18n_extract::dictionary::store::render;
use i18n_extract::{Dictionary, DictionaryMerger, DictionaryStore, MergeStatus, SkipReason, Value};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn merger_for(path: &Path) -> DictionaryMerger {
    DictionaryMerger::new(DictionaryStore::new(path), "vendor_admin")
}

fn load(path: &Path) -> Dictionary {
    DictionaryStore::new(path).load().unwrap()
}

fn leaf<'a>(dict: &'a Dictionary, path: &[&str]) -> Option<&'a str> {
    dict.lookup(path).and_then(Value::as_leaf)
}

#[test]
fn test_merge_creates_file_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config/locales/vendor_admin.en.yml");

    let outcome = merger_for(&path).merge(&["admin".to_string(), "users".to_string()], "greeting", "Hi");

    assert_eq!(outcome.key, "greeting");
    assert_eq!(outcome.status, MergeStatus::Inserted);
    assert!(outcome.is_persisted());

    let dict = load(&path);
    assert_eq!(leaf(&dict, &["vendor_admin", "admin", "users", "greeting"]), Some("Hi"));
}

#[test]
fn test_collision_with_different_value_is_suffixed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    fs::write(&path, "vendor_admin:\n  greeting: Bye\n").unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Hi");

    assert_eq!(outcome.key, "greeting_2");
    assert_eq!(outcome.status, MergeStatus::Inserted);
    let dict = load(&path);
    assert_eq!(leaf(&dict, &["vendor_admin", "greeting"]), Some("Bye"));
    assert_eq!(leaf(&dict, &["vendor_admin", "greeting_2"]), Some("Hi"));
}

#[test]
fn test_collision_with_same_value_is_reused() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    fs::write(&path, "vendor_admin:\n  greeting: Bye\n").unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Bye");

    assert_eq!(outcome.key, "greeting");
    assert_eq!(outcome.status, MergeStatus::Reused);
    let dict = load(&path);
    let root = dict.get("vendor_admin").and_then(Value::as_node).unwrap();
    assert_eq!(root.keys(), vec!["greeting"]);
}

#[test]
fn test_repeated_merges_converge() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let merger = merger_for(&path);
    let ns = vec!["orders".to_string()];

    assert_eq!(merger.merge(&ns, "save", "Save").key, "save");
    assert_eq!(merger.merge(&ns, "save", "Save now").key, "save_2");
    assert_eq!(merger.merge(&ns, "save", "Save later").key, "save_3");
    assert_eq!(merger.merge(&ns, "save", "Save now").key, "save_2");
}

#[test]
fn test_untouched_branches_survive() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    fs::write(
        &path,
        "\
vendor_admin:
  orders:
    title: Orders
    count: 3
    enabled: true
    tabs:
      - open
      - closed
  users:
    title: Users
other_root:
  keep: me
",
    )
    .unwrap();
    let before = load(&path);

    merger_for(&path).merge(&["users".to_string()], "greeting", "Hi");

    let after = load(&path);
    assert_eq!(after.get("other_root"), before.get("other_root"));
    let orders_before = before.lookup(&["vendor_admin", "orders"]);
    let orders_after = after.lookup(&["vendor_admin", "orders"]);
    assert_eq!(orders_after, orders_before);
    assert_eq!(leaf(&after, &["vendor_admin", "users", "title"]), Some("Users"));
    assert_eq!(leaf(&after, &["vendor_admin", "users", "greeting"]), Some("Hi"));
    assert_eq!(after.keys(), vec!["vendor_admin", "other_root"]);
}

#[test]
fn test_render_then_load_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    fs::write(
        &path,
        "\
vendor_admin:
  quoted: 'yes'
  colon: 'Note: read this'
  multi: \"line one\\nline two\"
  nested:
    deeper:
      leaf: value
  number: 42
  empty: ~
",
    )
    .unwrap();
    let original = load(&path);

    let rendered = render(original.clone()).unwrap();
    fs::write(&path, &rendered).unwrap();

    assert_eq!(load(&path), original);
}

#[test]
fn test_non_mapping_root_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let content = "just a bare string\n";
    fs::write(&path, content).unwrap();

    let outcome = merger_for(&path).merge(&["admin".to_string()], "greeting", "Hi");

    assert_eq!(outcome.key, "greeting");
    assert!(matches!(
        outcome.status,
        MergeStatus::Skipped(SkipReason::NonMappingRoot { .. })
    ));
    assert!(!outcome.is_persisted());
    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
}

#[test]
fn test_malformed_yaml_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let content = "vendor_admin:\n  greeting: [unclosed\n";
    fs::write(&path, content).unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Hi");

    assert_eq!(outcome.key, "greeting");
    assert!(matches!(outcome.status, MergeStatus::Skipped(SkipReason::Parse { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_branch_conflict_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let content = "vendor_admin:\n  admin: Administration\n";
    fs::write(&path, content).unwrap();

    let outcome = merger_for(&path).merge(&["admin".to_string(), "users".to_string()], "greeting", "Hi");

    assert_eq!(outcome.key, "greeting");
    assert_eq!(
        outcome.status,
        MergeStatus::Skipped(SkipReason::BranchConflict {
            path: "vendor_admin.admin".to_string(),
            kind: "string",
        })
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_root_namespace_conflict_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let content = "vendor_admin: 5\n";
    fs::write(&path, content).unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Hi");

    assert!(matches!(
        outcome.status,
        MergeStatus::Skipped(SkipReason::BranchConflict { kind: "integer", .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_unreadable_document_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    // A directory in place of the file cannot be read as text
    let path = temp_dir.path().join("en.yml");
    fs::create_dir_all(&path).unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Hi");

    assert!(matches!(
        outcome.status,
        MergeStatus::Skipped(SkipReason::Unreadable { .. })
    ));
    assert!(path.is_dir());
}

#[test]
fn test_octal_looking_text_survives_unrelated_merge() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    fs::write(&path, "vendor_admin:\n  oct: '0o17'\n").unwrap();

    let outcome = merger_for(&path).merge(&[], "greeting", "Hi");

    assert_eq!(outcome.status, MergeStatus::Inserted);
    let dict = load(&path);
    assert_eq!(leaf(&dict, &["vendor_admin", "oct"]), Some("0o17"));
    assert_eq!(leaf(&dict, &["vendor_admin", "greeting"]), Some("Hi"));
}

#[test]
fn test_octal_looking_value_is_reused_on_second_merge() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("en.yml");
    let merger = merger_for(&path);

    let first = merger.merge(&[], "code", "0o17");
    let second = merger.merge(&[], "code", "0o17");

    assert_eq!(first.key, "code");
    assert_eq!(first.status, MergeStatus::Inserted);
    assert_eq!(second.key, "code");
    assert_eq!(second.status, MergeStatus::Reused);

    let dict = load(&path);
    assert_eq!(leaf(&dict, &["vendor_admin", "code"]), Some("0o17"));
    assert!(dict.lookup(&["vendor_admin", "code_2"]).is_none());
}
