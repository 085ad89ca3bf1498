use marknote::session::Session;
use marknote::store::{DocumentStore, StoreError};

fn store() -> (tempfile::TempDir, DocumentStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());
    (dir, store)
}

#[test]
fn test_save_then_load_returns_same_text() {
    let (_dir, store) = store();
    let text = "# Title\n\n**bold** and `code`\n\tindented ünïcödé\n";
    store.save("n.md", text).unwrap();
    assert_eq!(store.load("n.md").unwrap(), text);
}

#[test]
fn test_save_overwrites_existing_note() {
    let (_dir, store) = store();
    store.save("n.md", "first").unwrap();
    store.save("n.md", "second").unwrap();
    assert_eq!(store.load("n.md").unwrap(), "second");
}

#[test]
fn test_load_missing_is_not_found() {
    let (_dir, store) = store();
    let err = store.load("missing.md").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_load_missing_does_not_touch_session() {
    let (_dir, store) = store();
    let mut session = Session::from_text("keep.md", "*unchanged*");
    let before = session.preview().to_vec();
    assert!(session.open(&store, "missing.md").is_err());
    assert_eq!(session.text(), "*unchanged*");
    assert_eq!(session.file_name(), "keep.md");
    assert_eq!(session.preview(), before.as_slice());
}

#[test]
fn test_list_contains_saved_notes() {
    let (_dir, store) = store();
    store.save("a.md", "a").unwrap();
    store.save("b.md", "b").unwrap();
    let names = store.list().unwrap();
    assert!(names.contains(&"a.md".to_string()));
    assert!(names.contains(&"b.md".to_string()));
}

#[test]
fn test_list_skips_other_files_and_directories() {
    let (dir, store) = store();
    store.save("note.md", "x").unwrap();
    std::fs::write(dir.path().join("image.png"), [0_u8, 1, 2]).unwrap();
    std::fs::write(dir.path().join("notes.markdown"), "x").unwrap();
    std::fs::create_dir(dir.path().join("folder.md")).unwrap();
    assert_eq!(store.list().unwrap(), vec!["note.md".to_string()]);
}

#[test]
fn test_name_without_extension_is_listable_after_save() {
    let (_dir, store) = store();
    let stored = store.save("plain", "x").unwrap();
    assert_eq!(stored, "plain.md");
    assert_eq!(store.list().unwrap(), vec!["plain.md".to_string()]);
    assert_eq!(store.load("plain").unwrap(), "x");
}

#[test]
fn test_store_creates_missing_root_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path().join("nested").join("notes"));
    assert!(store.list().unwrap().is_empty());
    store.save("first.md", "hello").unwrap();
    assert_eq!(store.list().unwrap(), vec!["first.md".to_string()]);
}

#[test]
fn test_invalid_names_are_rejected() {
    let (_dir, store) = store();
    for name in ["", "   ", "../x.md", "a/b.md", ".hidden.md"] {
        let err = store.save(name, "x").unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidName { .. }),
            "{name:?} should be invalid"
        );
    }
}

#[test]
fn test_non_utf8_note_reports_encoding_error() {
    let (dir, store) = store();
    std::fs::write(dir.path().join("bin.md"), [0xff_u8, 0xfe, 0x00]).unwrap();
    assert!(matches!(
        store.load("bin.md").unwrap_err(),
        StoreError::Encoding { .. }
    ));
}
