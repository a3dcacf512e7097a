use super::*;

#[test]
fn memory_storage_roundtrip() {
    let mut s = MemoryStorage::new();
    assert_eq!(s.get("k").unwrap(), None);
    s.set("k", "v").unwrap();
    assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn json_file_storage_persists_and_tolerates_missing_file() {
    let dir = PathBuf::from("target").join("storage_unit");
    let path = dir.join("store.json");
    let _ = std::fs::remove_file(&path);

    let mut s = JsonFileStorage::new(&path);
    assert_eq!(s.get("aarohan-theme").unwrap(), None);
    s.set("aarohan-theme", "light").unwrap();
    s.set("other", "x").unwrap();

    let reopened = JsonFileStorage::new(&path);
    assert_eq!(reopened.get("aarohan-theme").unwrap().as_deref(), Some("light"));
    assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn json_file_storage_reports_corrupt_file() {
    let dir = PathBuf::from("target").join("storage_unit_corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("store.json");
    std::fs::write(&path, "{not json").unwrap();
    let s = JsonFileStorage::new(&path);
    assert!(matches!(s.get("k"), Err(MotionError::Storage(_))));
}
