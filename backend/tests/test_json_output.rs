use bible_json_backend::book_mapping::default_table;
use bible_json_backend::discovery::discover_document_set;
use bible_json_backend::extraction::BookExtractor;
use bible_json_backend::output::{read_book_json, to_json, write_book_json};

mod helpers;
use helpers as h;

#[test]
fn test_round_trip_keeps_order_and_labels() {
    let src = h::source_dir();
    let docs = discover_document_set(&src, "rut").unwrap();
    let record = BookExtractor::new(default_table()).extract(&docs).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = write_book_json(dir.path(), "rut", &record).unwrap();
    assert_eq!(path.file_name().unwrap(), "rut.json");

    let parsed = read_book_json(&path).unwrap();
    assert_eq!(parsed, record);
    assert_eq!(h::verse_labels(&parsed), h::verse_labels(&record));
}

#[test]
fn test_json_is_literal_utf8() {
    let src = h::source_dir();
    let docs = discover_document_set(&src, "jud").unwrap();
    let record = BookExtractor::new(default_table()).extract(&docs).unwrap();

    let json = to_json(&record).unwrap();
    assert!(json.contains("\"book_target\": \"የይሁዳ መልእክት\""));
    assert!(!json.contains("\\u"));
    assert!(json.starts_with("{\n  \"book\": \"Jude\",\n"));
}

#[test]
fn test_labels_stay_strings() {
    let src = h::source_dir();
    let docs = discover_document_set(&src, "rut").unwrap();
    let record = BookExtractor::new(default_table()).extract(&docs).unwrap();

    let json = to_json(&record).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let first = &value["chapters"][0]["verses"][0];
    assert_eq!(first["verse"], serde_json::Value::String("1".to_string()));
    assert_eq!(value["chapters"][0]["verses"][2]["verse"], "3-4");
    assert_eq!(value["chapters"][1]["chapter"], 2);
    assert_eq!(value["chapters"][1]["verses"], serde_json::json!([]));
}
