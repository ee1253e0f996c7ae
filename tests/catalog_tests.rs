use std::io::Write;

use basket_widget::models::CardData;
use basket_widget::page::{Catalog, CatalogError};
use tempfile::NamedTempFile;

fn write_catalog(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes())
        .expect("Failed to write catalog");
    file
}

#[test]
fn test_load_catalog_from_file() {
    let file = write_catalog(
        r#"{"cards": [
            {"id": "1", "name": "Tea", "price": "2.5"},
            {"id": 2, "name": "Coffee", "price": 3.0}
        ]}"#,
    );

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0), Some(&CardData::new("1", "Tea", "2.5")));
    assert_eq!(catalog.get(1).unwrap().id.as_deref(), Some("2"));
    assert_eq!(catalog.get(1).unwrap().price.as_deref(), Some("3.0"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Catalog::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn test_load_invalid_json() {
    let file = write_catalog("{not json");
    let result = Catalog::load(file.path());
    assert!(matches!(result, Err(CatalogError::Json(_))));
}

#[test]
fn test_null_attributes_read_as_missing() {
    let file = write_catalog(r#"{"cards": [{"id": null, "name": "Ghost", "price": null}]}"#);
    let catalog = Catalog::load(file.path()).unwrap();
    let card = catalog.get(0).unwrap();
    assert_eq!(card.id, None);
    assert_eq!(card.price, None);
    assert_eq!(card.name.as_deref(), Some("Ghost"));
}

#[test]
fn test_bundled_catalog_parses() {
    let catalog = Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json")).unwrap();
    assert!(!catalog.is_empty());
}
