use parts_shop::{FormatRegistry, FormatStore, LocalStorage, Part, PdfLayout, ShopError};
use std::fs;
use tempfile::TempDir;

fn store() -> FormatStore<LocalStorage> {
    FormatStore::new(LocalStorage::new(), FormatRegistry::standard(PdfLayout::default()))
}

fn sample_parts() -> Vec<Part> {
    vec![
        Part::new("Mouse", 9.99, 5),
        Part::new("Keyboard", 29.5, 2),
        Part::new("Cable, USB-C \"braided\"", 0.1, 0),
        Part::new("GPU", 1234.0, 1),
        Part::new("Thermal paste", 1.0 / 3.0, 4_000_000),
    ]
}

#[test]
fn test_load_save_load_is_stable_for_every_loadable_format() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let parts = sample_parts();

    for extension in ["csv", "txt", "json"] {
        let first = temp_dir.path().join(format!("first.{}", extension));
        let second = temp_dir.path().join(format!("second.{}", extension));

        store.save(&first, &parts).unwrap();
        let loaded = store.load(&first).unwrap();
        assert_eq!(loaded.parts, parts, "first load of {}", extension);
        assert_eq!(loaded.skipped, 0);

        store.save(&second, &loaded.parts).unwrap();
        let reloaded = store.load(&second).unwrap();
        assert_eq!(reloaded.parts, parts, "second load of {}", extension);
    }
}

#[test]
fn test_well_formed_and_malformed_lines_are_counted() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("stock.csv");
    fs::write(
        &csv_path,
        "Name,Price,Quantity\n\
         Mouse,9.99,5\n\
         Keyboard,twenty,2\n\
         Monitor,199.0\n\
         Hub,12.5,4\n\
         Fan,3.0,1.5\n\
         SSD,80,1\n",
    )
    .unwrap();

    let decoded = store().load(&csv_path).unwrap();
    assert_eq!(decoded.parts.len(), 3);
    assert_eq!(decoded.skipped, 3);
    assert_eq!(decoded.parts[2], Part::new("SSD", 80.0, 1));
}

#[test]
fn test_example_txt_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stock.txt");
    fs::write(&path, "Mouse\t9.99\t5\nKeyboard\t29.5\t2\n").unwrap();

    let decoded = store().load(&path).unwrap();
    assert_eq!(
        decoded.parts,
        vec![Part::new("Mouse", 9.99, 5), Part::new("Keyboard", 29.5, 2)]
    );
}

#[test]
fn test_empty_list_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();

    let csv_path = temp_dir.path().join("empty.csv");
    let txt_path = temp_dir.path().join("empty.txt");
    let json_path = temp_dir.path().join("empty.json");
    store.save(&csv_path, &[]).unwrap();
    store.save(&txt_path, &[]).unwrap();
    store.save(&json_path, &[]).unwrap();

    assert_eq!(fs::read_to_string(&csv_path).unwrap(), "Name,Price,Quantity\n");
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), "");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!([]));

    assert!(store.load(&csv_path).unwrap().parts.is_empty());
    assert!(store.load(&txt_path).unwrap().parts.is_empty());
    assert!(store.load(&json_path).unwrap().parts.is_empty());
}

#[test]
fn test_unknown_extension_is_reported_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let xml_path = temp_dir.path().join("stock.xml");
    fs::write(&xml_path, "<parts/>").unwrap();

    assert!(store.load_or_empty(&xml_path).is_empty());
    assert!(matches!(
        store.load(&xml_path),
        Err(ShopError::UnsupportedFormat { .. })
    ));

    let out_path = temp_dir.path().join("out.xlsx");
    assert!(store.save(&out_path, &sample_parts()).is_err());
    assert!(!out_path.exists());
}

#[test]
fn test_extension_match_ignores_case() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let path = temp_dir.path().join("STOCK.JSON");

    store.save(&path, &sample_parts()).unwrap();
    assert_eq!(store.load(&path).unwrap().parts, sample_parts());
}

#[test]
fn test_malformed_json_yields_no_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, r#"[{"name": "Mouse", "price": 9.99, "quantity": 5},"#).unwrap();

    assert!(matches!(store.load(&path), Err(ShopError::JsonError(_))));
    assert!(store.load_or_empty(&path).is_empty());
}

#[test]
fn test_pdf_is_export_only() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let path = temp_dir.path().join("stock.pdf");

    let report = store.save(&path, &sample_parts()).unwrap();
    assert!(report.bytes > 0);
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));

    assert!(matches!(
        store.load(&path),
        Err(ShopError::LoadNotSupported { .. })
    ));
}

#[test]
fn test_save_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = store();
    let path = temp_dir.path().join("stock.txt");
    fs::write(&path, "old contents that are much longer than the new file\n").unwrap();

    store.save(&path, &[Part::new("Hub", 12.5, 4)]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Hub\t12.5\t4\n");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    let err = store().load(&path).unwrap_err();
    assert!(matches!(err, ShopError::IoError(_)));
}
