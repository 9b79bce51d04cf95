//! Integration tests for the Exporter public interface.
//!
//! These tests drive whole exports through the public API and inspect the
//! produced packages.

use customcar_core::angle::{degrees_to_toe_mm_per_wheel, toe_mm_to_degrees_per_wheel};
use customcar_core::{
    spec_types, AliasTable, ExportError, ExportRequest, Exporter, LineEnding,
    SpecificationEntry,
};
use tempfile::TempDir;

fn decode_utf16le(bytes: &[u8]) -> String {
    assert_eq!(&bytes[..2], &[0xFF, 0xFE], "missing UTF-16LE BOM");
    let units: Vec<u16> = bytes[2..]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).expect("valid UTF-16")
}

fn legacy_request() -> ExportRequest {
    serde_json::from_str(
        r#"{
            "ManufacturerName": "",
            "ModelName": "Test",
            "Specifications": [{ "TypeKeyOrAlias": "camber_front_left", "Best": 0.5 }]
        }"#,
    )
    .expect("request parses")
}

#[test]
fn test_end_to_end_defaults() {
    let exporter = Exporter::new();
    let package = exporter.build(&legacy_request()).unwrap();

    assert_eq!(package.manufacturer.name, "Unknown");
    assert_eq!(package.model.search_name.as_deref(), Some("Unknown>Test"));

    let specs = package.model.specifications.as_ref().unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(
        specs[0].type_key.to_string().to_uppercase(),
        "918580AB-6531-435A-B63B-9929F4E06173"
    );
    assert_eq!(specs[0].best_value, 0.5);
    assert_eq!(specs[0].min_value, 0.5);
    assert_eq!(specs[0].max_value, 0.5);
}

#[test]
fn test_structured_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.customcar");

    Exporter::new()
        .generate_to_file(&legacy_request(), &path)
        .unwrap();

    let text = decode_utf16le(&std::fs::read(&path).unwrap());
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-16\"?>"));
    assert_eq!(text.matches("<Model>").count(), 2);
    assert!(text.contains("<Name>Test</Name>"));
    assert!(text.contains("<Name>Unknown</Name>"));
    assert!(text.contains("<TypeKey>918580ab-6531-435a-b63b-9929f4e06173</TypeKey>"));

    // Model node comes first
    assert!(text.find("<Name>Test</Name>").unwrap() < text.find("<Name>Unknown</Name>").unwrap());
}

#[test]
fn test_manual_in_memory_output() {
    let request = legacy_request().manual_xml(true);
    let bytes = Exporter::new().generate_package(&request).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<ArrayOfModel>\r\n"));
    assert!(text.contains("    <RimSize>14</RimSize>\r\n"));
    assert!(text.contains("        <MinValue>0.5</MinValue>\r\n"));

    let manufacturer = &text[text.rfind("<Model>").unwrap()..];
    assert!(manufacturer.contains("<RimSize xsi:nil=\"true\""));
    assert!(!manufacturer.contains("<Specifications"));
    assert!(!manufacturer.contains("<SpecificationData"));
}

#[test]
fn test_manual_layout_is_stable_across_exports() {
    let exporter = Exporter::builder().line_ending(LineEnding::Lf).build();
    let request = legacy_request().manual_xml(false);

    let normalize = |text: String| -> Vec<String> {
        text.lines()
            .filter(|line| !line.contains("<ID>") && !line.contains("<ParentKey>"))
            .map(str::to_string)
            .collect()
    };
    let first = normalize(String::from_utf8(exporter.generate_package(&request).unwrap()).unwrap());
    let second = normalize(String::from_utf8(exporter.generate_package(&request).unwrap()).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_unknown_alias_does_not_abort() {
    let request = ExportRequest::new("GT")
        .specification(SpecificationEntry::new("banana").best(3.0))
        .specification(SpecificationEntry::new("front toe total").best(0.2).tolerances(0.05, 0.05));
    let bytes = Exporter::new()
        .generate_package(&request.manual_xml(true))
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text.matches("<Specification>").count(), 1);
    assert!(text.contains(&format!(
        "<TypeKey>{}</TypeKey>",
        spec_types::FRONT_TOE_TOTAL
    )));
    assert!(!text.contains("banana"));
}

#[test]
fn test_empty_model_specifications_in_manual_mode() {
    let request = ExportRequest::new("GT")
        .specification(SpecificationEntry::new("banana"))
        .manual_xml(true);
    let text = String::from_utf8(Exporter::new().generate_package(&request).unwrap()).unwrap();
    assert_eq!(text.matches("<Specifications />").count(), 1);
    assert_eq!(text.matches("<SpecificationData />").count(), 1);
}

#[test]
fn test_folder_prefix_through_exporter() {
    let exporter = Exporter::new();
    let prefixed = exporter
        .build(&ExportRequest::new("GT").folder("Model X").manufacturer("Acme"))
        .unwrap();
    assert_eq!(prefixed.model.name, "Model X GT");
    assert_eq!(prefixed.model.search_name.as_deref(), Some("Acme>Model X GT"));

    let already = exporter
        .build(&ExportRequest::new("Model X GT").folder("Model X"))
        .unwrap();
    assert_eq!(already.model.name, "Model X GT");
}

#[test]
fn test_invalid_request_leaves_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keep.customcar");
    std::fs::write(&path, b"previous").unwrap();

    let mut request = legacy_request();
    request.model_name = Some("  ".into());
    let err = Exporter::new().generate_to_file(&request, &path).unwrap_err();

    assert!(matches!(err, ExportError::ModelNameRequired));
    assert!(err.is_input_error());
    assert_eq!(std::fs::read(&path).unwrap(), b"previous");
}

#[test]
fn test_converted_toe_feeds_a_specification() {
    let toe_deg = toe_mm_to_degrees_per_wheel(1.5, 15.0);
    let request = ExportRequest::new("GT")
        .specification(SpecificationEntry::new("toe_front_left").best(toe_deg));
    let package = Exporter::new().build(&request).unwrap();

    let spec = &package.model.specifications.unwrap()[0];
    assert_eq!(spec.type_key, spec_types::FRONT_TOE_LEFT);
    assert!((degrees_to_toe_mm_per_wheel(spec.best_value, 15.0) - 1.5).abs() < 1e-9);
}

#[test]
fn test_registered_alias_outside_allow_list_is_dropped() {
    let mut aliases = AliasTable::with_defaults();
    aliases.register("wheelbase", uuid_like(0x42));
    let exporter = Exporter::builder().aliases(aliases).build();

    let request = ExportRequest::new("GT").specification(SpecificationEntry::new("wheelbase").best(2.6));
    let package = exporter.build(&request).unwrap();
    assert!(package.model.specifications.is_none());
}

fn uuid_like(n: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(n)
}
