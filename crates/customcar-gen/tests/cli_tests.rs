//! Integration tests for the customcar-gen binary.
//!
//! These tests run the compiled binary and check exit codes, streams and
//! the files it writes.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_customcar-gen"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run customcar-gen")
}

fn write_request(dir: &Path, json: &str) -> String {
    let path = dir.join("input.json");
    std::fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_missing_arguments_exit_with_one() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: customcar-gen"));
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.json");
    let out = temp_dir.path().join("out.customcar");

    let output = run(&[input.to_str().unwrap(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input file not found"));
    assert!(!out.exists());
}

#[test]
fn test_generates_manual_package() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_request(
        temp_dir.path(),
        r#"{
            "ManufacturerName": "Lada",
            "ModelName": "2107",
            "UseManualXml": true,
            "Specifications": [
                { "TypeKeyOrAlias": "caster_front_left", "Best": 1.5, "Min": 0.5, "Max": 0.5 }
            ]
        }"#,
    );
    let out = temp_dir.path().join("lada.customcar");

    let output = run(&[input.as_str(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Generated:"));
    assert!(output.stderr.is_empty(), "unexpected stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(text.contains("<SearchName>Lada&gt;2107</SearchName>"));
    assert!(text.contains("<MinValue>1</MinValue>"));
    assert!(text.contains("<MaxValue>2</MaxValue>"));
}

#[test]
fn test_mode_flags_and_alias_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_request(
        temp_dir.path(),
        r#"{ "ModelName": "Niva", "Specifications": [{ "TypeKeyOrAlias": "Neg Camber", "Best": -0.5 }] }"#,
    );
    let aliases = temp_dir.path().join("aliases.json");
    std::fs::write(&aliases, r#"{ "neg_camber": "12A0C794-2052-42CF-9308-6A3229900B8C" }"#).unwrap();
    let out = temp_dir.path().join("niva.customcar");

    let output = run(&[
        input.as_str(),
        out.to_str().unwrap(),
        "--aliases",
        aliases.to_str().unwrap(),
        "--manual",
        "--no-extras",
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("<TypeKey>12a0c794-2052-42cf-9308-6a3229900b8c</TypeKey>"));
    assert!(!text.contains("RimSize"));
}

#[test]
fn test_default_mode_is_utf16() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_request(temp_dir.path(), r#"{ "ModelName": "Niva" }"#);
    let out = temp_dir.path().join("niva.customcar");

    let output = run(&[input.as_str(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
}

#[test]
fn test_output_without_extension_gets_package_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_request(temp_dir.path(), r#"{ "ModelName": "Niva" }"#);
    let out = temp_dir.path().join("niva");

    let output = run(&[input.as_str(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(temp_dir.path().join("niva.customcar").exists());
    assert!(!out.exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("niva.customcar"));
}

#[test]
fn test_blank_model_name_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_request(temp_dir.path(), r#"{ "ManufacturerName": "Lada", "ModelName": " " }"#);
    let out = temp_dir.path().join("never.customcar");

    let output = run(&[input.as_str(), out.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ModelName is required"));
    assert!(!out.exists());
}

#[test]
fn test_toe_conversion() {
    let output = run(&["toe", "--rim", "14", "--degrees", "0"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");

    let output = run(&["toe", "--rim", "0", "--mm", "-3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");

    let output = run(&["toe", "--rim", "14", "--mm", "3", "--total"]);
    let value: f64 = String::from_utf8_lossy(&output.stdout).trim().parse().unwrap();
    assert!((value - 0.48336).abs() < 1e-3);
}
