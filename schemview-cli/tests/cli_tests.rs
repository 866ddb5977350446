//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the schemview-cli binary.
fn schemview_cli() -> Command {
    cargo_bin_cmd!("schemview-cli")
}

/// Path to schemview library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("schemview")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = schemview_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("KiCad"));
}

#[test]
fn test_cli_version() {
    let mut cmd = schemview_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_render_to_stdout() {
    let mut cmd = schemview_cli();
    let path = fixtures_dir().join("sample.sch");

    cmd.arg("render").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains("Title: Sensor Board"))
        .stdout(predicate::str::contains("</svg>"));
}

#[test]
fn test_cli_render_to_file_with_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sample.svg");

    let mut cmd = schemview_cli();
    cmd.arg("render")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("-o")
        .arg(&out)
        .arg("--width")
        .arg("640")
        .arg("--height")
        .arg("480");

    cmd.assert().success().stdout(predicate::str::is_empty());

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="640" height="480""#));
}

#[test]
fn test_cli_render_without_overlays() {
    let mut cmd = schemview_cli();

    cmd.arg("render")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("--no-grid")
        .arg("--no-title");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Title:").not())
        .stdout(predicate::str::contains(r##"stroke="#e0e0e0""##).not())
        .stdout(predicate::str::contains("SDA"));
}

#[test]
fn test_cli_render_with_zoom_and_negative_pan() {
    let mut cmd = schemview_cli();

    cmd.arg("render")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("--zoom")
        .arg("2")
        .arg("--pan")
        .arg("-50")
        .arg("25")
        .arg("-v");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<svg"))
        .stderr(predicate::str::contains("rendering"));
}

#[test]
fn test_cli_render_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    std::fs::write(
        &config,
        r##"{"width": 300, "height": 200, "show_grid": false, "theme": {"wire": "#123456"}}"##,
    )
    .unwrap();

    let mut cmd = schemview_cli();
    cmd.arg("render")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("--config")
        .arg(&config)
        .arg("--height")
        .arg("250");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"width="300" height="250""#))
        .stdout(predicate::str::contains(r##"stroke="#123456""##));
}

#[test]
fn test_cli_render_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("options.json");
    std::fs::write(&config, r#"{"width": -1}"#).unwrap();

    let mut cmd = schemview_cli();
    cmd.arg("render")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Config error"));
}

#[test]
fn test_cli_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.kicad_pcb");
    std::fs::write(&path, "(kicad_pcb)").unwrap();

    let mut cmd = schemview_cli();
    cmd.arg("render").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(".sch or .kicad_sch"));
}

#[test]
fn test_cli_render_nonexistent_file() {
    let mut cmd = schemview_cli();

    cmd.arg("render").arg("does_not_exist.sch");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_inspect_human() {
    let mut cmd = schemview_cli();

    cmd.arg("inspect").arg(fixtures_dir().join("sample.sch"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sensor Board"))
        .stdout(predicate::str::contains("Components: 3"))
        .stdout(predicate::str::contains("Wires:      4"))
        .stdout(predicate::str::contains("x=1950 y=1200 w=1274 h=830"));
}

#[test]
fn test_cli_inspect_json() {
    let mut cmd = schemview_cli();

    cmd.arg("inspect")
        .arg(fixtures_dir().join("sample.sch"))
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let result = &value["results"][0];
    assert_eq!(result["title"], "Sensor Board");
    assert_eq!(result["summary"]["components"], 3);
    assert_eq!(result["summary"]["labels"], 2);
    assert_eq!(result["bounds"]["width"], 1274.0);
    assert!(result["viewport"]["zoom"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_cli_project_command() {
    let mut cmd = schemview_cli();

    cmd.arg("project").arg(fixtures_dir());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sample.sch"))
        .stdout(predicate::str::contains("malformed.sch"))
        .stdout(predicate::str::contains("modern.kicad_sch"));
}

#[test]
fn test_cli_project_writes_svgs() {
    let out = tempfile::tempdir().unwrap();

    let mut cmd = schemview_cli();
    cmd.arg("project")
        .arg(fixtures_dir())
        .arg("--out-dir")
        .arg(out.path())
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"total_files\": 3"));

    for name in ["sample.svg", "malformed.svg", "modern.svg"] {
        let svg = std::fs::read_to_string(out.path().join(name)).unwrap();
        assert!(svg.starts_with("<svg"), "{name}");
    }
}

#[test]
fn test_cli_project_empty_dir() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = schemview_cli();
    cmd.arg("project").arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No schematic files found"));
}

#[test]
fn test_cli_output_formats_are_different() {
    let path = fixtures_dir().join("sample.sch");

    let mut cmd_human = schemview_cli();
    cmd_human.arg("inspect").arg(&path).arg("--format").arg("human");
    let human_output = cmd_human.output().unwrap();

    let mut cmd_json = schemview_cli();
    cmd_json.arg("inspect").arg(&path).arg("--format").arg("json");
    let json_output = cmd_json.output().unwrap();

    assert_ne!(
        human_output.stdout,
        json_output.stdout,
        "Different formats should produce different output"
    );
}
