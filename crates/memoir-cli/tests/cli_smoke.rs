use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn sample_book() -> PathBuf {
    let fixture = repo_root().join("fixtures").join("books").join("sample.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());
    fixture
}

fn stdout_of(args: &[&str]) -> String {
    let exe = assert_cmd::cargo_bin!("memoir-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args(args)
        .output()
        .expect("run memoir-cli");
    assert!(
        output.status.success(),
        "memoir-cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

#[test]
fn cli_renders_book_svg_to_file() {
    let fixture = sample_book();
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("book.svg");

    let exe = assert_cmd::cargo_bin!("memoir-cli");
    Command::new(exe)
        .args([
            "render",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"), "output is not an SVG document");
    assert!(svg.contains(r#"data-page-count="7""#));
}

#[test]
fn cli_renders_single_page_with_manual_scale() {
    let fixture = sample_book();
    let svg = stdout_of(&[
        "render",
        "--page",
        "page-3",
        "--scale",
        "0.65",
        fixture.to_string_lossy().as_ref(),
    ]);
    assert!(svg.contains(r#"data-layout="collage""#));
    assert!(svg.contains(r#"data-scale="0.65""#));
}

#[test]
fn cli_applies_config_file() {
    let fixture = sample_book();
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("memoir.json");
    fs::write(&config, r#"{"render":{"svgId":"cli book","showSafeZone":true}}"#)
        .expect("write config");
    let overrides = tmp.path().join("overrides.json");
    fs::write(&overrides, r#"{"render":{"showSafeZone":false}}"#).expect("write overrides");

    let svg = stdout_of(&[
        "render",
        "--config",
        config.to_string_lossy().as_ref(),
        "--config",
        overrides.to_string_lossy().as_ref(),
        fixture.to_string_lossy().as_ref(),
    ]);
    assert!(svg.starts_with(r#"<svg id="cli-book""#));
    assert!(!svg.contains("memoir-safe-zone"));
}

#[test]
fn cli_layout_reads_stdin() {
    let fixture = sample_book();
    let exe = assert_cmd::cargo_bin!("memoir-cli");
    let assert = assert_cmd::Command::new(exe)
        .args(["layout", "--auto", "1200x900", "-"])
        .write_stdin(fs::read(&fixture).expect("read fixture"))
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("layout json");
    let pages = json.as_array().expect("array of pages");
    assert_eq!(pages.len(), 7);
    assert_eq!(pages[0]["pageId"], "abc123");
    assert_eq!(pages[6]["requestedLayout"], "polaroid");
    assert_eq!(pages[6]["layoutKind"], "single");
    assert_eq!(pages[6]["content"]["kind"], "single");
    assert!(pages[0]["scale"].as_f64().expect("scale") > 0.0);
}

#[test]
fn cli_reports_overflowing_pages() {
    let fixture = sample_book();
    let out = stdout_of(&["overflow", fixture.to_string_lossy().as_ref()]);
    let json: serde_json::Value = serde_json::from_str(&out).expect("overflow json");
    let pages = json.as_array().expect("array");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["pageId"], "page-3");
    assert_eq!(pages[0]["capacity"], 4);
    assert_eq!(pages[0]["hidden"], 2);
}

#[test]
fn cli_lists_pages_and_sizes() {
    let fixture = sample_book();
    let pages = stdout_of(&["pages", fixture.to_string_lossy().as_ref()]);
    let lines: Vec<&str> = pages.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("1\tch-spring\tabc123\tcover -> cover"));
    assert!(lines[6].contains("polaroid -> single"));

    let sizes = stdout_of(&["sizes"]);
    let keys: Vec<&str> = sizes
        .lines()
        .filter_map(|l| l.split('\t').next())
        .collect();
    assert_eq!(keys, vec!["A4", "A5", "16K", "B5"]);
}

#[test]
fn cli_usage_and_lookup_errors() {
    let exe = assert_cmd::cargo_bin!("memoir-cli");
    Command::new(exe)
        .args(["render", "--bogus"])
        .assert()
        .code(2);

    let fixture = sample_book();
    Command::new(exe)
        .args([
            "render",
            "--page",
            "nope",
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);

    Command::new(exe)
        .args(["layout", "--auto", "wide"])
        .assert()
        .code(2);
}
