/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for the cms binary.
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Old title</title></head>
<body>
<div class="nav-menu"><a href="#old" class="nav-link">Old</a></div>
<p class="hero-subtitle">Old subtitle</p>
<div id="specialOfferPopup"><h3>Offer</h3><p>Text</p><a class="btn-popup" href="#">Go</a></div>
</body>
</html>"##;

/// A site directory with a page and a `_data` directory.
fn site(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join("index.html"), PAGE).unwrap();
    let data = temp.path().join("_data");
    fs::create_dir(&data).unwrap();
    for (name, content) in files {
        fs::write(data.join(name), content).unwrap();
    }
    temp
}

fn cms(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cms"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute cms")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "cms failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_decode_prints_json() {
    let temp = site(&[("hero.yml", "title: Hi\ncount: 3\ntags:\n  - a\n  - b\n")]);
    let output = cms(temp.path(), &["decode", "_data/hero.yml"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["title"], "Hi");
    assert_eq!(json["count"], 3.0);
    assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_decode_missing_file_fails() {
    let temp = site(&[]);
    let output = cms(temp.path(), &["decode", "_data/nope.yml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.yml"));
}

#[test]
fn test_apply_writes_patched_page() {
    let temp = site(&[
        ("site.yml", "title: New title\n"),
        (
            "navigation.yml",
            "items:\n  - text: B\n    link: /b\n    order: 2\n  - text: A\n    link: /a\n    order: 1\n",
        ),
    ]);
    let output = cms(
        temp.path(),
        &["apply", "--page", "index.html", "-o", "out.html"],
    );
    stdout(&output);

    let html = fs::read_to_string(temp.path().join("out.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>New title</title>"));
    assert!(html.contains(
        r#"<div class="nav-menu"><a href="/a" class="nav-link">A</a><a href="/b" class="nav-link">B</a></div>"#
    ));
    assert!(html.contains(r#"<div id="specialOfferPopup" style="display: none">"#));
    assert!(html.contains("<p class=\"hero-subtitle\">Old subtitle</p>"));
}

#[test]
fn test_apply_to_stdout_with_data_dir_flag() {
    let temp = site(&[]);
    let other = temp.path().join("content");
    fs::create_dir(&other).unwrap();
    fs::write(other.join("special_offer.yml"), "enabled: true\ntitle: Sale\n").unwrap();

    let output = cms(
        temp.path(),
        &["apply", "--page", "index.html", "--data-dir", "content"],
    );
    let html = stdout(&output);
    assert!(html.contains("<h3>Sale</h3>"));
    assert!(html.contains(r#"<div id="specialOfferPopup">"#));
}

#[test]
fn test_defaults_policy_from_config_file() {
    let temp = site(&[]);
    fs::write(temp.path().join("cms.toml"), "fallback = \"defaults\"\n").unwrap();
    let output = cms(temp.path(), &["patches", "--page", "index.html"]);
    let patches: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    let variables: Vec<_> = patches
        .as_array()
        .unwrap()
        .iter()
        .filter(|patch| patch["op"] == "set_variable")
        .collect();
    assert_eq!(variables.len(), 1);
    assert_eq!(variables[0]["name"], "heroTitle");
    assert_eq!(variables[0]["value"], "Τα πάντα για σένα και την επιχείρησή σου!");
}

#[test]
fn test_check_json_report() {
    let temp = site(&[("hero.yml", "subtitle: only\n"), ("footer.yml", "copyright: me\n")]);
    let output = cms(temp.path(), &["check", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let report = report.as_array().unwrap();
    assert_eq!(report.len(), 8);

    let find = |name: &str| {
        report
            .iter()
            .find(|status| status["section"] == name)
            .unwrap()
            .clone()
    };
    assert_eq!(find("hero")["found"], true);
    assert_eq!(find("hero")["valid"], false);
    assert_eq!(find("footer")["valid"], true);
    assert_eq!(find("specialOffer")["file"], "special_offer.yml");
    assert_eq!(find("site")["found"], false);
}

#[test]
fn test_bad_config_is_reported() {
    let temp = site(&[]);
    fs::write(temp.path().join("cms.toml"), "fallback = \"never\"\n").unwrap();
    let output = cms(temp.path(), &["check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cms.toml"));
}
