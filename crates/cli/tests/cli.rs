// ABOUTME: Integration tests for the hdq CLI binary.
// ABOUTME: Tests filter flags, extraction modes, JSON output, and error exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Stats</title></head>
<body>
<div id="stats">
  <span class="count primary">1,234</span>
  <span class="count">56</span>
  <span class="views">Views: 9,001 views</span>
  <span class="stars">2.5k</span>
  <a href="/repo">repo</a>
</div>
</body>
</html>"#;

fn hdq_cmd() -> Command {
    Command::cargo_bin("hdq").unwrap()
}

fn write_page(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("page.html");
    fs::write(&path, PAGE).unwrap();
    path
}

#[test]
fn extract_int_from_class() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir);

    hdq_cmd()
        .arg(&path)
        .args(["--tag", "span", "--class", "primary", "--extract", "int"])
        .assert()
        .success()
        .stdout("1234\n");
}

#[test]
fn lenient_takes_first_and_strict_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir);

    hdq_cmd()
        .arg(&path)
        .args(["--class", "count", "--extract", "int"])
        .assert()
        .success()
        .stdout("1234\n");

    hdq_cmd()
        .arg(&path)
        .args(["--class", "count", "--extract", "int", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

#[test]
fn scan_and_float_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir);

    hdq_cmd()
        .arg(&path)
        .args(["--class", "views", "--extract", "scan", "--format", "Views: %d views"])
        .assert()
        .success()
        .stdout("9001\n");

    hdq_cmd()
        .arg(&path)
        .args(["--class", "stars", "--extract", "float", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""value":2500.0"#))
        .stdout(predicate::str::contains(r#""count":1"#));
}

#[test]
fn attr_extraction_and_dump() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir);

    hdq_cmd()
        .arg(&path)
        .args(["--tag", "a", "--extract", "attr", "--key", "href"])
        .assert()
        .success()
        .stdout("/repo\n");

    hdq_cmd()
        .arg(&path)
        .args(["--attr", "href=/repo", "--extract", "dump"])
        .assert()
        .success()
        .stdout("<a href=\"/repo\">repo</a>\n");
}

#[test]
fn id_not_found_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_page(&dir);

    hdq_cmd()
        .arg(&path)
        .args(["--id", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("node not found"));
}

#[test]
fn reads_fragment_from_stdin() {
    hdq_cmd()
        .args(["-", "--fragment", "--child-text", "hello"])
        .write_stdin("<p>hello</p>")
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn missing_file_fails() {
    hdq_cmd()
        .arg("/definitely/not/here.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
