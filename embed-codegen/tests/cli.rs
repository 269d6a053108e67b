mod common;

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("embed-codegen").unwrap();
    cmd.current_dir(dir);
    cmd
}

/// A temp dir laid out like an execroot with files from workspace `ws`.
fn fixture() -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    fs::create_dir_all(tmp.path().join("external/ws/a")).unwrap();
    fs::write(tmp.path().join("external/ws/a/b.txt"), "bee\n").unwrap();
    fs::write(tmp.path().join("external/ws/c.txt"), [0x00, 0xef, 0xbb, 0xbf]).unwrap();
    tmp
}

const COMMON: [&str; 8] = [
    "-label", "//pkg:data", "-package", "data", "-var", "data", "-workspace", "ws",
];

#[test]
fn single_with_two_sources_fails_without_output() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-out", "data.go", "external/ws/a/b.txt", "external/ws/c.txt"])
        .assert()
        .failure()
        .stderr(contains(
            "embed: error: -multi flag not given, so want exactly one source; got 2",
        ));
    assert!(!tmp.path().join("data.go").exists());
}

#[test]
fn missing_label_fails() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(["-package", "data", "-var", "data", "-out", "x.go", "-workspace", "ws"])
        .arg("external/ws/c.txt")
        .assert()
        .failure()
        .stderr(contains("error: -label option not provided"));
    assert!(!tmp.path().join("x.go").exists());
}

#[test]
fn missing_source_fails() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-out", "data.go", "nope.txt"])
        .assert()
        .failure()
        .stderr(contains("cannot open nope.txt"));
}

#[cfg(unix)]
#[test]
fn multi_keys_strip_workspace() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-multi", "-out", "data.go", "external/ws/a/b.txt", "external/ws/c.txt"])
        .assert()
        .success();
    let out = fs::read_to_string(tmp.path().join("data.go")).unwrap();
    assert!(out.contains("\t\"a/b.txt\": data_0,\n\t\"c.txt\": data_1,\n"));
    assert!(out.contains("\tdata_0 = []byte(\"bee\\n\")\n"));
    assert!(out.contains("\tdata_1 = []byte(\"\\x00\\xef\\xbb\\xbf\")\n"));
}

#[cfg(unix)]
#[test]
fn non_utf8_source_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = fixture();
    let name = OsStr::from_bytes(b"external/ws/d\xff.txt");
    fs::write(tmp.path().join(name), "dee").unwrap();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-multi", "-string", "-out", "-"])
        .arg(name)
        .assert()
        .success()
        .stdout(contains("\t\"d\\xff.txt\": data_0,\n"))
        .stdout(contains("\tdata_0 = \"dee\"\n"));
}

#[test]
fn multi_keys_flatten() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-multi", "-flatten", "-string", "-out", "data.go"])
        .args(["external/ws/a/b.txt", "external/ws/c.txt"])
        .assert()
        .success();
    let out = fs::read_to_string(tmp.path().join("data.go")).unwrap();
    let generated = common::parse_generated(&out);
    let keys: Vec<&str> = generated.map.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["b.txt", "c.txt"]);
    assert!(out.contains("var data = map[string]string{\n"));
    assert_eq!(generated.files()["c.txt"], [0x00, 0xef, 0xbb, 0xbf]);
}

#[test]
fn stdout_output() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(COMMON)
        .args(["-string", "-out", "-", "external/ws/a/b.txt"])
        .assert()
        .success()
        .stdout(contains("package data\n"))
        .stdout(contains("var data = \"bee\\n\"\n"));
}

#[test]
fn go_style_equals_and_double_dash() {
    let tmp = fixture();
    cmd(tmp.path())
        .args(["--label=//pkg:data", "-package=data", "--var", "data"])
        .args(["-workspace=ws", "-out=-", "-string=true", "external/ws/a/b.txt"])
        .assert()
        .success()
        .stdout(contains("Generated by go_embed_data for //pkg:data. DO NOT EDIT."))
        .stdout(contains("var data = \"bee\\n\"\n"));
}

#[test]
fn manifest_run() {
    let tmp = fixture();
    fs::write(
        tmp.path().join("embed.json"),
        r#"{
            "label": "//pkg:data",
            "package": "data",
            "var": "files",
            "out": "files.go",
            "workspace": "ws",
            "multi": true,
            "flatten": true,
            "sources": ["external/ws/a/b.txt", "external/ws/c.txt"]
        }"#,
    )
    .unwrap();
    cmd(tmp.path())
        .args(["-manifest", "embed.json"])
        .assert()
        .success();
    let out = fs::read_to_string(tmp.path().join("files.go")).unwrap();
    let generated = common::parse_generated(&out);
    assert_eq!(generated.files()["b.txt"], b"bee\n");
}

#[test]
fn invalid_manifest_fails() {
    let tmp = fixture();
    fs::write(tmp.path().join("embed.json"), "{not json").unwrap();
    cmd(tmp.path())
        .args(["-manifest", "embed.json"])
        .assert()
        .failure()
        .stderr(contains("invalid manifest embed.json"));
}
