use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

/// Write an artifact stand-in plus the sidecar the manifest inspector reads.
fn write_artifact(path: &Path, arch: &str, imports: &[&str]) {
    fs::write(path, b"stub").expect("write artifact");
    let body = serde_json::json!({ "architecture": arch, "imports": imports });
    let mut os = path.as_os_str().to_os_string();
    os.push(".inspect.json");
    fs::write(PathBuf::from(os), body.to_string()).expect("write sidecar");
}

/// Lay out the small reference tree: a release core, a debug gui importing
/// it, and a symbol file next to its release sibling.
fn small_tree(root: &Path) {
    let bin = root.join("bin");
    fs::create_dir_all(&bin).expect("mkdir bin");
    write_artifact(&bin.join("qt5core.dll"), "x64", &["kernel32.dll"]);
    write_artifact(&bin.join("qt5guid.dll"), "x64", &["Qt5Core.dll"]);
    write_artifact(&bin.join("qt5gui.dll"), "x64", &["Qt5Core.dll"]);
    fs::write(bin.join("qt5gui.pdb"), b"stub").expect("write pdb");
}

/// Rules file disabling the merge table; the small tree has no satellites.
fn write_rules(dir: &Path) -> String {
    let path = dir.join("rules.json");
    fs::write(&path, r#"{ "merge_table": {} }"#).expect("write rules");
    path.to_string_lossy().to_string()
}

#[test]
fn scan_prints_dependency_summary() {
    let temp = tempdir().expect("tempdir");
    small_tree(temp.path());
    let rules = write_rules(temp.path());

    cargo_bin_cmd!("qtpack")
        .arg("scan")
        .arg("--root")
        .arg(temp.path())
        .arg("--rules")
        .arg(&rules)
        .arg("--inspector")
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("qt5gui <- {qt5core}"))
        .stdout(predicate::str::contains("qt5core <- {}"));
}

#[test]
fn scan_json_carries_identities_and_versions() {
    let temp = tempdir().expect("tempdir");
    small_tree(temp.path());
    let rules = write_rules(temp.path());

    cargo_bin_cmd!("qtpack")
        .arg("scan")
        .arg("--root")
        .arg(temp.path())
        .arg("--rules")
        .arg(&rules)
        .arg("--inspector")
        .arg("manifest")
        .arg("--version")
        .arg("5.4.1")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"qt5gui-msvc2013\""))
        .stdout(predicate::str::contains("\"5.4.1\""))
        .stdout(predicate::str::contains("\"qt5core\""));
}

#[test]
fn emit_writes_one_autopkg_per_package() {
    let temp = tempdir().expect("tempdir");
    small_tree(temp.path());
    let rules = write_rules(temp.path());
    let out = temp.path().join("packages");

    cargo_bin_cmd!("qtpack")
        .arg("emit")
        .arg("--root")
        .arg(temp.path())
        .arg("--output")
        .arg(&out)
        .arg("--rules")
        .arg(&rules)
        .arg("--inspector")
        .arg("manifest")
        .assert()
        .success();

    let core = out.join("qt5core-msvc2013.autopkg");
    let gui = out.join("qt5gui-msvc2013.autopkg");
    assert!(core.is_file(), "missing {}", core.display());
    assert!(gui.is_file(), "missing {}", gui.display());

    let gui_doc = fs::read_to_string(&gui).expect("read gui autopkg");
    assert!(gui_doc.contains("id = qt5gui-msvc2013;"), "doc:\n{gui_doc}");
    assert!(gui_doc.contains("qt5core-msvc2013/"), "doc:\n{gui_doc}");
}

#[test]
fn inspect_reports_architecture_and_imports() {
    let temp = tempdir().expect("tempdir");
    let dll = temp.path().join("qt5gui.dll");
    write_artifact(&dll, "x64", &["Qt5Core.dll"]);

    cargo_bin_cmd!("qtpack")
        .arg("inspect")
        .arg("--path")
        .arg(&dll)
        .arg("--inspector")
        .arg("manifest")
        .arg("--skip-hash")
        .assert()
        .success()
        .stdout(predicate::str::contains("x64"))
        .stdout(predicate::str::contains("Qt5Core.dll"));
}

#[test]
fn default_rules_include_the_shipped_merge_table() {
    cargo_bin_cmd!("qtpack")
        .arg("default-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"qt5core\""))
        .stdout(predicate::str::contains("\"qtmain\""))
        .stdout(predicate::str::contains("\"msvc2013\""));
}
