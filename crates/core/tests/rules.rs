use qtpack_core::rules::{DomainRules, RulesError, QT_LATEST};
use tempfile::tempdir;

#[test]
fn defaults_reproduce_the_shipped_qt_configuration() {
    let rules = DomainRules::default();
    assert_eq!(rules.debug_suffix, "d");
    assert_eq!(rules.import_prefix, "qt");
    assert_eq!(rules.toolchain, "msvc2013");
    assert_eq!(rules.fixed_dependencies, vec!["qt5core".to_string()]);
    assert_eq!(rules.default_version, QT_LATEST);
    assert_eq!(
        rules.merge_table.get("qt5core"),
        Some(&vec![
            "qtmain".to_string(),
            "qt5bootstrap".to_string(),
            "qt5platformsupport".to_string()
        ])
    );
    assert!(rules.merge_table.contains_key("qt5webkit"));
}

#[test]
fn ignore_list_matches_by_substring() {
    let rules = DomainRules::default();
    assert!(rules.is_ignored("Qt5Designer.dll"));
    assert!(rules.is_ignored("Qt5DesignerComponents.dll"));
    assert!(rules.is_ignored("Qt5QmlDevToolsd.lib"));
    assert!(!rules.is_ignored("Qt5Core.dll"));
}

#[test]
fn partial_json_rules_fall_back_to_defaults() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("rules.json");
    std::fs::write(&path, r#"{ "toolchain": "msvc2015", "merge_table": {} }"#).expect("write");

    let rules = DomainRules::load(&path).expect("load");
    assert_eq!(rules.toolchain, "msvc2015");
    assert!(rules.merge_table.is_empty());
    // Unspecified fields keep their defaults.
    assert_eq!(rules.debug_suffix, "d");
    assert_eq!(rules.import_prefix, "qt");
}

#[test]
fn yaml_rules_load_by_extension() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("rules.yaml");
    std::fs::write(&path, "import_prefix: qt6\ndefault_version: 6.0.0\n").expect("write");

    let rules = DomainRules::load(&path).expect("load");
    assert_eq!(rules.import_prefix, "qt6");
    assert_eq!(rules.default_version, "6.0.0");
}

#[test]
fn unsupported_rules_extension_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("rules.toml");
    std::fs::write(&path, "toolchain = \"msvc2015\"\n").expect("write");

    let err = DomainRules::load(&path).unwrap_err();
    assert!(matches!(err, RulesError::UnsupportedExtension(_)), "unexpected error: {err}");
}

#[test]
fn malformed_rules_report_the_file() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("rules.json");
    std::fs::write(&path, "not-json").expect("write");

    let err = DomainRules::load(&path).unwrap_err();
    assert!(err.to_string().contains("rules.json"), "unexpected error: {err}");
}
