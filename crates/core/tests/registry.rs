use std::collections::BTreeMap;
use std::path::PathBuf;

use qtpack_core::model::{Arch, Artifact, ArtifactKind, BuildFlavor};
use qtpack_core::registry::{MergeError, PackageRegistry};

fn artifact(name: &str, logical: &str, kind: ArtifactKind, arch: Arch, flavor: BuildFlavor) -> Artifact {
    Artifact {
        path: PathBuf::from(format!("/qt/bin/{name}")),
        file_name: name.to_string(),
        kind,
        arch,
        flavor,
        logical_name: logical.to_string(),
    }
}

fn binary(name: &str, logical: &str, arch: Arch, flavor: BuildFlavor) -> Artifact {
    artifact(name, logical, ArtifactKind::Binary, arch, flavor)
}

#[test]
fn ingest_creates_package_and_bucket_on_first_sight() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );

    assert_eq!(registry.len(), 1);
    let package = registry.get("qt5core").expect("package");
    assert_eq!(package.id, "qt5core-msvc2013");
    assert_eq!(package.name, "qt5core");
    assert_eq!(package.version, "5.4.1");
    assert_eq!(package.configurations.len(), 1);
    let config = package.config(Arch::X64, BuildFlavor::Release).expect("bucket");
    assert_eq!(config.binaries.len(), 1);
}

#[test]
fn ingest_groups_flavors_of_one_logical_name_into_one_package() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("Qt5Cored.dll", "qt5core", Arch::X64, BuildFlavor::Debug),
        "5.4.1",
        "msvc2013",
    );

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("qt5core").expect("package").configurations.len(), 2);
}

#[test]
fn ingesting_the_same_artifact_twice_is_structurally_idempotent() {
    let mut registry = PackageRegistry::new();
    let a = binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release);
    registry.ingest(a.clone(), "5.4.1", "msvc2013");
    registry.ingest(a, "5.4.1", "msvc2013");

    assert_eq!(registry.len(), 1);
    let package = registry.get("qt5core").expect("package");
    assert_eq!(package.version, "5.4.1");
    assert_eq!(package.configurations.len(), 1);
    // Duplicates land inside the bucket list and stay there.
    assert_eq!(package.config(Arch::X64, BuildFlavor::Release).expect("bucket").binaries.len(), 2);
}

#[test]
fn merge_transplants_buckets_and_removes_members() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("qtmain.dll", "qtmain", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        artifact("qt5bootstrap.lib", "qt5bootstrap", ArtifactKind::StaticLib, Arch::X86, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("qt5platformsupportd.dll", "qt5platformsupport", Arch::X64, BuildFlavor::Debug),
        "5.4.1",
        "msvc2013",
    );

    registry
        .merge(
            "qt5core",
            &["qtmain".to_string(), "qt5bootstrap".to_string(), "qt5platformsupport".to_string()],
        )
        .expect("merge");

    assert!(!registry.contains("qtmain"));
    assert!(!registry.contains("qt5bootstrap"));
    assert!(!registry.contains("qt5platformsupport"));
    assert_eq!(registry.len(), 1);

    let core = registry.get("qt5core").expect("qt5core");
    // (x64, release) holds qt5core's own binary plus qtmain's.
    assert_eq!(core.config(Arch::X64, BuildFlavor::Release).expect("bucket").binaries.len(), 2);
    // Buckets the target never had are created during transplantation.
    assert_eq!(core.config(Arch::X86, BuildFlavor::Release).expect("bucket").static_libs.len(), 1);
    assert_eq!(core.config(Arch::X64, BuildFlavor::Debug).expect("bucket").binaries.len(), 1);
}

#[test]
fn merge_with_unknown_target_is_a_configuration_error() {
    let mut registry = PackageRegistry::new();
    let err = registry.merge("qt5core", &["qtmain".to_string()]).unwrap_err();
    assert!(matches!(err, MergeError::UnknownTarget(ref name) if name == "qt5core"));
}

#[test]
fn merge_with_unknown_member_is_a_configuration_error() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    let err = registry.merge("qt5core", &["qtmain".to_string()]).unwrap_err();
    assert!(
        matches!(err, MergeError::UnknownMember { ref member, .. } if member == "qtmain"),
        "unexpected error: {err}"
    );
}

#[test]
fn apply_merge_table_runs_every_entry() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Core.dll", "qt5core", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("qtmain.dll", "qtmain", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("Qt5Xml.dll", "qt5xml", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    registry.ingest(
        binary("Qt5XmlPatterns.dll", "qt5xmlpatterns", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );

    let mut table = BTreeMap::new();
    table.insert("qt5core".to_string(), vec!["qtmain".to_string()]);
    table.insert("qt5xml".to_string(), vec!["qt5xmlpatterns".to_string()]);
    registry.apply_merge_table(&table).expect("merge table");

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("qt5core"));
    assert!(registry.contains("qt5xml"));
}

#[test]
fn summary_lines_render_name_and_dependency_set() {
    let mut registry = PackageRegistry::new();
    registry.ingest(
        binary("Qt5Gui.dll", "qt5gui", Arch::X64, BuildFlavor::Release),
        "5.4.1",
        "msvc2013",
    );
    for package in registry.packages_mut() {
        package.dependencies.insert("qt5core".to_string());
    }

    let lines = registry.summary_lines();
    assert_eq!(lines, vec!["qt5gui <- {qt5core}".to_string()]);
}
