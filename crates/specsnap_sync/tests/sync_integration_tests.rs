//! Integration tests for discovery and snapshot copying.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use specsnap_readme::{DeclaredVersion, OverrideTable};
use specsnap_sync::{discover, expand, expand_and_copy, ApiSet, SyncConfig, SyncError, SyncRun};
use tempfile::tempdir;
use walkdir::WalkDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn readme(header_type: &str, tag: &str, files: &[&str]) -> String {
    let mut text = format!(
        "# Readme\n\n``` yaml\nopenapi-type: {header_type}\ntag: {tag}\n```\n\n### Tag: {tag}\n\n```yaml $(tag) == '{tag}'\ninput-file:\n"
    );
    for file in files {
        text.push_str(&format!("- {}\n", file));
    }
    text.push_str("```\n");
    text
}

/// Relative path -> contents of every file under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e.path().strip_prefix(root).unwrap().to_path_buf();
            (relative, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn build_source(root: &Path) {
    write(
        root,
        "containerregistry/resource-manager/readme.md",
        &readme(
            "arm",
            "package-2019-05",
            &[
                "Microsoft.ContainerRegistry/stable/2019-05-01/containerregistry.json",
                "Microsoft.ContainerRegistry\\stable\\2019-04-01\\containerregistry_build.json",
            ],
        ),
    );
    let rp = "containerregistry/resource-manager/Microsoft.ContainerRegistry";
    write(root, &format!("{rp}/stable/2019-05-01/containerregistry.json"), "{\"v\": 5}");
    write(root, &format!("{rp}/stable/2019-04-01/containerregistry_build.json"), "{\"v\": 4}");
    write(root, &format!("{rp}/stable/2019-05-01/common.json"), "{}");
    write(root, &format!("{rp}/common/types.json"), "{}");
    write(root, &format!("{rp}/stable/2017-03-01/containerregistry.json"), "{\"old\": true}");

    write(
        root,
        "keyvault/data-plane/readme.md",
        &readme("data-plane", "package-7.0-preview", &["Microsoft.KeyVault/preview/7.0/keyvault.json"]),
    );
    write(root, "keyvault/data-plane/Microsoft.KeyVault/preview/7.0/keyvault.json", "{}");

    write(
        root,
        "search/data-plane/Microsoft.Azure.Search/readme.md",
        &readme("data-plane", "package-2019-05", &["preview/2019-05-06-preview/searchindex.json"]),
    );
    write(
        root,
        "search/data-plane/Microsoft.Azure.Search/preview/2019-05-06-preview/searchindex.json",
        "{}",
    );
    write(
        root,
        "search/data-plane/Microsoft.Azure.Search/preview/2019-05-06-preview/entityTypes/Index.json",
        "{}",
    );

    write(root, "nodescriptor/resource-manager/Microsoft.X/stable/x.json", "{}");
    write(root, "common-types/resource-management/v1/types.json", "{}");
}

#[test]
fn test_discover_across_surfaces() {
    let temp = tempdir().unwrap();
    build_source(temp.path());

    let api_sets = discover(temp.path(), &OverrideTable::new()).unwrap();
    let summary: Vec<(&str, &str, &str)> = api_sets
        .iter()
        .map(|s| (s.provider_name.as_str(), s.base_folder.as_str(), s.version.name()))
        .collect();

    // keyvault's header tag stops at the dot, so no block matches it
    assert_eq!(
        summary,
        [
            ("containerregistry", "containerregistry/resource-manager", "package-2019-05"),
            ("search", "search/data-plane/Microsoft.Azure.Search", "package-2019-05"),
        ]
    );
}

#[test]
fn test_base_folder_override_rescues_surface() {
    let temp = tempdir().unwrap();
    build_source(temp.path());

    let overrides = OverrideTable::new().with_entry("keyvault/data-plane", "package-7.0-preview");
    let api_sets = discover(temp.path(), &overrides).unwrap();
    assert!(api_sets
        .iter()
        .any(|s| s.base_folder == "keyvault/data-plane" && s.version.name() == "package-7.0-preview"));
}

#[test]
fn test_full_run_produces_expected_tree() {
    let source = tempdir().unwrap();
    let target = tempdir().unwrap();
    build_source(source.path());
    let target_root = target.path().join("swagger-specs");

    let config = SyncConfig::default()
        .with_source_root(source.path())
        .with_target_root(&target_root)
        .without_builtin_overrides();
    let report = SyncRun::new(config).execute().unwrap();

    assert_eq!(report.api_sets.len(), 2);
    assert_eq!(report.skipped_providers, ["keyvault", "nodescriptor"]);
    assert_eq!(report.shared_folders, ["common-types"]);

    let files: Vec<String> = snapshot(&target_root)
        .keys()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        files,
        [
            "common-types/resource-management/v1/types.json",
            "containerregistry/resource-manager/Microsoft.ContainerRegistry/common/types.json",
            "containerregistry/resource-manager/Microsoft.ContainerRegistry/stable/2019-04-01/containerregistry_build.json",
            "containerregistry/resource-manager/Microsoft.ContainerRegistry/stable/2019-05-01/common.json",
            "containerregistry/resource-manager/Microsoft.ContainerRegistry/stable/2019-05-01/containerregistry.json",
            "containerregistry/resource-manager/api-set.json",
            "search/data-plane/Microsoft.Azure.Search/api-set.json",
            "search/data-plane/Microsoft.Azure.Search/preview/2019-05-06-preview/entityTypes/Index.json",
            "search/data-plane/Microsoft.Azure.Search/preview/2019-05-06-preview/searchindex.json",
        ]
    );

    let manifest: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(target_root.join("containerregistry/resource-manager/api-set.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["name"], "package-2019-05");
    assert_eq!(
        manifest["input_files"][1],
        "Microsoft.ContainerRegistry/stable/2019-04-01/containerregistry_build.json"
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let source = tempdir().unwrap();
    let target = tempdir().unwrap();
    build_source(source.path());
    let target_root = target.path().join("out");

    let config = SyncConfig::default()
        .with_source_root(source.path())
        .with_target_root(&target_root);

    SyncRun::new(config.clone()).execute().unwrap();
    let first = snapshot(&target_root);

    write(&target_root, "stale.json", "{}");
    SyncRun::new(config).execute().unwrap();
    let second = snapshot(&target_root);

    assert_eq!(first, second);
}

#[test]
fn test_missing_declared_file_halts_run() {
    let source = tempdir().unwrap();
    let target = tempdir().unwrap();
    write(
        source.path(),
        "broken/resource-manager/readme.md",
        &readme("arm", "package-2020-01", &["Microsoft.Broken/stable/2020-01-01/gone.json"]),
    );

    let config = SyncConfig::default()
        .with_source_root(source.path())
        .with_target_root(target.path().join("out"));
    let err = SyncRun::new(config).execute().unwrap_err();
    assert!(matches!(err, SyncError::MissingInputFile { .. }));
}

#[test]
fn test_escaping_input_file_halts_run() {
    let source = tempdir().unwrap();
    let target = tempdir().unwrap();
    write(source.path(), "secret.json", "{\"keep\": true}");
    write(
        source.path(),
        "leaky/resource-manager/readme.md",
        &readme("arm", "package-2020-01", &["../../secret.json"]),
    );

    let config = SyncConfig::default()
        .with_source_root(source.path())
        .with_target_root(target.path().join("out"));
    let err = SyncRun::new(config).execute().unwrap_err();
    assert!(matches!(err, SyncError::InvalidInputPath { .. }));
    assert_eq!(
        fs::read_to_string(source.path().join("secret.json")).unwrap(),
        "{\"keep\": true}"
    );
    assert!(!target.path().join("secret.json").exists());
}

#[test]
fn test_expansion_example() {
    let source = tempdir().unwrap();
    let target = tempdir().unwrap();
    let base = "p/resource-manager";
    write(source.path(), &format!("{base}/A/stable/2019-05/x.json"), "x");
    write(source.path(), &format!("{base}/A/stable/2019-05/common.json"), "c");
    write(source.path(), &format!("{base}/A/common/shared.json"), "s");
    write(source.path(), &format!("{base}/A/stable/2019-05/entityTypes/e.json"), "e");

    let api_set = ApiSet::new(
        "p",
        base,
        DeclaredVersion::new("package-2019-05", ["A/stable/2019-05/x.json"]),
    );
    let copy_set = expand(&api_set, source.path()).unwrap();
    assert_eq!(copy_set.files.len(), 2);
    assert_eq!(copy_set.dirs.len(), 2);

    let stats = expand_and_copy(&api_set, source.path(), target.path()).unwrap();
    assert_eq!(stats.files, 4);

    let out = target.path().join(base);
    for file in [
        "A/stable/2019-05/x.json",
        "A/stable/2019-05/common.json",
        "A/common/shared.json",
        "A/stable/2019-05/entityTypes/e.json",
        "api-set.json",
    ] {
        assert!(out.join(file).is_file(), "missing {}", file);
    }
}
