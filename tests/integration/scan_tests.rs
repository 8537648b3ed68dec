//! Integration tests for discovery and batch scanning
//!
//! A malformed document must never stop the rest of a batch.

use nibscan::scan::NibScanner;
use nibscan::{Config, FileFinder, ResourceParsingError, TypeName};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn cell_nib(class: &str, identifier: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="com.apple.InterfaceBuilder3.CocoaTouch.XIB" version="3.0">
    <objects>
        <placeholder placeholderIdentifier="IBFilesOwner" id="-1"/>
        <collectionViewCell reuseIdentifier="{identifier}" id="c1" customClass="{class}" customModule="Gallery">
            <subviews>
                <imageView image="thumb" id="i1"/>
            </subviews>
        </collectionViewCell>
    </objects>
    <resources>
        <image name="thumb" catalog="Gallery" width="64" height="64"/>
    </resources>
</document>"#
    )
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_find_fixture_files() {
    let config = Config::default();
    let files = FileFinder::new(&config).find_files(&fixtures_path().join("app")).unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["ProfileCell.xib", "HeaderView.xib"]);
}

#[test]
fn test_default_excludes_skip_pods() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "App/PhotoCell.xib", &cell_nib("PhotoCell", "Photo"));
    write(temp_dir.path(), "Pods/SomeKit/KitCell.xib", &cell_nib("KitCell", "Kit"));
    write(temp_dir.path(), "App/Main.storyboard", "<document/>");

    let config = Config::default();
    let files = FileFinder::new(&config).find_files(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("App/PhotoCell.xib"));
}

// ============================================================================
// Scanning
// ============================================================================

#[test]
fn test_malformed_document_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let good_a = write(temp_dir.path(), "A.xib", &cell_nib("PhotoCell", "Photo"));
    let broken = write(temp_dir.path(), "B.xib", "<document><objects><view>");
    let good_c = write(temp_dir.path(), "C.xib", &cell_nib("VideoCell", "Video"));

    let outcome = NibScanner::new().scan(&[good_a.clone(), broken.clone(), good_c.clone()]);

    assert_eq!(outcome.nibs.len(), 2);
    assert_eq!(outcome.nibs[0].path, good_a);
    assert_eq!(outcome.nibs[1].path, good_c);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].path, broken);
    assert!(matches!(
        outcome.failures[0].error,
        ResourceParsingError::MalformedInput { .. }
    ));
    assert!(outcome.has_failures());
}

#[test]
fn test_parallel_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..12)
        .map(|i| {
            write(
                temp_dir.path(),
                &format!("Cell{i}.xib"),
                &cell_nib(&format!("Cell{i}"), &format!("cell-{i}")),
            )
        })
        .collect();

    let sequential = NibScanner::new().scan(&files);
    let parallel = NibScanner::new().with_parallel(true).scan(&files);

    assert_eq!(sequential.nibs.len(), 12);
    let seq: Vec<_> = sequential.nibs.iter().map(|n| (&n.path, &n.nib)).collect();
    let par: Vec<_> = parallel.nibs.iter().map(|n| (&n.path, &n.nib)).collect();
    assert_eq!(seq, par);
}

#[test]
fn test_summary_across_batch() {
    let temp_dir = TempDir::new().unwrap();
    let files = vec![
        write(temp_dir.path(), "Photo.xib", &cell_nib("PhotoCell", "Photo")),
        write(temp_dir.path(), "Video.xib", &cell_nib("VideoCell", "Video")),
    ];

    let summary = NibScanner::new().scan(&files).summary();

    assert_eq!(summary.parsed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.root_views, 2);
    assert_eq!(summary.reusables.len(), 2);
    assert_eq!(
        summary.reusables[0].type_name,
        TypeName::new(Some("Gallery"), "PhotoCell")
    );
    // Both documents use the same image
    assert_eq!(summary.images.len(), 1);
}

#[test]
fn test_multiple_deployment_versions_reported_as_warning() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        temp_dir.path(),
        "Shared.xib",
        r#"<document>
            <dependencies>
                <deployment identifier="iOS" version="2048"/>
                <deployment identifier="macosx" version="2304"/>
            </dependencies>
            <objects><view id="v"/></objects>
        </document>"#,
    );

    let outcome = NibScanner::new().scan(&[path.clone()]);

    assert_eq!(outcome.nibs.len(), 1);
    assert_eq!(outcome.nibs[0].nib.deployment_version, None);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].path, path);
}
