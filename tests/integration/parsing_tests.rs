//! Integration tests for xib parsing
//!
//! These tests run complete documents through NibLoader, from disk and
//! from memory, and check the extracted resource usage.

use nibscan::parser::xib::{Attributes, NibParseState};
use nibscan::{NibLoader, NibWarning, ResourceParsingError, ResourceReference, TypeName};
use std::fs;
use tempfile::TempDir;

/// Wrap `objects` children and extra top-level elements in a xib document
fn document(dependencies: &str, objects: &str, resources: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<document type="com.apple.InterfaceBuilder3.CocoaTouch.XIB" version="3.0" toolsVersion="21507" targetRuntime="iOS.CocoaTouch" propertyAccessControl="none" useAutolayout="YES" useTraitCollections="YES">
    <dependencies>
        {dependencies}
        <plugIn identifier="com.apple.InterfaceBuilder.IBCocoaTouchPlugin" version="21505"/>
    </dependencies>
    <objects>
        <placeholder placeholderIdentifier="IBFilesOwner" id="-1" userLabel="File's Owner" customClass="ProfileViewController" customModule="Profile"/>
        <placeholder placeholderIdentifier="IBFirstResponder" id="-2" customClass="UIResponder"/>
        {objects}
    </objects>
    <resources>
        {resources}
    </resources>
</document>"#
    )
}

fn parse(xml: &str) -> nibscan::ParsedNib {
    NibLoader::new()
        .parse_str("Fixture", xml)
        .expect("document should parse")
}

// ============================================================================
// Root views
// ============================================================================

#[test]
fn test_direct_child_is_root_view_nested_is_not() {
    let xml = document(
        "",
        r#"<view contentMode="scaleToFill" id="root" customClass="ProfileView" customModule="Profile">
            <subviews>
                <view contentMode="scaleToFill" id="nested" customClass="AvatarView" customModule="Profile"/>
            </subviews>
        </view>"#,
        "",
    );

    let nib = parse(&xml);

    assert_eq!(nib.root_views, vec![TypeName::new(Some("Profile"), "ProfileView")]);
}

#[test]
fn test_multiple_root_views_in_document_order() {
    let xml = document(
        "",
        r#"<view id="a"/>
        <tableViewCell id="b"/>
        <customObject id="c" customClass="Coordinator" customModuleProvider="target"/>"#,
        "",
    );

    let nib = parse(&xml);

    assert_eq!(
        nib.root_views,
        vec![
            TypeName::uiview(),
            TypeName::table_view_cell(),
            TypeName::new(None, "Coordinator"),
        ]
    );
    assert_eq!(nib.first_root_view(), Some(&TypeName::uiview()));
}

#[test]
fn test_placeholders_are_never_root_views() {
    let nib = parse(&document("", "", ""));
    assert!(nib.root_views.is_empty());
}

#[test]
fn test_table_view_cell_resolves_to_builtin() {
    let xml = document("", r#"<tableViewCell id="cell"/>"#, "");
    let nib = parse(&xml);
    assert_eq!(nib.root_views, vec![TypeName::table_view_cell()]);
}

// ============================================================================
// Reusables
// ============================================================================

#[test]
fn test_empty_reuse_identifier_is_ignored() {
    let xml = document("", r#"<tableViewCell id="cell" reuseIdentifier=""/>"#, "");
    let nib = parse(&xml);
    assert!(nib.reusables.is_empty());
}

#[test]
fn test_reuse_identifier_creates_one_reusable() {
    let xml = document("", r#"<tableViewCell id="cell" reuseIdentifier="Cell1"/>"#, "");
    let nib = parse(&xml);
    assert_eq!(nib.reusables.len(), 1);
    assert_eq!(nib.reusables[0].identifier, "Cell1");
    assert_eq!(nib.reusables[0].type_name, TypeName::table_view_cell());
}

#[test]
fn test_custom_module_and_target_provider() {
    let xml = document(
        "",
        r#"<tableViewCell id="a" reuseIdentifier="A" customClass="MyCell" customModule="App"/>
        <tableViewCell id="b" reuseIdentifier="B" customClass="MyCell" customModule="App" customModuleProvider="target"/>"#,
        "",
    );

    let nib = parse(&xml);

    assert_eq!(nib.reusables[0].type_name, TypeName::new(Some("App"), "MyCell"));
    assert_eq!(nib.reusables[1].type_name, TypeName::new(None, "MyCell"));
}

// ============================================================================
// Deployment version
// ============================================================================

#[test]
fn test_single_deployment_version() {
    let xml = document(r#"<deployment identifier="iOS" version="2048"/>"#, "", "");
    let nib = parse(&xml);
    assert_eq!(nib.deployment_version.as_deref(), Some("8.0"));
}

#[test]
fn test_multiple_deployment_versions_warn_once() {
    let xml = document(
        r#"<deployment identifier="iOS" version="1280"/>
        <deployment identifier="macosx" version="1290"/>"#,
        "",
        "",
    );

    let mut warnings = Vec::new();
    let nib = NibLoader::new()
        .parse_str_with_warnings("Ambiguous", &xml, |w| warnings.push(w))
        .unwrap();

    assert_eq!(nib.deployment_version, None);
    assert_eq!(
        warnings,
        vec![NibWarning::MultipleDeploymentVersions {
            nib: "Ambiguous".to_string(),
            count: 2,
        }]
    );
}

#[test]
fn test_unknown_deployment_version_is_silent() {
    let xml = document(r#"<deployment identifier="iOS" version="999999"/>"#, "", "");

    let mut warnings = Vec::new();
    let nib = NibLoader::new()
        .parse_str_with_warnings("Unknown", &xml, |w| warnings.push(w))
        .unwrap();

    assert_eq!(nib.deployment_version, None);
    assert!(warnings.is_empty());
}

// ============================================================================
// Accessibility, images and colors
// ============================================================================

#[test]
fn test_accessibility_identifiers_in_encounter_order() {
    let xml = document(
        "",
        r#"<view id="root">
            <subviews>
                <button id="one">
                    <accessibility key="accessibilityConfiguration" identifier="btn1"/>
                </button>
                <button id="two">
                    <userDefinedRuntimeAttributes>
                        <userDefinedRuntimeAttribute type="string" keyPath="accessibilityIdentifier" value="btn2"/>
                        <userDefinedRuntimeAttribute type="number" keyPath="layer.cornerRadius">
                            <integer key="value" value="8"/>
                        </userDefinedRuntimeAttribute>
                    </userDefinedRuntimeAttributes>
                </button>
            </subviews>
        </view>"#,
        "",
    );

    let nib = parse(&xml);

    assert_eq!(
        nib.used_accessibility_identifiers,
        vec!["btn1".to_string(), "btn2".to_string()]
    );
}

#[test]
fn test_image_and_color_catalogs_preserved() {
    let xml = document(
        "",
        r#"<view id="root">
            <color key="backgroundColor" name="Surface" catalog="Colors"/>
        </view>"#,
        r#"<image name="icon" catalog="Assets" width="24" height="24"/>
        <image name="icon2" width="24" height="24"/>
        <systemColor name="systemBackgroundColor">
            <color white="1" alpha="1" colorSpace="custom" customColorSpace="genericGamma22GrayColorSpace"/>
        </systemColor>"#,
    );

    let nib = parse(&xml);

    assert_eq!(
        nib.used_image_references,
        vec![
            ResourceReference::new("icon", Some("Assets")),
            ResourceReference::new("icon2", None),
        ]
    );
    assert_eq!(
        nib.used_color_references,
        vec![ResourceReference::new("Surface", Some("Colors"))]
    );
}

// ============================================================================
// Depth balance
// ============================================================================

#[test]
fn test_depth_balance_over_event_stream() {
    let events: &[(bool, &str)] = &[
        (true, "document"),
        (true, "objects"),
        (true, "view"),
        (true, "subviews"),
        (true, "label"),
        (false, "label"),
        (false, "subviews"),
        (false, "view"),
        (true, "view"),
        (false, "view"),
        (false, "objects"),
        (false, "document"),
    ];

    let opens = events.iter().filter(|(open, _)| *open).count();
    let closes = events.len() - opens;
    assert_eq!(opens, closes);

    let mut state = NibParseState::new();
    for (open, name) in events {
        if *open {
            state.open_element(name, &Attributes::new());
        } else {
            if *name == "objects" {
                assert_eq!(state.depth_since_container(), 0);
            }
            state.close_element(name);
        }
    }

    assert!(!state.is_container_open());
    assert_eq!(state.finish().root_views.len(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_abrupt_end_is_malformed() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<document><objects><view id="root"><subviews><label id="x"/>"#;

    let result = NibLoader::new().parse_str("Broken", xml);

    assert!(matches!(result, Err(ResourceParsingError::MalformedInput { .. })));
}

#[test]
fn test_load_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ProfileHeader.xib");
    fs::write(
        &path,
        document(
            r#"<deployment identifier="iOS" version="4864"/>"#,
            r#"<view id="root" customClass="ProfileHeader" customModuleProvider="target" customModule="Profile"/>"#,
            "",
        ),
    )
    .unwrap();

    let nib = NibLoader::new().load(&path).unwrap();

    assert_eq!(nib.name, "ProfileHeader");
    assert_eq!(nib.root_views, vec![TypeName::new(None, "ProfileHeader")]);
    assert_eq!(nib.deployment_version.as_deref(), Some("13.0"));
}

#[test]
fn test_load_rejects_other_extensions() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Main.storyboard");
    fs::write(&path, document("", "", "")).unwrap();

    let result = NibLoader::new().load(&path);

    assert!(matches!(
        result,
        Err(ResourceParsingError::UnsupportedExtension { .. })
    ));
}

#[test]
fn test_load_malformed_file_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Broken.xib");
    fs::write(&path, "<document><objects><view></objects></document>").unwrap();

    let err = NibLoader::new().load(&path).unwrap_err();

    assert_eq!(err.kind(), "malformed_input");
    assert_eq!(err.path(), path.as_path());
}
