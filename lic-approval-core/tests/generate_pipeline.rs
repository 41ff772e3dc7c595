use std::fs::{create_dir_all, write};
use std::path::PathBuf;

use chrono::NaiveDate;
use lic_approval_core::builder::{ROW_LICENSE_WEB_LINK, ROW_VERSION};
use lic_approval_core::config::GeneratorConfig;
use lic_approval_core::contract::{MockRenderer, RenderError};
use lic_approval_core::docx::DocxRenderer;
use lic_approval_core::generate::{generate, GenerateError, GenerationRequest};
use lic_approval_core::model::PlaceholderReason;
use lic_approval_core::rules::FamilyKey;
use lic_approval_core::version_lookup::ApproximateVersion;
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    config: GeneratorConfig,
}

/// Output, descriptor and templates all live in one temp dir.
fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let templates_dir = dir.path().join("templates");
    create_dir_all(&templates_dir).unwrap();
    let descriptor_path = dir.path().join("ArtifactDatabase.xml");
    write(
        &descriptor_path,
        r#"<Artifacts><ProductVersion MajorVersionYear="2025"/></Artifacts>"#,
    )
    .unwrap();
    let config = GeneratorConfig {
        output_dir: dir.path().join("lics"),
        descriptor_path,
        templates_dir,
    };
    Fixture { _dir: dir, config }
}

fn request(family: &str, version: &str) -> GenerationRequest {
    GenerationRequest {
        family: FamilyKey::new(family).unwrap(),
        version: version.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
    }
}

#[test]
fn renderer_receives_model_and_composed_destination() {
    let fx = fixture();
    let expected_path: PathBuf = fx
        .config
        .output_dir
        .join("bdp 2.10.1 5.0.0 XBRL Taxonomy - Third Party Software License Approval Form 20261016.docx");

    let mut renderer = MockRenderer::new();
    let expected = expected_path.clone();
    renderer
        .expect_render()
        .withf(move |model, destination| {
            destination == expected.as_path()
                && model.main_value(ROW_VERSION).as_deref() == Some("2.10.1 bdp v5.0.0")
                && model.main_table.row_count() == 9
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let report = generate(&request("bdp", "2.10.1 5.0.0"), &fx.config, &renderer)
        .expect("generation succeeds");

    assert_eq!(report.output_path, expected_path);
    assert!(report.known_family);
    assert_eq!(
        report.approximate_version,
        ApproximateVersion::Found("2025".to_string())
    );
    assert!(report.placeholders.is_empty());
    assert!(report.template.is_none());
}

#[test]
fn unknown_family_uses_defaults() {
    let fx = fixture();
    let mut renderer = MockRenderer::new();
    renderer.expect_render().times(1).returning(|_, _| Ok(()));

    let report = generate(&request("eba", "3.2"), &fx.config, &renderer).unwrap();

    assert!(!report.known_family);
    assert!(report.file_name.starts_with("eba 3.2 "));
}

#[test]
fn missing_descriptor_degrades_to_placeholder() {
    let mut fx = fixture();
    fx.config.descriptor_path = fx.config.templates_dir.join("missing.xml");
    let mut renderer = MockRenderer::new();
    renderer.expect_render().times(1).returning(|_, _| Ok(()));

    let report = generate(&request("eba", "3.2"), &fx.config, &renderer).unwrap();

    assert_eq!(report.approximate_version, ApproximateVersion::Unavailable);
    assert_eq!(
        report.placeholders[0].reason,
        PlaceholderReason::DescriptorUnavailable
    );
}

#[test]
fn template_is_discovered_and_used() {
    let fx = fixture();
    write(
        fx.config.templates_dir.join("boe-insurance.json"),
        r#"{"license": {"licweb1": "https://www.example.website.com/boe"}}"#,
    )
    .unwrap();
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .withf(|model, _| {
            model.main_value(ROW_LICENSE_WEB_LINK).as_deref()
                == Some("https://www.example.website.com/boe")
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let report = generate(&request("boe-insurance", "1"), &fx.config, &renderer).unwrap();

    assert!(report.template.is_some());
    assert!(report.placeholders.is_empty());
}

#[test]
fn undefined_variant_is_reported() {
    let fx = fixture();
    let mut renderer = MockRenderer::new();
    renderer.expect_render().times(1).returning(|_, _| Ok(()));

    let report = generate(&request("boe-statistics", "1"), &fx.config, &renderer).unwrap();

    assert_eq!(report.placeholders.len(), 1);
    assert_eq!(
        report.placeholders[0].reason,
        PlaceholderReason::VariantNotDefined
    );
}

#[test]
fn broken_template_stops_before_rendering() {
    let fx = fixture();
    write(fx.config.templates_dir.join("cipc.json"), "{ broken").unwrap();
    let mut renderer = MockRenderer::new();
    renderer.expect_render().times(0);

    let err = generate(&request("cipc", "1"), &fx.config, &renderer).unwrap_err();

    assert!(matches!(err, GenerateError::Template(_)));
}

#[test]
fn render_failure_is_propagated() {
    let fx = fixture();
    let mut renderer = MockRenderer::new();
    renderer.expect_render().times(1).returning(|_, path| {
        Err(RenderError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    });

    let err = generate(&request("eba", "3.2"), &fx.config, &renderer).unwrap_err();

    assert!(matches!(err, GenerateError::Render(_)));
}

/// Full run with the real renderer writes exactly one file.
#[test]
fn docx_renderer_writes_one_file() {
    let fx = fixture();

    let report = generate(&request("us-gaap", "2024"), &fx.config, &DocxRenderer::new()).unwrap();

    let written: Vec<_> = std::fs::read_dir(&fx.config.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].to_string_lossy(), report.file_name);
    assert!(report.output_path.exists());
}
