use std::path::PathBuf;

use skillsmith::cli::OutputFormat;
use skillsmith::config::Config;
use skillsmith::lint::Severity;

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn custom_config_from_fixture() {
    let path = fixture_path("tests/fixtures/configs/custom.toml");
    let config = Config::load(Some(&path), &fixture_path("tests")).unwrap();

    assert!(config.validation.strict);
    assert!(config.validation.disabled_rules.contains("second-person"));
    assert_eq!(
        config.validation.severity_overrides.get("structure-pattern"),
        Some(&Severity::Warning)
    );
    assert_eq!(config.package.exclude_names, vec![".DS_Store", "Thumbs.db"]);
    assert_eq!(config.package.exclude_dirs, vec!["__pycache__"]);
    assert_eq!(config.smoke.min_example_prompts, 3);
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn missing_explicit_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(&dir.path().join("absent.toml")), dir.path()).unwrap();
    assert!(!config.validation.strict);
    assert_eq!(config.smoke.min_example_prompts, 2);
}

#[test]
fn engine_config_reflects_fixture() {
    let path = fixture_path("tests/fixtures/configs/custom.toml");
    let config = Config::load(Some(&path), &fixture_path("tests")).unwrap();
    let engine = config.validation.to_validation_config();

    assert!(engine.is_rule_disabled("second-person"));
    assert_eq!(
        engine.effective_severity("structure-pattern", Severity::Info),
        Severity::Error
    );
    assert_eq!(
        engine.effective_severity("overview-section", Severity::Info),
        Severity::Info
    );
}
