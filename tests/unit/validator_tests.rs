use std::path::{Path, PathBuf};

use skillsmith::lint::{
    Severity, SkillValidator, ValidationConfig, ValidationEngine, all_rules, validate_skill,
};
use skillsmith::skill::SkillDocument;

fn fixture_skill(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/skills")
        .join(name)
}

#[test]
fn complete_skill_is_clean_in_both_modes() {
    let dir = fixture_skill("pdf-editor");

    let basic = validate_skill(&dir, false).unwrap();
    assert!(basic.valid);
    assert_eq!(basic.report, "Skill is valid!");

    let comprehensive = validate_skill(&dir, true).unwrap();
    assert!(comprehensive.valid, "{}", comprehensive.report);
    assert_eq!(comprehensive.error_count(), 0);
    assert_eq!(comprehensive.warning_count(), 0);
}

#[test]
fn skill_md_path_is_accepted() {
    let outcome = validate_skill(&fixture_skill("pdf-editor").join("SKILL.md"), false).unwrap();
    assert!(outcome.valid);
    assert_eq!(outcome.skill_dir, fixture_skill("pdf-editor"));
}

#[test]
fn unfinished_skill_passes_basic_but_not_comprehensive() {
    let dir = fixture_skill("unfinished");
    assert!(validate_skill(&dir, false).unwrap().valid);

    let outcome = validate_skill(&dir, true).unwrap();
    assert!(!outcome.valid);
    assert!(outcome.report.starts_with("Validation failed with 1 error(s):"));

    let placeholder = outcome
        .diagnostics
        .iter()
        .find(|d| d.rule_id == "no-placeholders")
        .expect("placeholder finding");
    assert_eq!(placeholder.severity, Severity::Error);
    assert_eq!(placeholder.line, Some(15));

    let backslash = outcome
        .diagnostics
        .iter()
        .find(|d| d.rule_id == "backslash-paths")
        .expect("backslash finding");
    assert_eq!(backslash.line, Some(13));

    for rule in ["description-quality", "second-person", "overview-section"] {
        assert!(
            outcome.diagnostics.iter().any(|d| d.rule_id == rule),
            "expected a {rule} finding"
        );
    }
    assert!(outcome.report.contains("Warnings:"));
    assert!(outcome.report.contains("Suggestions:"));
}

#[test]
fn disabled_rules_are_skipped() {
    let config = ValidationConfig::new()
        .disable_rule("no-placeholders")
        .disable_rule("second-person");
    let outcome = SkillValidator::new(config)
        .validate(&fixture_skill("unfinished"), true)
        .unwrap();

    assert!(outcome.valid);
    assert!(!outcome.diagnostics.iter().any(|d| d.rule_id == "second-person"));
}

#[test]
fn strict_mode_turns_warnings_into_errors() {
    let outcome = SkillValidator::new(ValidationConfig::new().strict().disable_rule("no-placeholders"))
        .validate(&fixture_skill("unfinished"), true)
        .unwrap();

    assert!(!outcome.valid);
    assert!(outcome
        .diagnostics
        .iter()
        .filter(|d| d.rule_id == "description-quality")
        .all(|d| d.severity == Severity::Error));
}

#[test]
fn engine_runs_without_a_directory() {
    let raw = std::fs::read_to_string(fixture_skill("pdf-editor").join("SKILL.md")).unwrap();
    let document = SkillDocument::parse(&raw);
    let result = ValidationEngine::with_defaults()
        .with_rules(all_rules())
        .validate(&document, None::<&Path>);
    assert!(result.passed);
    assert_eq!(result.error_count(), 0);
}
