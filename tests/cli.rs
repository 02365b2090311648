use std::fs::File;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

use skillsmith::pdf::PdfDocument;
use skillsmith::test_utils::fixtures::{UnitTestFixture, VALID_SKILL_MD, write_sample_pdf};

fn skillsmith(config_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("skillsmith").unwrap();
    cmd.current_dir(config_root)
        .env("SKILLSMITH_CONFIG", config_root.join("no-config.toml"))
        .env_remove("SKILLSMITH_ROBOT")
        .env_remove("SKILLSMITH_FORMAT")
        .env_remove("SKILLSMITH_STRICT");
    cmd
}

fn json_documents(stdout: &[u8]) -> Vec<Value> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<Value>()
        .map(Result::unwrap)
        .collect()
}

#[test]
fn test_cli_help() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("smoke-test"));
}

#[test]
fn test_cli_version() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Skill workflow
// =============================================================================

#[test]
fn test_init_then_validate_flags_description() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "report-writer", "--path", "skills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SKILL.md"));

    let skill_dir = dir.path().join("skills/report-writer");
    assert!(skill_dir.join("scripts/example.py").is_file());
    assert!(skill_dir.join("CHANGELOG.md").is_file());

    skillsmith(dir.path())
        .args(["validate", "skills/report-writer"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "Description contains TODO placeholder - must be completed",
        ));
}

#[test]
fn test_init_refuses_existing_directory() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("taken")).unwrap();
    skillsmith(dir.path())
        .args(["init", "taken", "--path", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_rejects_bad_name() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "Bad_Name", "--path", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hyphen-case"));
    assert!(!dir.path().join("Bad_Name").exists());
}

#[test]
fn test_validate_valid_skill() {
    let fixture = UnitTestFixture::new();
    fixture.create_skill("pdf-editor", VALID_SKILL_MD);

    skillsmith(&fixture.root)
        .args(["validate", "skills/pdf-editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill is valid!"));
}

#[test]
fn test_validate_robot_output() {
    let fixture = UnitTestFixture::new();
    fixture.create_skill("pdf-editor", VALID_SKILL_MD);

    let output = skillsmith(&fixture.root)
        .args(["--robot", "validate", "--comprehensive", "skills/pdf-editor"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let docs = json_documents(&output.stdout);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["valid"], Value::Bool(true));
    assert_eq!(docs[0]["comprehensive"], Value::Bool(true));
}

#[test]
fn test_validate_missing_skill_file() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("empty")).unwrap();
    skillsmith(dir.path())
        .args(["validate", "empty"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("SKILL.md not found"));
}

#[test]
fn test_validate_list_rules() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["validate", "--list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hyphen-case-name"))
        .stdout(predicate::str::contains("no-placeholders"));
}

#[test]
fn test_package_writes_zip_without_artifacts() {
    let fixture = UnitTestFixture::new();
    fixture.create_skill("pdf-editor", VALID_SKILL_MD);
    fixture.create_file("skills/pdf-editor/scripts/rotate.py", "print('rotate')\n");
    fixture.create_file("skills/pdf-editor/scripts/__pycache__/rotate.cpython-312.pyc", "x");
    fixture.create_file("skills/pdf-editor/.DS_Store", "x");

    skillsmith(&fixture.root)
        .args(["package", "skills/pdf-editor", "dist"])
        .assert()
        .success();

    let archive_path = fixture.root.join("dist/pdf-editor.zip");
    let archive = zip::ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "pdf-editor/CHANGELOG.md",
            "pdf-editor/SKILL.md",
            "pdf-editor/scripts/rotate.py",
        ]
    );
}

#[test]
fn test_package_refuses_unfinished_skill() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "draft-skill", "--path", ".", "--minimal"])
        .assert()
        .success();

    skillsmith(dir.path())
        .args(["package", "draft-skill"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("TODO placeholder"));
    assert!(!dir.path().join("draft-skill.zip").exists());
}

#[test]
fn test_smoke_test_failure_exit_code() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "half-done", "--path", "."])
        .assert()
        .success();

    skillsmith(dir.path())
        .args(["smoke-test", "half-done"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn test_smoke_test_passes_valid_skill() {
    let fixture = UnitTestFixture::new();
    fixture.create_skill("pdf-editor", VALID_SKILL_MD);

    skillsmith(&fixture.root)
        .args(["smoke-test", "skills/pdf-editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Smoke test complete."));
}

// =============================================================================
// Robot output
// =============================================================================

#[test]
fn test_robot_validate_invalid_skill_emits_one_document() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "draft-skill", "--path", ".", "--minimal"])
        .assert()
        .success();

    let output = skillsmith(dir.path())
        .args(["--robot", "validate", "draft-skill"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let docs = json_documents(&output.stdout);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["valid"], Value::Bool(false));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_robot_env_reports_package_failure_as_json() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("bad")).unwrap();
    std::fs::write(dir.path().join("bad/SKILL.md"), "no frontmatter here\n").unwrap();

    let output = skillsmith(dir.path())
        .env("SKILLSMITH_ROBOT", "1")
        .args(["package", "bad", "dist"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let docs = json_documents(&output.stdout);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["error"], Value::Bool(true));
    assert_eq!(docs[0]["code"], "validation_failed");
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_config_json_format_drives_error_output() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["init", "half-done", "--path", "."])
        .assert()
        .success();
    let config = dir.path().join("robot.toml");
    std::fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let output = skillsmith(dir.path())
        .env("SKILLSMITH_CONFIG", &config)
        .args(["smoke-test", "half-done"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let docs = json_documents(&output.stdout);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["code"], "smoke_test_failed");
}

// =============================================================================
// PDF commands
// =============================================================================

#[test]
fn test_rotate_selected_pages() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 3);

    skillsmith(dir.path())
        .args(["rotate", "in.pdf", "out.pdf", "90", "--pages", "2-3"])
        .assert()
        .success();

    let rotated = PdfDocument::open(&dir.path().join("out.pdf")).unwrap();
    assert_eq!(rotated.page_count(), 3);
    assert_eq!(rotated.rotation(0).unwrap(), 0);
    assert_eq!(rotated.rotation(1).unwrap(), 90);
    assert_eq!(rotated.rotation(2).unwrap(), 90);
}

#[test]
fn test_rotate_rejects_bad_angle() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 1);

    skillsmith(dir.path())
        .args(["rotate", "in.pdf", "out.pdf", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("angle must be 90, 180, or 270. Got: 45"));
    assert!(!dir.path().join("out.pdf").exists());
}

#[test]
fn test_rotate_rejects_malformed_pages() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 2);

    skillsmith(dir.path())
        .args(["rotate", "in.pdf", "out.pdf", "90", "--pages", "1,x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a page number"));
}

#[test]
fn test_split_writes_one_file_per_page() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 4);

    skillsmith(dir.path())
        .args(["split", "in.pdf", "pages", "--pages", "1,3,9"])
        .assert()
        .success();

    let out = dir.path().join("pages");
    assert!(out.join("page_001.pdf").is_file());
    assert!(out.join("page_003.pdf").is_file());
    assert!(!out.join("page_002.pdf").exists());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
    assert_eq!(PdfDocument::open(&out.join("page_003.pdf")).unwrap().page_count(), 1);
}

#[test]
fn test_split_with_no_pages_in_range_fails() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 2);

    skillsmith(dir.path())
        .args(["split", "in.pdf", "pages", "--pages", "5-7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no valid pages"));
}

#[test]
fn test_merge_concatenates_inputs() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("a.pdf"), 2);
    write_sample_pdf(&dir.path().join("b.pdf"), 3);

    let output = skillsmith(dir.path())
        .args(["--robot", "merge", "merged.pdf", "a.pdf", "b.pdf"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let docs = json_documents(&output.stdout);
    assert_eq!(docs[0]["total_pages"], Value::from(5));

    let merged = PdfDocument::open(&dir.path().join("merged.pdf")).unwrap();
    assert_eq!(merged.page_count(), 5);
}

#[test]
fn test_merge_needs_two_inputs() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("a.pdf"), 1);

    skillsmith(dir.path())
        .args(["merge", "merged.pdf", "a.pdf"])
        .assert()
        .failure();
}

#[test]
fn test_compress_reports_sizes() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 3);

    let output = skillsmith(dir.path())
        .args(["--robot", "compress", "in.pdf", "small.pdf"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let docs = json_documents(&output.stdout);
    assert!(docs[0]["input_bytes"].as_u64().unwrap() > 0);
    assert_eq!(
        PdfDocument::open(&dir.path().join("small.pdf")).unwrap().page_count(),
        3
    );
}

#[test]
fn test_robot_error_is_json() {
    let dir = tempdir().unwrap();
    write_sample_pdf(&dir.path().join("in.pdf"), 1);

    let output = skillsmith(dir.path())
        .args(["--robot", "rotate", "in.pdf", "out.pdf", "45"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let docs = json_documents(&output.stdout);
    let error = docs.last().unwrap();
    assert_eq!(error["error"], Value::Bool(true));
    assert_eq!(error["code"], "invalid_argument");
}

#[test]
fn test_missing_pdf_is_not_found() {
    let dir = tempdir().unwrap();
    skillsmith(dir.path())
        .args(["compress", "nope.pdf", "out.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
