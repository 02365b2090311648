use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tempfile::TempDir;

/// A skill document that passes basic and comprehensive validation cleanly.
pub const VALID_SKILL_MD: &str = r#"---
name: pdf-editor
description: This skill MUST be loaded before editing PDF files. Use it when rotating, splitting, merging or compressing documents.
metadata:
  version: 1.2.0
  changelog: pdf-editor/CHANGELOG.md
---

# Pdf Editor

## Overview

Manipulate PDF pages with the helpers in scripts/ and the notes in references/.

## Workflow

1. Pick the operation.
2. Run the matching command.

## Quick Reference

- "Rotate pages two to four by 90 degrees"
- "Split the report into single pages"
"#;

/// Test fixture providing an isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Create a file with content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create `skills/<name>/SKILL.md` plus its `CHANGELOG.md`; returns the skill dir.
    pub fn create_skill(&self, name: &str, skill_md: &str) -> PathBuf {
        self.create_file(&format!("skills/{name}/SKILL.md"), skill_md);
        self.create_file(
            &format!("skills/{name}/CHANGELOG.md"),
            "# Changelog\n\n## [0.0.0]\n",
        );
        self.root.join("skills").join(name)
    }
}

/// Build an in-memory PDF with `pages` blank A4 pages.
pub fn sample_pdf(pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for number in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {number}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let encoded = content.encode().expect("encode page content");
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(pages).expect("page count fits in i64");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Like [`sample_pdf`], but the root page tree carries `/Rotate 90` and a
/// 200x100 `/MediaBox` that every page inherits.
pub fn rotated_landscape_pdf(pages: usize) -> Document {
    let mut doc = sample_pdf(pages);
    let pages_id = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .expect("sample pdf has a page tree");
    let tree = doc
        .get_object_mut(pages_id)
        .and_then(Object::as_dict_mut)
        .expect("page tree is a dictionary");
    tree.set("Rotate", 90);
    tree.set(
        "MediaBox",
        vec![0.into(), 0.into(), 200.into(), 100.into()],
    );
    doc
}

/// Write a sample PDF with `pages` pages to `path` and return the path.
pub fn write_sample_pdf(path: &Path, pages: usize) -> PathBuf {
    let mut doc = sample_pdf(pages);
    doc.save(path).expect("save sample pdf");
    path.to_path_buf()
}
