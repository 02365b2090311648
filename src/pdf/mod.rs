//! PDF page utilities: compress, merge, rotate and split.
//!
//! Parsing and serialization are delegated to `lopdf`; this module only
//! sequences file I/O around it and reports what happened.

pub mod document;
pub mod merge;
pub mod pages;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SmithError};
use crate::utils::ensure_dir;

pub use document::{PdfDocument, VALID_ANGLES};
pub use merge::merge_documents;
pub use pages::{PageSpec, PageToken, parse_page_range};

#[derive(Debug, Clone, Serialize)]
pub struct CompressSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl CompressSummary {
    /// Size reduction in percent; negative when the output grew.
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.output_bytes as f64 / self.input_bytes as f64) * 100.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MergedInput {
    pub path: PathBuf,
    pub pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub inputs: Vec<MergedInput>,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RotateSummary {
    pub output: PathBuf,
    pub angle: i64,
    pub rotated: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub total_pages: usize,
}

/// Output file name for a 0-based page index (`page_001.pdf` for index 0).
pub fn split_file_name(index: usize) -> String {
    format!("page_{:03}.pdf", index + 1)
}

pub fn compress_pdf(input: &Path, output: &Path) -> Result<CompressSummary> {
    let input_bytes = file_size(input)?;
    let mut pdf = PdfDocument::open(input)?;
    pdf.compress();
    pdf.save(output)?;
    let output_bytes = file_size(output)?;

    info!(input = %input.display(), output = %output.display(), "compressed pdf");
    Ok(CompressSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_bytes,
        output_bytes,
    })
}

pub fn merge_pdfs(output: &Path, inputs: &[PathBuf]) -> Result<MergeSummary> {
    if inputs.len() < 2 {
        return Err(SmithError::InvalidArgument(
            "at least 2 input files required".to_string(),
        ));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    let mut merged_inputs = Vec::with_capacity(inputs.len());
    for path in inputs {
        let pdf = PdfDocument::open(path)?;
        debug!(path = %path.display(), pages = pdf.page_count(), "queued for merge");
        merged_inputs.push(MergedInput {
            path: path.clone(),
            pages: pdf.page_count(),
        });
        documents.push(pdf);
    }

    let mut merged = merge_documents(documents)?;
    merged.save(output)?;

    let total_pages = merged_inputs.iter().map(|input| input.pages).sum();
    info!(output = %output.display(), total_pages, "merged pdfs");
    Ok(MergeSummary {
        output: output.to_path_buf(),
        inputs: merged_inputs,
        total_pages,
    })
}

pub fn rotate_pdf(input: &Path, output: &Path, angle: i64, pages: &PageSpec) -> Result<RotateSummary> {
    if !VALID_ANGLES.contains(&angle) {
        return Err(SmithError::InvalidArgument(format!(
            "angle must be 90, 180, or 270. Got: {angle}"
        )));
    }

    let mut pdf = PdfDocument::open(input)?;
    let total_pages = pdf.page_count();
    let selected = pages.resolve(total_pages);
    let rotated = pdf.rotate_pages(&selected, angle)?;
    pdf.save(output)?;

    info!(output = %output.display(), rotated, total_pages, angle, "rotated pages");
    Ok(RotateSummary {
        output: output.to_path_buf(),
        angle,
        rotated,
        total_pages,
    })
}

pub fn split_pdf(input: &Path, output_dir: &Path, pages: &PageSpec) -> Result<SplitSummary> {
    let pdf = PdfDocument::open(input)?;
    let total_pages = pdf.page_count();
    let selected = pages.resolve(total_pages);
    if selected.is_empty() {
        return Err(SmithError::InvalidArgument(
            "no valid pages found in the specified range".to_string(),
        ));
    }

    ensure_dir(output_dir)?;
    let mut files = Vec::with_capacity(selected.len());
    for (index, mut single) in pdf.extract_pages(&selected)? {
        let path = output_dir.join(split_file_name(index));
        single.save(&path)?;
        debug!(path = %path.display(), page = index + 1, "wrote page");
        files.push(path);
    }

    info!(output_dir = %output_dir.display(), extracted = files.len(), total_pages, "split pdf");
    Ok(SplitSummary {
        output_dir: output_dir.to_path_buf(),
        files,
        total_pages,
    })
}

fn file_size(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(SmithError::NotFound(format!(
            "file not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::metadata(path)?.len())
}
