//! skillsmith split - One PDF per selected page

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::pdf::{PageSpec, split_pdf};

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// PDF to read
    pub input: PathBuf,

    /// Directory receiving page_NNN.pdf files (created if missing)
    pub output_dir: PathBuf,

    /// Pages to extract, e.g. "2,4-6" (1-based) or "all"
    #[arg(long, default_value = "all")]
    pub pages: PageSpec,
}

pub fn run(ctx: &AppContext, args: &SplitArgs) -> Result<()> {
    let summary = split_pdf(
        &resolve_path(ctx, &args.input),
        &resolve_path(ctx, &args.output_dir),
        &args.pages,
    )?;

    if ctx.is_json() {
        return emit_json(&summary);
    }

    let mut layout = HumanLayout::new();
    layout.title("Split");
    for file in &summary.files {
        layout.bullet(&file.display().to_string());
    }
    layout.blank().success(&format!(
        "Extracted {} of {} pages to {}",
        summary.files.len(),
        summary.total_pages,
        summary.output_dir.display()
    ));
    emit_human(layout);
    Ok(())
}
