//! skillsmith merge - Concatenate PDFs

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::pdf::merge_pdfs;

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Merged PDF to write
    pub output: PathBuf,

    /// Input PDFs, in page order (at least two)
    #[arg(required = true, num_args = 2..)]
    pub inputs: Vec<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &MergeArgs) -> Result<()> {
    let inputs: Vec<PathBuf> = args.inputs.iter().map(|p| resolve_path(ctx, p)).collect();
    let summary = merge_pdfs(&resolve_path(ctx, &args.output), &inputs)?;

    if ctx.is_json() {
        return emit_json(&summary);
    }

    let mut layout = HumanLayout::new();
    layout.title("Merge");
    for input in &summary.inputs {
        layout.bullet(&format!("{} ({} pages)", input.path.display(), input.pages));
    }
    layout.blank().success(&format!(
        "Merged {} files ({} pages) into {}",
        summary.inputs.len(),
        summary.total_pages,
        summary.output.display()
    ));
    emit_human(layout);
    Ok(())
}
