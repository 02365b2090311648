//! skillsmith compress - Rewrite a PDF with compressed streams

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::pdf::compress_pdf;
use crate::utils::format_kib;

#[derive(Args, Debug)]
pub struct CompressArgs {
    /// PDF to read
    pub input: PathBuf,

    /// Where to write the compressed copy
    pub output: PathBuf,
}

pub fn run(ctx: &AppContext, args: &CompressArgs) -> Result<()> {
    let summary = compress_pdf(
        &resolve_path(ctx, &args.input),
        &resolve_path(ctx, &args.output),
    )?;

    if ctx.is_json() {
        return emit_json(&serde_json::json!({
            "input": summary.input,
            "output": summary.output,
            "input_bytes": summary.input_bytes,
            "output_bytes": summary.output_bytes,
            "reduction_percent": summary.reduction_percent(),
        }));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Compress")
        .kv("Input", &format_kib(summary.input_bytes))
        .kv("Output", &format_kib(summary.output_bytes))
        .kv("Reduction", &format!("{:.1}%", summary.reduction_percent()))
        .blank()
        .success(&format!("Wrote {}", summary.output.display()));
    emit_human(layout);
    Ok(())
}
