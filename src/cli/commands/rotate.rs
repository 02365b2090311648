//! skillsmith rotate - Rotate PDF pages

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::resolve_path;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::pdf::{PageSpec, rotate_pdf};

#[derive(Args, Debug)]
pub struct RotateArgs {
    /// PDF to read
    pub input: PathBuf,

    /// Where to write the rotated copy
    pub output: PathBuf,

    /// Clockwise rotation: 90, 180 or 270
    #[arg(allow_negative_numbers = true)]
    pub angle: i64,

    /// Pages to rotate, e.g. "1-3,5" (1-based) or "all"
    #[arg(long, default_value = "all")]
    pub pages: PageSpec,
}

pub fn run(ctx: &AppContext, args: &RotateArgs) -> Result<()> {
    let summary = rotate_pdf(
        &resolve_path(ctx, &args.input),
        &resolve_path(ctx, &args.output),
        args.angle,
        &args.pages,
    )?;

    if ctx.is_json() {
        return emit_json(&summary);
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Rotate")
        .kv("Pages", &args.pages.to_string())
        .kv("Angle", &format!("{}°", summary.angle))
        .blank()
        .success(&format!(
            "Rotated {}/{} pages into {}",
            summary.rotated,
            summary.total_pages,
            summary.output.display()
        ));
    emit_human(layout);
    Ok(())
}
