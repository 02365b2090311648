//! skillsmith - skill toolchain and PDF page helpers.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillsmith::SmithError;
use skillsmith::app::AppContext;
use skillsmith::cli::{Cli, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);
    let format = match &ctx {
        Ok(ctx) => ctx.output_format,
        Err(_) => AppContext::resolve_format(&cli, None),
    };
    init_tracing(&cli, format);

    match ctx.and_then(|ctx| skillsmith::cli::commands::run(&ctx, &cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, format);
            ExitCode::from(e.exit_code())
        }
    }
}

fn report_error(e: &SmithError, format: OutputFormat) {
    if e.is_reported() {
        return;
    }
    if format == OutputFormat::Json {
        let error_json = serde_json::json!({
            "error": true,
            "code": e.code(),
            "message": e.to_string(),
        });
        println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
    } else {
        eprintln!("Error: {e}");
    }
}

fn init_tracing(cli: &Cli, format: OutputFormat) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillsmith=info",
        1 => "info,skillsmith=debug",
        2 => "debug,skillsmith=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if format == OutputFormat::Json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
