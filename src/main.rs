//! podlog - Streaming log panel with regex filtering
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;
use podlog_app::config::{init_config_dir, load_settings, load_settings_file};
use podlog_app::{run, RunOptions};
use podlog_core::FilterMode;

/// podlog - Streaming log panel with regex filtering
///
/// Runs PROGRAM and shows its output, filtered. While it runs, type
/// `mode <all|include|exclude|after|before>`, `pattern <regex>`,
/// `filter <mode> [regex]` or `quit` on stdin.
#[derive(Parser, Debug)]
#[command(name = "podlog")]
#[command(about = "Streaming log panel with regex filtering", long_about = None)]
struct Args {
    /// Label for the panel title (defaults to the producer command line)
    #[arg(long, short)]
    resource: Option<String>,

    /// Initial filter mode
    #[arg(long, short, value_parser = parse_mode)]
    mode: Option<FilterMode>,

    /// Initial filter pattern (regular expression)
    #[arg(long, short)]
    pattern: Option<String>,

    /// Directory containing `.podlog/config.toml` (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Explicit config file, overriding --config-dir
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lines rendered per step of a full render
    #[arg(long)]
    chunk_lines: Option<usize>,

    /// Write the panel document as HTML on exit
    #[arg(long, value_name = "PATH")]
    export_html: Option<PathBuf>,

    /// Create a default `.podlog/config.toml` and exit
    #[arg(long)]
    init_config: bool,

    /// Producer program and its arguments, e.g. `-- kubectl logs -f web-1`
    #[arg(trailing_var_arg = true, value_name = "PROGRAM")]
    command: Vec<String>,
}

fn parse_mode(s: &str) -> Result<FilterMode, String> {
    s.parse().map_err(|e: podlog_core::Error| e.to_string())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let base_dir = match args.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    if args.init_config {
        let path = init_config_dir(&base_dir)?;
        eprintln!("Config written to {}", path.display());
        return Ok(());
    }

    let Some((program, program_args)) = args.command.split_first() else {
        return Err(eyre!(
            "no producer command given; usage: podlog [OPTIONS] -- <PROGRAM> [ARGS]..."
        ));
    };

    podlog_core::logging::init()?;

    let mut settings = match &args.config {
        Some(path) => load_settings_file(path)?,
        None => load_settings(&base_dir),
    };
    if let Some(mode) = args.mode {
        settings.filter.mode = mode;
    }
    if let Some(pattern) = args.pattern {
        settings.filter.pattern = pattern;
    }
    if let Some(chunk_lines) = args.chunk_lines {
        settings.render.chunk_lines = chunk_lines;
    }

    let resource = args
        .resource
        .unwrap_or_else(|| args.command.join(" "));

    let result = run(RunOptions {
        resource,
        program: program.clone(),
        args: program_args.to_vec(),
        settings,
        export_html: args.export_html,
    })
    .await;

    if let Err(e) = &result {
        tracing::error!("podlog failed: {}", e);
        eprintln!(
            "See the logs in {} for details.",
            podlog_core::logging::log_directory().display()
        );
    }

    Ok(result?)
}
