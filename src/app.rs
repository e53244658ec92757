//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults
//! - parses CLI arguments
//! - loads growth-curve files
//! - shows the chart (terminal UI, ASCII, or nothing)
//! - writes the optional PNG / JSON outputs

use clap::Parser;

use crate::chart::{Layers, save_png};
use crate::cli::{Cli, Command, SampleArgs};
use crate::domain::{DisplayMode, PlotConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `gc` binary.
pub fn run() -> Result<(), AppError> {
    // Optional; lets `GC_OUTPUT` / `GC_DISPLAY` live next to the data.
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("loaded environment from {}", path.display());
    }

    // `gc` on its own should behave like the original script: plot `gc.txt`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Plot(args) => handle_plot(&args.to_config()),
        Command::Sample(args) => handle_sample(&args),
    }
}

fn handle_plot(config: &PlotConfig) -> Result<(), AppError> {
    let run = pipeline::prepare(config)?;

    // The PNG mirrors whatever layers were last visible on screen.
    let layers = match config.display {
        DisplayMode::Tui => crate::tui::run(&run.model)?,
        DisplayMode::Ascii => {
            let plot = crate::plot::render_ascii_plot(&run.model, config.ascii_width, config.ascii_height, true);
            println!("{plot}");
            Layers::default()
        }
        DisplayMode::None => Layers::default(),
    };

    if let Some(path) = &config.output {
        save_png(path, &run.model, layers)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_dataset_json(path, &run.dataset)?;
    }

    Ok(())
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let series = crate::data::generate_sample(&args.to_config())?;
    crate::io::write_series_text(&args.out, &series)?;
    println!("Wrote {} samples to {}", series.len(), args.out.display());
    Ok(())
}

/// Rewrite argv so `gc` defaults to `gc plot`.
///
/// Rules:
/// - `gc`                      -> `gc plot`
/// - `gc a.txt b.txt -o x.png` -> `gc plot a.txt b.txt -o x.png`
/// - `gc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("plot".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    let is_subcommand = matches!(arg1.as_str(), "plot" | "sample");
    if is_top_level_help_or_version || is_subcommand {
        return argv;
    }

    argv.insert(1, "plot".to_string());
    argv
}
