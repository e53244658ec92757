//! Command-line parsing for the growth-curve plotter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading and rendering. Defaults reproduce the fixed constants of the
//! original analysis scripts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_INPUT, DEFAULT_LABELS, DEFAULT_TITLE, DisplayMode, PlotConfig, SampleConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gc", version, about = "Aperture photometry growth-curve plotter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load radius/flux files and plot their growth curves.
    Plot(PlotArgs),
    /// Write a synthetic growth-curve file.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct PlotArgs {
    /// Input files, one `<radius> <flux>` pair per line.
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
    pub files: Vec<PathBuf>,

    /// Legend label, assigned to files by position (repeatable).
    ///
    /// Defaults to `Data 1` .. `Data 5`. Supplying fewer labels than files is
    /// an error at render time.
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Read a third column as the flux error and draw error bars.
    #[arg(short = 'e', long)]
    pub errors: bool,

    /// Chart title (`\n` starts a new line).
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// How to show the chart before saving.
    #[arg(long, value_enum, env = "GC_DISPLAY", default_value_t = DisplayMode::Tui)]
    pub display: DisplayMode,

    /// Save the chart as PNG (300 DPI, 10x10 in).
    #[arg(short = 'o', long, env = "GC_OUTPUT", value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Export the labelled series as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output text file.
    #[arg(short = 'o', long, default_value = DEFAULT_INPUT)]
    pub out: PathBuf,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of radii to sample.
    #[arg(short = 'n', long, default_value_t = 30)]
    pub points: usize,

    /// Radius increment (px).
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// PSF full width at half maximum (px).
    #[arg(long, default_value_t = 4.0)]
    pub fwhm: f64,

    /// Total source flux (ADU).
    #[arg(long, default_value_t = 2.5e5)]
    pub total_flux: f64,

    /// Residual sky per px² (ADU).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub sky: f64,

    /// Append a third column with the 1σ flux error.
    #[arg(short = 'e', long)]
    pub errors: bool,
}

impl PlotArgs {
    pub fn to_config(&self) -> PlotConfig {
        let labels = if self.labels.is_empty() {
            DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
        } else {
            self.labels.clone()
        };

        PlotConfig {
            inputs: self.files.clone(),
            labels,
            with_errors: self.errors,
            // Shells make a literal newline awkward; accept the escape.
            title: self.title.replace("\\n", "\n"),
            display: self.display,
            output: self.output.clone(),
            export_json: self.export_json.clone(),
            ascii_width: self.width,
            ascii_height: self.height,
        }
    }
}

impl SampleArgs {
    pub fn to_config(&self) -> SampleConfig {
        SampleConfig {
            seed: self.seed,
            points: self.points,
            step: self.step,
            fwhm: self.fwhm,
            total_flux: self.total_flux,
            sky: self.sky,
            with_errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_plot_uses_script_defaults() {
        let cli = Cli::parse_from(["gc", "plot", "--display", "none"]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        let cfg = args.to_config();
        assert_eq!(cfg.inputs, vec![PathBuf::from("gc.txt")]);
        assert_eq!(cfg.labels.len(), 5);
        assert_eq!(cfg.labels[0], "Data 1");
        assert_eq!(cfg.title, DEFAULT_TITLE);
        assert!(!cfg.with_errors);
        assert_eq!(cfg.display, DisplayMode::None);
    }

    #[test]
    fn labels_and_files_keep_their_order() {
        let cli = Cli::parse_from([
            "gc", "plot", "a.txt", "b.txt", "-l", "first", "-l", "second", "--title", "One\\nTwo", "-o", "out.png",
            "--display", "ascii",
        ]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot");
        };
        let cfg = args.to_config();
        assert_eq!(cfg.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(cfg.labels, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(cfg.title, "One\nTwo");
        assert_eq!(cfg.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn sample_accepts_negative_sky() {
        let cli = Cli::parse_from(["gc", "sample", "--sky", "-0.5", "-n", "12", "-e"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        let cfg = args.to_config();
        assert_eq!(cfg.sky, -0.5);
        assert_eq!(cfg.points, 12);
        assert!(cfg.with_errors);
    }
}
