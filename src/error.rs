//! Binary-wide error type.
//!
//! Library seams return typed errors (`LoadError`, `ChartError`); everything is
//! funnelled into `AppError` before it reaches `main`, which prints the message
//! and exits with the carried code.
//!
//! Exit codes:
//! - `2`: input or argument problems, including data too wide to plot
//! - `3`: label/series mismatch
//! - `4`: rendering, terminal or output-file failures

use crate::chart::ChartError;
use crate::io::LoadError;

pub const EXIT_INPUT: u8 = 2;
pub const EXIT_LABELS: u8 = 3;
pub const EXIT_OUTPUT: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        let code = match err {
            ChartError::MissingLabel { .. } => EXIT_LABELS,
            ChartError::AxisRange { .. } => EXIT_INPUT,
            ChartError::Draw(_) | ChartError::Output { .. } => EXIT_OUTPUT,
        };
        AppError::new(code, err.to_string())
    }
}
