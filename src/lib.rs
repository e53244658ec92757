//! `growth-curves` library crate.
//!
//! The binary (`gc`) is a thin wrapper around this library so that:
//!
//! - loading and chart resolution are testable without spawning processes
//! - the same chart model feeds the terminal view, text plot and PNG export

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod tui;
