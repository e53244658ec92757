//! Domain types used throughout the load → render pipeline.
//!
//! This module defines:
//!
//! - measurement containers (`Series`, `Dataset`)
//! - run configuration (`PlotConfig`, `SampleConfig`, `DisplayMode`)
//! - the JSON export schema (`DatasetFile`)
//! - the fixed defaults inherited from the original analysis scripts

pub mod types;

pub use types::*;
