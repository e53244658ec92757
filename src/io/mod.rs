//! Input/output helpers.
//!
//! - growth-curve text ingest (`ingest`)
//! - dataset JSON export and sample file writing (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
