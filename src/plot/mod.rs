//! Text rendering of growth-curve charts.

pub mod ascii;

pub use ascii::*;
