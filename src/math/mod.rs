//! Numeric utilities: medians and display rounding.

pub mod median;

pub use median::*;
