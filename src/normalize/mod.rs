//! Input normalization.
//!
//! - locale-formatted numbers (`number`)
//! - raw record → canonical record (`record`)

pub mod number;
pub mod record;

pub use number::*;
pub use record::*;
