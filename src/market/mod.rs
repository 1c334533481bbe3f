//! Market reference computation (per-type median price per m²).

pub mod reference;

pub use reference::*;
