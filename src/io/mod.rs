//! Input/output helpers.
//!
//! - default data-file discovery (`locate`)
//! - JSON array loading + error taxonomy (`load`)
//! - findings export to CSV (`export`)

pub mod export;
pub mod load;
pub mod locate;

pub use export::*;
pub use load::*;
pub use locate::*;
