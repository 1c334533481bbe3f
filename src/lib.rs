//! `pega-safado` library crate.
//!
//! The binary (`pega`) is a thin wrapper around this library so that:
//!
//! - the fraud screen is testable without spawning processes
//! - the screen is reusable behind other front-ends (e.g. an HTTP service)
//! - loading, screening and presentation stay easy to navigate separately

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod market;
pub mod math;
pub mod normalize;
pub mod report;
pub mod screen;
