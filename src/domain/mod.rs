//! Domain types used throughout the screen.
//!
//! This module defines:
//!
//! - raw and canonical property records (`RawRecord`, `CanonicalRecord`)
//! - the ordered risk scale (`RiskLevel`) and rule tags (`RuleKind`)
//! - screen outputs (`SuspectFinding`) and run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
