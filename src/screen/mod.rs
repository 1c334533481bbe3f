//! Batch fraud screen.
//!
//! The whole engine is one pure transform:
//! raw records -> canonical records -> market reference -> per-record rules
//! -> findings (flagged records only, in input order).
//!
//! Nothing here touches the filesystem or keeps state between calls, so
//! independent batches can be screened concurrently.

use tracing::debug;

use crate::domain::{CanonicalRecord, RawRecord, SuspectFinding};
use crate::market::MarketReference;
use crate::math::round2;
use crate::normalize::canonicalize;

pub mod rules;

pub use rules::{Assessment, assess};

/// Everything computed while screening one batch.
#[derive(Debug, Clone)]
pub struct ScreenOutput {
    pub findings: Vec<SuspectFinding>,
    pub reference: MarketReference,
    pub records_read: usize,
}

/// Screen a batch and return only the flagged records.
pub fn detect_suspects(records: &[RawRecord]) -> Vec<SuspectFinding> {
    screen_batch(records).findings
}

/// Screen a batch, keeping the market reference alongside the findings.
pub fn screen_batch(records: &[RawRecord]) -> ScreenOutput {
    let canonical: Vec<CanonicalRecord> = records.iter().map(canonicalize).collect();
    let reference = MarketReference::from_records(&canonical);

    debug!(
        records = canonical.len(),
        market_subset = reference.subset_size(),
        fallback = reference.fallback(),
        "market reference computed"
    );

    let findings: Vec<SuspectFinding> = canonical
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let reference_ppa = reference.lookup(&record.property_type);
            let assessment = assess(record, reference_ppa);
            assessment
                .is_suspect()
                .then(|| to_finding(idx, record, reference_ppa, assessment))
        })
        .collect();

    ScreenOutput {
        findings,
        reference,
        records_read: canonical.len(),
    }
}

fn to_finding(
    idx: usize,
    record: &CanonicalRecord,
    reference_ppa: f64,
    assessment: Assessment,
) -> SuspectFinding {
    SuspectFinding {
        original_index: idx,
        property_type: record.property_type.clone(),
        registration: record.registration.clone(),
        location: record.location.clone(),
        area: record.area,
        declared_value: record.value,
        computed_price_per_area: round2(record.price_per_area),
        reference_price_per_area: round2(reference_ppa),
        risk_level: assessment.risk_level,
        reasons: assessment.reasons,
    }
}
