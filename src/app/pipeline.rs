//! Shared analysis pipeline used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! locate -> load -> screen -> tag with source -> filter -> envelope
//!
//! The commands can then focus on presentation (tables vs JSON).

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::domain::AnalysisConfig;
use crate::io::{LoadError, load_records, locate_data_file};
use crate::report::{
    AnalysisEnvelope, BatchSummary, EnvelopeStatus, SourcedFinding, attach_source, filter_findings,
};
use crate::screen::screen_batch;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub envelope: AnalysisEnvelope,
    /// One entry per successfully screened file, in argument order.
    pub batches: Vec<BatchSummary>,
}

/// Execute the full pipeline for `config`.
///
/// With no explicit paths, the default data file is discovered from the
/// environment.
pub fn run_analysis(config: &AnalysisConfig) -> AnalysisRun {
    let paths = if config.data_paths.is_empty() {
        match locate_data_file() {
            Some(p) => vec![p],
            None => {
                let cwd = std::env::current_dir().unwrap_or_default();
                warn!(cwd = %cwd.display(), "no data file found");
                return AnalysisRun {
                    envelope: AnalysisEnvelope::not_found(),
                    batches: Vec::new(),
                };
            }
        }
    } else {
        config.data_paths.clone()
    };

    let mut run = run_analysis_on(&paths);
    if run.envelope.status == EnvelopeStatus::Sucesso {
        let kept = filter_findings(
            &run.envelope.results,
            config.min_risk,
            config.filter.as_deref(),
        );
        run.envelope.total_suspects = Some(kept.len());
        run.envelope.results = kept;
    }
    run
}

/// Screen each file as an independent batch.
///
/// Files are processed in parallel; results are re-joined in argument order.
/// The first file (in that order) that fails to load decides the envelope.
pub fn run_analysis_on(paths: &[PathBuf]) -> AnalysisRun {
    let outcomes: Vec<Result<(BatchSummary, Vec<SourcedFinding>), LoadError>> =
        paths.par_iter().map(|p| analyze_file(p)).collect();

    let mut batches = Vec::with_capacity(paths.len());
    let mut results = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok((summary, findings)) => {
                batches.push(summary);
                results.extend(findings);
            }
            Err(e) => {
                error!(path = %e.path().display(), error = %e, "analysis aborted");
                return AnalysisRun {
                    envelope: AnalysisEnvelope::from_load_error(&e),
                    batches,
                };
            }
        }
    }

    let processed = paths.iter().map(|p| p.display().to_string()).collect();
    AnalysisRun {
        envelope: AnalysisEnvelope::success(processed, results),
        batches,
    }
}

fn analyze_file(path: &Path) -> Result<(BatchSummary, Vec<SourcedFinding>), LoadError> {
    let records = load_records(path)?;
    let out = screen_batch(&records);

    info!(
        path = %path.display(),
        records = out.records_read,
        suspects = out.findings.len(),
        "file screened"
    );

    let summary = BatchSummary {
        path: path.display().to_string(),
        records_read: out.records_read,
        findings: out.findings.len(),
        reference: out.reference,
    };
    Ok((summary, attach_source(out.findings, path)))
}
