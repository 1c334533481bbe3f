//! Reporting utilities: response envelope, filtering, and aggregate counts.
//!
//! The envelope mirrors what the audit dashboard consumes: a status, an
//! optional message, and the findings tagged with the file they came from.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{RiskLevel, RuleKind, SuspectFinding};
use crate::io::{DEFAULT_FILE_NAME, LoadError};

pub mod format;

pub use format::*;

pub const MSG_NOT_FOUND: &str =
    "Arquivo 'bens-imoveis.json' não encontrado. Verifique a pasta 'data' ou a montagem do Docker.";
pub const MSG_INVALID_JSON: &str = "O arquivo existe mas está corrompido (não é um JSON válido).";
pub const MSG_NOT_A_LIST: &str = "O arquivo JSON não é uma lista válida de imóveis.";

/// Outcome class of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Sucesso,
    Vazio,
    Erro,
}

/// A finding plus the name of the file it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedFinding {
    #[serde(flatten)]
    pub finding: SuspectFinding,
    #[serde(rename = "arquivo_origem")]
    pub source_file: String,
}

/// Status/message/results wrapper returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    pub status: EnvelopeStatus,
    #[serde(rename = "mensagem", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "arquivos_processados", default, skip_serializing_if = "Option::is_none")]
    pub processed_files: Option<Vec<String>>,
    #[serde(rename = "total_imoveis_suspeitos", default, skip_serializing_if = "Option::is_none")]
    pub total_suspects: Option<usize>,
    #[serde(rename = "resultados")]
    pub results: Vec<SourcedFinding>,
}

impl AnalysisEnvelope {
    pub fn success(processed_files: Vec<String>, results: Vec<SourcedFinding>) -> Self {
        Self {
            status: EnvelopeStatus::Sucesso,
            message: None,
            processed_files: Some(processed_files),
            total_suspects: Some(results.len()),
            results,
        }
    }

    pub fn not_found() -> Self {
        Self::failure(EnvelopeStatus::Vazio, MSG_NOT_FOUND.to_string())
    }

    /// Map a loader failure onto its status/message pair.
    pub fn from_load_error(err: &LoadError) -> Self {
        match err {
            LoadError::NotFound(path)
                if path.file_name().is_some_and(|n| n != DEFAULT_FILE_NAME) =>
            {
                let message = format!("Arquivo '{}' não encontrado.", path.display());
                Self::failure(EnvelopeStatus::Vazio, message)
            }
            LoadError::NotFound(_) => Self::not_found(),
            LoadError::InvalidJson { .. } => {
                Self::failure(EnvelopeStatus::Erro, MSG_INVALID_JSON.to_string())
            }
            LoadError::NotAList(_) => {
                Self::failure(EnvelopeStatus::Erro, MSG_NOT_A_LIST.to_string())
            }
            LoadError::Read { .. } => {
                Self::failure(EnvelopeStatus::Erro, format!("Erro interno: {err}"))
            }
        }
    }

    fn failure(status: EnvelopeStatus, message: String) -> Self {
        Self {
            status,
            message: Some(message),
            processed_files: None,
            total_suspects: None,
            results: Vec::new(),
        }
    }
}

/// Tag findings with the base name of their source file.
pub fn attach_source(findings: Vec<SuspectFinding>, path: &Path) -> Vec<SourcedFinding> {
    let source_file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    findings
        .into_iter()
        .map(|finding| SourcedFinding {
            finding,
            source_file: source_file.clone(),
        })
        .collect()
}

/// Keep findings at or above `min_risk` that match the optional text filter.
///
/// The filter is a case-insensitive substring match over location,
/// registration and reason texts.
pub fn filter_findings(
    findings: &[SourcedFinding],
    min_risk: RiskLevel,
    filter: Option<&str>,
) -> Vec<SourcedFinding> {
    let needle = filter.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);

    findings
        .iter()
        .filter(|s| s.finding.risk_level >= min_risk)
        .filter(|s| match &needle {
            None => true,
            Some(n) => {
                let f = &s.finding;
                f.location.to_lowercase().contains(n)
                    || f.registration.to_lowercase().contains(n)
                    || f.reasons.iter().any(|r| r.text.to_lowercase().contains(n))
            }
        })
        .cloned()
        .collect()
}

/// Findings per risk level and per rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingCounts {
    pub by_risk: BTreeMap<RiskLevel, usize>,
    pub by_rule: BTreeMap<RuleKind, usize>,
    pub total: usize,
}

impl FindingCounts {
    pub fn from_findings(findings: &[SourcedFinding]) -> Self {
        let mut counts = FindingCounts::default();
        for s in findings {
            *counts.by_risk.entry(s.finding.risk_level).or_default() += 1;
            for rule in RuleKind::ALL {
                if s.finding.has_rule(rule) {
                    *counts.by_rule.entry(rule).or_default() += 1;
                }
            }
            counts.total += 1;
        }
        counts
    }

    pub fn risk(&self, level: RiskLevel) -> usize {
        self.by_risk.get(&level).copied().unwrap_or(0)
    }

    pub fn rule(&self, rule: RuleKind) -> usize {
        self.by_rule.get(&rule).copied().unwrap_or(0)
    }
}
