//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - passed between the screening stages in-memory
//! - returned inside the JSON envelope
//! - exported to CSV for spreadsheet review

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One property declaration exactly as it came out of the data export.
///
/// Keys are free-form; unrecognized fields are ignored by the screen.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Raw key holding the declared property value.
pub const FIELD_VALUE: &str = "Valor do ImOvel";
/// Raw key holding the area (m²).
pub const FIELD_AREA: &str = "Metragem";
/// Raw key holding the free-text locality.
pub const FIELD_LOCATION: &str = "Localidade";
/// Raw key holding the municipal registration number.
pub const FIELD_REGISTRATION: &str = "Inscrição do ImOvel";
/// Raw key holding the property type label.
pub const FIELD_PROPERTY_TYPE: &str = "Tipo ImOvel";

/// Placeholder used when a record carries no property type.
pub const NOT_INFORMED: &str = "NOT INFORMED";

/// Ordinal fraud-severity classification.
///
/// Variant order is the severity order, so `Ord` gives
/// `Baixo < Medio < Alto < Critico`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum RiskLevel {
    #[serde(rename = "Baixo")]
    #[value(name = "baixo")]
    Baixo,
    #[serde(rename = "Médio")]
    #[value(name = "medio")]
    Medio,
    #[serde(rename = "Alto")]
    #[value(name = "alto")]
    Alto,
    #[serde(rename = "Crítico")]
    #[value(name = "critico")]
    Critico,
}

impl RiskLevel {
    /// All levels from most to least severe (report order).
    pub const DESCENDING: [RiskLevel; 4] = [
        RiskLevel::Critico,
        RiskLevel::Alto,
        RiskLevel::Medio,
        RiskLevel::Baixo,
    ];

    /// Raise the level to `proposed` if it is more severe; never lowers it.
    pub fn escalate(self, proposed: RiskLevel) -> RiskLevel {
        self.max(proposed)
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Baixo => "Baixo",
            RiskLevel::Medio => "Médio",
            RiskLevel::Alto => "Alto",
            RiskLevel::Critico => "Crítico",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which heuristic produced a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    IrrisoryValue,
    SuspiciousLocation,
    MissingRegistration,
    Underpricing,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::IrrisoryValue,
        RuleKind::SuspiciousLocation,
        RuleKind::MissingRegistration,
        RuleKind::Underpricing,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            RuleKind::IrrisoryValue => "Valor irrisório",
            RuleKind::SuspiciousLocation => "Localidade suspeita",
            RuleKind::MissingRegistration => "Inscrição ausente",
            RuleKind::Underpricing => "Subfaturamento",
        }
    }
}

/// A single matched heuristic: the rule tag plus its human-readable text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub rule: RuleKind,
    pub text: String,
}

/// A property declaration after field extraction, defaulting and numeric
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub value: f64,
    pub area: f64,
    pub location: String,
    pub registration: String,
    pub property_type: String,
    /// `value / area` when `area > 0`, else `0.0`.
    pub price_per_area: f64,
}

/// One flagged property with every matched reason and its final risk level.
///
/// Serialized with the field names the audit dashboard consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectFinding {
    #[serde(rename = "id_original")]
    pub original_index: usize,
    #[serde(rename = "tipo")]
    pub property_type: String,
    #[serde(rename = "inscricao")]
    pub registration: String,
    #[serde(rename = "localidade")]
    pub location: String,
    #[serde(rename = "metragem")]
    pub area: f64,
    #[serde(rename = "valor_declarado")]
    pub declared_value: f64,
    /// Rounded to 2 decimals.
    #[serde(rename = "valor_m2_calculado")]
    pub computed_price_per_area: f64,
    /// Rounded to 2 decimals.
    #[serde(rename = "referencia_mercado_m2")]
    pub reference_price_per_area: f64,
    #[serde(rename = "nivel_risco")]
    pub risk_level: RiskLevel,
    #[serde(rename = "motivos", with = "reason_texts")]
    pub reasons: Vec<Reason>,
}

impl SuspectFinding {
    /// Reason texts joined the way the dashboard displays them.
    pub fn joined_reasons(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn has_rule(&self, rule: RuleKind) -> bool {
        self.reasons.iter().any(|r| r.rule == rule)
    }
}

/// `motivos` travels as a plain list of strings; the rule tag is recovered
/// from the text prefix on the way back in.
mod reason_texts {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Reason, RuleKind};

    pub fn serialize<S: Serializer>(reasons: &[Reason], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(reasons.iter().map(|r| r.text.as_str()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Reason>, D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        Ok(texts
            .into_iter()
            .map(|text| Reason {
                rule: rule_from_text(&text),
                text,
            })
            .collect())
    }

    fn rule_from_text(text: &str) -> RuleKind {
        if text.starts_with("Valor Declarado") {
            RuleKind::IrrisoryValue
        } else if text.starts_with("Indício") {
            RuleKind::SuspiciousLocation
        } else if text.starts_with("Inscrição") {
            RuleKind::MissingRegistration
        } else {
            RuleKind::Underpricing
        }
    }
}

/// Terminal output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and tables.
    Table,
    /// The JSON envelope, pretty-printed.
    Json,
}

/// A full run's configuration as understood by the app layer.
///
/// This is derived from CLI flags (plus defaults and `DATA_PATH`).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Explicit data files. Empty means "discover the default file".
    pub data_paths: Vec<PathBuf>,
    pub format: OutputFormat,
    /// Keep only findings at or above this level.
    pub min_risk: RiskLevel,
    /// Case-insensitive substring over location, registration and reasons.
    pub filter: Option<String>,
    /// Maximum rows in the terminal findings table.
    pub top_n: usize,
    pub export_csv: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_paths: Vec::new(),
            format: OutputFormat::Table,
            min_risk: RiskLevel::Baixo,
            filter: None,
            top_n: 50,
            export_csv: None,
        }
    }
}
