//! The four fraud heuristics.
//!
//! Rules run in a fixed order (irrisory value, location wording, missing
//! registration, underpricing). Reasons accumulate in that order and the risk
//! level only moves up. Each rule keeps its own gate on the current level:
//!
//! | rule | proposes | applies when current is |
//! |---|---|---|
//! | irrisory value | Crítico | any |
//! | location wording | Alto | not Crítico |
//! | missing registration | Médio | Baixo |
//! | underpricing | Alto | Baixo or Médio |

use crate::domain::{CanonicalRecord, NOT_INFORMED, Reason, RiskLevel, RuleKind};

/// Declared values at or below this are treated as placeholders.
pub const IRRISORY_VALUE_MAX: f64 = 10.0;

/// Locality wording that suggests an irregular occupation.
pub const SUSPICIOUS_TERMS: [&str; 5] = ["IRREGULAR", "INVASÃO", "POSSE", "PROVAVEL", "S/D"];

/// Registration values that mean "no registration".
pub const MISSING_REGISTRATION: [&str; 4] = ["", "S/N", "0", NOT_INFORMED];

/// Price per m² below this fraction of the reference is aggressive underpricing.
pub const UNDERPRICING_RATIO: f64 = 0.15;

/// Outcome of running every rule on one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub risk_level: RiskLevel,
    pub reasons: Vec<Reason>,
}

impl Assessment {
    pub fn is_suspect(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Evaluate all heuristics against `record`, given its market reference
/// price per m².
pub fn assess(record: &CanonicalRecord, reference: f64) -> Assessment {
    let mut risk = RiskLevel::Baixo;
    let mut reasons = Vec::new();

    if record.value <= IRRISORY_VALUE_MAX && record.area > 0.0 {
        reasons.push(Reason {
            rule: RuleKind::IrrisoryValue,
            text: "Valor Declarado Irrisório (até R$ 10,00)".to_string(),
        });
        risk = risk.escalate(RiskLevel::Critico);
    }

    let location = record.location.to_uppercase();
    for term in SUSPICIOUS_TERMS {
        if location.contains(term) {
            reasons.push(Reason {
                rule: RuleKind::SuspiciousLocation,
                text: format!("Indício de Irregularidade Física ({term})"),
            });
            if risk != RiskLevel::Critico {
                risk = risk.escalate(RiskLevel::Alto);
            }
        }
    }

    if MISSING_REGISTRATION.contains(&record.registration.as_str()) {
        reasons.push(Reason {
            rule: RuleKind::MissingRegistration,
            text: "Inscrição Imobiliária Ausente".to_string(),
        });
        if risk == RiskLevel::Baixo {
            risk = risk.escalate(RiskLevel::Medio);
        }
    }

    let ppa = record.price_per_area;
    if reference > 0.0 && ppa > 0.0 && ppa < reference * UNDERPRICING_RATIO {
        reasons.push(Reason {
            rule: RuleKind::Underpricing,
            text: format!("Subfaturamento Agressivo: R$ {ppa:.2}/m² (Ref: R$ {reference:.2})"),
        });
        if matches!(risk, RiskLevel::Baixo | RiskLevel::Medio) {
            risk = risk.escalate(RiskLevel::Alto);
        }
    }

    Assessment {
        risk_level: risk,
        reasons,
    }
}
