//! Export findings to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets: one row per
//! finding, reasons joined into a single column.

use std::path::Path;

use crate::error::{AppError, EXIT_OUTPUT};
use crate::report::SourcedFinding;

const HEADER: [&str; 12] = [
    "arquivo_origem",
    "id_original",
    "nivel_risco",
    "tipo",
    "inscricao",
    "localidade",
    "metragem",
    "valor_declarado",
    "valor_m2_calculado",
    "referencia_mercado_m2",
    "regras",
    "motivos",
];

/// Write findings to a CSV file.
pub fn write_findings_csv(path: &Path, findings: &[SourcedFinding]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(
            EXIT_OUTPUT,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writer.write_record(HEADER).map_err(|e| {
        AppError::new(EXIT_OUTPUT, format!("Failed to write export CSV header: {e}"))
    })?;

    for sourced in findings {
        let f = &sourced.finding;
        let rules = f
            .reasons
            .iter()
            .map(|r| format!("{:?}", r.rule))
            .collect::<Vec<_>>()
            .join(";");
        writer
            .write_record([
                sourced.source_file.clone(),
                f.original_index.to_string(),
                f.risk_level.display_name().to_string(),
                f.property_type.clone(),
                f.registration.clone(),
                f.location.clone(),
                format!("{:.2}", f.area),
                format!("{:.2}", f.declared_value),
                format!("{:.2}", f.computed_price_per_area),
                format!("{:.2}", f.reference_price_per_area),
                rules,
                f.joined_reasons(),
            ])
            .map_err(|e| {
                AppError::new(EXIT_OUTPUT, format!("Failed to write export CSV row: {e}"))
            })?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reason, RiskLevel, RuleKind, SuspectFinding};

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let findings = vec![SourcedFinding {
            source_file: "bens-imoveis.json".to_string(),
            finding: SuspectFinding {
                original_index: 7,
                property_type: "Casa".to_string(),
                registration: "S/N".to_string(),
                location: "Posse, lote 3".to_string(),
                area: 50.0,
                declared_value: 0.1,
                computed_price_per_area: 0.0,
                reference_price_per_area: 1900.0,
                risk_level: RiskLevel::Critico,
                reasons: vec![
                    Reason {
                        rule: RuleKind::IrrisoryValue,
                        text: "Valor Declarado Irrisório (até R$ 10,00)".to_string(),
                    },
                    Reason {
                        rule: RuleKind::MissingRegistration,
                        text: "Inscrição Imobiliária Ausente".to_string(),
                    },
                ],
            },
        }];

        write_findings_csv(&path, &findings).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), HEADER.len());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "7");
        assert_eq!(&rows[0][2], "Crítico");
        assert_eq!(&rows[0][5], "Posse, lote 3");
        assert_eq!(&rows[0][10], "IrrisoryValue;MissingRegistration");
        assert_eq!(
            &rows[0][11],
            "Valor Declarado Irrisório (até R$ 10,00), Inscrição Imobiliária Ausente"
        );
    }
}
