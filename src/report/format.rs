//! Formatted terminal output.
//!
//! We keep formatting code in one place so the screen itself stays free of
//! presentation concerns and output changes are localized.

use chrono::{DateTime, Local};

use crate::domain::{RiskLevel, RuleKind};
use crate::market::MarketReference;
use crate::report::{AnalysisEnvelope, EnvelopeStatus, FindingCounts, SourcedFinding};

/// What was computed for one data file, for the run header.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub path: String,
    pub records_read: usize,
    pub findings: usize,
    pub reference: MarketReference,
}

/// Format the run header, counts and market reference tables.
pub fn format_run_summary(
    batches: &[BatchSummary],
    shown: &[SourcedFinding],
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();

    out.push_str("=== pega - Auditoria de Declarações Imobiliárias ===\n");
    out.push_str(&format!("Gerado em: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S")));

    for b in batches {
        out.push_str(&format!(
            "Arquivo: {} | registros={} | suspeitos={} | base de mercado n={}\n",
            b.path,
            b.records_read,
            b.findings,
            b.reference.subset_size(),
        ));
    }

    let counts = FindingCounts::from_findings(shown);
    out.push_str(&format!("\nSuspeitos exibidos: {}\n", counts.total));
    for level in RiskLevel::DESCENDING {
        out.push_str(&format!("  {:<8} {:>6}\n", level.display_name(), counts.risk(level)));
    }

    out.push_str("\nPor regra:\n");
    for rule in RuleKind::ALL {
        out.push_str(&format!("  {:<20} {:>6}\n", rule.display_name(), counts.rule(rule)));
    }

    for b in batches {
        out.push('\n');
        out.push_str(&format_reference_table(&b.path, &b.reference));
    }

    out
}

/// Per-type market reference table for one file.
pub fn format_reference_table(path: &str, reference: &MarketReference) -> String {
    let mut out = String::new();
    out.push_str(&format!("Referência de mercado (R$/m²) - {path}:\n"));

    if reference.is_empty() {
        out.push_str("  (sem base de mercado; referência global = 0.00)\n");
        return out;
    }

    out.push_str(&format!("  {:<28} {:>14} {:>6}\n", "tipo", "mediana", "n"));
    out.push_str(&format!("  {:-<28} {:-<14} {:-<6}\n", "", "", ""));
    for (kind, entry) in reference.entries() {
        out.push_str(&format!(
            "  {:<28} {:>14.2} {:>6}\n",
            truncate(kind, 28),
            entry.median_price_per_area,
            entry.sample_size
        ));
    }
    out.push_str(&format!("  {:<28} {:>14.2}\n", "(global)", reference.fallback()));
    out
}

/// Findings table, at most `top_n` rows.
pub fn format_findings_table(findings: &[SourcedFinding], top_n: usize) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:>6} {:<8} {:<16} {:<14} {:<24} {:>12} {:>12} {:<40}\n",
            "id", "risco", "tipo", "inscricao", "localidade", "R$/m²", "ref R$/m²", "motivos"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<6} {:-<8} {:-<16} {:-<14} {:-<24} {:-<12} {:-<12} {:-<40}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for s in findings.iter().take(top_n) {
        let f = &s.finding;
        out.push_str(
            format!(
                "{:>6} {:<8} {:<16} {:<14} {:<24} {:>12.2} {:>12.2} {:<40}\n",
                f.original_index,
                f.risk_level.display_name(),
                truncate(&f.property_type, 16),
                truncate(&f.registration, 14),
                truncate(&f.location, 24),
                f.computed_price_per_area,
                f.reference_price_per_area,
                truncate(&f.joined_reasons(), 40),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if findings.len() > top_n {
        out.push_str(&format!("... {} mais (use --top ou --export)\n", findings.len() - top_n));
    }

    out
}

/// One-line rendering of a non-success envelope.
pub fn format_envelope_message(envelope: &AnalysisEnvelope) -> String {
    let label = match envelope.status {
        EnvelopeStatus::Sucesso => "sucesso",
        EnvelopeStatus::Vazio => "vazio",
        EnvelopeStatus::Erro => "erro",
    };
    match &envelope.message {
        Some(m) => format!("[{label}] {m}"),
        None => format!("[{label}]"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
