//! Raw record canonicalization.
//!
//! Every default is resolved here, exactly once, so the heuristics downstream
//! only ever see a fixed-shape `CanonicalRecord`.

use serde_json::Value;

use crate::domain::{
    CanonicalRecord, FIELD_AREA, FIELD_LOCATION, FIELD_PROPERTY_TYPE, FIELD_REGISTRATION,
    FIELD_VALUE, NOT_INFORMED, RawRecord,
};
use crate::normalize::number::parse_locale_number;

/// Canonicalize a single raw record.
pub fn canonicalize(raw: &RawRecord) -> CanonicalRecord {
    let value = field(raw, FIELD_VALUE).map(parse_locale_number).unwrap_or(0.0);
    let area = field(raw, FIELD_AREA).map(parse_locale_number).unwrap_or(0.0);

    let location = field(raw, FIELD_LOCATION).map(cell_text).unwrap_or_default();
    let registration = field(raw, FIELD_REGISTRATION).map(cell_text).unwrap_or_default();

    let property_type = field(raw, FIELD_PROPERTY_TYPE)
        .map(cell_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_INFORMED.to_string());

    let price_per_area = if area > 0.0 { value / area } else { 0.0 };

    CanonicalRecord {
        value,
        area,
        location,
        registration,
        property_type,
        price_per_area,
    }
}

/// Look a field up by exact key, then by whitespace-trimmed key.
fn field<'a>(raw: &'a RawRecord, name: &str) -> Option<&'a Value> {
    raw.get(name)
        .or_else(|| raw.iter().find(|(k, _)| k.trim() == name).map(|(_, v)| v))
}

/// Stringify and trim a text cell. Null reads as empty.
fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(v: Value) -> RawRecord {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn full_record_is_normalized() {
        let raw = record(json!({
            "Valor do ImOvel": "150.000,00",
            "Metragem": "100",
            "Localidade": "  Rua das Flores  ",
            "Inscrição do ImOvel": " 12345 ",
            "Tipo ImOvel": " Casa ",
            "Extra": "ignored",
        }));

        let c = canonicalize(&raw);
        assert_eq!(
            c,
            CanonicalRecord {
                value: 150_000.0,
                area: 100.0,
                location: "Rua das Flores".to_string(),
                registration: "12345".to_string(),
                property_type: "Casa".to_string(),
                price_per_area: 1500.0,
            }
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = canonicalize(&RawRecord::new());
        assert_eq!(c.value, 0.0);
        assert_eq!(c.area, 0.0);
        assert_eq!(c.location, "");
        assert_eq!(c.registration, "");
        assert_eq!(c.property_type, NOT_INFORMED);
        assert_eq!(c.price_per_area, 0.0);
    }

    #[test]
    fn null_and_blank_type_fall_back_to_sentinel() {
        let c = canonicalize(&record(json!({ "Tipo ImOvel": null })));
        assert_eq!(c.property_type, NOT_INFORMED);
        let c = canonicalize(&record(json!({ "Tipo ImOvel": "   " })));
        assert_eq!(c.property_type, NOT_INFORMED);
    }

    #[test]
    fn zero_or_negative_area_gives_zero_price_per_area() {
        for area in [json!(0), json!("-5"), json!("abc")] {
            let c = canonicalize(&record(json!({
                "Valor do ImOvel": "999.999,00",
                "Metragem": area,
            })));
            assert_eq!(c.price_per_area, 0.0);
        }
    }

    #[test]
    fn numeric_registration_is_stringified() {
        let c = canonicalize(&record(json!({ "Inscrição do ImOvel": 0 })));
        assert_eq!(c.registration, "0");
        let c = canonicalize(&record(json!({ "Inscrição do ImOvel": 4521 })));
        assert_eq!(c.registration, "4521");
    }

    #[test]
    fn padded_keys_still_match() {
        let c = canonicalize(&record(json!({ " Metragem ": "50" })));
        assert_eq!(c.area, 50.0);
    }
}
