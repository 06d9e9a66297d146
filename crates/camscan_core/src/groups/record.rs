//! Food-group record parsing.
//!
//! The nutritional reference data lives as string-encoded SQL procedure
//! calls of the form:
//!
//! ```text
//! CALL InsertarGrupoYTipo(id; kcal; prot; lip; carb; 'name'; 'examples')
//! ```
//!
//! Fields are split on `"; "`; the two text fields carry surrounding
//! single quotes that get stripped. A record with fewer than seven
//! fields, or with unparseable numerics, is malformed.

use serde::Serialize;

/// One food group row: identifier, per-gram nutritional ratios, and
/// the two free-text fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    pub id: u32,
    pub name: String,
    pub examples: String,
    pub kcal_g: f64,
    pub prot_g: f64,
    pub lip_g: f64,
    pub carb_g: f64,
}

/// Errors for malformed group records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Call string has no parenthesized argument list.
    #[error("Not a procedure call: '{0}'")]
    NotACall(String),

    /// Fewer than the seven required fields.
    #[error("Expected at least 7 fields, found {found}")]
    MissingFields { found: usize },

    /// A numeric field did not parse.
    #[error("Invalid number in field '{field}': '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Parse one `CALL InsertarGrupoYTipo(...)` string into a record.
pub fn parse_call(call: &str) -> Result<GroupRecord, RecordError> {
    // Everything between the first '(' and the last ')'.
    let start = call
        .find('(')
        .ok_or_else(|| RecordError::NotACall(call.to_string()))?;
    let end = call
        .rfind(')')
        .filter(|&end| end > start)
        .ok_or_else(|| RecordError::NotACall(call.to_string()))?;

    let parts: Vec<&str> = call[start + 1..end].split("; ").collect();
    if parts.len() < 7 {
        return Err(RecordError::MissingFields { found: parts.len() });
    }

    // Free text may itself contain the separator; everything from the
    // seventh field onward belongs to the examples column.
    let examples = parts[6..].join("; ");

    Ok(GroupRecord {
        id: parse_num(parts[0], "id")?,
        kcal_g: parse_num(parts[1], "kcal_g")?,
        prot_g: parse_num(parts[2], "prot_g")?,
        lip_g: parse_num(parts[3], "lip_g")?,
        carb_g: parse_num(parts[4], "carb_g")?,
        name: strip_quotes(parts[5]),
        examples: strip_quotes(&examples),
    })
}

/// Parse a list of calls, skipping malformed entries with a warning.
pub fn parse_calls(calls: &[&str]) -> Vec<GroupRecord> {
    calls
        .iter()
        .filter_map(|call| match parse_call(call) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {} ({})", e, call);
                None
            }
        })
        .collect()
}

fn parse_num<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn strip_quotes(value: &str) -> String {
    value.trim().trim_matches('\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str =
        "CALL InsertarGrupoYTipo(9; 3.01; 0.219; 0.03; 0.465; 'Legumbres'; 'Alubias, garbanzos, lentejas, etc.')";

    #[test]
    fn well_formed_record_parses() {
        let record = parse_call(WELL_FORMED).unwrap();
        assert_eq!(record.id, 9);
        assert_eq!(record.kcal_g, 3.01);
        assert_eq!(record.prot_g, 0.219);
        assert_eq!(record.lip_g, 0.03);
        assert_eq!(record.carb_g, 0.465);
        assert_eq!(record.name, "Legumbres");
        assert_eq!(record.examples, "Alubias, garbanzos, lentejas, etc.");
    }

    #[test]
    fn quotes_are_stripped() {
        let record = parse_call(WELL_FORMED).unwrap();
        assert!(!record.name.contains('\''));
        assert!(!record.examples.contains('\''));
    }

    #[test]
    fn too_few_fields_is_malformed() {
        let err = parse_call("CALL InsertarGrupoYTipo(1; 2.0; 'Nombre')").unwrap_err();
        assert!(matches!(err, RecordError::MissingFields { found: 3 }));
    }

    #[test]
    fn missing_parens_is_not_a_call() {
        let err = parse_call("CALL InsertarGrupoYTipo 1; 2; 3").unwrap_err();
        assert!(matches!(err, RecordError::NotACall(_)));
    }

    #[test]
    fn bad_numeric_is_malformed() {
        let err =
            parse_call("CALL InsertarGrupoYTipo(uno; 1.0; 2.0; 3.0; 4.0; 'a'; 'b')").unwrap_err();
        assert!(matches!(err, RecordError::InvalidNumber { field: "id", .. }));
    }

    #[test]
    fn separator_inside_examples_is_preserved() {
        let call = "CALL InsertarGrupoYTipo(1; 1.0; 2.0; 3.0; 4.0; 'n'; 'antes; después')";
        let record = parse_call(call).unwrap();
        assert_eq!(record.examples, "antes; después");
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let calls = [WELL_FORMED, "CALL InsertarGrupoYTipo(1; 2)", WELL_FORMED];
        let records = parse_calls(&calls);
        assert_eq!(records.len(), 2);
    }
}
