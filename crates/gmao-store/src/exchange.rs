//! JSON export and import of whole documents.

use chrono::NaiveDate;
use gmao_model::{Collection, Document};
use serde_json::Value;
use thiserror::Error;

use crate::error::{Result, StoreError};

/// Why an imported file was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is not valid JSON.
    #[error("invalid JSON")]
    Parse(#[source] serde_json::Error),

    /// One or more collections are missing or not arrays.
    #[error(
        "invalid structure, expected suppliers/machines/parts/interventions (missing: {})",
        .missing.join(", ")
    )]
    Structure { missing: Vec<&'static str> },

    /// The collections are present but a record could not be read.
    #[error("unreadable record")]
    Records(#[source] serde_json::Error),
}

/// Pretty-printed JSON of the exact document.
pub fn export_json(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(document)
        .map_err(|source| StoreError::Serialization { source })
}

/// Default export file name for the given day, e.g. `gmao_export_2024-05-02.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("gmao_export_{}.json", date.format("%Y-%m-%d"))
}

/// Collections that are absent or not arrays in `value`.
pub fn missing_collections(value: &Value) -> Vec<&'static str> {
    Collection::ALL
        .iter()
        .map(|collection| collection.key())
        .filter(|key| !value.get(*key).is_some_and(Value::is_array))
        .collect()
}

/// Parse and structurally validate an imported file.
///
/// The file must be a JSON object whose four collections are all arrays.
/// `meta` is optional.
pub fn parse_import(text: &str) -> std::result::Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;

    let missing = missing_collections(&value);
    if !missing.is_empty() {
        return Err(ImportError::Structure { missing });
    }

    serde_json::from_value(value).map_err(ImportError::Records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmao_model::{Machine, Supplier};

    #[test]
    fn export_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(export_file_name(date), "gmao_export_2024-05-02.json");
    }

    #[test]
    fn export_is_pretty_printed() {
        let mut document = Document::empty();
        document.upsert(Supplier::new("Würth"));
        let json = export_json(&document).unwrap();
        assert!(json.starts_with("{\n  \"suppliers\": ["));
    }

    #[test]
    fn export_then_import_round_trips() {
        let mut document = Document::empty();
        let supplier = Supplier::new("Würth");
        let mut machine = Machine::new("Tour CN", "TCN-01");
        machine.supplier_id = supplier.id.to_string();
        machine.cost = 1250.5;
        document.upsert(supplier);
        document.upsert(machine);

        let imported = parse_import(&export_json(&document).unwrap()).unwrap();
        assert_eq!(imported, document);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_import("{ not json"),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn rejects_missing_or_non_array_collections() {
        let err = parse_import(r#"{"suppliers":[],"machines":{},"parts":[]}"#).unwrap_err();
        match err {
            ImportError::Structure { missing } => {
                assert_eq!(missing, vec!["machines", "interventions"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(matches!(
            parse_import("[1, 2, 3]"),
            Err(ImportError::Structure { .. })
        ));
    }

    #[test]
    fn meta_is_optional() {
        let document =
            parse_import(r#"{"suppliers":[],"machines":[],"parts":[],"interventions":[]}"#)
                .unwrap();
        assert!(document.is_empty());
        assert_eq!(document.meta.version, 1);
    }

    #[test]
    fn records_without_id_are_rejected() {
        let text = r#"{"suppliers":[{"name":"x"}],"machines":[],"parts":[],"interventions":[]}"#;
        assert!(matches!(parse_import(text), Err(ImportError::Records(_))));
    }
}
