use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{require, trim_in_place};
use crate::{Collection, Document, EntityId, InterventionStatus, Record, Result};

/// Date format of [`Intervention::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A maintenance intervention (work order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: EntityId,
    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub machine_id: String,
    #[serde(default)]
    pub status: InterventionStatus,
    /// Reason for the intervention.
    #[serde(default)]
    pub motif: String,
    /// Technician in charge.
    #[serde(default)]
    pub tech: String,
    /// Duration in minutes.
    #[serde(default)]
    pub duration_min: f64,
}

impl Intervention {
    pub fn new(date: NaiveDate, motif: impl Into<String>) -> Self {
        Self {
            id: EntityId::generate(),
            date: date.format(DATE_FORMAT).to_string(),
            machine_id: String::new(),
            status: InterventionStatus::default(),
            motif: motif.into(),
            tech: String::new(),
            duration_min: 0.0,
        }
    }

    pub fn machine_ref(&self) -> Option<&str> {
        Some(self.machine_id.as_str()).filter(|id| !id.is_empty())
    }

    /// The calendar date, or `None` when empty or malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

impl Record for Intervention {
    const COLLECTION: Collection = Collection::Interventions;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn normalize(&mut self) {
        trim_in_place(&mut self.date);
        trim_in_place(&mut self.machine_id);
        trim_in_place(&mut self.motif);
        trim_in_place(&mut self.tech);
    }

    fn validate(&self) -> Result<()> {
        require(&self.date, "intervention", "date")?;
        require(&self.motif, "intervention", "motif")
    }

    fn collection(document: &Document) -> &[Self] {
        &document.interventions
    }

    fn collection_mut(document: &mut Document) -> &mut Vec<Self> {
        &mut document.interventions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_and_motif_are_required() {
        let mut intervention = Intervention::new(date(2024, 3, 1), "  ");
        intervention.normalize();
        assert!(intervention.validate().is_err());

        intervention.motif = "Vidange".to_string();
        assert!(intervention.validate().is_ok());

        intervention.date.clear();
        assert!(intervention.validate().is_err());
    }

    #[test]
    fn date_is_stored_as_iso_string() {
        let intervention = Intervention::new(date(2024, 3, 1), "Vidange");
        assert_eq!(intervention.date, "2024-03-01");
        assert_eq!(intervention.parsed_date(), Some(date(2024, 3, 1)));
    }

    #[test]
    fn malformed_date_parses_to_none() {
        let mut intervention = Intervention::new(date(2024, 3, 1), "Vidange");
        intervention.date = "01/03/2024".to_string();
        assert_eq!(intervention.parsed_date(), None);
    }

    #[test]
    fn duration_uses_camel_case_key() {
        let json = r#"{"id":"i1","date":"2024-03-01","motif":"Vidange","durationMin":45}"#;
        let intervention: Intervention = serde_json::from_str(json).unwrap();
        assert_eq!(intervention.duration_min, 45.0);
        assert_eq!(intervention.status, InterventionStatus::Planned);
        assert_eq!(intervention.machine_ref(), None);
    }

    #[test]
    fn fractional_duration_is_kept() {
        let json = r#"{"id":"i1","date":"2024-03-01","motif":"Vidange","durationMin":7.5}"#;
        let intervention: Intervention = serde_json::from_str(json).unwrap();
        assert_eq!(intervention.duration_min, 7.5);
    }
}
