//! Machine states and intervention statuses.
//!
//! Both are stored as their French display labels, exactly as the original
//! data files carry them. Labels outside the known set are preserved in an
//! `Other` variant so imported documents survive a save/export round-trip.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating state of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineState {
    /// In service ("OK").
    #[default]
    Ok,
    /// Under maintenance.
    Maintenance,
    /// Broken down ("En panne").
    Down,
    /// Out of service ("Hors service").
    Retired,
    /// Any other label found in stored data.
    Other(String),
}

impl MachineState {
    /// Known states, in display order.
    pub const KNOWN: [MachineState; 4] = [
        MachineState::Ok,
        MachineState::Maintenance,
        MachineState::Down,
        MachineState::Retired,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MachineState::Ok => "OK",
            MachineState::Maintenance => "Maintenance",
            MachineState::Down => "En panne",
            MachineState::Retired => "Hors service",
            MachineState::Other(label) => label,
        }
    }

    /// Parse user input, accepting the stored label or an English keyword
    /// in any case.
    pub fn from_label(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "ok" => MachineState::Ok,
            "maintenance" => MachineState::Maintenance,
            "en panne" | "down" => MachineState::Down,
            "hors service" | "retired" => MachineState::Retired,
            _ => MachineState::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for MachineState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => MachineState::Ok,
            "Maintenance" => MachineState::Maintenance,
            "En panne" => MachineState::Down,
            "Hors service" => MachineState::Retired,
            // An empty state falls back to the form default.
            "" => MachineState::Ok,
            _ => MachineState::Other(value),
        }
    }
}

impl From<MachineState> for String {
    fn from(value: MachineState) -> Self {
        match value {
            MachineState::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of an intervention (work order).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterventionStatus {
    /// Scheduled ("Planifiée").
    #[default]
    Planned,
    /// Being worked on ("En cours").
    InProgress,
    /// Completed ("Terminée").
    Done,
    /// Called off ("Annulée").
    Cancelled,
    /// Any other label found in stored data.
    Other(String),
}

impl InterventionStatus {
    pub const KNOWN: [InterventionStatus; 4] = [
        InterventionStatus::Planned,
        InterventionStatus::InProgress,
        InterventionStatus::Done,
        InterventionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            InterventionStatus::Planned => "Planifiée",
            InterventionStatus::InProgress => "En cours",
            InterventionStatus::Done => "Terminée",
            InterventionStatus::Cancelled => "Annulée",
            InterventionStatus::Other(label) => label,
        }
    }

    pub fn from_label(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "planifiée" | "planifiee" | "planned" => InterventionStatus::Planned,
            "en cours" | "in-progress" | "in progress" => InterventionStatus::InProgress,
            "terminée" | "terminee" | "done" => InterventionStatus::Done,
            "annulée" | "annulee" | "cancelled" | "canceled" => InterventionStatus::Cancelled,
            _ => InterventionStatus::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for InterventionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Planifiée" | "" => InterventionStatus::Planned,
            "En cours" => InterventionStatus::InProgress,
            "Terminée" => InterventionStatus::Done,
            "Annulée" => InterventionStatus::Cancelled,
            _ => InterventionStatus::Other(value),
        }
    }
}

impl From<InterventionStatus> for String {
    fn from(value: InterventionStatus) -> Self {
        match value {
            InterventionStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterventionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_state_serializes_as_label() {
        let json = serde_json::to_string(&MachineState::Down).unwrap();
        assert_eq!(json, "\"En panne\"");
        let back: MachineState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MachineState::Down);
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let state: MachineState = serde_json::from_str("\"Réforme\"").unwrap();
        assert_eq!(state, MachineState::Other("Réforme".to_string()));
        assert_eq!(serde_json::to_string(&state).unwrap(), "\"Réforme\"");

        let status: InterventionStatus = serde_json::from_str("\"Reportée\"").unwrap();
        assert_eq!(status.as_str(), "Reportée");
    }

    #[test]
    fn from_label_accepts_keywords() {
        assert_eq!(MachineState::from_label("down"), MachineState::Down);
        assert_eq!(MachineState::from_label("  ok "), MachineState::Ok);
        assert_eq!(
            InterventionStatus::from_label("DONE"),
            InterventionStatus::Done
        );
        assert_eq!(
            InterventionStatus::from_label("planifiée"),
            InterventionStatus::Planned
        );
    }

    #[test]
    fn defaults_match_form_defaults() {
        assert_eq!(MachineState::default().as_str(), "OK");
        assert_eq!(InterventionStatus::default().as_str(), "Planifiée");
    }
}
