//! Read-only views computed from a document: display names, list pages,
//! and the dashboard figures. Nothing here is persisted.

use chrono::{Days, NaiveDate};
use gmao_model::{Document, Intervention, Machine, Part, Supplier};

/// Days ahead covered by the upcoming-interventions list.
pub const UPCOMING_DAYS: u64 = 30;
/// Maximum entries in the upcoming-interventions list.
pub const UPCOMING_LIMIT: usize = 12;

/// Supplier name for an id, empty when the id is empty or dangling.
pub fn supplier_name<'a>(document: &'a Document, id: &str) -> &'a str {
    if id.is_empty() {
        return "";
    }
    document.supplier(id).map_or("", |s| s.name.as_str())
}

/// Machine name for an id, empty when the id is empty or dangling.
pub fn machine_name<'a>(document: &'a Document, id: &str) -> &'a str {
    if id.is_empty() {
        return "";
    }
    document.machine(id).map_or("", |m| m.name.as_str())
}

/// Machine label as shown when choosing a machine: `name (ident)`.
pub fn machine_label(machine: &Machine) -> String {
    format!("{} ({})", machine.name, machine.ident)
}

fn matches_query(query: &str, fields: &[&str]) -> bool {
    query.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(query))
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Suppliers sorted by name, filtered on name, contact, email and phone.
pub fn list_suppliers<'a>(document: &'a Document, query: &str) -> Vec<&'a Supplier> {
    let query = normalize_query(query);
    let mut list: Vec<&Supplier> = document
        .suppliers
        .iter()
        .filter(|s| {
            matches_query(
                &query,
                &[
                    s.name.as_str(),
                    s.contact.as_str(),
                    s.email.as_str(),
                    s.phone.as_str(),
                ],
            )
        })
        .collect();
    list.sort_by_cached_key(|s| s.name.to_lowercase());
    list
}

/// Machines sorted by name, filtered on name, ident, location, state and
/// supplier name.
pub fn list_machines<'a>(document: &'a Document, query: &str) -> Vec<&'a Machine> {
    let query = normalize_query(query);
    let mut list: Vec<&Machine> = document
        .machines
        .iter()
        .filter(|m| {
            matches_query(
                &query,
                &[
                    m.name.as_str(),
                    m.ident.as_str(),
                    m.location.as_str(),
                    m.state.as_str(),
                    supplier_name(document, &m.supplier_id),
                ],
            )
        })
        .collect();
    list.sort_by_cached_key(|m| m.name.to_lowercase());
    list
}

/// Parts sorted by name, filtered on name, location and supplier name.
pub fn list_parts<'a>(document: &'a Document, query: &str) -> Vec<&'a Part> {
    let query = normalize_query(query);
    let mut list: Vec<&Part> = document
        .parts
        .iter()
        .filter(|p| {
            matches_query(
                &query,
                &[
                    p.name.as_str(),
                    p.location.as_str(),
                    supplier_name(document, &p.supplier_id),
                ],
            )
        })
        .collect();
    list.sort_by_cached_key(|p| p.name.to_lowercase());
    list
}

/// Interventions sorted by date string, filtered on date, motif, status and
/// machine name.
pub fn list_interventions<'a>(document: &'a Document, query: &str) -> Vec<&'a Intervention> {
    let query = normalize_query(query);
    let mut list: Vec<&Intervention> = document
        .interventions
        .iter()
        .filter(|i| {
            matches_query(
                &query,
                &[
                    i.date.as_str(),
                    i.motif.as_str(),
                    i.status.as_str(),
                    machine_name(document, &i.machine_id),
                ],
            )
        })
        .collect();
    list.sort_by(|a, b| a.date.cmp(&b.date));
    list
}

/// Suppliers offered when choosing a machine's or part's supplier.
pub fn supplier_choices(document: &Document) -> Vec<&Supplier> {
    list_suppliers(document, "")
}

/// Machines offered when choosing an intervention's machine.
pub fn machine_choices(document: &Document) -> Vec<&Machine> {
    let mut list: Vec<&Machine> = document.machines.iter().collect();
    list.sort_by_cached_key(|m| m.name.to_lowercase());
    list
}

/// Parts whose quantity is at or below `threshold`, lowest stock first.
pub fn stock_alerts(document: &Document, threshold: f64) -> Vec<&Part> {
    let mut low: Vec<&Part> = document.parts.iter().filter(|p| p.qty <= threshold).collect();
    low.sort_by(|a, b| a.qty.total_cmp(&b.qty));
    low
}

/// Window used by [`upcoming_interventions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingWindow {
    pub days: u64,
    pub limit: usize,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self {
            days: UPCOMING_DAYS,
            limit: UPCOMING_LIMIT,
        }
    }
}

/// Interventions dated from `today` through `today + days` inclusive,
/// earliest first, at most `limit` of them. Undated or malformed dates are
/// skipped.
pub fn upcoming_interventions(
    document: &Document,
    today: NaiveDate,
    window: UpcomingWindow,
) -> Vec<&Intervention> {
    let end = today.checked_add_days(Days::new(window.days)).unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<(NaiveDate, &Intervention)> = document
        .interventions
        .iter()
        .filter_map(|i| i.parsed_date().map(|date| (date, i)))
        .filter(|(date, _)| *date >= today && *date <= end)
        .collect();
    upcoming.sort_by_key(|(date, _)| *date);
    upcoming
        .into_iter()
        .take(window.limit)
        .map(|(_, i)| i)
        .collect()
}

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpis {
    pub machines: usize,
    pub parts: usize,
    pub interventions: usize,
}

pub fn kpis(document: &Document) -> Kpis {
    Kpis {
        machines: document.machines.len(),
        parts: document.parts.len(),
        interventions: document.interventions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stock_alerts_respect_threshold_and_order() {
        let mut document = Document::empty();
        for (name, qty) in [("d", 10.0), ("b", 3.0), ("c", 5.0), ("a", 0.0)] {
            document.upsert(Part::new(name, qty));
        }

        let alerts = stock_alerts(&document, 3.0);
        let quantities: Vec<f64> = alerts.iter().map(|p| p.qty).collect();
        assert_eq!(quantities, vec![0.0, 3.0]);
    }

    #[test]
    fn negative_quantities_alert_first() {
        let mut document = Document::empty();
        document.upsert(Part::new("a", 1.0));
        document.upsert(Part::new("b", -2.0));
        document.upsert(Part::new("c", 0.5));
        let alerts = stock_alerts(&document, 0.5);
        let names: Vec<&str> = alerts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn upcoming_window_is_inclusive_of_today() {
        let today = day(2024, 6, 10);
        let mut document = Document::empty();
        for (offset, motif) in [(31, "late"), (15, "mid"), (-1, "past"), (0, "today")] {
            let date = if offset >= 0 {
                today + Days::new(offset as u64)
            } else {
                today - Days::new((-offset) as u64)
            };
            document.upsert(Intervention::new(date, motif));
        }

        let upcoming = upcoming_interventions(&document, today, UpcomingWindow::default());
        let motifs: Vec<&str> = upcoming.iter().map(|i| i.motif.as_str()).collect();
        assert_eq!(motifs, vec!["today", "mid"]);
    }

    #[test]
    fn upcoming_includes_last_day_of_window() {
        let today = day(2024, 6, 10);
        let mut document = Document::empty();
        document.upsert(Intervention::new(today + Days::new(30), "edge"));
        assert_eq!(
            upcoming_interventions(&document, today, UpcomingWindow::default()).len(),
            1
        );
    }

    #[test]
    fn upcoming_is_capped() {
        let today = day(2024, 6, 10);
        let mut document = Document::empty();
        for offset in (0..20).rev() {
            document.upsert(Intervention::new(today + Days::new(offset), "x"));
        }
        let upcoming = upcoming_interventions(&document, today, UpcomingWindow::default());
        assert_eq!(upcoming.len(), UPCOMING_LIMIT);
        assert_eq!(upcoming[0].date, "2024-06-10");
    }

    #[test]
    fn upcoming_skips_malformed_dates() {
        let today = day(2024, 6, 10);
        let mut document = Document::empty();
        let mut bad = Intervention::new(today, "bad");
        bad.date = "soon".to_string();
        document.upsert(bad);
        assert!(upcoming_interventions(&document, today, UpcomingWindow::default()).is_empty());
    }

    #[test]
    fn dangling_references_display_empty() {
        let mut document = Document::empty();
        let mut machine = Machine::new("Presse", "PR-1");
        machine.supplier_id = "gone".to_string();
        document.upsert(machine);
        assert_eq!(supplier_name(&document, "gone"), "");
        assert_eq!(supplier_name(&document, ""), "");
        assert_eq!(machine_name(&document, "gone"), "");
    }

    #[test]
    fn search_matches_supplier_name_case_insensitively() {
        let mut document = Document::empty();
        let supplier = Supplier::new("Würth");
        let mut machine = Machine::new("Presse", "PR-1");
        machine.supplier_id = supplier.id.to_string();
        document.upsert(supplier);
        document.upsert(machine);
        document.upsert(Machine::new("Tour", "T-1"));

        let found = list_machines(&document, "  WÜR ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Presse");
        assert_eq!(list_machines(&document, "").len(), 2);
    }

    #[test]
    fn lists_sort_by_name() {
        let mut document = Document::empty();
        for name in ["zeta", "Alpha", "beta"] {
            document.upsert(Supplier::new(name));
        }
        let names: Vec<&str> = list_suppliers(&document, "")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn parts_search_supplier_name_and_sort_by_name() {
        let mut document = Document::empty();
        let supplier = Supplier::new("Würth");
        let mut belt = Part::new("courroie", 2.0);
        belt.supplier_id = supplier.id.to_string();
        let mut filter = Part::new("Filtre", 1.0);
        filter.supplier_id = supplier.id.to_string();
        let mut seal = Part::new("Joint", 4.0);
        seal.location = "Rack 3".to_string();
        document.upsert(supplier);
        document.upsert(seal);
        document.upsert(filter);
        document.upsert(belt);

        let names = |query: &str| -> Vec<String> {
            list_parts(&document, query)
                .iter()
                .map(|p| p.name.clone())
                .collect()
        };
        assert_eq!(names("würth"), vec!["courroie", "Filtre"]);
        assert_eq!(names("rack"), vec!["Joint"]);
        assert_eq!(names(""), vec!["courroie", "Filtre", "Joint"]);
    }

    #[test]
    fn interventions_search_date_status_machine_and_sort_by_date() {
        let mut document = Document::empty();
        let machine = Machine::new("Presse", "PR-1");
        let mut late = Intervention::new(day(2024, 9, 1), "Graissage");
        late.machine_id = machine.id.to_string();
        let mut early = Intervention::new(day(2024, 2, 15), "Vidange");
        early.status = gmao_model::InterventionStatus::Done;
        let mid = Intervention::new(day(2024, 5, 3), "Courroie");
        document.upsert(machine);
        document.upsert(late);
        document.upsert(early);
        document.upsert(mid);

        let motifs = |query: &str| -> Vec<String> {
            list_interventions(&document, query)
                .iter()
                .map(|i| i.motif.clone())
                .collect()
        };
        assert_eq!(motifs(""), vec!["Vidange", "Courroie", "Graissage"]);
        assert_eq!(motifs("presse"), vec!["Graissage"]);
        assert_eq!(motifs("terminée"), vec!["Vidange"]);
        assert_eq!(motifs("2024-05"), vec!["Courroie"]);
    }

    #[test]
    fn choices_are_sorted_by_name() {
        let mut document = Document::empty();
        for name in ["Bosch", "abb"] {
            document.upsert(Supplier::new(name));
        }
        document.upsert(Machine::new("tour", "T-1"));
        document.upsert(Machine::new("Presse", "PR-1"));

        let suppliers: Vec<&str> = supplier_choices(&document)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(suppliers, vec!["abb", "Bosch"]);
        let machines: Vec<String> = machine_choices(&document)
            .into_iter()
            .map(machine_label)
            .collect();
        assert_eq!(machines, vec!["Presse (PR-1)", "tour (T-1)"]);
    }

    #[test]
    fn machine_label_includes_ident() {
        assert_eq!(machine_label(&Machine::new("Tour", "T-1")), "Tour (T-1)");
    }
}
