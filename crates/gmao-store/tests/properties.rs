//! Property tests for id uniqueness and upsert positions.

use std::collections::HashSet;

use gmao_model::{Part, Supplier};
use gmao_store::{MemoryBackend, Store};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn created_ids_are_unique(names in prop::collection::vec("[A-Za-z]{1,12}", 1..40)) {
        let mut store = Store::open(MemoryBackend::new());
        for name in &names {
            store.upsert(Supplier::new(name.as_str())).unwrap();
        }

        let ids: HashSet<&str> = store
            .document()
            .suppliers
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        prop_assert_eq!(ids.len(), names.len());
    }

    #[test]
    fn editing_keeps_length_and_positions(
        quantities in prop::collection::vec(-5i32..50, 1..25),
        pick in any::<prop::sample::Index>(),
        new_qty in -5i32..50,
    ) {
        let mut store = Store::open(MemoryBackend::new());
        for (n, qty) in quantities.iter().enumerate() {
            store.upsert(Part::new(format!("part-{n}"), f64::from(*qty))).unwrap();
        }
        let before: Vec<String> = store
            .document()
            .parts
            .iter()
            .map(|p| p.id.to_string())
            .collect();

        let index = pick.index(before.len());
        let mut edited = store.document().parts[index].clone();
        edited.qty = f64::from(new_qty);
        edited.name = format!("edited-{index}");
        store.upsert(edited).unwrap();

        let after: Vec<String> = store
            .document()
            .parts
            .iter()
            .map(|p| p.id.to_string())
            .collect();
        prop_assert_eq!(&after, &before);
        prop_assert_eq!(store.document().parts[index].qty, f64::from(new_qty));
        let expected_name = format!("edited-{index}");
        prop_assert_eq!(store.document().parts[index].name.as_str(), expected_name.as_str());
    }
}
