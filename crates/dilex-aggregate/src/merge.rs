//! Key-wise union of normalized stores.

use dilex_types::NormalizedStore;

/// Merges `incoming` into `existing`, keeping what is already present.
///
/// Years absent from `existing` are added whole. For a year present in both,
/// months absent from `existing` are appended in `incoming`'s order, and a
/// month present in both keeps `existing`'s days untouched: the incoming
/// days for that month are discarded entirely, never merged element-wise.
///
/// Returns the number of months added.
pub fn merge_into(existing: &mut NormalizedStore, incoming: NormalizedStore) -> usize {
    let mut added = 0;

    for (year, months) in incoming {
        match existing.get_mut(&year) {
            Some(present) => {
                for (month, days) in months {
                    if !present.contains(&month) {
                        present.insert(month, days);
                        added += 1;
                    }
                }
            }
            None => {
                added += months.len();
                existing.insert(year, months);
            }
        }
    }

    added
}

/// Returns the union of two stores, preferring `first` on collision.
#[must_use]
pub fn merge(mut first: NormalizedStore, second: NormalizedStore) -> NormalizedStore {
    merge_into(&mut first, second);
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilex_types::{DayEntry, ExchangeState, MonthTable};
    use proptest::prelude::*;

    fn month(name: &str, values: &[i64]) -> (String, Vec<DayEntry>) {
        let days = values
            .iter()
            .zip(1..)
            .map(|(value, day)| DayEntry::new(day, ExchangeState::value(*value)))
            .collect();
        (name.to_string(), days)
    }

    fn store(years: Vec<(&str, Vec<(String, Vec<DayEntry>)>)>) -> NormalizedStore {
        years
            .into_iter()
            .map(|(year, months)| (year, months.into_iter().collect::<MonthTable>()))
            .collect()
    }

    #[test]
    fn test_disjoint_months_in_same_year_are_unioned() {
        let x = store(vec![("2020", vec![month("March", &[1, 2])])]);
        let y = store(vec![("2020", vec![month("April", &[3])])]);

        let merged = merge(x, y);
        let year = merged.get("2020").unwrap();

        assert!(year.contains("March"));
        assert!(year.contains("April"));
        assert_eq!(year.months().collect::<Vec<_>>(), ["March", "April"]);
    }

    #[test]
    fn test_colliding_month_keeps_existing_entries() {
        let x = store(vec![("2020", vec![month("March", &[1, 2, 3])])]);
        let y = store(vec![("2020", vec![month("March", &[9]), month("April", &[4])])]);

        let merged = merge(x.clone(), y.clone());
        assert_eq!(
            merged.get("2020").unwrap().get("March"),
            x.get("2020").unwrap().get("March")
        );

        // Either source may arrive first; whichever is present survives.
        let merged = merge(y.clone(), x);
        assert_eq!(
            merged.get("2020").unwrap().get("March"),
            y.get("2020").unwrap().get("March")
        );
        assert!(merged.get("2020").unwrap().contains("April"));
    }

    #[test]
    fn test_new_years_are_added() {
        let mut existing = store(vec![("2021", vec![month("January", &[25])])]);
        let incoming = store(vec![
            ("2018", vec![month("May", &[1]), month("June", &[2])]),
            ("2021", vec![month("January", &[99])]),
        ]);

        let added = merge_into(&mut existing, incoming);

        assert_eq!(added, 2);
        assert_eq!(existing.years().collect::<Vec<_>>(), ["2018", "2021"]);
        assert_eq!(
            existing.get("2021").unwrap().get("January").unwrap()[0].state,
            ExchangeState::value(25)
        );
    }

    #[test]
    fn test_merge_with_empty() {
        let x = store(vec![("2020", vec![month("March", &[1])])]);
        assert_eq!(merge(x.clone(), NormalizedStore::new()), x);
        assert_eq!(merge(NormalizedStore::new(), x.clone()), x);
    }

    fn arb_store() -> impl Strategy<Value = NormalizedStore> {
        let months = prop::collection::vec(
            (
                prop::sample::select(vec!["January", "March", "June", "December"]),
                prop::collection::vec(any::<i64>(), 0..5),
            ),
            0..4,
        );
        prop::collection::vec((prop::sample::select(vec!["2018", "2019", "2020"]), months), 0..4)
            .prop_map(|years| {
                let mut store = NormalizedStore::new();
                for (year, months) in years {
                    let table = store.year_mut(year);
                    for (name, values) in months {
                        let (name, days) = month(name, &values);
                        table.insert(name, days);
                    }
                }
                store
            })
    }

    proptest! {
        #[test]
        fn test_merge_with_self_is_identity(x in arb_store()) {
            prop_assert_eq!(merge(x.clone(), x.clone()), x);
        }

        #[test]
        fn test_merge_preserves_existing(x in arb_store(), y in arb_store()) {
            let merged = merge(x.clone(), y.clone());
            for (year, months) in x.iter() {
                for (name, days) in months.iter() {
                    prop_assert_eq!(merged.get(year).unwrap().get(name), Some(days));
                }
            }
            prop_assert_eq!(merged.day_count() >= x.day_count(), true);
        }
    }
}
