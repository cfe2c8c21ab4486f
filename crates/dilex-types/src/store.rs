//! The normalized year -> month -> days store.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::DayEntry;

/// Months of a single year, in first-insertion order.
///
/// Month order reflects the order in which the source presented them, not
/// calendar order. Callers needing calendar order must sort explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthTable {
    months: Vec<(String, Vec<DayEntry>)>,
}

impl MonthTable {
    /// Creates an empty month table.
    #[must_use]
    pub const fn new() -> Self {
        Self { months: Vec::new() }
    }

    /// Returns the number of months.
    #[must_use]
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Returns true if the table has no months.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Returns true if the month is present.
    #[must_use]
    pub fn contains(&self, month: &str) -> bool {
        self.position(month).is_some()
    }

    /// Returns the days recorded for a month.
    #[must_use]
    pub fn get(&self, month: &str) -> Option<&[DayEntry]> {
        self.position(month).map(|i| self.months[i].1.as_slice())
    }

    /// Sets the days for a month, returning the previous days if any.
    ///
    /// A replaced month keeps its original position.
    pub fn insert(
        &mut self,
        month: impl Into<String>,
        days: Vec<DayEntry>,
    ) -> Option<Vec<DayEntry>> {
        let month = month.into();
        match self.position(&month) {
            Some(i) => Some(std::mem::replace(&mut self.months[i].1, days)),
            None => {
                self.months.push((month, days));
                None
            }
        }
    }

    /// Returns the day list for a month, appending an empty one on first use.
    pub fn days_mut(&mut self, month: &str) -> &mut Vec<DayEntry> {
        let index = match self.position(month) {
            Some(i) => i,
            None => {
                self.months.push((month.to_string(), Vec::new()));
                self.months.len() - 1
            }
        };
        &mut self.months[index].1
    }

    /// Iterates months and their days in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DayEntry])> {
        self.months
            .iter()
            .map(|(month, days)| (month.as_str(), days.as_slice()))
    }

    /// Iterates month names in insertion order.
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.months.iter().map(|(month, _)| month.as_str())
    }

    /// Returns the total number of day entries across all months.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.months.iter().map(|(_, days)| days.len()).sum()
    }

    fn position(&self, month: &str) -> Option<usize> {
        self.months.iter().position(|(name, _)| name == month)
    }
}

impl IntoIterator for MonthTable {
    type Item = (String, Vec<DayEntry>);
    type IntoIter = std::vec::IntoIter<(String, Vec<DayEntry>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.months.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<DayEntry>)> for MonthTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec<DayEntry>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (month, days) in iter {
            table.insert(month, days);
        }
        table
    }
}

impl Serialize for MonthTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.months.iter().map(|(month, days)| (month, days)))
    }
}

/// Exchange readings keyed by year label, then month name.
///
/// Year labels are arbitrary strings and iterate in lexicographic order,
/// which is calendar order for four-digit years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedStore {
    years: BTreeMap<String, MonthTable>,
}

impl NormalizedStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Returns the number of years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns true if the store has no years.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Returns true if the year is present.
    #[must_use]
    pub fn contains_year(&self, year: &str) -> bool {
        self.years.contains_key(year)
    }

    /// Returns the months recorded for a year.
    #[must_use]
    pub fn get(&self, year: &str) -> Option<&MonthTable> {
        self.years.get(year)
    }

    /// Returns the months recorded for a year, mutably.
    pub fn get_mut(&mut self, year: &str) -> Option<&mut MonthTable> {
        self.years.get_mut(year)
    }

    /// Sets the months for a year, returning the previous table if any.
    pub fn insert(&mut self, year: impl Into<String>, months: MonthTable) -> Option<MonthTable> {
        self.years.insert(year.into(), months)
    }

    /// Returns the month table for a year, creating an empty one on first use.
    pub fn year_mut(&mut self, year: &str) -> &mut MonthTable {
        self.years.entry(year.to_string()).or_default()
    }

    /// Iterates years in ascending lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MonthTable)> {
        self.years.iter().map(|(year, months)| (year.as_str(), months))
    }

    /// Iterates year labels in ascending lexicographic order.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// Returns the total number of day entries in the store.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.years.values().map(MonthTable::day_count).sum()
    }
}

impl IntoIterator for NormalizedStore {
    type Item = (String, MonthTable);
    type IntoIter = std::collections::btree_map::IntoIter<String, MonthTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, MonthTable)> for NormalizedStore {
    fn from_iter<I: IntoIterator<Item = (S, MonthTable)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (year, months) in iter {
            store.insert(year, months);
        }
        store
    }
}
