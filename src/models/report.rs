// src/models/report.rs

//! Letter → count report built from crawl results.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::LetterResult;

/// Entry count per letter, sorted by letter.
///
/// Letters without any matching entry are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregateReport {
    counts: BTreeMap<String, usize>,
}

impl AggregateReport {
    /// Reduce crawl results into counts keyed by the requested letter.
    pub fn from_results(results: &[LetterResult]) -> Result<Self> {
        let mut counts = BTreeMap::new();

        for result in results.iter().filter(|r| !r.is_empty()) {
            if result.matched_entries.iter().any(|e| e.is_empty()) {
                return Err(AppError::aggregation(format!(
                    "empty entry name in results for '{}'",
                    result.letter
                )));
            }

            let first = &result.matched_entries[0];
            if !first.starts_with(result.letter.as_str()) {
                log::warn!(
                    "Letter '{}' bucket starts with '{}'; counting under the requested letter",
                    result.letter,
                    first.chars().next().unwrap_or_default()
                );
            }

            if counts
                .insert(result.letter.clone(), result.count())
                .is_some()
            {
                return Err(AppError::aggregation(format!(
                    "duplicate results for letter '{}'",
                    result.letter
                )));
            }
        }

        Ok(Self { counts })
    }

    pub fn get(&self, letter: &str) -> Option<usize> {
        self.counts.get(letter).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(letter, count)` pairs in ascending letter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// One `<letter>,<count>` line per letter, each newline-terminated.
    pub fn to_csv(&self) -> String {
        self.iter()
            .map(|(letter, count)| format!("{letter},{count}\n"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_sorted_and_formatted() {
        let results = vec![
            LetterResult::new("B", vec!["Banana".into()]),
            LetterResult::new("A", vec!["Apple".into(), "Ant".into()]),
        ];
        let report = AggregateReport::from_results(&results).unwrap();

        assert_eq!(report.get("A"), Some(2));
        assert_eq!(report.get("B"), Some(1));
        assert_eq!(report.to_csv(), "A,2\nB,1\n");
    }

    #[test]
    fn empty_letters_are_omitted() {
        let results = vec![
            LetterResult::new("А", vec!["Аист".into()]),
            LetterResult::new("Ъ", vec![]),
        ];
        let report = AggregateReport::from_results(&results).unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.get("Ъ"), None);
        assert_eq!(report.to_csv(), "А,1\n");
    }

    #[test]
    fn empty_entry_is_an_aggregation_error() {
        let results = vec![LetterResult::new("A", vec!["".into()])];
        assert!(matches!(
            AggregateReport::from_results(&results),
            Err(AppError::Aggregation(_))
        ));
    }

    #[test]
    fn duplicate_letter_is_an_aggregation_error() {
        let results = vec![
            LetterResult::new("A", vec!["Ant".into()]),
            LetterResult::new("A", vec!["Apple".into()]),
        ];
        assert!(AggregateReport::from_results(&results).is_err());
    }

    #[test]
    fn mismatched_first_entry_keeps_requested_letter() {
        let results = vec![LetterResult::new("Е", vec!["Ёж".into()])];
        let report = AggregateReport::from_results(&results).unwrap();
        assert_eq!(report.get("Е"), Some(1));
        assert_eq!(report.get("Ё"), None);
    }

    #[test]
    fn empty_report_serializes_to_nothing() {
        let report = AggregateReport::from_results(&[]).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.to_csv(), "");
        assert_eq!(report.total(), 0);
    }
}
