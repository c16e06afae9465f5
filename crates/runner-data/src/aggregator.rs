//! Descriptive statistics over validated run records.
//!
//! Sums run in input order in plain `f64`; no compensated summation is
//! attempted, which is adequate for hand-kept running logs but loses
//! precision on very large or heavily skewed inputs.

use std::collections::BTreeMap;

use runner_core::models::{OverallMetrics, PersonMetrics, Record};

// ── MilesStats ────────────────────────────────────────────────────────────────

/// Running count, sum and extremes of a set of distances.
#[derive(Debug, Clone, Copy, Default)]
struct MilesStats {
    count: usize,
    total: f64,
    min: f64,
    max: f64,
}

impl MilesStats {
    /// Add one distance to the running totals.
    fn add(&mut self, miles: f64) {
        if self.count == 0 {
            self.min = miles;
            self.max = miles;
        } else {
            self.min = self.min.min(miles);
            self.max = self.max.max(miles);
        }
        self.total += miles;
        self.count += 1;
    }

    /// Mean of the added distances, `0.0` when nothing was added.
    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }

    fn into_overall(self) -> OverallMetrics {
        OverallMetrics {
            total_runs: self.count,
            average_miles: self.average(),
            min_miles: self.min,
            max_miles: self.max,
        }
    }

    fn into_person(self, person: String) -> PersonMetrics {
        PersonMetrics {
            person,
            total_runs: self.count,
            average_miles: self.average(),
            min_miles: self.min,
            max_miles: self.max,
        }
    }
}

// ── MetricsAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that summarizes records overall and per person.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Statistics over every record. All fields are zero for empty input.
    pub fn aggregate_overall(records: &[Record]) -> OverallMetrics {
        let mut stats = MilesStats::default();
        for record in records {
            stats.add(record.miles);
        }
        stats.into_overall()
    }

    /// Statistics per distinct `person`, ascending by person name.
    ///
    /// Grouping uses the exact person string, so `"alice"` and `"Alice"` are
    /// separate groups. Names are ordered by code point, not by locale
    /// collation.
    pub fn aggregate_by_person(records: &[Record]) -> Vec<PersonMetrics> {
        let mut groups: BTreeMap<&str, MilesStats> = BTreeMap::new();

        for record in records {
            groups
                .entry(record.person.as_str())
                .or_default()
                .add(record.miles);
        }

        groups
            .into_iter()
            .map(|(person, stats)| stats.into_person(person.to_string()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(person: &str, miles: f64) -> Record {
        Record::new("2024-01-01", person, miles)
    }

    // ── aggregate_overall ─────────────────────────────────────────────────────

    #[test]
    fn test_overall_empty_is_all_zero() {
        let metrics = MetricsAggregator::aggregate_overall(&[]);
        assert_eq!(
            metrics,
            OverallMetrics {
                total_runs: 0,
                average_miles: 0.0,
                min_miles: 0.0,
                max_miles: 0.0,
            }
        );
        assert!(!metrics.average_miles.is_nan());
    }

    #[test]
    fn test_overall_basic() {
        let records = vec![run("A", 3.0), run("B", 5.0), run("C", 4.0)];
        let metrics = MetricsAggregator::aggregate_overall(&records);
        assert_eq!(metrics.total_runs, 3);
        assert_eq!(metrics.average_miles, 4.0);
        assert_eq!(metrics.min_miles, 3.0);
        assert_eq!(metrics.max_miles, 5.0);
    }

    #[test]
    fn test_overall_single_record() {
        let metrics = MetricsAggregator::aggregate_overall(&[run("A", 2.5)]);
        assert_eq!(metrics.total_runs, 1);
        assert_eq!(metrics.average_miles, 2.5);
        assert_eq!(metrics.min_miles, 2.5);
        assert_eq!(metrics.max_miles, 2.5);
    }

    #[test]
    fn test_overall_zero_miles_counts_as_min() {
        let records = vec![run("A", 4.0), run("A", 0.0)];
        let metrics = MetricsAggregator::aggregate_overall(&records);
        assert_eq!(metrics.min_miles, 0.0);
        assert_eq!(metrics.average_miles, 2.0);
    }

    #[test]
    fn test_overall_fractional_average() {
        let records = vec![run("A", 1.0), run("A", 2.0)];
        let metrics = MetricsAggregator::aggregate_overall(&records);
        assert!((metrics.average_miles - 1.5).abs() < 1e-12);
    }

    // ── aggregate_by_person ───────────────────────────────────────────────────

    #[test]
    fn test_by_person_groups_and_sorts() {
        let records = vec![run("Bob", 2.0), run("Alice", 3.0), run("Alice", 5.0)];
        let metrics = MetricsAggregator::aggregate_by_person(&records);

        assert_eq!(
            metrics,
            vec![
                PersonMetrics {
                    person: "Alice".to_string(),
                    total_runs: 2,
                    average_miles: 4.0,
                    min_miles: 3.0,
                    max_miles: 5.0,
                },
                PersonMetrics {
                    person: "Bob".to_string(),
                    total_runs: 1,
                    average_miles: 2.0,
                    min_miles: 2.0,
                    max_miles: 2.0,
                },
            ]
        );
    }

    #[test]
    fn test_by_person_is_case_sensitive() {
        let records = vec![run("alice", 1.0), run("Alice", 2.0)];
        let metrics = MetricsAggregator::aggregate_by_person(&records);
        let names: Vec<&str> = metrics.iter().map(|m| m.person.as_str()).collect();
        assert_eq!(names, vec!["Alice", "alice"]);
    }

    #[test]
    fn test_by_person_empty() {
        assert!(MetricsAggregator::aggregate_by_person(&[]).is_empty());
    }

    #[test]
    fn test_by_person_totals_match_overall() {
        let records = vec![
            run("Carol", 1.0),
            run("Alice", 2.0),
            run("Bob", 3.0),
            run("Carol", 4.0),
        ];
        let per_person = MetricsAggregator::aggregate_by_person(&records);
        let total: usize = per_person.iter().map(|m| m.total_runs).sum();
        assert_eq!(total, MetricsAggregator::aggregate_overall(&records).total_runs);
        assert_eq!(per_person.len(), 3);
    }

    #[test]
    fn test_aggregation_is_pure() {
        let records = vec![run("Bob", 2.0), run("Alice", 3.0)];
        assert_eq!(
            MetricsAggregator::aggregate_by_person(&records),
            MetricsAggregator::aggregate_by_person(&records)
        );
        assert_eq!(
            MetricsAggregator::aggregate_overall(&records),
            MetricsAggregator::aggregate_overall(&records)
        );
    }
}
