//! Date-by-person pivot used to plot miles over time.

use std::collections::{BTreeMap, BTreeSet};

use runner_core::models::{ChartPoint, ChartSeries, Record};

/// Pivot `records` into one [`ChartPoint`] per distinct date.
///
/// Dates and people are both sorted ascending by code point. A person with
/// no run on a date gets `0.0`; when a person appears twice on the same date
/// the later record wins.
pub fn build_chart_series(records: &[Record]) -> ChartSeries {
    let people: Vec<String> = records
        .iter()
        .map(|r| r.person.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut by_date: BTreeMap<&str, BTreeMap<&str, f64>> = BTreeMap::new();
    for record in records {
        by_date
            .entry(record.date.as_str())
            .or_default()
            .insert(record.person.as_str(), record.miles);
    }

    let points = by_date
        .into_iter()
        .map(|(date, runs)| ChartPoint {
            date: date.to_string(),
            miles: people
                .iter()
                .map(|p| runs.get(p.as_str()).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    ChartSeries { people, points }
}
