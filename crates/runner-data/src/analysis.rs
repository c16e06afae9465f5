//! One-shot pipeline from raw CSV to everything a dashboard displays.
//!
//! Parses the input, then derives overall metrics, per-person metrics and the
//! chart series from the accepted records, returning a [`Dashboard`].

use chrono::Utc;
use runner_core::models::{ChartSeries, OverallMetrics, ParseOutcome, PersonMetrics, Record};
use serde::{Deserialize, Serialize};

use crate::aggregator::MetricsAggregator;
use crate::chart::build_chart_series;
use crate::reader::parse_str;

// ── Public types ──────────────────────────────────────────────────────────────

/// Bookkeeping produced alongside a [`Dashboard`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetadata {
    /// ISO-8601 timestamp when this dashboard was generated.
    pub generated_at: String,
    /// Rows turned into records.
    pub rows_accepted: usize,
    /// Rows rejected, or 1 for a structural failure.
    pub rows_rejected: usize,
    /// Wall-clock seconds spent parsing the input, excluding any file read.
    pub parse_time_seconds: f64,
}

/// The complete output of [`analyze_csv`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub records: Vec<Record>,
    pub errors: Vec<String>,
    pub overall: OverallMetrics,
    pub per_person: Vec<PersonMetrics>,
    pub chart: ChartSeries,
    pub metadata: DashboardMetadata,
}

impl Dashboard {
    /// `true` when at least one record survived validation.
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }

    /// `true` when there is nothing to show: no records and no errors.
    pub fn is_empty_state(&self) -> bool {
        self.records.is_empty() && self.errors.is_empty()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Parse `input` and compute every derived view over the accepted records.
pub fn analyze_csv(input: &str) -> Dashboard {
    let parse_start = std::time::Instant::now();
    let outcome = parse_str(input);
    let parse_time = parse_start.elapsed().as_secs_f64();

    build_dashboard(outcome, parse_time)
}

/// Derive a [`Dashboard`] from an outcome parsed elsewhere.
pub fn build_dashboard(outcome: ParseOutcome, parse_time_seconds: f64) -> Dashboard {
    let ParseOutcome { records, errors } = outcome;

    let overall = MetricsAggregator::aggregate_overall(&records);
    let per_person = MetricsAggregator::aggregate_by_person(&records);
    let chart = build_chart_series(&records);

    let metadata = DashboardMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_accepted: records.len(),
        rows_rejected: errors.len(),
        parse_time_seconds,
    };

    tracing::debug!(
        accepted = metadata.rows_accepted,
        rejected = metadata.rows_rejected,
        people = per_person.len(),
        "dashboard built"
    );

    Dashboard {
        records,
        errors,
        overall,
        per_person,
        chart,
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
