use serde::{Deserialize, Serialize};

/// One validated running observation read from a CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Date cell as written in the file. Never parsed, only compared as text.
    pub date: String,
    /// Runner name; the grouping key for per-person metrics.
    pub person: String,
    /// Distance run. Always finite and non-negative.
    pub miles: f64,
}

impl Record {
    pub fn new(date: impl Into<String>, person: impl Into<String>, miles: f64) -> Self {
        Self {
            date: date.into(),
            person: person.into(),
            miles,
        }
    }
}

/// Result of parsing one CSV input.
///
/// Every data row ends up either in `records` or as exactly one message in
/// `errors`; both keep input row order. Structural failures (bad header,
/// unreadable input, no data rows) produce no records and a single error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub records: Vec<Record>,
    pub errors: Vec<String>,
}

impl ParseOutcome {
    /// A whole-input rejection carrying one explanatory message.
    pub fn structural(message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![message.into()],
        }
    }

    /// `true` when at least one row was rejected or the input failed outright.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Descriptive statistics over every accepted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallMetrics {
    pub total_runs: usize,
    pub average_miles: f64,
    pub min_miles: f64,
    pub max_miles: f64,
}

/// Descriptive statistics for the records of a single person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonMetrics {
    pub person: String,
    pub total_runs: usize,
    pub average_miles: f64,
    pub min_miles: f64,
    pub max_miles: f64,
}

/// Miles per person on one date, aligned with [`ChartSeries::people`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub miles: Vec<f64>,
}

impl ChartPoint {
    /// Miles for the person at `index` in the owning series, `0.0` if out of range.
    pub fn miles_at(&self, index: usize) -> f64 {
        self.miles.get(index).copied().unwrap_or(0.0)
    }
}

/// Date-by-person pivot of the accepted records, ready for plotting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Distinct persons, ascending.
    pub people: Vec<String>,
    /// One point per distinct date, ascending.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Column of values for `person` across all dates, or `None` if unknown.
    pub fn series_for(&self, person: &str) -> Option<Vec<f64>> {
        let idx = self.people.iter().position(|p| p == person)?;
        Some(self.points.iter().map(|p| p.miles_at(idx)).collect())
    }
}
