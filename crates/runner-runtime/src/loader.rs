//! Async entry points for reading and parsing running-log CSV sources.
//!
//! Each operation is a future that resolves exactly once with a complete
//! [`ParseOutcome`]. Reading happens on the tokio I/O driver; parsing is moved
//! onto the blocking pool so large inputs do not stall other tasks.

use std::path::Path;
use std::time::Instant;

use runner_core::error::{Result, RunnerError};
use runner_core::models::ParseOutcome;
use runner_core::settings::Settings;
use runner_data::analysis::{build_dashboard, Dashboard};
use runner_data::reader::{failed_outcome, parse_bytes};
use tokio::io::{AsyncRead, AsyncReadExt};

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the file at `path` and parse it.
///
/// An unreadable file resolves to a single `Failed to parse CSV: ...` error.
pub async fn parse_file(path: impl AsRef<Path>) -> ParseOutcome {
    read_and_parse(path.as_ref()).await.0
}

/// Drain `reader` to the end, then parse what was read.
pub async fn parse_async_reader<R>(mut reader: R) -> ParseOutcome
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes).await {
        return failed_outcome(RunnerError::from(e));
    }
    parse_in_background(bytes).await
}

/// Apply the file-type gate, then parse `path` and build a [`Dashboard`].
///
/// Only the gate can fail; read and content problems are reported inside
/// the dashboard's error list.
pub async fn load_dashboard(path: impl AsRef<Path>, settings: &Settings) -> Result<Dashboard> {
    let path = path.as_ref();
    if settings.require_csv_extension {
        ensure_csv_extension(path)?;
    }

    let (outcome, parse_time_seconds) = read_and_parse(path).await;
    let dashboard = build_dashboard(outcome, parse_time_seconds);

    tracing::info!(
        path = %path.display(),
        records = dashboard.records.len(),
        errors = dashboard.errors.len(),
        "loaded running log"
    );

    Ok(dashboard)
}

/// Fail with [`RunnerError::NotCsvFile`] unless `path` ends in `.csv`
/// (any letter case).
pub fn ensure_csv_extension(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(())
    } else {
        tracing::warn!("Rejecting non-CSV file {}", path.display());
        Err(RunnerError::NotCsvFile(path.to_path_buf()))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read `path`, then parse it, returning the outcome and the seconds spent
/// parsing. The read is not timed; a failed read reports `0.0`.
async fn read_and_parse(path: &Path) -> (ParseOutcome, f64) {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(source) => {
            let outcome = failed_outcome(RunnerError::FileRead {
                path: path.to_path_buf(),
                source,
            });
            return (outcome, 0.0);
        }
    };

    let start = Instant::now();
    let outcome = parse_in_background(bytes).await;
    (outcome, start.elapsed().as_secs_f64())
}

async fn parse_in_background(bytes: Vec<u8>) -> ParseOutcome {
    match tokio::task::spawn_blocking(move || parse_bytes(&bytes)).await {
        Ok(outcome) => outcome,
        Err(e) => failed_outcome(e),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use runner_core::models::Record;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE: &str = "date,person,miles run\n2024-01-01,Alice,3\n2024-01-02,Bob,-1\n";

    fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    // ── parse_file ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_parse_file_resolves_with_outcome() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.csv", SAMPLE.as_bytes());

        let outcome = parse_file(&path).await;
        assert_eq!(outcome.records, vec![Record::new("2024-01-01", "Alice", 3.0)]);
        assert_eq!(outcome.errors, vec!["Row 3: Invalid miles value \"-1\""]);
    }

    #[tokio::test]
    async fn test_parse_file_missing_is_single_error() {
        let dir = TempDir::new().unwrap();
        let outcome = parse_file(dir.path().join("absent.csv")).await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Failed to parse CSV:"));
    }

    #[tokio::test]
    async fn test_parse_file_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.csv", &[b'd', 0xff, b'\n']);

        let outcome = parse_file(&path).await;
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("not valid UTF-8"));
    }

    #[tokio::test]
    async fn test_parse_file_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.csv", SAMPLE.as_bytes());

        let first = parse_file(&path).await;
        let second = parse_file(&path).await;
        assert_eq!(first, second);
    }

    // ── parse_async_reader ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_parse_async_reader() {
        let outcome = parse_async_reader(SAMPLE.as_bytes()).await;
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_parse_async_reader_incremental_source() {
        let (mut tx, rx) = tokio::io::duplex(8);
        let writer = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            tx.write_all(SAMPLE.as_bytes()).await.unwrap();
        });

        let outcome = parse_async_reader(rx).await;
        writer.await.unwrap();

        assert_eq!(outcome.records.len(), 1);
    }

    // ── ensure_csv_extension ──────────────────────────────────────────────────

    #[test]
    fn test_ensure_csv_extension() {
        assert!(ensure_csv_extension(Path::new("runs.csv")).is_ok());
        assert!(ensure_csv_extension(Path::new("RUNS.CSV")).is_ok());
        assert!(ensure_csv_extension(Path::new("runs.Csv")).is_ok());
        assert!(ensure_csv_extension(Path::new("runs.txt")).is_err());
        assert!(ensure_csv_extension(Path::new("runs")).is_err());
    }

    // ── load_dashboard ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_dashboard() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.csv", SAMPLE.as_bytes());

        let dashboard = load_dashboard(&path, &Settings::default()).await.unwrap();
        assert_eq!(dashboard.overall.total_runs, 1);
        assert_eq!(dashboard.per_person.len(), 1);
        assert_eq!(dashboard.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_load_dashboard_missing_file_has_zero_parse_time() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let dashboard = load_dashboard(&path, &Settings::default()).await.unwrap();
        assert!(dashboard.records.is_empty());
        assert_eq!(dashboard.errors.len(), 1);
        assert!(dashboard.errors[0].starts_with("Failed to parse CSV:"));
        assert_eq!(dashboard.metadata.parse_time_seconds, 0.0);
    }

    #[tokio::test]
    async fn test_read_and_parse_times_parse() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.csv", SAMPLE.as_bytes());

        let (outcome, seconds) = read_and_parse(&path).await;
        assert_eq!(outcome.records.len(), 1);
        assert!(seconds >= 0.0 && seconds.is_finite());
    }

    #[tokio::test]
    async fn test_load_dashboard_rejects_non_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.txt", SAMPLE.as_bytes());

        let err = load_dashboard(&path, &Settings::default()).await.unwrap_err();
        assert!(matches!(err, RunnerError::NotCsvFile(_)));
        assert_eq!(err.to_string(), "Please upload a CSV file");
    }

    #[tokio::test]
    async fn test_load_dashboard_gate_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "runs.txt", SAMPLE.as_bytes());
        let settings = Settings {
            require_csv_extension: false,
            ..Default::default()
        };

        let dashboard = load_dashboard(&path, &settings).await.unwrap();
        assert!(dashboard.has_data());
    }
}
