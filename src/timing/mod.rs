//! Elapsed-time aggregation over AMICA logs
//!
//! AMICA prints iteration timings like `iter 12 lrate 0.05 (175.76 s)`. The
//! scan extracts the number between the first `(` and the first `s` after
//! it; lines without a parsable token contribute nothing.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const SECONDS_PER_HOUR: f64 = 3600.0;

static DURATION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^s]*)s").expect("valid regex"));

/// Running total of a log scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationTotals {
    pub seconds: f64,
    pub lines_matched: usize,
}

impl DurationTotals {
    pub fn add(&mut self, seconds: f64) {
        self.seconds += seconds;
        self.lines_matched += 1;
    }

    pub fn hours(&self) -> f64 {
        self.seconds / SECONDS_PER_HOUR
    }
}

/// Duration in seconds carried by `line`, if any.
pub fn parse_duration(line: &str) -> Option<f64> {
    let captures = DURATION_TOKEN.captures(line)?;
    captures.get(1)?.as_str().trim().parse().ok()
}

/// Sum every duration token in `reader`, one line at a time.
///
/// Invalid UTF-8 is decoded lossily rather than aborting the scan.
pub fn sum_durations<R: BufRead>(mut reader: R) -> io::Result<DurationTotals> {
    let mut totals = DurationTotals::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(seconds) = parse_duration(&line) {
            totals.add(seconds);
        }
    }

    Ok(totals)
}

/// Total hours recorded in the log at `path`.
pub fn total_hours(path: &Path) -> Result<f64> {
    Ok(scan_file(path)?.hours())
}

/// Scan the log at `path`; failing to open or read it is an error.
pub fn scan_file(path: &Path) -> Result<DurationTotals> {
    let file =
        File::open(path).with_context(|| format!("Failed opening log file: {}", path.display()))?;
    let totals = sum_durations(BufReader::new(file))
        .with_context(|| format!("Failed reading log file: {}", path.display()))?;
    tracing::debug!(
        "Matched {} duration lines in {} ({:.2} s)",
        totals.lines_matched,
        path.display(),
        totals.seconds
    );
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_duration_token() {
        assert_eq!(parse_duration("iter 1 (175.76 s) done"), Some(175.76));
        assert_eq!(parse_duration("(24.24s)"), Some(24.24));
        assert_eq!(parse_duration("(  3 \t s"), Some(3.0));
    }

    #[test]
    fn test_parse_duration_ignores_s_before_paren() {
        // The "s" in "step" precedes the paren and must not end the token.
        assert_eq!(parse_duration("step (12.5 s) done"), Some(12.5));
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        assert_eq!(parse_duration("(abc s)"), None);
        assert_eq!(parse_duration("no token here"), None);
        assert_eq!(parse_duration("(12.5 minutes"), None);
        assert_eq!(parse_duration("(s)"), None);
        assert_eq!(parse_duration("s (12"), None);
        assert_eq!(parse_duration("((12 s"), None);
    }

    #[test]
    fn test_sum_durations_over_lines() {
        let log = "step (175.76 s) done\nnoise line\nstep (24.24 s) done\n";
        let totals = sum_durations(log.as_bytes()).expect("scan");
        assert_eq!(totals.lines_matched, 2);
        assert!(approx(totals.seconds, 200.0));
        assert!(approx(totals.hours(), 200.0 / 3600.0));
    }

    #[test]
    fn test_sum_durations_skips_malformed_lines() {
        let log = "(abc s)\n(10 s)\n";
        let totals = sum_durations(log.as_bytes()).expect("scan");
        assert_eq!(totals.lines_matched, 1);
        assert!(approx(totals.seconds, 10.0));
    }

    #[test]
    fn test_sum_durations_last_line_without_newline() {
        let totals = sum_durations("(1 s)\n(2 s)".as_bytes()).expect("scan");
        assert!(approx(totals.seconds, 3.0));
    }

    #[test]
    fn test_sum_durations_tolerates_invalid_utf8() {
        let log: &[u8] = b"\xff\xfe garbage\n(7.5 s)\n";
        let totals = sum_durations(log).expect("scan");
        assert!(approx(totals.seconds, 7.5));
    }

    #[test]
    fn test_total_hours_from_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("out.txt");
        fs::write(&path, "step (175.76 s) done\nstep (24.24 s) done\n").expect("write");

        let hours = total_hours(&path).expect("hours");
        assert!((hours - 0.0556).abs() < 1e-4);
    }

    #[test]
    fn test_total_hours_empty_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("empty.txt");
        fs::write(&path, "").expect("write");

        assert_eq!(total_hours(&path).expect("hours"), 0.0);
    }

    #[test]
    fn test_total_hours_missing_file_is_error() {
        let tmp = TempDir::new().expect("tmp");
        assert!(total_hours(&tmp.path().join("missing.txt")).is_err());
    }
}
