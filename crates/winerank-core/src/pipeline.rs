//! Load → validate → normalize → rank → print
//!
//! Every stage returns a [`Result`]; the first error aborts the run before
//! anything is written.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::error::{RankError, Result};
use crate::loader::{load_table, SourceRecord, Table};
use crate::rating::{find_rating, parse_rating};
use crate::report::{build_report, RatedRecord, Report};
use crate::trace_time;
use crate::validate::{validate_header, validate_record};

/// Counts from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Data rows read from the input
    pub records_read: usize,
    /// Rows printed after deduplication
    pub records_written: usize,
    /// Rows dropped as identical to an earlier row
    pub duplicates_collapsed: usize,
    /// Date stamped on every row
    pub run_date: NaiveDate,
}

/// Rank the wine file at `input` and print the report to `out`.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
pub fn run<W: Write>(
    input: &Path,
    config: &PipelineConfig,
    clock: &dyn Clock,
    out: &mut W,
) -> Result<RunSummary> {
    let start = Instant::now();
    let table = load_table(input, config.input_delimiter)?;
    trace_time!(start, "load", rows = table.rows.len());

    let run_date = clock.today();
    let records_read = table.rows.len();
    let report = rank_table(table, config, run_date)?;
    trace_time!(start, "rank");

    report.write_to(out)?;
    trace_time!(start, "write");

    let summary = RunSummary {
        records_read,
        records_written: report.entries.len(),
        duplicates_collapsed: report.duplicates_collapsed,
        run_date,
    };
    debug!(?summary, "run complete");
    Ok(summary)
}

/// Validate and rate every row of `table`, then build the ranked report.
pub fn rank_table(table: Table, config: &PipelineConfig, run_date: NaiveDate) -> Result<Report> {
    let Table { mut header, rows } = table;
    validate_header(&mut header, config.expected_columns)?;

    let mut records = Vec::with_capacity(rows.len());
    for mut row in rows {
        validate_record(&mut row, config.expected_columns)?;
        let rating = rate(&row)?;
        records.push(RatedRecord {
            fields: row.fields,
            rating,
        });
    }

    let run_date = format_run_date(run_date, &config.date_format)?;
    debug!(records = records.len(), %run_date, "rated records");

    Ok(build_report(&header, records, &run_date, config))
}

/// Render `date` with a chrono `strftime` pattern.
///
/// chrono reports an unknown specifier as a `fmt::Error`, which `to_string`
/// would turn into a panic.
fn format_run_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| RankError::InvalidDateFormat {
        format: format.to_string(),
    })?;
    Ok(out)
}

fn rate(row: &SourceRecord) -> Result<f64> {
    let field = find_rating(&row.fields).ok_or(RankError::RatingNotFound { line: row.line })?;
    let rating = parse_rating(field).map_err(|e| e.with_line(row.line))?;
    Ok(rating.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_table;

    const HEADER: &str = "Name,Country,Region,Vintage,Grape,Rating,Price";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn rank(input: &str) -> Result<Report> {
        let table = read_table(input.as_bytes(), b',')?.unwrap();
        rank_table(table, &PipelineConfig::default(), date())
    }

    #[test]
    fn test_scenario_parker_before_robinson() {
        let input = format!(
            "{}\nB,IT,Tuscany,2016,Sangiovese,Robinson: 18,40\nA,FR,Bordeaux,2015,Merlot,Parker: 95,50\n",
            HEADER
        );
        let report = rank(&input).unwrap();

        assert_eq!(
            report.header,
            "Name;Country;Region;Vintage;Grape;Rating;Price;Entry Date"
        );
        assert_eq!(
            report.entries[0].line,
            "A;FR;Bordeaux;2015;Merlot;Parker: 95;50;2024-03-15"
        );
        assert_eq!(report.entries[0].rating, 95.0);
        assert_eq!(
            report.entries[1].line,
            "B;IT;Tuscany;2016;Sangiovese;Robinson: 18;40;2024-03-15"
        );
        assert_eq!(report.entries[1].rating, 90.0);
    }

    #[test]
    fn test_fields_are_trimmed_in_output() {
        let input = " Name , Country,Region,Vintage,Grape,Rating,Price \n  A , FR,Bordeaux,2015,Merlot, Parker: 95 ,50\n";
        let report = rank(input).unwrap();

        assert!(report.header.starts_with("Name;Country;"));
        assert_eq!(
            report.entries[0].line,
            "A;FR;Bordeaux;2015;Merlot;Parker: 95;50;2024-03-15"
        );
    }

    #[test]
    fn test_rating_in_any_column() {
        let input = format!("{}\nParker: 88,FR,Bordeaux,2015,Merlot,n/a,50\n", HEADER);
        let report = rank(&input).unwrap();
        assert_eq!(report.entries[0].rating, 88.0);
    }

    #[test]
    fn test_header_size_mismatch() {
        let err = rank("Name,Country\nA,FR\n").unwrap_err();
        assert!(matches!(
            err,
            RankError::HeaderSize {
                expected: 7,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_record_size_mismatch_aborts() {
        let input = format!(
            "{}\nA,FR,Bordeaux,2015,Merlot,Parker: 95,50\nB,IT,Tuscany,2016,Robinson: 18,40\n",
            HEADER
        );
        let err = rank(&input).unwrap_err();
        assert!(matches!(
            err,
            RankError::RecordSize {
                line: 3,
                expected: 7,
                actual: 6
            }
        ));
    }

    #[test]
    fn test_rating_not_found_names_line() {
        let input = format!("{}\nA,FR,Bordeaux,2015,Merlot,95,50\n", HEADER);
        let err = rank(&input).unwrap_err();
        assert!(matches!(err, RankError::RatingNotFound { line: 2 }));
    }

    #[test]
    fn test_rating_errors_name_line() {
        let input = format!(
            "{}\nA,FR,Bordeaux,2015,Merlot,Parker: 95,50\nB,IT,Tuscany,2016,Sangiovese,WineSpectator: 90,40\n",
            HEADER
        );
        let err = rank(&input).unwrap_err();
        assert_eq!(err.error_type(), "unknown_scale");
        assert_eq!(err.line(), Some(3));

        let input = format!("{}\nA,FR,Bordeaux,2015,Merlot,Parker: 90: extra,50\n", HEADER);
        let err = rank(&input).unwrap_err();
        assert_eq!(err.error_type(), "rating_format");

        let input = format!("{}\nA,FR,Bordeaux,2015,Merlot,Parker: high,50\n", HEADER);
        let err = rank(&input).unwrap_err();
        assert_eq!(err.error_type(), "rating_value");
    }

    #[test]
    fn test_custom_date_format() {
        let config = PipelineConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..PipelineConfig::default()
        };
        let input = format!("{}\nA,FR,Bordeaux,2015,Merlot,Parker: 95,50\n", HEADER);
        let table = read_table(input.as_bytes(), b',').unwrap().unwrap();
        let report = rank_table(table, &config, date()).unwrap();

        assert!(report.entries[0].line.ends_with(";15/03/2024"));
    }

    #[test]
    fn test_unknown_date_specifier_is_an_error() {
        let config = PipelineConfig {
            date_format: "%Q".to_string(),
            ..PipelineConfig::default()
        };
        let input = format!("{}\nA,FR,Bordeaux,2015,Merlot,Parker: 95,50\n", HEADER);
        let table = read_table(input.as_bytes(), b',').unwrap().unwrap();
        let err = rank_table(table, &config, date()).unwrap_err();

        assert!(matches!(err, RankError::InvalidDateFormat { ref format } if format == "%Q"));
    }

    #[test]
    fn test_stray_quote_rejected_before_ranking() {
        let input = format!(
            "{}\nA,FR,Bor\"deaux,2015,Merlot,Parker: 95,50\n",
            HEADER
        );
        let err = rank(&input).unwrap_err();

        assert_eq!(err.error_type(), "parse_error");
        assert_eq!(err.line(), Some(2));
    }
}
