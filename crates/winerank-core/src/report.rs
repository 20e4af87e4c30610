//! Ranked report
//!
//! Each record is stamped with the run date and joined into one output line.
//! The joined line is also the identity of the entry: identical lines collapse,
//! the last one seen supplying the rating. Entries are ordered by descending
//! Parker rating; equal ratings keep first-appearance order.

use std::collections::HashMap;
use std::io::Write;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::Result;

/// A validated record with its Parker rating
#[derive(Debug, Clone, PartialEq)]
pub struct RatedRecord {
    pub fields: Vec<String>,
    pub rating: f64,
}

/// One output line and the rating it was sorted by
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub line: String,
    pub rating: f64,
}

/// Header line plus ranked entries, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub header: String,
    pub entries: Vec<ReportEntry>,
    /// Records dropped because an identical dated line was already present
    pub duplicates_collapsed: usize,
}

/// Stamp, deduplicate and rank `records`.
///
/// `run_date` is appended verbatim to the header's date column and to every
/// record.
pub fn build_report(
    header: &[String],
    records: Vec<RatedRecord>,
    run_date: &str,
    config: &PipelineConfig,
) -> Report {
    let delimiter = config.output_delimiter.as_str();
    let header = join_with(header, &config.entry_date_label, delimiter);

    let mut entries: Vec<ReportEntry> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut duplicates_collapsed = 0;

    for record in records {
        let line = join_with(&record.fields, run_date, delimiter);
        match index.get(&line) {
            Some(&pos) => {
                entries[pos].rating = record.rating;
                duplicates_collapsed += 1;
            }
            None => {
                index.insert(line.clone(), entries.len());
                entries.push(ReportEntry {
                    line,
                    rating: record.rating,
                });
            }
        }
    }

    // Stable, so ties keep first-appearance order
    entries.sort_by(|a, b| b.rating.total_cmp(&a.rating));

    if duplicates_collapsed > 0 {
        debug!(duplicates_collapsed, "collapsed identical records");
    }

    Report {
        header,
        entries,
        duplicates_collapsed,
    }
}

impl Report {
    /// Render the header and every entry, one per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(
            self.header.len() + 1 + self.entries.iter().map(|e| e.line.len() + 1).sum::<usize>(),
        );
        out.push_str(&self.header);
        out.push('\n');
        for entry in &self.entries {
            out.push_str(&entry.line);
            out.push('\n');
        }
        out
    }

    /// Write the rendered report in a single call
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn join_with(fields: &[String], last: &str, delimiter: &str) -> String {
    let mut parts: Vec<&str> = fields.iter().map(String::as_str).collect();
    parts.push(last);
    parts.join(delimiter)
}
