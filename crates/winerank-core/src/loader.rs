//! CSV loading
//!
//! Reads the whole input into memory as untyped string rows. Column counts are
//! not enforced here; see [`crate::validate`].
//!
//! Quoting is strict: a `"` may only open a field, a closing quote must be
//! followed by the delimiter or a line end, and a quoted field must be closed
//! before end of input. The `csv` reader tolerates all three, so the raw bytes
//! are checked first.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{RankError, Result};

/// One data row with the line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// 1-based line number in the input
    pub line: u64,
    /// Raw field values
    pub fields: Vec<String>,
}

/// Header plus data rows of a loaded file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names from the first record
    pub header: Vec<String>,
    /// Every record after the header
    pub rows: Vec<SourceRecord>,
}

/// Open `path` and read it as a table.
///
/// An input without any record fails with [`RankError::MissingHeader`].
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_table(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path).map_err(|e| RankError::io_operation("open", path.display(), e))?;

    let table = read_table(file, delimiter)?.ok_or_else(|| RankError::MissingHeader {
        path: path.to_path_buf(),
    })?;

    debug!(rows = table.rows.len(), "load_table");
    Ok(table)
}

/// Parse delimited text from `reader`.
///
/// Returns `Ok(None)` when the input holds no records.
pub fn read_table<R: Read>(mut reader: R, delimiter: u8) -> Result<Option<Table>> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    check_quoting(&input, delimiter)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input.as_slice());

    let mut records = rdr.records();

    let header = match records.next() {
        Some(record) => to_fields(&record?),
        None => return Ok(None),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push(SourceRecord {
            line,
            fields: to_fields(&record),
        });
    }

    Ok(Some(Table { header, rows }))
}

fn to_fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    /// Just read a `"` inside a quoted field: either an escape or the close
    QuoteInQuoted,
}

/// Reject quoting the `csv` reader would silently accept.
fn check_quoting(input: &[u8], delimiter: u8) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut quote_line: u64 = 1;

    for &byte in input {
        state = match (state, byte) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted | QuoteState::FieldStart | QuoteState::Unquoted, b)
                if b == delimiter || b == b'\n' || b == b'\r' =>
            {
                QuoteState::FieldStart
            }
            (QuoteState::QuoteInQuoted, _) => {
                return Err(malformed(line, "extraneous or missing \" in quoted field"));
            }
            (QuoteState::FieldStart, b'"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, b'"') => {
                return Err(malformed(line, "bare \" in non-quoted field"));
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
        };

        if byte == b'\n' {
            line += 1;
        }
    }

    if state == QuoteState::Quoted {
        return Err(malformed(quote_line, "unterminated quoted field"));
    }
    Ok(())
}

fn malformed(line: u64, reason: &str) -> RankError {
    RankError::Parse {
        line: Some(line),
        reason: reason.to_string(),
    }
}
