//! Column-count validation
//!
//! Every field is trimmed before its row is counted. The first row that does
//! not match the expected width rejects the whole input.

use crate::error::{RankError, Result};
use crate::loader::SourceRecord;

/// Remove leading and trailing whitespace from every field in place
pub fn trim_fields(fields: &mut [String]) {
    for field in fields.iter_mut() {
        let trimmed = field.trim();
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }
}

/// Whether `fields` has exactly `expected` columns
pub fn check_size(fields: &[String], expected: usize) -> bool {
    fields.len() == expected
}

/// Trim the header and check its width
pub fn validate_header(header: &mut [String], expected: usize) -> Result<()> {
    trim_fields(header);
    if !check_size(header, expected) {
        return Err(RankError::HeaderSize {
            expected,
            actual: header.len(),
        });
    }
    Ok(())
}

/// Trim a data row and check its width
pub fn validate_record(record: &mut SourceRecord, expected: usize) -> Result<()> {
    trim_fields(&mut record.fields);
    if !check_size(&record.fields, expected) {
        return Err(RankError::RecordSize {
            line: record.line,
            expected,
            actual: record.fields.len(),
        });
    }
    Ok(())
}
