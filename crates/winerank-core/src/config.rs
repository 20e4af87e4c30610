//! Pipeline configuration for winerank
//!
//! The input schema is fixed, so there is no config file: `PipelineConfig::default()`
//! describes the only layout the binary accepts. Tests may build other configs.

/// Number of columns in a wine record
pub const WINE_COLUMNS: usize = 7;

/// Delimiter of the input file
pub const INPUT_DELIMITER: u8 = b',';

/// Delimiter used to join report rows
pub const OUTPUT_DELIMITER: &str = ";";

/// Label of the column appended to the header
pub const ENTRY_DATE_LABEL: &str = "Entry Date";

/// Format of the run date (ISO 8601 calendar date)
pub const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings shared by every pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Columns required in the header and in every record
    pub expected_columns: usize,
    /// Field delimiter of the input CSV
    pub input_delimiter: u8,
    /// Separator between fields of an output line
    pub output_delimiter: String,
    /// Header label for the appended run date column
    pub entry_date_label: String,
    /// `chrono` format string for the run date
    pub date_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            expected_columns: WINE_COLUMNS,
            input_delimiter: INPUT_DELIMITER,
            output_delimiter: OUTPUT_DELIMITER.to_string(),
            entry_date_label: ENTRY_DATE_LABEL.to_string(),
            date_format: ENTRY_DATE_FORMAT.to_string(),
        }
    }
}
