use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "Name,Country,Region,Vintage,Grape,Rating,Price";

pub fn winerank() -> Command {
    cargo_bin_cmd!("winerank")
}

/// Write a wine CSV with the standard header followed by `rows`
pub fn write_wines(dir: &Path, rows: &[&str]) -> PathBuf {
    let mut content = format!("{}\n", HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    write_raw(dir, &content)
}

/// Write `content` verbatim as the input file
pub fn write_raw(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("wines.csv");
    fs::write(&path, content).expect("Failed to write input file");
    path
}

/// Dates a run that just finished may have stamped (covers midnight)
pub fn run_dates() -> Vec<String> {
    let today = chrono::Local::now().date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    vec![
        today.format("%Y-%m-%d").to_string(),
        yesterday.format("%Y-%m-%d").to_string(),
    ]
}
