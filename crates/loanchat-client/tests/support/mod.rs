#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_LEDGER: &str = "Date,Product Type,Amount
2025-05-24,Gold Loan,1000
2025-05-24,Business Loan,2000
2025-05-25,Gold Loan,500
";

pub fn temp_data_dir() -> std::io::Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let data_dir = dir.path().join("ledger");
    fs::create_dir_all(&data_dir)?;
    Ok((dir, data_dir))
}

pub fn write_file(path: &Path, body: &str) {
    let result = fs::write(path, body);
    assert!(result.is_ok());
}
