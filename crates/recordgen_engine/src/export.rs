use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use recordgen_core::Record;
use tempfile::NamedTempFile;

/// File name offered for the downloaded table.
pub const CSV_FILENAME: &str = "generated_data.csv";
pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no rows to export")]
    EmptyDataset,
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
    pub mime: &'static str,
}

/// Serializes rows as CSV.
///
/// The header lists the record fields unquoted. Every value is quoted and an
/// embedded `"` is written as `\"`. Lines are separated by `\n` with no
/// trailing newline.
pub fn records_to_csv(rows: &[Record]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::EmptyDataset);
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(Record::FIELDS.join(","));
    for row in rows {
        let values: Vec<String> = row.values().iter().map(|value| quote(value)).collect();
        lines.push(values.join(","));
    }
    Ok(lines.join("\n"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Writes `{dir}/generated_data.csv`, replacing any previous export.
pub fn export_csv(dir: &Path, rows: &[Record]) -> Result<ExportSummary, ExportError> {
    let csv = records_to_csv(rows)?;
    let output_path = write_atomically(dir, CSV_FILENAME, csv.as_bytes())?;
    Ok(ExportSummary {
        row_count: rows.len(),
        output_path,
        mime: CSV_MIME,
    })
}

/// Writes through a temp file in `dir` and renames it into place, so a
/// failed export never leaves a truncated file behind.
fn write_atomically(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf, ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir)
        .map_err(|err| ExportError::OutputDir(format!("{}: {err}", dir.display())))?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|err| ExportError::OutputDir(format!("{}: {err}", dir.display())))?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|err| ExportError::Io(err.error))?;
    Ok(target)
}
