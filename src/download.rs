//! Packages download payloads into files.
//!
//! File naming and serialization happen locally: the backend only supplies the rows.

use crate::error::{AppError, Result};
use crate::models::{DownloadFormat, DownloadPayload, DAY_FORMAT};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// A file ready to be written: name, MIME type and bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: Vec<u8>,
}

impl DownloadArtifact {
    /// Builds `climate_data_<start>_<end>.<ext>`. JSON is pretty-printed with
    /// two-space indentation.
    pub fn from_payload(payload: &DownloadPayload, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let (format, contents) = match payload {
            DownloadPayload::Csv(text) => (DownloadFormat::Csv, text.clone().into_bytes()),
            DownloadPayload::Json(value) => {
                (DownloadFormat::Json, serde_json::to_string_pretty(value)?.into_bytes())
            },
        };

        Ok(Self {
            file_name: file_name(start, end, format),
            mime: format.mime(),
            contents,
        })
    }

    /// Writes the artifact into `dir` and returns the final path.
    ///
    /// Contents go to a `.part` file first and are renamed into place, so a failed
    /// write leaves any earlier download with the same name untouched.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let target = dir.join(&self.file_name);
        let partial = dir.join(format!("{}.part", self.file_name));

        if let Err(e) = fs::write(&partial, &self.contents) {
            error!("Failed to write {}: {}", partial.display(), e);
            let _ = fs::remove_file(&partial);
            return Err(e.into());
        }
        fs::rename(&partial, &target).map_err(|e| {
            error!("Failed to move download into {}: {}", target.display(), e);
            let _ = fs::remove_file(&partial);
            AppError::from(e)
        })?;

        info!(
            "Saved {} ({} bytes, {})",
            target.display(),
            self.contents.len(),
            self.mime
        );
        Ok(target)
    }
}

pub fn file_name(start: NaiveDate, end: NaiveDate, format: DownloadFormat) -> String {
    format!(
        "climate_data_{}_{}.{}",
        start.format(DAY_FORMAT),
        end.format(DAY_FORMAT),
        format.extension()
    )
}

/// One row of a CSV download.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownloadRecord {
    pub date: String,
    pub variable: String,
    pub value: Option<f64>,
    pub location: String,
    pub aggregation: String,
    pub units: String,
}

/// Parses up to `limit` rows of CSV download text for display.
pub fn csv_preview(text: &str, limit: usize) -> Result<Vec<DownloadRecord>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    reader
        .deserialize()
        .take(limit)
        .map(|row| row.map_err(AppError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_day;
    use serde_json::json;

    const CSV: &str = "date,variable,value,location,aggregation,units\n\
                       2023-01-01,temperature,12.5,punjab,monthly,°C\n\
                       2023-02-01,temperature,,punjab,monthly,°C\n\
                       2023-03-01,temperature,21.0,punjab,monthly,°C\n";

    fn range() -> (NaiveDate, NaiveDate) {
        (parse_day("2023-01-01").unwrap(), parse_day("2023-03-31").unwrap())
    }

    #[test]
    fn test_csv_artifact() {
        let (start, end) = range();
        let artifact =
            DownloadArtifact::from_payload(&DownloadPayload::Csv(CSV.to_string()), start, end).unwrap();
        assert_eq!(artifact.file_name, "climate_data_2023-01-01_2023-03-31.csv");
        assert_eq!(artifact.mime, "text/csv");
        assert_eq!(artifact.contents, CSV.as_bytes());
    }

    #[test]
    fn test_json_artifact_uses_two_space_indent() {
        let (start, end) = range();
        let value = json!([{"date": "2023-01-01", "value": 12.5}]);
        let artifact =
            DownloadArtifact::from_payload(&DownloadPayload::Json(value.clone()), start, end).unwrap();
        assert_eq!(artifact.file_name, "climate_data_2023-01-01_2023-03-31.json");
        assert_eq!(artifact.mime, "application/json");

        let text = String::from_utf8(artifact.contents.clone()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"date\""), "got:\n{text}");
        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), value);
    }

    #[test]
    fn test_write_to_replaces_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let (start, end) = range();
        let artifact =
            DownloadArtifact::from_payload(&DownloadPayload::Csv(CSV.to_string()), start, end).unwrap();

        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
        assert!(!dir.path().join(format!("{}.part", artifact.file_name)).exists());
    }

    #[test]
    fn test_csv_preview_handles_missing_values() {
        let rows = csv_preview(CSV, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, Some(12.5));
        assert_eq!(rows[1].value, None);
        assert_eq!(rows[1].units, "°C");
    }
}
