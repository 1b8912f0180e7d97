use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const REPORT_FILE_PREFIX: &str = "CardioShield_Report_";

/// Where a finished report goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Saved under [`report_filename`].
    #[default]
    File,
    /// Handed to a viewer as raw bytes.
    Stream,
}

/// A finished PDF and what the caller should do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportArtifact {
    File { filename: String, bytes: Vec<u8> },
    Stream { bytes: Vec<u8> },
}

impl ReportArtifact {
    pub fn bytes(&self) -> &[u8] {
        match self {
            ReportArtifact::File { bytes, .. } | ReportArtifact::Stream { bytes } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ReportArtifact::File { bytes, .. } | ReportArtifact::Stream { bytes } => bytes,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            ReportArtifact::File { filename, .. } => Some(filename),
            ReportArtifact::Stream { .. } => None,
        }
    }
}

/// `CardioShield_Report_<YYYY-MM-DD>.pdf`
pub fn report_filename(date: NaiveDate) -> String {
    format!("{REPORT_FILE_PREFIX}{}.pdf", date.format("%Y-%m-%d"))
}

/// Writes the artifact into `dir`. Stream artifacts have no name of their
/// own and are saved under `report.pdf`.
pub fn persist(artifact: &ReportArtifact, dir: &Path) -> Result<PathBuf> {
    let name = artifact.filename().unwrap_or("report.pdf");
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, artifact.bytes())?;
    log::info!("saved {} ({} bytes)", path.display(), artifact.bytes().len());
    Ok(path)
}

/// Hands the artifact bytes to a viewer sink.
pub fn stream_to<W: Write>(artifact: &ReportArtifact, sink: &mut W) -> Result<()> {
    sink.write_all(artifact.bytes())?;
    sink.flush()?;
    log::info!("streamed {} bytes", artifact.bytes().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(report_filename(date), "CardioShield_Report_2024-03-09.pdf");
    }

    #[test]
    fn stream_writes_all_bytes() {
        let artifact = ReportArtifact::Stream {
            bytes: b"%PDF-1.7 test".to_vec(),
        };
        let mut sink = Vec::new();
        stream_to(&artifact, &mut sink).unwrap();
        assert_eq!(sink, b"%PDF-1.7 test");
        assert!(artifact.filename().is_none());
    }

    #[test]
    fn persist_writes_named_file() {
        let dir = std::env::temp_dir().join(format!("cardioshield-output-{}", std::process::id()));
        let artifact = ReportArtifact::File {
            filename: "CardioShield_Report_2024-01-02.pdf".to_string(),
            bytes: vec![1, 2, 3],
        };
        let path = persist(&artifact, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "CardioShield_Report_2024-01-02.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
