// src/pipeline/verify.rs

//! Consistency check over the six published documents.

use std::fmt;

use crate::error::{AppError, Result};
use crate::models::{CURATED_FILE, Region};
use crate::storage::SnapshotStorage;

/// State of one document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Valid {
        total_stations: usize,
        last_updated: String,
    },
    Missing,
    Invalid(String),
}

/// One checked document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    pub file: String,
    pub status: DocumentStatus,
}

impl fmt::Display for DocumentCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            DocumentStatus::Valid {
                total_stations,
                last_updated,
            } => write!(
                f,
                "{}: {} stations, updated {}",
                self.file, total_stations, last_updated
            ),
            DocumentStatus::Missing => write!(f, "{}: missing", self.file),
            DocumentStatus::Invalid(reason) => write!(f, "{}: invalid ({})", self.file, reason),
        }
    }
}

/// Result of checking every document.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub documents: Vec<DocumentCheck>,
}

impl VerifyReport {
    pub fn is_valid(&self) -> bool {
        self.documents
            .iter()
            .all(|d| matches!(d.status, DocumentStatus::Valid { .. }))
    }

    /// Sum of `totalStations` over the valid documents.
    pub fn total_stations(&self) -> usize {
        self.documents
            .iter()
            .map(|d| match d.status {
                DocumentStatus::Valid { total_stations, .. } => total_stations,
                _ => 0,
            })
            .sum()
    }
}

/// Check that the curated document and all region documents exist, parse,
/// and carry a `totalStations` matching their station list.
///
/// Only storage faults other than missing or malformed documents are errors.
pub async fn run_verify(storage: &dyn SnapshotStorage) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    let curated = storage.read_curated().await;
    report.documents.push(check(
        CURATED_FILE.to_string(),
        curated.map(|doc| doc.map(|d| (d.total_stations, d.stations.len(), d.last_updated))),
    )?);

    for region in Region::ALL {
        let document = storage.read_region(region).await;
        report.documents.push(check(
            region.file_name(),
            document.map(|doc| doc.map(|d| (d.total_stations, d.stations.len(), d.last_updated))),
        )?);
    }

    for document in &report.documents {
        match document.status {
            DocumentStatus::Valid { .. } => log::info!("{}", document),
            _ => log::warn!("{}", document),
        }
    }
    log::info!("Total across documents: {}", report.total_stations());

    Ok(report)
}

type Loaded = Result<Option<(usize, usize, String)>>;

fn check(file: String, loaded: Loaded) -> Result<DocumentCheck> {
    let status = match loaded {
        Ok(None) => DocumentStatus::Missing,
        Ok(Some((total, actual, _))) if total != actual => DocumentStatus::Invalid(format!(
            "totalStations is {total} but {actual} stations are listed"
        )),
        Ok(Some((total_stations, _, last_updated))) => DocumentStatus::Valid {
            total_stations,
            last_updated,
        },
        Err(AppError::Json(e)) => DocumentStatus::Invalid(e.to_string()),
        Err(e) => return Err(e),
    };
    Ok(DocumentCheck { file, status })
}
