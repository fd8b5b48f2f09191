//! Package export port
//!
//! Export happens after a run is `Ready`. Failures are reported to the
//! caller and never change pipeline state.

use std::path::PathBuf;
use thiserror::Error;
use tourgen_domain::TourPackage;

/// Errors that can occur while exporting a package
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files produced by one export
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub document: PathBuf,
    pub images: Vec<PathBuf>,
    /// Days without a usable image (placeholder or undecodable)
    pub skipped_days: Vec<u32>,
}

/// Writes a finished package somewhere durable
pub trait PackageExporter: Send + Sync {
    /// Export `package`, using `document` as the rendered text snapshot
    fn export(&self, package: &TourPackage, document: &str) -> Result<ExportReport, ExportError>;
}
