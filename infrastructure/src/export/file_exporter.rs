//! Package export to a local directory.
//!
//! Writes the rendered document as `<stem>.md` and each real day image as
//! `<stem>-day-<n>.<ext>`, where `<stem>` is the package name with
//! whitespace runs replaced by `-` plus `-itinerary`. Placeholder days are
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tourgen_application::{ExportError, ExportReport, PackageExporter};
use tourgen_domain::TourPackage;
use tracing::{debug, info, warn};

/// Exporter that writes into one directory
pub struct FileExporter {
    directory: PathBuf,
}

impl FileExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn write(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
        fs::write(path, contents).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PackageExporter for FileExporter {
    fn export(&self, package: &TourPackage, document: &str) -> Result<ExportReport, ExportError> {
        fs::create_dir_all(&self.directory).map_err(|source| ExportError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let stem = package.export_file_stem();
        let document_path = self.directory.join(format!("{stem}.md"));
        Self::write(&document_path, document.as_bytes())?;

        let mut report = ExportReport {
            document: document_path,
            ..Default::default()
        };

        for day in &package.days {
            let Some(file_name) = package.image_file_name(day) else {
                report.skipped_days.push(day.day);
                continue;
            };

            let Some(bytes) = day.image.as_ref().and_then(|image| image.decode_bytes()) else {
                warn!(day = day.day, "Skipping undecodable image");
                report.skipped_days.push(day.day);
                continue;
            };

            let path = self.directory.join(file_name);
            Self::write(&path, &bytes)?;
            debug!(path = %path.display(), "Wrote day image");
            report.images.push(path);
        }

        info!(
            document = %report.document.display(),
            images = report.images.len(),
            "Exported tour package"
        );
        Ok(report)
    }
}
