//! Document export — implements the
//! [`PackageExporter`](tourgen_application::PackageExporter) port.

mod file_exporter;

pub use file_exporter::FileExporter;
