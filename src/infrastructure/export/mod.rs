//! Export sink implementations.

pub mod csv_exporter;

pub use csv_exporter::{CsvExporter, EXPORT_HEADER, wayback_url};
