//! CSV export sink for the clean inventory.
//!
//! Column order is a compatibility surface for downstream consumers; keep
//! it stable. Fields are RFC-4180 quoted, so embedded delimiters, quotes,
//! and newlines survive the round trip.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Utc;
use serde_json::json;
use url::Url;

use crate::domain::entities::DomainCandidate;
use crate::error::{AppError, map_io_error};

/// Export columns, in contract order.
pub const EXPORT_HEADER: [&str; 11] = [
    "Domain", "Age", "Price", "DR", "TF", "RD", "CF", "UR", "Status", "Indexed", "Wayback Link",
];

static WAYBACK_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://web.archive.org/web/").unwrap());

/// Builds the archive-lookup URL for a domain.
pub fn wayback_url(full_name: &str) -> String {
    WAYBACK_BASE
        .join(&format!("*/{full_name}"))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("https://web.archive.org/web/*/{full_name}"))
}

/// Renders and writes the delimited export file.
pub struct CsvExporter {
    delimiter: char,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Timestamped default file name, marking whether the export covers a
    /// selection or the whole clean set.
    pub fn default_file_name(selected: bool) -> String {
        let scope = if selected { "selected" } else { "all" };
        format!(
            "domain_hunter_export_{scope}_{}.csv",
            Utc::now().format("%Y-%m-%d")
        )
    }

    /// Renders the export as one string, header first.
    pub fn render(&self, candidates: &[&DomainCandidate]) -> String {
        let mut lines = Vec::with_capacity(candidates.len() + 1);

        lines.push(
            EXPORT_HEADER
                .iter()
                .map(|h| self.escape_field(h))
                .collect::<Vec<_>>()
                .join(&self.delimiter.to_string()),
        );

        for candidate in candidates {
            let full_name = candidate.full_name();
            let fields = [
                full_name.clone(),
                candidate.age.to_string(),
                format!("{:.2}", candidate.price),
                candidate.metrics.domain_rating.to_string(),
                candidate.metrics.trust_flow.to_string(),
                candidate.metrics.referring_domains.to_string(),
                candidate.metrics.citation_flow.to_string(),
                candidate.metrics.url_rating.to_string(),
                candidate.status.label().to_string(),
                if candidate.indexed { "Yes" } else { "No" }.to_string(),
                wayback_url(&full_name),
            ];

            lines.push(
                fields
                    .iter()
                    .map(|f| self.escape_field(f))
                    .collect::<Vec<_>>()
                    .join(&self.delimiter.to_string()),
            );
        }

        lines.join("\n")
    }

    /// Writes the export to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty export set and
    /// [`AppError::Internal`] on I/O failure.
    pub async fn write_to(
        &self,
        path: &Path,
        candidates: &[&DomainCandidate],
    ) -> Result<PathBuf, AppError> {
        if candidates.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to export",
                json!({ "path": path.display().to_string() }),
            ));
        }

        let content = self.render(candidates);
        tokio::fs::write(path, content.as_bytes())
            .await
            .map_err(|e| map_io_error("csv export", e))?;

        tracing::info!(
            path = %path.display(),
            rows = candidates.len(),
            "export written"
        );

        Ok(path.to_path_buf())
    }

    /// RFC-4180 quoting: fields containing the delimiter, a quote, or a
    /// newline are wrapped in quotes with inner quotes doubled.
    fn escape_field(&self, raw: &str) -> String {
        let needs_quoting =
            raw.contains(self.delimiter) || raw.contains('"') || raw.contains('\n') || raw.contains('\r');

        if needs_quoting {
            format!("\"{}\"", raw.replace('"', "\"\""))
        } else {
            raw.to_string()
        }
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        AnchorStatus, AuthorityMetrics, CandidateStatus, Marketplace,
    };
    use chrono::Utc;

    fn clean(name: &str, tld: &str) -> DomainCandidate {
        DomainCandidate {
            id: format!("id-{name}"),
            name: name.to_string(),
            tld: tld.to_string(),
            metrics: AuthorityMetrics {
                domain_rating: 31,
                url_rating: 24,
                referring_domains: 88,
                trust_flow: 16,
                citation_flow: 19,
                traffic: 410,
            },
            anchor_status: AnchorStatus::Clean,
            indexed: true,
            wayback_clean: true,
            archive_snapshot_count: 28,
            archive_first_seen_year: 2014,
            price: 10.28,
            marketplace: Marketplace::Registry,
            is_auction: false,
            auction_ends_at: None,
            bid_count: None,
            age: 11,
            is_expired: true,
            status: CandidateStatus::Clean,
            check_progress: 100,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_header_order_is_stable() {
        let exporter = CsvExporter::new();
        let rendered = exporter.render(&[]);
        assert_eq!(
            rendered,
            "Domain,Age,Price,DR,TF,RD,CF,UR,Status,Indexed,Wayback Link"
        );
    }

    #[test]
    fn test_row_fields_in_contract_order() {
        let exporter = CsvExporter::new();
        let candidate = clean("cryptonews", ".com");
        let rendered = exporter.render(&[&candidate]);

        let row = rendered.lines().nth(1).unwrap();
        let fields: Vec<_> = row.split(',').collect();
        assert_eq!(fields[0], "cryptonews.com");
        assert_eq!(fields[1], "11");
        assert_eq!(fields[2], "10.28");
        assert_eq!(fields[3], "31");
        assert_eq!(fields[4], "16");
        assert_eq!(fields[5], "88");
        assert_eq!(fields[6], "19");
        assert_eq!(fields[7], "24");
        assert_eq!(fields[8], "Clean");
        assert_eq!(fields[9], "Yes");
        assert_eq!(fields[10], "https://web.archive.org/web/*/cryptonews.com");
    }

    #[test]
    fn test_escaping_embedded_delimiter_and_quotes() {
        let exporter = CsvExporter::new();
        assert_eq!(exporter.escape_field("plain"), "plain");
        assert_eq!(exporter.escape_field("a,b"), "\"a,b\"");
        assert_eq!(exporter.escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(exporter.escape_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_wayback_url_shape() {
        assert_eq!(
            wayback_url("cryptonews.com"),
            "https://web.archive.org/web/*/cryptonews.com"
        );
    }

    #[test]
    fn test_default_file_name_scope() {
        assert!(CsvExporter::default_file_name(true).contains("_selected_"));
        assert!(CsvExporter::default_file_name(false).contains("_all_"));
    }

    #[tokio::test]
    async fn test_write_to_rejects_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new();
        let err = exporter
            .write_to(&dir.path().join("out.csv"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_write_to_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let candidate = clean("cryptonews", ".com");

        CsvExporter::new()
            .write_to(&path, &[&candidate])
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("Domain,"));
        assert!(content.contains("cryptonews.com"));
    }
}
