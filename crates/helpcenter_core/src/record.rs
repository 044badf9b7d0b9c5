use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Exported,
    Skipped,
    Error,
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStatus::Exported => write!(f, "exported"),
            ExportStatus::Skipped => write!(f, "skipped"),
            ExportStatus::Error => write!(f, "error"),
        }
    }
}

/// One row of the per-run log. `path` is relative to the run directory and
/// empty unless the article was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub article_id: u64,
    pub title: String,
    pub status: ExportStatus,
    pub category: String,
    pub section: String,
    pub path: String,
    pub source_url: String,
    pub detail: String,
}
