//! Import/export document format.
//!
//! The export document is a versioned JSON snapshot of one user's groups and
//! websites. On import, group ids from the document are remapped to freshly
//! inserted rows; websites whose group is absent from the document are
//! skipped.

use linkdock_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use super::group::Group;
use super::website::Website;

pub const EXPORT_VERSION: &str = "1.0";

/// Top-level export document.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub version: &'static str,
    pub exported_at: Timestamp,
    pub data: ExportData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub groups: Vec<Group>,
    pub websites: Vec<Website>,
}

/// How an import interacts with existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Add alongside existing groups and websites.
    Merge,
    /// Wipe the caller's groups and websites first.
    Replace,
}

impl Default for ImportMode {
    fn default() -> Self {
        ImportMode::Merge
    }
}

/// Request body for `POST /api/v1/groups/import`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    pub data: ImportData,
    #[serde(default)]
    pub mode: ImportMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportData {
    pub groups: Vec<ImportGroup>,
    pub websites: Vec<ImportWebsite>,
}

/// A group entry in an import document. The `id` is only used to remap
/// website references; the inserted row gets a fresh id.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportGroup {
    pub id: Option<DbId>,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportWebsite {
    pub group_id: DbId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub logo_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Result summary returned after an import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub groups_imported: usize,
    pub websites_imported: usize,
    pub websites_skipped: usize,
}
