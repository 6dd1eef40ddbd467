//! Asset model, listing filter, and pagination types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an asset. Soft deletion flips the status to `Deleted`
/// instead of removing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Archived,
    Deleted,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Archived => "archived",
            AssetStatus::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(AssetStatus::Active),
            "archived" => Some(AssetStatus::Archived),
            "deleted" => Some(AssetStatus::Deleted),
            _ => None,
        }
    }
}

impl Default for AssetStatus {
    fn default() -> Self {
        AssetStatus::Active
    }
}

/// Object-storage reference attached to an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Storage filename (the timestamp-prefixed key).
    pub filename: String,
    /// Name the file was uploaded under.
    pub original_name: String,
    pub size: u64,
    pub mimetype: String,
    /// Object-storage key.
    pub key: String,
    /// Public object URL.
    pub url: String,
}

/// A catalog asset as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
    pub metadata: BTreeMap<String, String>,
    pub status: AssetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new asset. Text fields are already trimmed and
/// the required ones are non-empty by the time this reaches a store.
#[derive(Debug, Clone, Default)]
pub struct NewAsset {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub file_info: Option<FileInfo>,
    pub metadata: BTreeMap<String, String>,
}

/// Allow-listed partial update for an asset. `id` and `createdAt` are not
/// representable here, so they can never be overwritten.
#[derive(Debug, Clone, Default)]
pub struct AssetPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<AssetStatus>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Listing filter for assets.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    /// Case-insensitive substring match on the category.
    pub category: Option<String>,
    /// Any-match against the asset's tags (exact element match).
    pub tags: Vec<String>,
    /// Case-insensitive substring match over name, description, and tags.
    pub search: Option<String>,
    pub status: AssetStatus,
}

impl AssetFilter {
    /// Whether an asset passes this filter. The in-memory store evaluates this
    /// directly; the MongoDB store builds the equivalent query document.
    pub fn matches(&self, asset: &Asset) -> bool {
        if asset.status != self.status {
            return false;
        }

        if let Some(ref category) = self.category {
            if !contains_ignore_case(&asset.category, category) {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|t| asset.tags.contains(t)) {
            return false;
        }

        if let Some(ref search) = self.search {
            let hit = contains_ignore_case(&asset.name, search)
                || contains_ignore_case(&asset.description, search)
                || asset.tags.iter().any(|t| contains_ignore_case(t, search));
            if !hit {
                return false;
            }
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Default page size when the client does not send `limit`.
pub const DEFAULT_PAGE_LIMIT: u64 = 50;

/// Upper bound on `limit`.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Clamped pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
}

impl PageParams {
    /// Clamps raw query values: `page >= 1`, `limit` within `[1, 100]`.
    pub fn clamped(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Number of records to skip before this page.
    /// Records to skip before this page. Saturates: `page` arrives unbounded
    /// from the query string, and an absurd value must read as an empty page,
    /// not an overflow.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of assets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPage {
    pub items: Vec<Asset>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}
