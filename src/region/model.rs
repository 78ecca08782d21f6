//! Region data model.
//!
//! Field names follow the directory's JSON (`serverUrl`, `countryName`,
//! `iconUrl`) so a descriptor round-trips unchanged through the
//! `selectedRegion` storage key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage key holding the bare server URL.
pub const SERVER_URL_KEY: &str = "serverUrl";
/// Storage key holding the JSON-encoded [`RegionDescriptor`].
pub const SELECTED_REGION_KEY: &str = "selectedRegion";

/// One selectable server region as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDescriptor {
    pub server_url: String,
    /// Localized display names keyed by locale code (`am`, `ru`, ...).
    #[serde(default)]
    pub country_name: BTreeMap<String, String>,
    #[serde(default)]
    pub icon_url: String,
}

impl RegionDescriptor {
    /// Name for `locale`, else the first localized name, else the server URL.
    pub fn display_name(&self, locale: &str) -> &str {
        self.country_name
            .get(locale)
            .or_else(|| self.country_name.values().next())
            .map(String::as_str)
            .unwrap_or(self.server_url.as_str())
    }
}

/// Body of `GET /api/settings/get-servers`.
#[derive(Debug, Deserialize)]
pub struct DirectoryResponse {
    pub payload: Vec<RegionDescriptor>,
}

/// What the store remembers about the user's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSelection {
    pub server_url: String,
    /// Absent when only the legacy `serverUrl` key was written.
    pub region: Option<RegionDescriptor>,
}

impl PersistedSelection {
    pub fn from_region(region: RegionDescriptor) -> Self {
        Self {
            server_url: region.server_url.clone(),
            region: Some(region),
        }
    }
}
