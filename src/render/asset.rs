//! Rendering asset model
//!
//! A rendering's lineage is its `id`: stable across edits and renames. The
//! `asset_name` is the display identity the user refers to; version starts
//! at 1 on creation and increments only on successful edits.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a rendering asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// First successful generation
    Created,
    /// At least one successful edit applied
    Edited,
    /// The most recent edit attempt failed; version and prompt still
    /// reflect the last successful generation
    Failed,
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetStatus::Created => "created",
            AssetStatus::Edited => "edited",
            AssetStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One generated rendering and its edit lineage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingAsset {
    /// Lineage identity, stable across edits and renames
    pub id: Uuid,
    /// User-visible display name
    pub asset_name: String,
    /// Monotonically increasing, bumped on each successful edit
    pub version: u32,
    /// The instruction that produced the current version
    pub source_prompt: String,
    pub status: AssetStatus,
}

impl RenderingAsset {
    /// Record a freshly created asset at version 1
    pub fn created(asset_name: impl Into<String>, source_prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_name: asset_name.into(),
            version: 1,
            source_prompt: source_prompt.into(),
            status: AssetStatus::Created,
        }
    }

    /// Artifact store key for the current version
    pub fn artifact_key(&self) -> String {
        format!("{}-v{}", self.id, self.version)
    }

    /// One-line summary for listings
    pub fn summary(&self) -> String {
        format!("{} (v{}, {})", self.asset_name, self.version, self.status)
    }
}
