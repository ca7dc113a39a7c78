//! Rendering workflow
//!
//! Orchestrates create/edit/list against the generation capability and
//! owns the session's asset registry. Remote faults never escape as raw
//! errors: every operation returns an outcome with a user-readable
//! message. Only caller-contract violations (editing an asset that does
//! not exist) surface as hard errors.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::asset::{AssetStatus, RenderingAsset};
use super::store::ArtifactStore;
use crate::llm::{GenerationError, GenerationRequest, GenerativeClient};
use crate::prompts::PromptComposer;

/// Caller-contract violations in workflow operations
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("No rendering named '{name}' exists in this session")]
    UnknownAsset { name: String },

    #[error("An asset name is required")]
    MissingAssetName,

    #[error("A rendering named '{name}' already exists")]
    DuplicateAssetName { name: String },
}

/// Why a generation attempt produced no rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Timeout,
    EmptyResponse,
    RemoteFault,
    QuotaExceeded,
}

impl FailureReason {
    /// Classify a generation error into the closed failure vocabulary
    pub fn from_error(err: &GenerationError) -> Self {
        match err {
            GenerationError::Timeout(_) => FailureReason::Timeout,
            GenerationError::EmptyResponse => FailureReason::EmptyResponse,
            GenerationError::RateLimited { .. } => FailureReason::QuotaExceeded,
            GenerationError::ApiError { .. }
            | GenerationError::Network(_)
            | GenerationError::InvalidResponse(_)
            | GenerationError::Json(_) => FailureReason::RemoteFault,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::Timeout => "the request timed out",
            FailureReason::EmptyResponse => "the model returned no usable content",
            FailureReason::RemoteFault => "the model service reported an error",
            FailureReason::QuotaExceeded => "the request quota is exhausted",
        };
        write!(f, "{s}")
    }
}

/// The result of a create or edit operation
///
/// Always produced, never thrown: failure carries a reason and a message
/// suitable for showing to the user as-is.
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Success {
        asset_name: String,
        version: u32,
        message: String,
    },
    Failed {
        reason: FailureReason,
        message: String,
    },
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RenderOutcome::Success { .. })
    }

    /// The user-facing message for this outcome
    pub fn message(&self) -> &str {
        match self {
            RenderOutcome::Success { message, .. } => message,
            RenderOutcome::Failed { message, .. } => message,
        }
    }
}

/// Manages rendering assets for one session
pub struct RenderingWorkflow {
    client: Arc<dyn GenerativeClient>,
    composer: PromptComposer,
    store: Box<dyn ArtifactStore>,
    assets: Vec<RenderingAsset>,
    temperature: f32,
    max_output_tokens: u32,
}

impl RenderingWorkflow {
    /// Create a workflow backed by the given client and artifact store
    pub fn new(
        client: Arc<dyn GenerativeClient>,
        store: Box<dyn ArtifactStore>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Self {
        debug!(%temperature, %max_output_tokens, "RenderingWorkflow::new: called");
        Self {
            client,
            composer: PromptComposer::new(),
            store,
            assets: Vec::new(),
            temperature,
            max_output_tokens,
        }
    }

    /// Generate a new rendering
    ///
    /// On success the asset is recorded at version 1. A repeated create
    /// under an existing name starts a fresh lineage, replacing the old
    /// registry entry. On failure nothing is recorded.
    pub async fn create(&mut self, description: &str, aspect_ratio: &str, asset_name: &str) -> RenderOutcome {
        debug!(%asset_name, %aspect_ratio, "create: called");
        let prompt = self.composer.compose_create(description, aspect_ratio);

        match self.generate_text(&prompt).await {
            Ok(text) => {
                let mut asset = RenderingAsset::created(asset_name, prompt);
                self.store.put(&asset.artifact_key(), text.into_bytes());
                info!(%asset_name, "create: rendering generated");

                let message = format!(
                    "Renovation rendering generated successfully!\n\nAsset: {}\n\nThe image has been \
                     created based on your specifications. You can save this or request modifications.",
                    asset_name
                );
                let outcome = RenderOutcome::Success {
                    asset_name: asset.asset_name.clone(),
                    version: asset.version,
                    message,
                };

                // Same display name means same lineage; a fresh create replaces it
                if let Some(existing) = self.assets.iter_mut().find(|a| a.asset_name == asset_name) {
                    std::mem::swap(existing, &mut asset);
                    // `asset` now holds the replaced lineage; drop its stored content
                    let old_key = asset.artifact_key();
                    self.store.remove(&old_key);
                } else {
                    self.assets.push(asset);
                }
                outcome
            }
            Err(reason) => {
                warn!(%asset_name, %reason, "create: generation failed");
                let message = match reason {
                    FailureReason::EmptyResponse => {
                        "Rendering could not be generated. Please try again with more detailed specifications."
                            .to_string()
                    }
                    other => format!("Error generating rendering: {other}."),
                };
                RenderOutcome::Failed { reason, message }
            }
        }
    }

    /// Edit an existing rendering
    ///
    /// On success the asset's version increments and its source prompt is
    /// updated; `new_asset_name` renames the display identity without
    /// breaking the lineage. On failure the asset keeps its last
    /// successful version and prompt, with only its status marking the
    /// failed attempt. Editing a name that does not exist, or renaming
    /// onto another asset's name, is a caller error, not a failed outcome.
    pub async fn edit(
        &mut self,
        asset_name: &str,
        edit_instructions: &str,
        new_asset_name: Option<&str>,
    ) -> Result<RenderOutcome, WorkflowError> {
        debug!(%asset_name, ?new_asset_name, "edit: called");
        if asset_name.trim().is_empty() {
            return Err(WorkflowError::MissingAssetName);
        }

        let idx = self
            .assets
            .iter()
            .position(|a| a.asset_name == asset_name)
            .ok_or_else(|| WorkflowError::UnknownAsset {
                name: asset_name.to_string(),
            })?;

        // A rename must not shadow another asset's display name
        if let Some(new_name) = new_asset_name {
            if new_name != asset_name && self.assets.iter().any(|a| a.asset_name == new_name) {
                return Err(WorkflowError::DuplicateAssetName {
                    name: new_name.to_string(),
                });
            }
        }

        let prompt = self.composer.compose_edit(edit_instructions);

        match self.generate_text(&prompt).await {
            Ok(text) => {
                let previous_key = self.assets[idx].artifact_key();
                let asset = &mut self.assets[idx];
                asset.version += 1;
                asset.source_prompt = prompt;
                asset.status = AssetStatus::Edited;
                if let Some(new_name) = new_asset_name {
                    debug!(old = %asset.asset_name, new = %new_name, "edit: renaming asset");
                    asset.asset_name = new_name.to_string();
                }
                self.store
                    .put(&self.assets[idx].artifact_key(), text.into_bytes());
                // Only the current version is kept per asset
                self.store.remove(&previous_key);

                let asset = &self.assets[idx];
                info!(asset_name = %asset.asset_name, version = %asset.version, "edit: rendering edited");
                let message = format!(
                    "Rendering edited successfully!\n\nAsset: {}\n\nThe changes have been applied to \
                     your rendering.",
                    asset.asset_name
                );
                Ok(RenderOutcome::Success {
                    asset_name: asset.asset_name.clone(),
                    version: asset.version,
                    message,
                })
            }
            Err(reason) => {
                warn!(%asset_name, %reason, "edit: generation failed");
                // Version and prompt stay at the last successful state
                self.assets[idx].status = AssetStatus::Failed;
                let message = match reason {
                    FailureReason::EmptyResponse => "Rendering could not be edited. Please try again.".to_string(),
                    other => format!("Error editing rendering: {other}."),
                };
                Ok(RenderOutcome::Failed { reason, message })
            }
        }
    }

    /// Known assets in creation order; empty when none exist
    pub fn list(&self) -> &[RenderingAsset] {
        &self.assets
    }

    /// Fetch the generated content behind an asset's current version
    pub fn artifact_for(&self, asset_name: &str) -> Option<&[u8]> {
        self.assets
            .iter()
            .find(|a| a.asset_name == asset_name)
            .and_then(|a| self.store.get(&a.artifact_key()))
    }

    /// Discard all assets and their stored content (session reset)
    pub fn clear(&mut self) {
        debug!(asset_count = %self.assets.len(), "clear: called");
        for asset in &self.assets {
            self.store.remove(&asset.artifact_key());
        }
        self.assets.clear();
    }

    #[cfg(test)]
    fn stored_keys(&self) -> Vec<String> {
        self.store.list()
    }

    /// One generation call, collapsed to usable text or a failure reason
    async fn generate_text(&self, prompt: &str) -> Result<String, FailureReason> {
        let request = GenerationRequest::from_prompt(prompt, self.temperature, self.max_output_tokens);
        match self.client.generate(request).await {
            Ok(response) => match response.usable_text() {
                Some(text) => Ok(text.to_string()),
                None => Err(FailureReason::EmptyResponse),
            },
            Err(e) => Err(FailureReason::from_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockGenerativeClient, MockReply};
    use crate::render::store::MemoryArtifactStore;

    fn workflow_with(script: Vec<MockReply>) -> RenderingWorkflow {
        RenderingWorkflow::new(
            Arc::new(MockGenerativeClient::new(script)),
            Box::new(MemoryArtifactStore::new()),
            0.7,
            2048,
        )
    }

    #[tokio::test]
    async fn test_list_empty_before_any_operation() {
        let workflow = workflow_with(vec![MockReply::Text("img".to_string())]);
        assert!(workflow.list().is_empty());
    }

    #[tokio::test]
    async fn test_create_records_version_one() {
        let mut workflow = workflow_with(vec![MockReply::Text("a rendered kitchen".to_string())]);
        let outcome = workflow.create("white cabinets", "16:9", "kitchen_refresh").await;

        assert!(outcome.is_success());
        assert!(outcome.message().contains("Asset: kitchen_refresh"));
        let assets = workflow.list();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].version, 1);
        assert_eq!(assets[0].status, AssetStatus::Created);
        assert!(workflow.artifact_for("kitchen_refresh").is_some());
    }

    #[tokio::test]
    async fn test_create_then_edit_bumps_version() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("v1 content".to_string()),
            MockReply::Text("v2 content".to_string()),
        ]);
        workflow.create("white cabinets", "16:9", "kitchen_refresh").await;
        let outcome = workflow
            .edit("kitchen_refresh", "green backsplash", None)
            .await
            .unwrap();

        assert!(outcome.is_success());
        let asset = &workflow.list()[0];
        assert_eq!(asset.version, 2);
        assert_eq!(asset.status, AssetStatus::Edited);
        assert!(asset.source_prompt.contains("green backsplash"));
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_version_untouched() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("v1 content".to_string()),
            MockReply::ApiError(500),
        ]);
        workflow.create("white cabinets", "16:9", "kitchen_refresh").await;
        let v1_prompt = workflow.list()[0].source_prompt.clone();

        let outcome = workflow
            .edit("kitchen_refresh", "green backsplash", None)
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert!(matches!(
            outcome,
            RenderOutcome::Failed {
                reason: FailureReason::RemoteFault,
                ..
            }
        ));
        let asset = &workflow.list()[0];
        assert_eq!(asset.version, 1);
        assert_eq!(asset.source_prompt, v1_prompt);
        assert_eq!(asset.status, AssetStatus::Failed);
    }

    #[tokio::test]
    async fn test_create_empty_response_records_nothing() {
        let mut workflow = workflow_with(vec![MockReply::Empty]);
        let outcome = workflow.create("white cabinets", "16:9", "kitchen_refresh").await;

        assert!(!outcome.is_success());
        assert!(outcome.message().contains("could not be generated"));
        assert!(workflow.list().is_empty());
    }

    #[tokio::test]
    async fn test_edit_unknown_asset_is_hard_error() {
        let mut workflow = workflow_with(vec![MockReply::Text("img".to_string())]);
        let err = workflow.edit("nope", "make it blue", None).await.unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownAsset { .. }));
    }

    #[tokio::test]
    async fn test_edit_blank_name_is_hard_error() {
        let mut workflow = workflow_with(vec![MockReply::Text("img".to_string())]);
        let err = workflow.edit("  ", "make it blue", None).await.unwrap_err();
        assert!(matches!(err, WorkflowError::MissingAssetName));
    }

    #[tokio::test]
    async fn test_rename_keeps_lineage_and_version() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("v1".to_string()),
            MockReply::Text("v2".to_string()),
        ]);
        workflow.create("desc", "16:9", "old_name").await;
        let lineage_id = workflow.list()[0].id;

        let outcome = workflow.edit("old_name", "blue walls", Some("new_name")).await.unwrap();
        assert!(outcome.is_success());

        let asset = &workflow.list()[0];
        assert_eq!(asset.asset_name, "new_name");
        assert_eq!(asset.version, 2);
        assert_eq!(asset.id, lineage_id);
        // Old name no longer resolves
        assert!(workflow.artifact_for("old_name").is_none());
        assert!(workflow.artifact_for("new_name").is_some());
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_quota_exceeded() {
        let mut workflow = workflow_with(vec![MockReply::RateLimited]);
        let outcome = workflow.create("desc", "16:9", "kitchen").await;
        assert!(matches!(
            outcome,
            RenderOutcome::Failed {
                reason: FailureReason::QuotaExceeded,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_clear_discards_registry() {
        let mut workflow = workflow_with(vec![MockReply::Text("img".to_string())]);
        workflow.create("desc", "16:9", "kitchen").await;
        assert_eq!(workflow.list().len(), 1);

        workflow.clear();
        assert!(workflow.list().is_empty());
        assert!(workflow.artifact_for("kitchen").is_none());
    }

    #[tokio::test]
    async fn test_edit_keeps_only_current_version_content() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("v1".to_string()),
            MockReply::Text("v2".to_string()),
            MockReply::Text("v3".to_string()),
        ]);
        workflow.create("desc", "16:9", "kitchen").await;
        workflow.edit("kitchen", "oak floors", None).await.unwrap();
        workflow.edit("kitchen", "brass hardware", None).await.unwrap();

        let keys = workflow.stored_keys();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].ends_with("-v3"));
        assert_eq!(workflow.artifact_for("kitchen"), Some(b"v3".as_slice()));
    }

    #[tokio::test]
    async fn test_clear_prunes_stored_content() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("a".to_string()),
            MockReply::Text("b".to_string()),
        ]);
        workflow.create("desc", "16:9", "kitchen").await;
        workflow.create("desc", "16:9", "bathroom").await;
        assert_eq!(workflow.stored_keys().len(), 2);

        workflow.clear();
        assert!(workflow.stored_keys().is_empty());
    }

    #[tokio::test]
    async fn test_recreate_prunes_replaced_lineage_content() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("first".to_string()),
            MockReply::Text("second".to_string()),
        ]);
        workflow.create("desc one", "16:9", "kitchen").await;
        workflow.create("desc two", "16:9", "kitchen").await;

        assert_eq!(workflow.stored_keys().len(), 1);
        assert_eq!(workflow.artifact_for("kitchen"), Some(b"second".as_slice()));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_is_hard_error() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("a".to_string()),
            MockReply::Text("b".to_string()),
            MockReply::Text("c".to_string()),
        ]);
        workflow.create("desc", "16:9", "kitchen").await;
        workflow.create("desc", "16:9", "bathroom").await;

        let err = workflow
            .edit("kitchen", "blue walls", Some("bathroom"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::DuplicateAssetName { .. }));
        // Both assets untouched
        assert_eq!(workflow.list()[0].version, 1);
        assert_eq!(workflow.list()[1].asset_name, "bathroom");

        // Renaming to the asset's own name is allowed
        let outcome = workflow.edit("kitchen", "blue walls", Some("kitchen")).await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_create_same_name_starts_fresh_lineage() {
        let mut workflow = workflow_with(vec![
            MockReply::Text("first".to_string()),
            MockReply::Text("second".to_string()),
        ]);
        workflow.create("desc one", "16:9", "kitchen").await;
        let first_id = workflow.list()[0].id;

        workflow.create("desc two", "16:9", "kitchen").await;
        let assets = workflow.list();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].version, 1);
        assert_ne!(assets[0].id, first_id);
    }
}
