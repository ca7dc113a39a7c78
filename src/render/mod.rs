//! Rendering generation and editing
//!
//! The asset registry, the create/edit workflow over the generation
//! capability, and the artifact storage boundary.

mod asset;
mod store;
mod workflow;

pub use asset::{AssetStatus, RenderingAsset};
pub use store::{ArtifactStore, MemoryArtifactStore};
pub use workflow::{FailureReason, RenderOutcome, RenderingWorkflow, WorkflowError};
