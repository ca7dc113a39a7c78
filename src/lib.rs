//! Renoplan - conversational home renovation planner
//!
//! Renoplan combines deterministic renovation estimators with a generative
//! model for design advice and photorealistic renderings. Estimates never
//! touch the network; renderings and advisory chat go through a single
//! client boundary with a scripted mock for offline testing.
//!
//! # Core Concepts
//!
//! - **Deterministic Estimates**: Cost and timeline figures come from fixed
//!   rate tables, identical for identical inputs
//! - **Structural Preservation**: Rendering prompts carry fixed clauses that
//!   user text can never strip or override
//! - **Versioned Renderings**: Each asset keeps a stable lineage across
//!   edits and renames; failed edits never lose the last good version
//! - **One Reply Per Turn**: Remote failures degrade to explanatory
//!   messages, never to a silent turn
//!
//! # Modules
//!
//! - [`agent`] - Turn orchestration and intent dispatch
//! - [`estimate`] - Cost and timeline estimators
//! - [`llm`] - Generative client trait, Gemini implementation, mock
//! - [`prompts`] - Prompt composition over embedded templates
//! - [`render`] - Rendering workflow and asset registry
//! - [`session`] - Conversation history and pending uploads
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod agent;
pub mod cli;
pub mod config;
pub mod estimate;
pub mod llm;
pub mod prompts;
pub mod render;
pub mod repl;
pub mod session;

// Re-export commonly used types
pub use agent::{classify, AssistantReply, IntentKind, Planner};
pub use config::{Config, LlmConfig, RenderConfig};
pub use estimate::{calculate_timeline, estimate_cost, CostEstimate, EstimateError, RoomType, ScopeLevel};
pub use llm::{GeminiClient, GenerationError, GenerationRequest, GenerationResponse, GenerativeClient};
pub use prompts::PromptComposer;
pub use render::{
    ArtifactStore, AssetStatus, MemoryArtifactStore, RenderOutcome, RenderingAsset, RenderingWorkflow, WorkflowError,
};
pub use session::{Attachment, ConversationMessage, ConversationSession, MessageRole};
