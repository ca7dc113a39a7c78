//! Advisory orchestrator
//!
//! The top-level entry point for a conversation turn. Classifies the
//! utterance, dispatches to the estimators, the rendering workflow, or the
//! advisory model, and keeps the session log current. Every turn produces
//! a reply string - remote failures degrade to an explanatory message,
//! they never leave the user without a response.

mod intent;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use intent::{classify, CreateIntent, EditIntent, EstimateIntent, IntentKind};

use crate::config::Config;
use crate::estimate::{estimate_cost, timeline_reply};
use crate::llm::{GenMessage, GenerationRequest, GenerativeClient, Part};
use crate::render::{ArtifactStore, FailureReason, RenderOutcome, RenderingAsset, RenderingWorkflow};
use crate::session::{Attachment, ConversationMessage, ConversationSession, MessageRole};

/// The assistant's answer to one turn
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub text: String,
    /// Names of rendering assets produced or updated this turn
    pub artifacts: Vec<String>,
}

impl AssistantReply {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artifacts: Vec::new(),
        }
    }
}

/// One user's renovation planning conversation
///
/// Owns the session state and the rendering workflow exclusively; turns
/// run one at a time to completion. Model access is injected at
/// construction - there is no ambient credential state.
pub struct Planner {
    advisory: Arc<dyn GenerativeClient>,
    workflow: RenderingWorkflow,
    session: ConversationSession,
    composer: crate::prompts::PromptComposer,
    temperature: f32,
    max_output_tokens: u32,
    default_aspect_ratio: String,
    default_asset_name: String,
}

impl Planner {
    /// Create a planner from injected model clients and an artifact store
    ///
    /// `advisory` answers chat turns; `rendering` backs the rendering
    /// workflow (the two may be different models).
    pub fn new(
        advisory: Arc<dyn GenerativeClient>,
        rendering: Arc<dyn GenerativeClient>,
        store: Box<dyn ArtifactStore>,
        config: &Config,
    ) -> Self {
        debug!("Planner::new: called");
        Self {
            advisory,
            workflow: RenderingWorkflow::new(rendering, store, config.llm.temperature, config.llm.max_output_tokens),
            session: ConversationSession::new(),
            composer: crate::prompts::PromptComposer::new(),
            temperature: config.llm.temperature,
            max_output_tokens: config.llm.max_output_tokens,
            default_aspect_ratio: config.render.aspect_ratio.clone(),
            default_asset_name: config.render.default_asset_name.clone(),
        }
    }

    /// Handle one conversation turn
    ///
    /// Stages any new uploads, classifies the utterance, dispatches, and
    /// appends both sides of the exchange to the session log.
    pub async fn handle_turn(&mut self, user_text: &str, new_attachments: Vec<Attachment>) -> AssistantReply {
        debug!(text_len = %user_text.len(), attachment_count = %new_attachments.len(), "handle_turn: called");

        let attachment_names: Vec<String> = new_attachments.iter().map(|a| a.filename.clone()).collect();
        for attachment in new_attachments {
            self.session.add_attachment(attachment);
        }
        self.session
            .append(ConversationMessage::user(user_text, attachment_names));

        let known: Vec<String> = self.workflow.list().iter().map(|a| a.asset_name.clone()).collect();
        let reply = match classify(user_text, &known) {
            IntentKind::Create(create) => self.handle_create(create).await,
            IntentKind::Edit(edit) => self.handle_edit(edit).await,
            IntentKind::Estimate(estimate) => self.handle_estimate(estimate),
            IntentKind::Advisory => self.handle_advisory(user_text).await,
        };

        self.session.append(ConversationMessage::assistant(reply.text.clone()));
        reply
    }

    async fn handle_create(&mut self, intent: CreateIntent) -> AssistantReply {
        let aspect_ratio = intent
            .aspect_ratio
            .unwrap_or_else(|| self.default_aspect_ratio.clone());
        let asset_name = intent.asset_name.unwrap_or_else(|| self.default_asset_name.clone());
        info!(%asset_name, %aspect_ratio, "handle_create: dispatching to rendering workflow");

        let outcome = self.workflow.create(&intent.description, &aspect_ratio, &asset_name).await;
        reply_from_outcome(outcome)
    }

    async fn handle_edit(&mut self, intent: EditIntent) -> AssistantReply {
        info!(target = %intent.target, "handle_edit: dispatching to rendering workflow");
        match self
            .workflow
            .edit(&intent.target, &intent.instructions, intent.new_name.as_deref())
            .await
        {
            Ok(outcome) => reply_from_outcome(outcome),
            // The classifier only emits known targets, but a contract
            // violation still has to come back as words, not a crash
            Err(e) => {
                warn!(error = %e, "handle_edit: workflow rejected edit");
                AssistantReply::text_only(e.to_string())
            }
        }
    }

    fn handle_estimate(&mut self, intent: EstimateIntent) -> AssistantReply {
        debug!(?intent, "handle_estimate: called");
        let mut lines = Vec::new();

        if intent.wants_cost {
            let room = intent.room.as_deref().unwrap_or("living_room");
            let scope = intent.scope.as_deref().unwrap_or("moderate");
            let area = intent.area.unwrap_or(0);
            match estimate_cost(room, scope, area) {
                Ok(estimate) => lines.push(estimate.to_string()),
                Err(e) => lines.push(e.to_string()),
            }
        }

        if intent.wants_timeline {
            let scope = intent.scope.as_deref().unwrap_or("moderate");
            lines.push(timeline_reply(scope));
        }

        AssistantReply::text_only(lines.join("\n"))
    }

    async fn handle_advisory(&mut self, user_text: &str) -> AssistantReply {
        debug!("handle_advisory: called");
        let attachments = self.session.consume_pending_attachments();

        // All prior turns as plain text; the current turn carries the
        // consumed uploads as inline image parts
        let history = self.session.history();
        let mut messages: Vec<GenMessage> = history[..history.len().saturating_sub(1)]
            .iter()
            .map(|msg| match msg.role {
                MessageRole::User => GenMessage::user_text(&msg.text),
                MessageRole::Assistant => GenMessage::model_text(&msg.text),
            })
            .collect();

        let mut parts = vec![Part::text(user_text)];
        parts.extend(attachments.iter().map(|a| a.to_part()));
        messages.push(GenMessage::user_parts(parts));

        let request = GenerationRequest {
            system_prompt: Some(self.composer.advisory_system().to_string()),
            messages,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        match self.advisory.generate(request).await {
            Ok(response) => match response.usable_text() {
                Some(text) => AssistantReply::text_only(text),
                None => {
                    warn!("handle_advisory: empty response");
                    AssistantReply::text_only(apology(FailureReason::EmptyResponse))
                }
            },
            Err(e) => {
                warn!(error = %e, "handle_advisory: generation failed");
                AssistantReply::text_only(apology(FailureReason::from_error(&e)))
            }
        }
    }

    /// Clear the conversation and discard all rendering assets
    pub fn reset(&mut self) {
        info!("reset: clearing session and rendering registry");
        self.session.reset();
        self.workflow.clear();
    }

    /// Current rendering assets, in creation order
    pub fn renderings(&self) -> &[RenderingAsset] {
        self.workflow.list()
    }

    /// Current conversation history
    pub fn history(&self) -> &[ConversationMessage] {
        self.session.history()
    }

    /// Uploads staged for the next advisory turn
    pub fn pending_attachments(&self) -> &[Attachment] {
        self.session.pending_attachments()
    }

    /// Stage an upload without running a turn
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.session.add_attachment(attachment);
    }
}

fn reply_from_outcome(outcome: RenderOutcome) -> AssistantReply {
    match outcome {
        RenderOutcome::Success {
            asset_name, message, ..
        } => AssistantReply {
            text: message,
            artifacts: vec![asset_name],
        },
        RenderOutcome::Failed { message, .. } => AssistantReply::text_only(message),
    }
}

fn apology(reason: FailureReason) -> String {
    format!(
        "I'm sorry - I couldn't get an answer from the design model just now ({reason}). \
         Please try again in a moment."
    )
}
