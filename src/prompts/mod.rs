//! Prompt composition
//!
//! Builds generation instructions for the rendering workflow and the
//! advisory chat. Pure string construction over embedded handlebars
//! templates - no side effects, no external calls. User-supplied text is
//! interpolated into a slot inside the template, so it can never override
//! or strip the structural-preservation clauses that surround it.

pub mod embedded;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

pub use embedded::{ADVISORY_SYSTEM, CREATE_STRUCTURAL_CLAUSES, EDIT_STRUCTURAL_CLAUSES};

#[derive(Serialize)]
struct CreateContext<'a> {
    description: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Serialize)]
struct EditContext<'a> {
    instructions: &'a str,
}

/// Composes rendering and advisory instructions from embedded templates
pub struct PromptComposer {
    hbs: Handlebars<'static>,
}

impl PromptComposer {
    /// Create a composer with the embedded templates registered
    pub fn new() -> Self {
        debug!("PromptComposer::new: called");
        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_template_string("create-rendering", embedded::CREATE_TEMPLATE)
            .expect("embedded create template is valid");
        hbs.register_template_string("edit-rendering", embedded::EDIT_TEMPLATE)
            .expect("embedded edit template is valid");
        Self { hbs }
    }

    /// Compose a create-rendering instruction
    ///
    /// Embeds the user's description and the requested aspect ratio inside
    /// the fixed structural-preservation requirements.
    pub fn compose_create(&self, description: &str, aspect_ratio: &str) -> String {
        debug!(description_len = %description.len(), %aspect_ratio, "compose_create: called");
        self.hbs
            .render(
                "create-rendering",
                &CreateContext {
                    description,
                    aspect_ratio,
                },
            )
            .expect("embedded create template renders for any input")
    }

    /// Compose an edit-rendering instruction
    pub fn compose_edit(&self, instructions: &str) -> String {
        debug!(instructions_len = %instructions.len(), "compose_edit: called");
        self.hbs
            .render("edit-rendering", &EditContext { instructions })
            .expect("embedded edit template renders for any input")
    }

    /// System instruction for advisory chat turns
    pub fn advisory_system(&self) -> &'static str {
        embedded::ADVISORY_SYSTEM
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}
