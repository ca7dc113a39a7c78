//! Interactive REPL for renoplan
//!
//! A conversational planning session in the terminal: free text goes to the
//! planner, slash commands manage the session, `/upload` stages reference
//! images for the next advisory turn.

mod session;

pub use session::ReplSession;

use eyre::Result;

use crate::agent::Planner;
use crate::config::Config;
use crate::llm::create_client;
use crate::render::MemoryArtifactStore;

/// Run the interactive REPL
///
/// This is the main entry point for `renoplan chat`.
pub async fn run_interactive(config: &Config, initial: Option<String>) -> Result<()> {
    // Validate API key early
    config.validate()?;

    let advisory = create_client(&config.llm, &config.llm.advisory_model)
        .map_err(|e| eyre::eyre!("Failed to create advisory client: {}", e))?;
    let rendering = create_client(&config.llm, &config.llm.rendering_model)
        .map_err(|e| eyre::eyre!("Failed to create rendering client: {}", e))?;

    let planner = Planner::new(advisory, rendering, Box::new(MemoryArtifactStore::new()), config);

    let mut session = ReplSession::new(planner);
    session.run(initial).await
}
