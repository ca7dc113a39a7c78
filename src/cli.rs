//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Renoplan - conversational home renovation planner
#[derive(Parser)]
#[command(
    name = "renoplan",
    about = "Conversational home renovation planner with cost, timeline, and rendering workflows",
    version,
    after_help = "Logs are written to: ~/.local/share/renoplan/logs/renoplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive planning session
    Chat {
        /// First message to send before the prompt appears
        initial: Option<String>,
    },

    /// Print a cost estimate without starting a session
    Estimate {
        /// Room type: kitchen, bathroom, bedroom, or living_room
        room: String,

        /// Scope level: cosmetic, moderate, full, or luxury
        #[arg(default_value = "moderate")]
        scope: String,

        /// Room area in square feet
        #[arg(short, long, default_value = "100")]
        area: i64,
    },

    /// Print a timeline estimate without starting a session
    Timeline {
        /// Scope level: cosmetic, moderate, full, or luxury
        scope: String,
    },

    /// Internal: print the composed rendering prompt for a description
    #[command(hide = true)]
    Compose {
        /// Rendering description
        description: String,

        /// Aspect ratio
        #[arg(short = 'r', long, default_value = "16:9")]
        aspect_ratio: String,
    },
}
