//! REPL session management

use std::path::Path;

use colored::Colorize;
use eyre::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::agent::Planner;
use crate::session::Attachment;

/// Interactive planning session
pub struct ReplSession {
    planner: Planner,
}

impl ReplSession {
    /// Create a new REPL session around a planner
    pub fn new(planner: Planner) -> Self {
        Self { planner }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial: Option<String>) -> Result<()> {
        self.print_welcome();

        // If an initial message was provided, process it first
        if let Some(text) = initial {
            println!("{} {}", ">".bright_green(), text);
            self.process_user_input(&text).await;
        }

        // Create readline editor for proper line editing
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        // Main REPL loop
        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    // Handle slash commands
                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "Renoplan Interactive Planner".bright_cyan().bold());
        println!("Describe your renovation, ask for costs and timelines, or request renderings.");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/clear" | "/c" => {
                self.planner.reset();
                println!("{}", "Session cleared: history, uploads, and renderings discarded.".dimmed());
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/renderings" => {
                self.print_renderings();
                SlashResult::Continue
            }
            "/upload" => {
                match parts.get(1) {
                    Some(path) => self.stage_upload(path),
                    None => println!("{} Usage: /upload <path-to-image>", "?".yellow()),
                }
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:16} Show this help", "/help".yellow());
        println!("  {:16} Exit the planner", "/quit".yellow());
        println!("  {:16} Clear the session (history, uploads, renderings)", "/clear".yellow());
        println!("  {:16} Show conversation history", "/history".yellow());
        println!("  {:16} List rendering assets", "/renderings".yellow());
        println!("  {:16} Stage a reference image for the next question", "/upload <path>".yellow());
        println!();
        println!("{}", "Things to try:".bright_cyan());
        println!("  How much would a moderate kitchen renovation cost for 120 sq ft?");
        println!("  What's the timeline for a full renovation?");
        println!("  Create a rendering of my kitchen with white cabinets, call it dream_kitchen");
        println!("  Change dream_kitchen to have oak floors");
        println!();
    }

    /// Print conversation history
    fn print_history(&self) {
        let history = self.planner.history();
        if history.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, msg) in history.iter().enumerate() {
            let role = match msg.role {
                crate::session::MessageRole::User => "User".bright_green(),
                crate::session::MessageRole::Assistant => "Assistant".bright_blue(),
            };
            let preview: String = msg.text.chars().take(50).collect();
            let preview = if msg.text.chars().count() > 50 {
                format!("{}...", preview)
            } else {
                preview
            };
            if msg.attachment_names.is_empty() {
                println!("  {}. {}: {}", i + 1, role, preview);
            } else {
                println!(
                    "  {}. {}: {} {}",
                    i + 1,
                    role,
                    preview,
                    format!("[{}]", msg.attachment_names.join(", ")).dimmed()
                );
            }
        }
        println!();
    }

    /// Print the rendering asset registry
    fn print_renderings(&self) {
        let assets = self.planner.renderings();
        if assets.is_empty() {
            println!("{}", "No renderings yet.".dimmed());
            return;
        }

        println!();
        println!("{}", "Renderings:".bright_cyan());
        for asset in assets {
            println!("  {}", asset.summary());
        }
        println!();
    }

    /// Read an image file and stage it for the next advisory turn
    fn stage_upload(&mut self, path: &str) {
        let path = Path::new(path);
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match std::fs::read(path) {
            Ok(bytes) => {
                let attachment = Attachment::new(filename, bytes);
                println!(
                    "{} Staged {} ({}, {} bytes) for your next question",
                    "+".bright_green(),
                    attachment.filename.bright_white(),
                    attachment.mime_type(),
                    attachment.bytes.len()
                );
                self.planner.add_attachment(attachment);
            }
            Err(e) => {
                println!("{} Could not read {}: {}", "Error:".red(), path.display(), e);
            }
        }
    }

    /// Send free text to the planner and print the reply
    async fn process_user_input(&mut self, input: &str) {
        let reply = self.planner.handle_turn(input, Vec::new()).await;
        println!();
        println!("{}", reply.text);
        for name in &reply.artifacts {
            println!("{}", format!("[rendering asset: {}]", name).dimmed());
        }
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
