//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::commands::SlashCommand;
use super::display;
use crate::app::App;
use crate::chat::{ChatError, Outcome};

/// Interactive catalog and chat session
pub struct ReplSession {
    app: App,
}

impl ReplSession {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_message: Option<String>) -> Result<()> {
        self.print_welcome();

        if let Some(message) = initial_message {
            println!("{} {}", ">".bright_green(), message);
            self.send(&message).await;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    match SlashCommand::parse(input) {
                        Some(command) => {
                            if let SlashResult::Quit = self.handle_slash_command(command).await {
                                break;
                            }
                        }
                        None => self.send(input).await,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
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

    fn print_welcome(&self) {
        println!();
        println!("{}", "RoutineChat".bright_cyan().bold());
        println!("{} products loaded", self.app.catalog().len());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        display::print_view(self.app.view());
        println!();
    }

    async fn handle_slash_command(&mut self, command: SlashCommand) -> SlashResult {
        debug!(?command, "handle_slash_command: called");
        match command {
            SlashCommand::Help => self.print_help(),
            SlashCommand::Quit => return SlashResult::Quit,
            SlashCommand::Categories => display::print_categories(&self.app.catalog().categories()),
            SlashCommand::Products(None) => {
                display::print_alert("Pick a category:");
                display::print_categories(&self.app.catalog().categories());
            }
            SlashCommand::Products(Some(category)) => {
                display::print_view(self.app.show_category(&category));
            }
            SlashCommand::Select(ids) if ids.is_empty() => {
                display::print_alert("Usage: /select <id> [id...]");
            }
            SlashCommand::Select(ids) => {
                let before = self.app.selection().revision();
                for id in &ids {
                    if let Err(e) = self.app.select(id) {
                        display::print_alert(&e.to_string());
                    }
                }
                if self.app.selection().revision() != before {
                    display::print_selection(self.app.selection());
                }
            }
            SlashCommand::Selected => display::print_selection(self.app.selection()),
            SlashCommand::AddFlagged => {
                if self.app.chat().flagged().is_empty() {
                    display::print_alert("No products were mentioned in the last reply.");
                } else {
                    let before = self.app.selection().revision();
                    self.app.add_flagged();
                    if self.app.selection().revision() != before {
                        display::print_selection(self.app.selection());
                    } else {
                        println!("{}", "All mentioned products are already selected.".dimmed());
                    }
                }
            }
            SlashCommand::Routine => match self.app.routine() {
                Ok(routine) => display::print_routine(&routine),
                Err(e) => display::print_alert(&e.to_string()),
            },
            SlashCommand::History => display::print_history(self.app.chat()),
            SlashCommand::Reload => match self.app.reload().await {
                Ok(count) => println!("{} Reloaded {} products", "✓".green(), count),
                Err(_) => display::print_view(self.app.view()),
            },
            SlashCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        SlashResult::Continue
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:22} Show this help", "/help".yellow());
        println!("  {:22} Exit", "/quit".yellow());
        println!("  {:22} List product categories", "/categories".yellow());
        println!("  {:22} Show products in a category", "/products <category>".yellow());
        println!("  {:22} Add products to the selection", "/select <id>...".yellow());
        println!("  {:22} Show the selection", "/selected".yellow());
        println!("  {:22} Select every product the last reply mentioned", "/add-flagged".yellow());
        println!("  {:22} Generate a routine from the selection", "/routine".yellow());
        println!("  {:22} Show conversation history", "/history".yellow());
        println!("  {:22} Reload the catalog", "/reload".yellow());
        println!();
        println!("Anything else is sent to the assistant.");
        println!();
    }

    /// Send a chat message and print the outcome
    async fn send(&mut self, input: &str) {
        let pending = match self.app.start_chat(input) {
            Ok(pending) => pending,
            Err(ChatError::EmptyInput) => return,
            Err(e) => {
                display::print_alert(&e.to_string());
                return;
            }
        };

        display::print_placeholder(self.app.chat());
        let result = self.app.client().complete(pending.request).await;
        let outcome = self.app.finish_chat(pending.seq, result);
        display::clear_placeholder();

        match outcome {
            Outcome::Resolved { .. } | Outcome::Failed => {
                if let Some(turn) = self.app.chat().transcript().last() {
                    display::print_turn(turn);
                }
                display::print_flagged(self.app.chat());
            }
            Outcome::Stale => debug!("send: stale outcome ignored"),
        }
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
