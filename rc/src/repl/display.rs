//! Terminal rendering for catalog cards, selection, transcript and routines

use std::io::{self, Write};

use colored::Colorize;

use crate::catalog::{CatalogView, PLACEHOLDER_MESSAGE};
use crate::chat::{ChatSession, Turn};
use crate::llm::Role;
use crate::routine::RoutineBlock;
use crate::selection::SelectionStore;

pub fn print_view(view: &CatalogView) {
    match view {
        CatalogView::Placeholder => println!("{}", PLACEHOLDER_MESSAGE.dimmed()),
        CatalogView::Error(message) => {
            println!("{} {}", "Catalog unavailable:".red().bold(), message);
            println!("{}", "Use /reload to try again.".dimmed());
        }
        CatalogView::Cards(cards) if cards.is_empty() => {
            println!("{}", "No products in this category.".dimmed());
        }
        CatalogView::Cards(cards) => {
            for card in cards {
                let marker = if card.selected { "✓".green() } else { " ".normal() };
                println!(
                    "{} {} {} {}",
                    marker,
                    format!("[{}]", card.id).yellow(),
                    card.name.bright_white().bold(),
                    card.brand.dimmed()
                );
                if !card.image.is_empty() {
                    println!("      {}", card.image.dimmed());
                }
                if !card.selected {
                    println!("      {}", card.select_command().cyan());
                }
            }
        }
    }
}

pub fn print_categories(categories: &[&str]) {
    if categories.is_empty() {
        println!("{}", "No categories (catalog is empty).".dimmed());
        return;
    }
    for category in categories {
        println!("  {}", category);
    }
}

pub fn print_selection(selection: &SelectionStore) {
    println!("{}", "Selected products:".bright_cyan());
    if selection.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for product in selection.all() {
        println!("  {} {}", format!("[{}]", product.id).yellow(), product.name);
    }
}

pub fn print_turn(turn: &Turn) {
    let label = match turn.role {
        Role::User => "You".bright_green(),
        Role::Assistant => "Assistant".bright_blue(),
        Role::System => "System".dimmed(),
    };
    println!("{}", label.bold());
    for block in &turn.blocks {
        println!("  {}", block);
    }
}

/// Show the pending placeholder on the current line
pub fn print_placeholder(chat: &ChatSession) {
    if let Some(text) = chat.placeholder() {
        print!("{}", text.dimmed());
        let _ = io::stdout().flush();
    }
}

/// Erase the placeholder line
pub fn clear_placeholder() {
    print!("\r\x1b[2K");
    let _ = io::stdout().flush();
}

pub fn print_flagged(chat: &ChatSession) {
    let flagged = chat.flagged();
    if flagged.is_empty() {
        return;
    }
    let names: Vec<&str> = flagged.iter().map(|p| p.name.as_str()).collect();
    println!(
        "{} {} ({})",
        "Mentioned products:".bright_cyan(),
        names.join(", "),
        "/add-flagged to select all".yellow()
    );
}

pub fn print_history(chat: &ChatSession) {
    let transcript = chat.transcript();
    if transcript.is_empty() {
        println!("{}", "No conversation history.".dimmed());
        return;
    }
    println!("{}", "Conversation History:".bright_cyan());
    for turn in transcript.turns() {
        print!("{} ", turn.at.format("%H:%M:%S").to_string().dimmed());
        print_turn(turn);
    }
}

pub fn print_routine(routine: &RoutineBlock) {
    for (i, block) in routine.blocks().iter().enumerate() {
        if i == 0 {
            println!("{}", block.bright_cyan().bold());
        } else {
            println!("  {}", block);
        }
    }
}

pub fn print_alert(message: &str) {
    println!("{} {}", "!".yellow().bold(), message);
}
