//! Interactive REPL for RoutineChat
//!
//! Line-edited prompt with slash commands for browsing the catalog and
//! building a selection; anything else goes to the assistant.

mod commands;
pub mod display;
mod session;

pub use commands::SlashCommand;
pub use session::ReplSession;

use eyre::Result;
use tracing::warn;

use crate::app::App;
use crate::config::Config;

/// Run the interactive REPL
///
/// This is the main entry point for `rc chat` (and plain `rc`). A catalog
/// that fails to load does not stop the session; the product display shows
/// the error until `/reload` succeeds.
pub async fn run_interactive(config: &Config, initial_message: Option<String>) -> Result<()> {
    let mut app = App::from_config(config)?;

    if let Err(e) = app.reload().await {
        warn!(error = %e, "Starting REPL without a catalog");
    }

    let mut session = ReplSession::new(app);
    session.run(initial_message).await
}
