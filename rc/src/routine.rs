//! Routine builder: a display projection of the selection

use thiserror::Error;
use tracing::debug;

use crate::selection::SelectionStore;

/// Heading of a rendered routine
pub const ROUTINE_TITLE: &str = "Your routine:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutineError {
    #[error("Select at least one product before generating a routine")]
    EmptySelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineEntry {
    pub name: String,
    pub description: String,
}

/// One entry per selected product, in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineBlock {
    pub entries: Vec<RoutineEntry>,
}

impl RoutineBlock {
    /// Paragraph blocks for the transcript: a title, then one line per product
    pub fn blocks(&self) -> Vec<String> {
        std::iter::once(ROUTINE_TITLE.to_string())
            .chain(
                self.entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{}. {}: {}", i + 1, e.name, e.description)),
            )
            .collect()
    }
}

/// Project the selection into a routine; never mutates the selection
pub fn build_routine(selection: &SelectionStore) -> Result<RoutineBlock, RoutineError> {
    debug!(selected = selection.len(), "build_routine: called");
    if selection.is_empty() {
        return Err(RoutineError::EmptySelection);
    }

    Ok(RoutineBlock {
        entries: selection
            .all()
            .iter()
            .map(|p| RoutineEntry {
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect(),
    })
}
