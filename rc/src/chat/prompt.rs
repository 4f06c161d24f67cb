//! System instruction construction
//!
//! The instruction is rendered from an embedded Handlebars template and is a
//! pure function of the selection and the catalog at request time.

use std::sync::Arc;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalog::Product;

/// Embedded system instruction template
pub const SYSTEM_TEMPLATE: &str = include_str!("../../prompts/system.pmt");

/// Heading of the primary (selected products) section
pub const SELECTED_HEADER: &str = "Selected products:";

/// Heading of the secondary (full catalog) section
pub const CATALOG_HEADER: &str = "Available products:";

const TEMPLATE_NAME: &str = "system";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Invalid system template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Failed to render system instruction: {0}")]
    Render(#[from] handlebars::RenderError),
}

#[derive(Serialize)]
struct PromptContext<'a> {
    selected: Vec<&'a Product>,
    catalog: Vec<&'a Product>,
}

/// Renders the system instruction
pub struct PromptBuilder {
    hbs: Handlebars<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, PromptError> {
        Self::with_template(SYSTEM_TEMPLATE)
    }

    /// Use a custom template (same context: `selected`, `catalog`)
    pub fn with_template(template: &str) -> Result<Self, PromptError> {
        debug!(template_len = template.len(), "PromptBuilder::with_template: called");
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs.register_template_string(TEMPLATE_NAME, template)
            .map_err(Box::new)?;
        Ok(Self { hbs })
    }

    pub fn build(&self, selection: &[Arc<Product>], catalog: &[Arc<Product>]) -> Result<String, PromptError> {
        debug!(
            selected = selection.len(),
            catalog = catalog.len(),
            "PromptBuilder::build: called"
        );
        let context = PromptContext {
            selected: selection.iter().map(AsRef::as_ref).collect(),
            catalog: catalog.iter().map(AsRef::as_ref).collect(),
        };
        Ok(self.hbs.render(TEMPLATE_NAME, &context)?)
    }
}

/// Render the system instruction with the embedded template
pub fn build_system_instruction(selection: &[Arc<Product>], catalog: &[Arc<Product>]) -> Result<String, PromptError> {
    PromptBuilder::new()?.build(selection, catalog)
}
