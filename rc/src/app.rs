//! Application state shared by the REPL and the one-shot commands

use std::sync::Arc;

use eyre::{Context, Result};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::catalog::{Catalog, CatalogLoader, CatalogView, LoadError, filter_by_category};
use crate::chat::{ChatError, ChatSession, Outcome, PendingRequest};
use crate::config::Config;
use crate::llm::{CompletionClient, CompletionResponse, RequestError, create_client};
use crate::routine::{RoutineBlock, RoutineError, build_routine};
use crate::selection::SelectionStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("No product with id '{0}'")]
    UnknownProduct(String),
}

/// Everything one session owns: catalog, display, selection and chat
pub struct App {
    loader: CatalogLoader,
    client: Arc<dyn CompletionClient>,
    catalog: Catalog,
    view: CatalogView,
    selection: SelectionStore,
    chat: ChatSession,
}

impl App {
    pub fn new(loader: CatalogLoader, client: Arc<dyn CompletionClient>, chat: ChatSession) -> Self {
        Self {
            loader,
            client,
            catalog: Catalog::default(),
            view: CatalogView::default(),
            selection: SelectionStore::new(),
            chat,
        }
    }

    /// Build from configuration; the catalog is not loaded until `reload`
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader = CatalogLoader::new(config.catalog.source());
        let client = create_client(&config.worker).context("Failed to create worker client")?;
        let chat = ChatSession::new(config.worker.model.clone()).context("Failed to prepare chat session")?;
        Ok(Self::new(loader, client, chat))
    }

    /// Load the catalog, replacing the previous one
    ///
    /// On failure the catalog becomes empty and the view switches to an error
    /// state; the error is also returned so callers can report or propagate it.
    pub async fn reload(&mut self) -> Result<usize, LoadError> {
        debug!(source = %self.loader.source(), "reload: called");
        match self.loader.load_products().await {
            Ok(products) => {
                self.catalog = Catalog::new(products);
                self.view = CatalogView::default();
                info!(count = self.catalog.len(), "Catalog ready");
                Ok(self.catalog.len())
            }
            Err(e) => {
                error!(error = %e, "Catalog load failed");
                self.catalog = Catalog::default();
                self.view.show_error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Filter by category and re-render the product display
    ///
    /// A load error stays on display until a reload succeeds.
    pub fn show_category(&mut self, category: &str) -> &CatalogView {
        if let CatalogView::Error(_) = self.view {
            debug!(category, "show_category: catalog unavailable");
            return &self.view;
        }
        let products = filter_by_category(self.catalog.products(), category);
        self.view.render(&products, &self.selection);
        &self.view
    }

    /// Add a catalog product to the selection by id
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: &str) -> Result<bool, SelectError> {
        let product = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| SelectError::UnknownProduct(id.to_string()))?;
        let added = self.selection.add(product);
        if added {
            self.refresh_view();
        }
        Ok(added)
    }

    /// Add every product flagged in the last reply; returns how many were new
    pub fn add_flagged(&mut self) -> usize {
        let flagged: Vec<_> = self.chat.flagged().to_vec();
        let added = flagged.into_iter().filter(|p| self.selection.add(p.clone())).count();
        debug!(added, "add_flagged: done");
        if added > 0 {
            self.refresh_view();
        }
        added
    }

    /// Build the routine and append it to the transcript
    pub fn routine(&mut self) -> Result<RoutineBlock, RoutineError> {
        let routine = build_routine(&self.selection)?;
        self.chat.append_routine(&routine);
        Ok(routine)
    }

    pub fn client(&self) -> Arc<dyn CompletionClient> {
        Arc::clone(&self.client)
    }

    /// Start a chat request (Idle -> Pending)
    pub fn start_chat(&mut self, input: &str) -> Result<PendingRequest, ChatError> {
        self.chat.begin(input, &self.selection, &self.catalog)
    }

    /// Finish a chat request started with `start_chat`
    pub fn finish_chat(&mut self, seq: u64, result: Result<CompletionResponse, RequestError>) -> Outcome {
        self.chat.finish(seq, result, &self.catalog)
    }

    /// Send a chat message through the completion client
    pub async fn send(&mut self, input: &str) -> Result<Outcome, ChatError> {
        let client = self.client();
        self.chat
            .submit(client.as_ref(), input, &self.selection, &self.catalog)
            .await
    }

    /// Re-mark selected cards in the current display
    fn refresh_view(&mut self) {
        if let CatalogView::Cards(cards) = &mut self.view {
            for card in cards.iter_mut() {
                card.selected = self.selection.contains(&card.id);
            }
        }
    }
}
