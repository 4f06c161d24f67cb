//! RoutineChat - product catalog browser and recommendation chat
//!
//! Loads a static product catalog, lets the user filter it by category and
//! pick products, asks a remote completion worker for recommendations, and
//! assembles a routine from the picked products.
//!
//! # Architecture
//!
//! ```text
//! catalog::CatalogLoader ──> Catalog ──> catalog::CatalogView (cards)
//!                              │
//!                              ├──> SelectionStore ──> routine::build_routine
//!                              │          │
//!                              └──> chat::ChatSession ──> llm::CompletionClient
//!                                         │
//!                                         └──> chat::flag_products (reply scan)
//! ```
//!
//! All of the above is owned by a single [`app::App`] value; there is no
//! global state.
//!
//! # Example
//!
//! ```ignore
//! use routinechat::app::App;
//! use routinechat::config::Config;
//!
//! let config = Config::load(None)?;
//! let mut app = App::from_config(&config)?;
//! app.reload().await?;
//! app.show_category("Skincare");
//! app.select("3")?;
//! app.send("What should I pair with this?").await?;
//! ```

pub mod app;
pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod llm;
pub mod repl;
pub mod routine;
pub mod selection;

pub use catalog::{Catalog, CatalogLoader, CatalogSource, CatalogView, LoadError, Product, ProductId};
pub use selection::SelectionStore;

/// Default catalog document path, relative to the working directory
pub const DEFAULT_CATALOG_PATH: &str = "products.json";

/// Default model name sent to the completion worker
pub const DEFAULT_MODEL: &str = "gpt-4o";
