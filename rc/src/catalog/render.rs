//! Category filtering and product card rendering

use std::sync::Arc;

use tracing::debug;

use super::{Product, ProductId};
use crate::selection::SelectionStore;

/// Shown before the user has picked a category
pub const PLACEHOLDER_MESSAGE: &str = "Select a category to view products";

/// Products whose category equals `category` exactly, in catalog order
pub fn filter_by_category(products: &[Arc<Product>], category: &str) -> Vec<Arc<Product>> {
    debug!(%category, total = products.len(), "filter_by_category: called");
    products.iter().filter(|p| p.category == category).cloned().collect()
}

/// Distinct categories in first-seen order
pub fn categories(products: &[Arc<Product>]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        if !seen.contains(&product.category.as_str()) {
            seen.push(&product.category);
        }
    }
    seen
}

/// One rendered product card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    /// Already present in the selection when the card was rendered
    pub selected: bool,
}

impl ProductCard {
    /// The command that selects this card's product
    pub fn select_command(&self) -> String {
        format!("/select {}", self.id)
    }
}

/// Current contents of the product display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogView {
    /// No category picked yet
    #[default]
    Placeholder,
    /// Cards for the last filtered list (possibly empty)
    Cards(Vec<ProductCard>),
    /// The catalog could not be loaded
    Error(String),
}

impl CatalogView {
    /// Replace the display with one card per product
    pub fn render(&mut self, products: &[Arc<Product>], selection: &SelectionStore) {
        debug!(count = products.len(), "CatalogView::render: called");
        let cards = products
            .iter()
            .map(|p| ProductCard {
                id: p.id.clone(),
                name: p.name.clone(),
                brand: p.brand.clone(),
                image: p.image.clone(),
                selected: selection.contains(&p.id),
            })
            .collect();
        *self = CatalogView::Cards(cards);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        *self = CatalogView::Error(message.into());
    }

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            CatalogView::Cards(cards) => cards,
            _ => &[],
        }
    }
}
