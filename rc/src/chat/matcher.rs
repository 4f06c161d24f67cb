//! Product detection in free-text replies
//!
//! This is a heuristic, not a parser. The default strategy flags a product
//! when its exact name occurs anywhere in the reply, so a short name nested
//! inside a longer one ("Gel" in "Aloe Gel") is also flagged.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Product;

/// Strategy deciding whether a reply mentions a product
pub trait ProductMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, reply: &str, product: &Product) -> bool;
}

/// Case-sensitive, unanchored substring match on the product name
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralSubstringMatcher;

impl ProductMatcher for LiteralSubstringMatcher {
    fn name(&self) -> &'static str {
        "literal-substring"
    }

    fn matches(&self, reply: &str, product: &Product) -> bool {
        // An empty name is a substring of everything
        !product.name.is_empty() && reply.contains(product.name.as_str())
    }
}

/// Every catalog product the matcher finds in `reply`, in catalog order
pub fn flag_products(matcher: &dyn ProductMatcher, reply: &str, catalog: &[Arc<Product>]) -> Vec<Arc<Product>> {
    let flagged: Vec<Arc<Product>> = catalog.iter().filter(|p| matcher.matches(reply, p)).cloned().collect();
    debug!(matcher = matcher.name(), flagged = flagged.len(), "flag_products: done");
    flagged
}
