//! The product catalog shown on the shop page.
//!
//! Products are loaded once at startup from a JSON file under the crate's
//! `content/` directory and held in memory. The catalog is the source of
//! the name/price/image text handed to the cart; prices stay display
//! strings throughout.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use stepstyle_core::{Product, ProductId};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(String),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One product card on the shop page.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub image: String,
}

impl CatalogProduct {
    /// The product as handed to the cart.
    #[must_use]
    pub fn to_cart_product(&self) -> Product {
        Product {
            name: self.name.clone(),
            price: self.price.clone(),
            image: self.image.clone(),
        }
    }
}

/// In-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<CatalogProduct>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// A missing file is not an error: the built-in demo catalog is used
    /// instead so a fresh checkout of the repo serves a working store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::warn!("Catalog file {:?} does not exist, using demo catalog", path);
            return Ok(Self::demo());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<CatalogProduct> = serde_json::from_str(&raw)?;
        tracing::info!("Loaded {} catalog products from {:?}", products.len(), path);

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// The built-in StepStyle demo line-up.
    #[must_use]
    pub fn demo() -> Self {
        let demo = |id: i32, name: &str, price: &str, image: &str| CatalogProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            price: price.to_string(),
            image: image.to_string(),
        };

        Self {
            products: Arc::new(vec![
                demo(1, "Urban Runner", "$79", "/static/images/urban-runner.png"),
                demo(2, "Street Classic", "$65", "/static/images/street-classic.png"),
                demo(3, "Trail Blazer", "$89", "/static/images/trail-blazer.png"),
                demo(4, "Court Ace", "$72", "/static/images/court-ace.png"),
            ]),
        }
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }
}
