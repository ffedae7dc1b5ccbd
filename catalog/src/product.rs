//! Catalog store: a fixed, read-only ordered list of products.

use std::collections::HashSet;

use crate::error::{CatalogError, Lookup, Result};

/// Immutable product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
    /// Transport file reference (Telegram file id or URL).
    pub image: Option<String>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: i64, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Ordered, 0-indexed product list. Never empty, ids unique.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog. Fails on an empty list or a repeated product id.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        if products.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }

    /// The four sample products the bot ships with.
    pub fn sample() -> Self {
        let products = (1..=4)
            .map(|n| {
                Product::new(
                    n,
                    format!("Товар {}", n),
                    n * 100,
                    format!("Описание товара {}", n),
                )
            })
            .collect();
        Self { products }
    }

    pub fn size(&self) -> usize {
        self.products.len()
    }

    pub fn get(&self, index: usize) -> Result<&Product> {
        self.products.get(index).ok_or(CatalogError::OutOfRange(Lookup::Index {
            index,
            len: self.products.len(),
        }))
    }

    /// Looks a product up by its id.
    pub fn find(&self, product_id: i64) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or(CatalogError::OutOfRange(Lookup::ProductId(product_id)))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}
