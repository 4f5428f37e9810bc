//! Loads products for the detail view.
use std::fmt::Debug;

use log::*;

use crate::{
    catalog_types::{Product, ProductId},
    traits::{BackendError, CatalogBackend},
    variants::VariantSelection,
};

pub struct ProductViewApi<B> {
    backend: B,
}

impl<B> Debug for ProductViewApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProductViewApi")
    }
}

impl<B> ProductViewApi<B>
where B: CatalogBackend
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetches product `id` and initialises its variant selection. Returns `None` if there is no such product.
    pub async fn open(&self, id: ProductId) -> Result<Option<VariantSelection>, BackendError> {
        let product = self.backend.fetch_product(id).await.map_err(|e| {
            error!("🛒️ Could not load product {id}. {e}");
            e
        })?;
        match product {
            Some(p) => {
                debug!("🛒️ Loaded product {id} with {} variants", p.variants.len());
                Ok(Some(VariantSelection::new(p)))
            },
            None => {
                info!("🛒️ Product {id} was not found");
                Ok(None)
            },
        }
    }

    pub async fn merchant_products(&self) -> Result<Vec<Product>, BackendError> {
        self.backend.fetch_merchant_products().await
    }
}
