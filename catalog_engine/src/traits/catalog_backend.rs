use crate::{
    catalog_types::{Product, ProductId},
    traits::BackendError,
};

/// Read access to the product catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogBackend {
    /// Fetches a single product, with its variants. Returns `None` if the product does not exist.
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, BackendError>;

    /// Fetches every product belonging to the signed-in merchant.
    async fn fetch_merchant_products(&self) -> Result<Vec<Product>, BackendError>;
}
