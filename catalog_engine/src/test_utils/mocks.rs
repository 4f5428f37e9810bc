use mockall::mock;

use crate::{
    catalog_types::{DraftProduct, Product, ProductId},
    traits::{
        BackendError,
        CatalogBackend,
        CreationResult,
        ExtractionBackend,
        ExtractionResult,
        ExtractionValidation,
        UploadFile,
    },
};

mock! {
    pub Catalog {}
    impl CatalogBackend for Catalog {
        async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, BackendError>;
        async fn fetch_merchant_products(&self) -> Result<Vec<Product>, BackendError>;
    }
}

mock! {
    pub Extraction {}
    impl ExtractionBackend for Extraction {
        async fn extract_drafts(&self, file: UploadFile) -> Result<ExtractionResult, BackendError>;
        async fn validate_drafts(&self, drafts: &[DraftProduct]) -> Result<ExtractionValidation, BackendError>;
        async fn create_products(&self, drafts: &[DraftProduct]) -> Result<CreationResult, BackendError>;
    }
}
