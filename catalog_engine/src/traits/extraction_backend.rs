use crate::{
    catalog_types::DraftProduct,
    traits::{BackendError, CreationResult, ExtractionResult, ExtractionValidation, UploadFile},
};

/// The AI extraction service.
///
/// Each call is a single request and response. Implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait ExtractionBackend {
    /// Sends a document to the extraction service and returns the draft products found in it (possibly none).
    async fn extract_drafts(&self, file: UploadFile) -> Result<ExtractionResult, BackendError>;

    /// Asks the service to check the drafts before creation. Local validation in [`crate::drafts::DraftEditor`]
    /// remains authoritative; this is an additional server-side check.
    async fn validate_drafts(&self, drafts: &[DraftProduct]) -> Result<ExtractionValidation, BackendError>;

    /// Creates catalog products from the (prepared) drafts.
    async fn create_products(&self, drafts: &[DraftProduct]) -> Result<CreationResult, BackendError>;
}
