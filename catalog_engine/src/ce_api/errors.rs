use serde_json::Value;
use thiserror::Error;

use crate::{ce_api::creation_wizard::WizardStep, drafts::DraftEditorError, traits::BackendError};

#[derive(Debug, Clone, Error)]
pub enum WizardError {
    #[error("'{0}' is not supported. Only PDF, Excel, Images, and Email files are supported.")]
    UnsupportedFile(String),
    #[error("That action is not available in the {0} step")]
    WrongStep(WizardStep),
    #[error("{0}")]
    ExtractionFailed(String),
    #[error("There are no products to create")]
    NothingToSubmit,
    #[error("{0}")]
    InvalidDrafts(#[from] DraftEditorError),
    #[error("Please fix validation errors before creating products")]
    RejectedByBackend(Value),
    #[error("Failed to create products. {0}")]
    CreationFailed(String),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl WizardError {
    /// True if the merchant needs to sign in again.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Backend(BackendError::Unauthorized))
    }
}
