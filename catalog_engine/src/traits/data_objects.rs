use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    catalog_types::{DraftProduct, Product},
    helpers::lenient,
};

/// A failed call to the backend. The engine does not look inside it beyond telling an expired session apart.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("The session is missing, invalid or has expired")]
    Unauthorized,
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Unexpected response from the backend: {0}")]
    InvalidResponse(String),
}

/// A document submitted for extraction.
#[derive(Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UploadFile({}, {}, {} bytes)", self.filename, self.mime_type, self.bytes.len())
    }
}

impl UploadFile {
    pub fn new<S1: Into<String>, S2: Into<String>>(filename: S1, mime_type: S2, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), mime_type: mime_type.into(), bytes }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    pub success: bool,
    #[serde(deserialize_with = "lenient")]
    pub products: Vec<DraftProduct>,
    /// Older versions of the extraction service use this name instead of `products`.
    #[serde(deserialize_with = "lenient")]
    pub extracted_products: Vec<DraftProduct>,
    pub error_message: Option<String>,
    pub filename: Option<String>,
    pub file_type: Option<String>,
}

impl ExtractionResult {
    pub fn into_drafts(self) -> Vec<DraftProduct> {
        if self.products.is_empty() {
            self.extracted_products
        } else {
            self.products
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionValidation {
    pub valid: bool,
    /// Free-form error detail. Its shape is not fixed by the backend.
    pub errors: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreationResult {
    pub success: bool,
    #[serde(deserialize_with = "lenient")]
    pub created_products: Vec<Product>,
    #[serde(deserialize_with = "lenient")]
    pub total_created: usize,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extraction_result_with_legacy_field() {
        let json = r#"{"success": true, "extractedProducts": [{"name": "Tote bag"}], "filename": "list.pdf"}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert!(result.success);
        assert_eq!(result.filename.as_deref(), Some("list.pdf"));
        let drafts = result.into_drafts();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "Tote bag");
    }

    #[test]
    fn failed_extraction() {
        let json = r#"{"success": false, "errorMessage": "Unreadable PDF"}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("Unreadable PDF"));
        assert!(result.into_drafts().is_empty());
    }

    #[test]
    fn creation_result() {
        let json = r#"{"success": true, "createdProducts": [{"id": 31, "name": "Tote bag"}], "totalCreated": 1}"#;
        let result: CreationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_created, 1);
        assert_eq!(result.created_products[0].id, 31);
    }
}
