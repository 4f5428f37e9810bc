//! AI-assisted product creation.
//!
//! The wizard has three steps. In `Upload` the merchant sends a document to the extraction service. The drafts it
//! returns are reviewed and edited in `Review`, and once they are submitted and created the wizard is `Complete`.
//! A failed backend call never changes the wizard's step or the drafts under review, so the merchant can retry.
use std::fmt::{Debug, Display};

use log::*;

use crate::{
    catalog_types::Product,
    ce_api::errors::WizardError,
    drafts::DraftEditor,
    helpers::is_supported_upload,
    traits::{ExtractionBackend, UploadFile},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Upload,
    Review,
    Complete,
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Upload => "Upload",
            Self::Review => "Review",
            Self::Complete => "Complete",
        };
        f.write_str(s)
    }
}

/// Where the drafts under review came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSource {
    pub filename: String,
    pub file_type: Option<String>,
}

pub struct CreationWizard<B> {
    backend: B,
    step: WizardStep,
    editor: DraftEditor,
    source: Option<ExtractionSource>,
    created: Vec<Product>,
}

impl<B> Debug for CreationWizard<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CreationWizard({}, {} drafts)", self.step, self.editor.len())
    }
}

impl<B> CreationWizard<B>
where B: ExtractionBackend
{
    pub fn new(backend: B) -> Self {
        Self { backend, step: WizardStep::Upload, editor: DraftEditor::new(), source: None, created: Vec::new() }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn editor(&self) -> &DraftEditor {
        &self.editor
    }

    /// Mutable access to the drafts. Only available while reviewing.
    pub fn editor_mut(&mut self) -> Result<&mut DraftEditor, WizardError> {
        self.require(WizardStep::Review)?;
        Ok(&mut self.editor)
    }

    pub fn source(&self) -> Option<&ExtractionSource> {
        self.source.as_ref()
    }

    /// The products created by the last successful submission.
    pub fn created_products(&self) -> &[Product] {
        &self.created
    }

    /// Sends `file` for extraction and moves to the review step with whatever drafts came back. Zero drafts is a
    /// valid outcome; the merchant can still add products by hand.
    pub async fn process_file(&mut self, file: UploadFile) -> Result<usize, WizardError> {
        self.require(WizardStep::Upload)?;
        if !is_supported_upload(&file.filename, &file.mime_type) {
            warn!("🧙️ Rejected upload of {} ({})", file.filename, file.mime_type);
            return Err(WizardError::UnsupportedFile(file.filename));
        }
        let filename = file.filename.clone();
        info!("🧙️ Sending {filename} for extraction");
        let result = self.backend.extract_drafts(file).await?;
        if !result.success {
            let message = result.error_message.unwrap_or_else(|| "Failed to process file".to_string());
            warn!("🧙️ Extraction of {filename} failed. {message}");
            return Err(WizardError::ExtractionFailed(message));
        }
        let source = ExtractionSource {
            filename: result.filename.clone().unwrap_or(filename),
            file_type: result.file_type.clone(),
        };
        let drafts = result.into_drafts();
        let count = drafts.len();
        info!("🧙️ Extracted {count} draft products from {}", source.filename);
        self.editor.load(drafts);
        self.source = Some(source);
        self.step = WizardStep::Review;
        Ok(count)
    }

    /// Prepares the reviewed drafts, has the backend check them, and creates the products. Returns the number of
    /// products created.
    pub async fn submit(&mut self) -> Result<usize, WizardError> {
        self.require(WizardStep::Review)?;
        let prepared = self.editor.prepare_submission()?;
        if prepared.is_empty() {
            return Err(WizardError::NothingToSubmit);
        }
        let validation = self.backend.validate_drafts(&prepared).await?;
        if !validation.valid {
            warn!("🧙️ The backend rejected the drafts: {}", validation.errors);
            return Err(WizardError::RejectedByBackend(validation.errors));
        }
        let result = self.backend.create_products(&prepared).await?;
        if !result.success {
            let message = result.error_message.unwrap_or_default();
            warn!("🧙️ Product creation failed. {message}");
            return Err(WizardError::CreationFailed(message));
        }
        let total = result.total_created.max(result.created_products.len());
        info!("🧙️ Successfully created {total} products");
        self.created = result.created_products;
        self.step = WizardStep::Complete;
        Ok(total)
    }

    /// Starts over from the upload step, discarding any drafts.
    pub fn reset(&mut self) {
        debug!("🧙️ Wizard reset");
        self.step = WizardStep::Upload;
        self.editor = DraftEditor::new();
        self.source = None;
        self.created.clear();
    }

    fn require(&self, step: WizardStep) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(self.step))
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::{
        drafts::DraftField,
        test_utils::{
            fixtures::{draft_with_images, valid_draft},
            mocks::MockExtraction,
        },
        traits::{BackendError, CreationResult, ExtractionResult, ExtractionValidation},
    };

    fn pdf() -> UploadFile {
        UploadFile::new("closeouts.pdf", "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn extracted() -> ExtractionResult {
        ExtractionResult {
            success: true,
            products: vec![draft_with_images(3), valid_draft("Desk lamp")],
            filename: Some("closeouts.pdf".into()),
            file_type: Some("PDF".into()),
            ..Default::default()
        }
    }

    async fn reviewing(backend: MockExtraction) -> CreationWizard<MockExtraction> {
        let mut wizard = CreationWizard::new(backend);
        wizard.process_file(pdf()).await.unwrap();
        wizard
    }

    #[tokio::test]
    async fn full_flow() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().times(1).returning(|_| Ok(extracted()));
        backend
            .expect_validate_drafts()
            .withf(|drafts| drafts.len() == 2 && drafts[0].images.len() == 2)
            .times(1)
            .returning(|_| Ok(ExtractionValidation { valid: true, errors: json!(null) }));
        backend.expect_create_products().times(1).returning(|drafts| {
            Ok(CreationResult { success: true, total_created: drafts.len(), ..Default::default() })
        });
        let mut wizard = reviewing(backend).await;
        assert_eq!(wizard.step(), WizardStep::Review);
        assert_eq!(wizard.source().unwrap().file_type.as_deref(), Some("PDF"));
        wizard.editor_mut().unwrap().toggle_image(0, 1).unwrap();
        let created = wizard.submit().await.unwrap();
        assert_eq!(created, 2);
        assert_eq!(wizard.step(), WizardStep::Complete);
        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(wizard.editor().is_empty());
    }

    #[tokio::test]
    async fn unsupported_files_are_not_sent() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().never();
        let mut wizard = CreationWizard::new(backend);
        let file = UploadFile::new("song.mp3", "audio/mpeg", vec![0u8; 4]);
        assert!(matches!(wizard.process_file(file).await, Err(WizardError::UnsupportedFile(_))));
        assert_eq!(wizard.step(), WizardStep::Upload);
    }

    #[tokio::test]
    async fn failed_extraction_stays_on_upload() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().returning(|_| {
            Ok(ExtractionResult { success: false, error_message: Some("Unreadable PDF".into()), ..Default::default() })
        });
        let mut wizard = CreationWizard::new(backend);
        let err = wizard.process_file(pdf()).await.unwrap_err();
        assert_eq!(err.to_string(), "Unreadable PDF");
        assert_eq!(wizard.step(), WizardStep::Upload);
    }

    #[tokio::test]
    async fn empty_extraction_is_reviewable() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().returning(|_| Ok(ExtractionResult { success: true, ..Default::default() }));
        let mut wizard = CreationWizard::new(backend);
        assert_eq!(wizard.process_file(pdf()).await.unwrap(), 0);
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(matches!(wizard.submit().await, Err(WizardError::NothingToSubmit)));
    }

    #[tokio::test]
    async fn invalid_drafts_are_not_submitted() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().returning(|_| Ok(extracted()));
        backend.expect_validate_drafts().never();
        let mut wizard = reviewing(backend).await;
        wizard.editor_mut().unwrap().update_field(1, DraftField::Quantity(None)).unwrap();
        assert!(matches!(wizard.submit().await, Err(WizardError::InvalidDrafts(_))));
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[tokio::test]
    async fn creation_failure_keeps_drafts() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().returning(|_| Ok(extracted()));
        backend.expect_validate_drafts().returning(|_| Ok(ExtractionValidation { valid: true, errors: json!(null) }));
        backend.expect_create_products().returning(|_| Err(BackendError::Unauthorized));
        let mut wizard = reviewing(backend).await;
        wizard.editor_mut().unwrap().toggle_image(0, 2).unwrap();
        let err = wizard.submit().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(wizard.step(), WizardStep::Review);
        assert_eq!(wizard.editor().len(), 2);
        assert_eq!(wizard.editor().image_selection(0).unwrap().included(), &[true, true, false]);
    }

    #[tokio::test]
    async fn backend_validation_rejection() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().returning(|_| Ok(extracted()));
        backend
            .expect_validate_drafts()
            .returning(|_| Ok(ExtractionValidation { valid: false, errors: json!({"0": ["Duplicate SKU"]}) }));
        backend.expect_create_products().never();
        let mut wizard = reviewing(backend).await;
        let err = wizard.submit().await.unwrap_err();
        assert!(matches!(err, WizardError::RejectedByBackend(_)));
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[tokio::test]
    async fn steps_are_enforced() {
        let mut backend = MockExtraction::new();
        backend.expect_extract_drafts().times(1).returning(|_| Ok(extracted()));
        let mut wizard = CreationWizard::new(backend);
        assert!(matches!(wizard.submit().await, Err(WizardError::WrongStep(WizardStep::Upload))));
        assert!(wizard.editor_mut().is_err());
        wizard.process_file(pdf()).await.unwrap();
        assert!(matches!(wizard.process_file(pdf()).await, Err(WizardError::WrongStep(WizardStep::Review))));
    }
}
