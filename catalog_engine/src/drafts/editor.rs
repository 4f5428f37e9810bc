use log::*;
use thiserror::Error;

use crate::{
    catalog_types::DraftProduct,
    drafts::{validate_draft, DraftField, ImageSelection, ValidationRule},
};

#[derive(Debug, Clone, Error)]
pub enum DraftEditorError {
    #[error("There is no draft at position {0}")]
    DraftNotFound(usize),
    #[error("Draft {draft} has no image at position {image}")]
    ImageNotFound { draft: usize, image: usize },
    #[error("{0} draft(s) still have validation errors")]
    InvalidDrafts(usize),
}

#[derive(Debug, Clone)]
struct DraftEntry {
    draft: DraftProduct,
    images: ImageSelection,
    issues: Vec<ValidationRule>,
}

impl DraftEntry {
    fn new(draft: DraftProduct) -> Self {
        let images = ImageSelection::all_included(draft.images.len());
        let mut entry = Self { draft, images, issues: Vec::new() };
        entry.revalidate();
        entry
    }

    fn revalidate(&mut self) {
        self.issues = validate_draft(&self.draft, &self.images);
    }

    fn prepared(&self) -> DraftProduct {
        let mut draft = self.draft.clone();
        if draft.has_images() {
            let (images, primary) = self.images.apply(&self.draft.images);
            draft.images = images.into_iter().map(String::from).collect();
            draft.primary_image_index = Some(primary);
        }
        draft
    }
}

/// The in-memory collection of drafts under review.
///
/// Drafts are addressed by position. Removing a draft shifts every later draft down by one, so positions must be
/// looked up again after a removal. Validation is rerun after every change and never blocks an edit; it only blocks
/// [`DraftEditor::prepare_submission`].
#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    entries: Vec<DraftEntry>,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor pre-loaded with `drafts`.
    pub fn with_drafts(drafts: Vec<DraftProduct>) -> Self {
        let mut editor = Self::new();
        editor.load(drafts);
        editor
    }

    /// Replaces the collection. Every image of every draft starts out included, with the first image as primary.
    pub fn load(&mut self, drafts: Vec<DraftProduct>) {
        self.entries = drafts.into_iter().map(DraftEntry::new).collect();
        debug!("📝️ Loaded {} drafts for review", self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft(&self, index: usize) -> Option<&DraftProduct> {
        self.entries.get(index).map(|e| &e.draft)
    }

    pub fn drafts(&self) -> impl Iterator<Item = &DraftProduct> {
        self.entries.iter().map(|e| &e.draft)
    }

    pub fn image_selection(&self, index: usize) -> Option<&ImageSelection> {
        self.entries.get(index).map(|e| &e.images)
    }

    //------------------------------------       Mutations      ----------------------------------------------------

    pub fn update_field(&mut self, index: usize, field: DraftField) -> Result<(), DraftEditorError> {
        let entry = self.entry_mut(index)?;
        trace!("📝️ Setting {} on draft {index}", field.name());
        field.apply(&mut entry.draft);
        self.revalidate();
        Ok(())
    }

    /// Appends a blank, manually-entered draft and returns its position.
    pub fn add_draft(&mut self) -> usize {
        self.entries.push(DraftEntry::new(DraftProduct::new_manual()));
        debug!("📝️ Added blank draft at position {}", self.entries.len() - 1);
        self.entries.len() - 1
    }

    pub fn remove_draft(&mut self, index: usize) -> Result<DraftProduct, DraftEditorError> {
        if index >= self.entries.len() {
            return Err(DraftEditorError::DraftNotFound(index));
        }
        let entry = self.entries.remove(index);
        debug!("📝️ Removed draft {index} ({})", entry.draft.name);
        self.revalidate();
        Ok(entry.draft)
    }

    /// Includes or excludes an image. Returns whether the image is now included.
    pub fn toggle_image(&mut self, index: usize, image: usize) -> Result<bool, DraftEditorError> {
        let entry = self.image_entry_mut(index, image)?;
        let included = entry.images.toggle(image);
        self.revalidate();
        Ok(included)
    }

    /// Makes an image the primary one. Excluded images cannot be primary; the call is then ignored and `false` is
    /// returned.
    pub fn set_primary_image(&mut self, index: usize, image: usize) -> Result<bool, DraftEditorError> {
        let entry = self.image_entry_mut(index, image)?;
        let changed = entry.images.set_primary(image);
        if !changed {
            debug!("📝️ Image {image} of draft {index} is excluded and cannot be primary");
        }
        Ok(changed)
    }

    /// Includes (with the first image as primary) or excludes (clearing the primary) every image of a draft.
    pub fn select_all_images(&mut self, index: usize, include: bool) -> Result<(), DraftEditorError> {
        let entry = self.entry_mut(index)?;
        entry.images.select_all(include);
        self.revalidate();
        Ok(())
    }

    //------------------------------------      Validation      ----------------------------------------------------

    fn revalidate(&mut self) {
        self.entries.iter_mut().for_each(DraftEntry::revalidate);
    }

    /// The rules draft `index` currently violates. Empty for valid drafts and unknown positions.
    pub fn issues(&self, index: usize) -> &[ValidationRule] {
        self.entries.get(index).map(|e| e.issues.as_slice()).unwrap_or_default()
    }

    /// Every draft with at least one violated rule, with its position.
    pub fn validation_errors(&self) -> Vec<(usize, &[ValidationRule])> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.issues.is_empty())
            .map(|(i, e)| (i, e.issues.as_slice()))
            .collect()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.entries.get(index).map(|e| e.issues.is_empty()).unwrap_or(false)
    }

    /// True when every draft is valid. An empty collection is trivially submittable.
    pub fn is_submittable(&self) -> bool {
        self.entries.iter().all(|e| e.issues.is_empty())
    }

    /// The drafts as they should be sent for creation: only included images are kept, and `primaryImageIndex` points
    /// at the primary image's position among them. Drafts without images are passed through unchanged.
    ///
    /// Does not change the editor. Fails if any draft is invalid.
    pub fn prepare_submission(&self) -> Result<Vec<DraftProduct>, DraftEditorError> {
        let invalid = self.validation_errors().len();
        if invalid > 0 {
            warn!("📝️ Cannot prepare submission. {invalid} draft(s) are invalid");
            return Err(DraftEditorError::InvalidDrafts(invalid));
        }
        Ok(self.entries.iter().map(DraftEntry::prepared).collect())
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut DraftEntry, DraftEditorError> {
        self.entries.get_mut(index).ok_or(DraftEditorError::DraftNotFound(index))
    }

    fn image_entry_mut(&mut self, index: usize, image: usize) -> Result<&mut DraftEntry, DraftEditorError> {
        let entry = self.entry_mut(index)?;
        if image >= entry.images.len() {
            return Err(DraftEditorError::ImageNotFound { draft: index, image });
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod test {
    use mc_common::Money;

    use super::*;
    use crate::test_utils::fixtures::{draft_with_images, valid_draft};

    #[test]
    fn load_initialises_image_state() {
        let editor = DraftEditor::with_drafts(vec![draft_with_images(3), valid_draft("Mug")]);
        assert_eq!(editor.len(), 2);
        let images = editor.image_selection(0).unwrap();
        assert_eq!(images.included(), &[true, true, true]);
        assert_eq!(images.primary(), Some(0));
        assert!(editor.image_selection(1).unwrap().is_empty());
        assert!(editor.is_submittable());
    }

    #[test]
    fn edits_revalidate() {
        let mut editor = DraftEditor::with_drafts(vec![valid_draft("Mug")]);
        editor.update_field(0, DraftField::Quantity(Some(0))).unwrap();
        assert_eq!(editor.issues(0), &[ValidationRule::QuantityPositive]);
        assert!(!editor.is_submittable());
        editor.update_field(0, DraftField::Quantity(Some(5))).unwrap();
        assert!(editor.is_submittable());
        let err = editor.update_field(3, DraftField::Name("x".into())).unwrap_err();
        assert!(matches!(err, DraftEditorError::DraftNotFound(3)));
    }

    #[test]
    fn discount_ordering_tracks_both_prices() {
        let mut editor = DraftEditor::with_drafts(vec![valid_draft("Mug")]);
        editor.update_field(0, DraftField::OriginalPrice(Some(Money::from_units(5)))).unwrap();
        assert_eq!(editor.issues(0), &[ValidationRule::DiscountOrdering]);
        editor.update_field(0, DraftField::DiscountedPrice(Some(Money::from_units(4)))).unwrap();
        assert!(editor.issues(0).is_empty());
    }

    #[test]
    fn added_drafts_use_manual_defaults() {
        let mut editor = DraftEditor::with_drafts(vec![valid_draft("Mug")]);
        let index = editor.add_draft();
        assert_eq!(index, 1);
        let draft = editor.draft(1).unwrap();
        assert_eq!(draft.extraction_source.as_deref(), Some("manual"));
        assert!(editor.image_selection(1).unwrap().is_empty());
        assert_eq!(editor.issues(1).len(), 4);
        assert_eq!(editor.validation_errors().len(), 1);
    }

    #[test]
    fn removal_shifts_later_drafts() {
        let mut editor = DraftEditor::with_drafts(vec![valid_draft("A"), draft_with_images(2), valid_draft("C")]);
        editor.toggle_image(1, 1).unwrap();
        let removed = editor.remove_draft(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(editor.len(), 2);
        assert_eq!(editor.image_selection(0).unwrap().included(), &[true, false]);
        assert_eq!(editor.draft(1).unwrap().name, "C");
        assert!(matches!(editor.remove_draft(2), Err(DraftEditorError::DraftNotFound(2))));
    }

    #[test]
    fn image_operations() {
        let mut editor = DraftEditor::with_drafts(vec![draft_with_images(3)]);
        assert!(editor.set_primary_image(0, 2).unwrap());
        assert!(!editor.toggle_image(0, 2).unwrap());
        assert_eq!(editor.image_selection(0).unwrap().primary(), Some(0));
        assert!(!editor.set_primary_image(0, 2).unwrap());
        assert!(matches!(editor.toggle_image(0, 3), Err(DraftEditorError::ImageNotFound { draft: 0, image: 3 })));
        editor.select_all_images(0, false).unwrap();
        assert_eq!(editor.issues(0), &[ValidationRule::ImageSelectionRequired]);
        assert!(editor.prepare_submission().is_err());
        editor.select_all_images(0, true).unwrap();
        assert!(editor.is_submittable());
    }

    #[test]
    fn prepare_submission_filters_images() {
        let mut editor = DraftEditor::with_drafts(vec![draft_with_images(3), valid_draft("Mug")]);
        editor.set_primary_image(0, 1).unwrap();
        editor.toggle_image(0, 1).unwrap();
        let prepared = editor.prepare_submission().unwrap();
        assert_eq!(prepared[0].images, vec!["https://cdn.example.com/img0.jpg", "https://cdn.example.com/img2.jpg"]);
        assert_eq!(prepared[0].primary_image_index, Some(0));
        assert_eq!(&prepared[1], editor.draft(1).unwrap());
        // The editor itself is untouched, and the transform is repeatable
        assert_eq!(editor.draft(0).unwrap().images.len(), 3);
        assert_eq!(editor.prepare_submission().unwrap(), prepared);
    }

    #[test]
    fn prepare_submission_refuses_invalid_drafts() {
        let mut editor = DraftEditor::with_drafts(vec![valid_draft("A"), valid_draft("B")]);
        editor.update_field(1, DraftField::Name(" ".into())).unwrap();
        let err = editor.prepare_submission().unwrap_err();
        assert!(matches!(err, DraftEditorError::InvalidDrafts(1)));
    }

    #[test]
    fn toggling_everything_off_and_on() {
        let mut editor = DraftEditor::with_drafts(vec![draft_with_images(2)]);
        editor.set_primary_image(0, 1).unwrap();
        for i in 0..2 {
            editor.toggle_image(0, i).unwrap();
        }
        for i in 0..2 {
            editor.toggle_image(0, i).unwrap();
        }
        let images = editor.image_selection(0).unwrap();
        assert_eq!(images.included(), &[true, true]);
        // Primary is not restored
        assert_eq!(images.primary(), None);
        let prepared = editor.prepare_submission().unwrap();
        assert_eq!(prepared[0].primary_image_index, Some(0));
    }
}
