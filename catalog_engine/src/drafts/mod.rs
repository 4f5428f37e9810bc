//! Review of AI-extracted draft products.
//!
//! The [`DraftEditor`] holds the drafts returned by the extraction service while the merchant corrects fields, picks
//! images and discards unwanted records. It produces the cleaned-up list that is sent for product creation.
mod editor;
mod fields;
mod images;
mod validation;

use std::fmt::Display;

pub use editor::{DraftEditor, DraftEditorError};
pub use fields::{DraftField, DraftFieldError};
pub use images::ImageSelection;
pub use validation::{validate_draft, ValidationRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(s)
    }
}

/// Buckets an extraction confidence score for display.
pub fn confidence_level(score: f64) -> ConfidenceLevel {
    if score >= 0.8 {
        ConfidenceLevel::High
    } else if score >= 0.5 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
