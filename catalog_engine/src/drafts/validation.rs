use std::fmt::Display;

use crate::{catalog_types::DraftProduct, drafts::ImageSelection};

/// The rules a draft must satisfy before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    NameRequired,
    OriginalPricePositive,
    DiscountedPricePositive,
    /// The discounted price must be strictly below the original. Only checked once both prices are positive, so a
    /// draft with both prices at zero reports the two positivity rules and nothing else.
    DiscountOrdering,
    QuantityPositive,
    /// A draft that came with images must keep at least one.
    ImageSelectionRequired,
}

impl ValidationRule {
    pub const ALL: [ValidationRule; 6] = [
        Self::NameRequired,
        Self::OriginalPricePositive,
        Self::DiscountedPricePositive,
        Self::DiscountOrdering,
        Self::QuantityPositive,
        Self::ImageSelectionRequired,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            Self::NameRequired => "Product name is required",
            Self::OriginalPricePositive => "Original price must be greater than 0",
            Self::DiscountedPricePositive => "Discounted price must be greater than 0",
            Self::DiscountOrdering => "Discounted price must be less than original price",
            Self::QuantityPositive => "Quantity must be greater than 0",
            Self::ImageSelectionRequired => "At least one image must be selected",
        }
    }

    /// The draft field the message belongs next to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::OriginalPricePositive => "originalPrice",
            Self::DiscountedPricePositive | Self::DiscountOrdering => "discountedPrice",
            Self::QuantityPositive => "quantity",
            Self::ImageSelectionRequired => "images",
        }
    }

    pub fn is_violated_by(&self, draft: &DraftProduct, images: &ImageSelection) -> bool {
        let original = draft.original_price.filter(|p| p.is_positive());
        let discounted = draft.discounted_price.filter(|p| p.is_positive());
        match self {
            Self::NameRequired => draft.name.trim().is_empty(),
            Self::OriginalPricePositive => original.is_none(),
            Self::DiscountedPricePositive => discounted.is_none(),
            Self::DiscountOrdering => matches!(
                (draft.original_price, draft.discounted_price),
                (Some(o), Some(d)) if o.cents() != 0 && d.cents() != 0 && d >= o
            ),
            Self::QuantityPositive => !draft.quantity.map(|q| q > 0).unwrap_or(false),
            Self::ImageSelectionRequired => draft.has_images() && images.included_count() == 0,
        }
    }
}

impl Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Every rule `draft` currently violates, in table order.
pub fn validate_draft(draft: &DraftProduct, images: &ImageSelection) -> Vec<ValidationRule> {
    ValidationRule::ALL.iter().copied().filter(|rule| rule.is_violated_by(draft, images)).collect()
}
