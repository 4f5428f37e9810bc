//! Variant resolution for the product detail view.
//!
//! A [`VariantSelection`] tracks which attribute values a buyer has picked on a [`crate::catalog_types::Product`] and
//! which concrete variant (if any) that combination resolves to. Display values are looked up on the selected variant
//! first and fall back to the parent product field by field.
mod selection;

pub use selection::{AttributeOption, VariantSelection};
