//! MerchantConnect Catalog Engine
//!
//! The catalog engine holds the client-side state of the MerchantConnect wholesale portal. It is backend-agnostic: all
//! network access goes through the traits in [`mod@traits`], which the `marketplace_api` crate implements over REST.
//!
//! The library is divided into these sections:
//! 1. The catalog data model ([`mod@catalog_types`]). Records deserialize leniently from the backend's JSON.
//! 2. Variant resolution ([`mod@variants`]). Maps a buyer's attribute selection to a concrete variant and derives the
//!    price, stock and images to display.
//! 3. Draft review ([`mod@drafts`]). An editable collection of AI-extracted draft products with per-image selection
//!    and validation, producing the payload for product creation.
//! 4. Flows ([`ProductViewApi`], [`CreationWizard`]) that tie the above to a backend, and the explicit
//!    [`MerchantSession`] that authenticated backends are given.
pub mod catalog_types;
mod ce_api;
pub mod drafts;
pub mod helpers;
pub mod session;
pub mod traits;
pub mod variants;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use ce_api::{
    creation_wizard::{CreationWizard, ExtractionSource, WizardStep},
    errors::WizardError,
    product_view_api::ProductViewApi,
};
pub use session::{MerchantSession, SessionError};
pub use traits::{BackendError, CatalogBackend, ExtractionBackend};
