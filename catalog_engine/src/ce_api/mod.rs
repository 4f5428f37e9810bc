//! # Catalog engine flows
//!
//! The flows tie the pure state machines ([`crate::variants`], [`crate::drafts`]) to a backend. As with the rest of the
//! engine, a flow is created by supplying a backend that implements the trait it needs:
//!
//! ```rust,ignore
//! use catalog_engine::ProductViewApi;
//! let api = ProductViewApi::new(marketplace_client);
//! if let Some(mut selection) = api.open(42).await? {
//!     selection.select_attribute_value("color", "Blue");
//!     println!("{:?}", selection.effective_price());
//! }
//! ```
//!
//! * [`product_view_api`] loads a product and prepares its variant selection.
//! * [`creation_wizard`] runs the upload, review and create steps of AI-assisted product creation.
pub mod creation_wizard;
pub mod errors;
pub mod product_view_api;
