//! The boundary between the catalog engine and the marketplace backend.
//!
//! The engine never talks to the network itself. Flows such as [`crate::ProductViewApi`] and
//! [`crate::CreationWizard`] are generic over these traits, so that any backend (the REST client in
//! `marketplace_api`, or a mock in tests) can drive them.
mod catalog_backend;
mod data_objects;
mod extraction_backend;

pub use catalog_backend::CatalogBackend;
pub use data_objects::{BackendError, CreationResult, ExtractionResult, ExtractionValidation, UploadFile};
pub use extraction_backend::ExtractionBackend;
