mod catalog_world;
mod draft_steps;
mod variant_steps;

pub use catalog_world::CatalogWorld;
