use catalog_engine::{catalog_types::DraftProduct, drafts::DraftEditor, variants::VariantSelection};
use cucumber::World;

#[derive(Default, Debug, World)]
pub struct CatalogWorld {
    pub selection: Option<VariantSelection>,
    pub last_selection_accepted: bool,
    pub editor: DraftEditor,
    pub prepared: Option<Vec<DraftProduct>>,
}

impl CatalogWorld {
    pub fn selection(&self) -> &VariantSelection {
        self.selection.as_ref().expect("No product has been loaded")
    }

    pub fn selection_mut(&mut self) -> &mut VariantSelection {
        self.selection.as_mut().expect("No product has been loaded")
    }

    pub fn prepared(&self) -> &[DraftProduct] {
        self.prepared.as_deref().expect("The submission has not been prepared")
    }
}
