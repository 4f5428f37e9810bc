use std::collections::BTreeMap;

use log::*;
use mc_common::Money;

use crate::{
    catalog_types::{Product, ProductVariant},
    helpers::discount_percent,
};

/// One selectable attribute, as shown in the variant picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeOption {
    pub name: String,
    pub values: Vec<String>,
    pub selected: Option<String>,
}

/// Selection state for a single product.
///
/// Variants are matched strictly: a variant matches when *every* currently selected attribute is present on the
/// variant with the same value, and the variant itself only uses declared options and values. When several variants
/// match, the first one in the product's `variants` list wins. No match is a valid state; every effective value then
/// comes from the parent product.
#[derive(Debug, Clone)]
pub struct VariantSelection {
    product: Product,
    selected_attributes: BTreeMap<String, String>,
    selected_variant: Option<usize>,
    active_image: Option<String>,
}

impl VariantSelection {
    /// Initialises the selection for `product`. Parent products with variants start on their first variant.
    pub fn new(product: Product) -> Self {
        let mut selection = Self {
            product,
            selected_attributes: BTreeMap::new(),
            selected_variant: None,
            active_image: None,
        };
        selection.reset();
        selection
    }

    /// Returns to the initial state, as if the product had just been loaded.
    pub fn reset(&mut self) {
        self.selected_attributes.clear();
        self.selected_variant = None;
        if self.product.is_parent() && !self.product.variants.is_empty() {
            let first = &self.product.variants[0];
            self.selected_attributes = first.attributes.clone();
            self.selected_variant = Some(0);
            self.active_image = first.images.first().cloned();
        } else {
            self.active_image = None;
        }
        if self.active_image.is_none() {
            self.active_image = self.product.primary_image().map(String::from);
        }
        trace!(
            "🔎️ Initialised selection for product {} with variant {:?}",
            self.product.id,
            self.selected_variant
        );
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn into_product(self) -> Product {
        self.product
    }

    pub fn selected_attributes(&self) -> &BTreeMap<String, String> {
        &self.selected_attributes
    }

    pub fn selected_variant(&self) -> Option<&ProductVariant> {
        self.selected_variant.and_then(|i| self.product.variants.get(i))
    }

    pub fn selected_variant_index(&self) -> Option<usize> {
        self.selected_variant
    }

    /// Selects `value` for `attribute` and re-resolves the variant.
    ///
    /// Returns `false`, leaving the state untouched, if the product has no variants, or the attribute or value is not
    /// one of the product's declared variant options.
    pub fn select_attribute_value(&mut self, attribute: &str, value: &str) -> bool {
        if !self.product.is_parent() {
            warn!("🔎️ Product {} has no variants. Ignoring selection of {attribute}={value}", self.product.id);
            return false;
        }
        let allowed = self.product.variant_options.get(attribute).map(|values| values.iter().any(|v| v == value));
        match allowed {
            None => {
                warn!("🔎️ '{attribute}' is not a variant option of product {}", self.product.id);
                return false;
            },
            Some(false) => {
                warn!("🔎️ '{value}' is not an allowed value of '{attribute}' for product {}", self.product.id);
                return false;
            },
            Some(true) => {},
        }
        self.selected_attributes.insert(attribute.to_string(), value.to_string());
        self.selected_variant = self.resolve();
        debug!(
            "🔎️ Selected {attribute}={value} on product {}. Resolved variant: {:?}",
            self.product.id, self.selected_variant
        );
        if let Some(image) = self.selected_variant().and_then(|v| v.primary_image()).map(String::from) {
            self.active_image = Some(image);
        }
        true
    }

    /// Finds the first variant matching the current attribute selection. Does not change any state.
    pub fn resolve(&self) -> Option<usize> {
        let options = &self.product.variant_options;
        self.product.variants.iter().position(|variant| {
            variant.conforms_to(options)
                && self.selected_attributes.iter().all(|(k, v)| variant.attributes.get(k) == Some(v))
        })
    }

    /// The variant picker contents, in attribute-name order.
    pub fn options(&self) -> Vec<AttributeOption> {
        self.product
            .variant_options
            .iter()
            .map(|(name, values)| AttributeOption {
                name: name.clone(),
                values: values.clone(),
                selected: self.selected_attributes.get(name).cloned(),
            })
            .collect()
    }

    //------------------------------------   Effective values   ----------------------------------------------------

    /// The price a buyer pays per unit.
    pub fn effective_price(&self) -> Option<Money> {
        self.selected_variant().and_then(|v| v.discounted_price).or(self.product.discounted_price)
    }

    pub fn effective_original_price(&self) -> Option<Money> {
        self.selected_variant().and_then(|v| v.original_price).or(self.product.original_price)
    }

    pub fn effective_quantity(&self) -> Option<i64> {
        self.selected_variant().and_then(|v| v.quantity).or(self.product.quantity)
    }

    pub fn effective_min_order_quantity(&self) -> Option<i64> {
        self.selected_variant().and_then(|v| v.min_order_quantity).or(self.product.min_order_quantity)
    }

    pub fn effective_sku(&self) -> Option<&str> {
        self.selected_variant().and_then(|v| v.sku.as_deref()).or(self.product.sku.as_deref())
    }

    /// The variant's images, or the parent's when the variant has none.
    pub fn effective_images(&self) -> &[String] {
        match self.selected_variant() {
            Some(v) if !v.images.is_empty() => &v.images,
            _ => &self.product.images,
        }
    }

    /// Whole percent saved on the effective prices. Zero when either price is unknown.
    pub fn discount_percent(&self) -> i64 {
        match (self.effective_original_price(), self.effective_price()) {
            (Some(original), Some(discounted)) => discount_percent(original, discounted),
            _ => 0,
        }
    }

    pub fn active_image(&self) -> Option<&str> {
        self.active_image.as_deref()
    }

    /// Makes the effective image at `index` the active one. Out-of-range indices are ignored.
    pub fn select_image(&mut self, index: usize) -> bool {
        match self.effective_images().get(index).cloned() {
            Some(image) => {
                self.active_image = Some(image);
                true
            },
            None => {
                debug!("🔎️ Image index {index} is out of range for product {}", self.product.id);
                false
            },
        }
    }
}
