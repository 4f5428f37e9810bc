//! Catalog records as exchanged with the marketplace backend.
//!
//! All records deserialize from the backend's camelCase JSON. Missing fields take their defaults and malformed ones are
//! replaced by defaults (see [`crate::helpers::lenient`]), so loading never fails because of a single odd field.
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use mc_common::{Money, DEFAULT_CURRENCY_CODE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::helpers::{lenient, lowest_price};

pub type ProductId = i64;

#[derive(Debug, Clone, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

// Generates a SCREAMING_SNAKE_CASE string enum, with Display, FromStr and serde support.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident (default $default:ident) { $($(#[$vmeta:meta])* $variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $s)] $variant,)+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| UnknownVariantError { kind: stringify!($name), value: s.to_string() })
            }
        }
    };
}

//--------------------------------------   ProductCategory   ---------------------------------------------------------
string_enum!(ProductCategory (default GeneralMerchandise) {
    Electronics => "ELECTRONICS",
    Apparel => "APPAREL",
    Furniture => "FURNITURE",
    GeneralMerchandise => "GENERAL_MERCHANDISE",
    Footwear => "FOOTWEAR",
    HomeGoods => "HOME_GOODS",
    Accessories => "ACCESSORIES",
    HealthBeauty => "HEALTH_BEAUTY",
    Automotive => "AUTOMOTIVE",
    SportsOutdoors => "SPORTS_OUTDOORS",
    ToysGames => "TOYS_GAMES",
    FoodBeverage => "FOOD_BEVERAGE",
    Industrial => "INDUSTRIAL",
});

//--------------------------------------     ProductType     ---------------------------------------------------------
string_enum!(
    /// How the merchandise came to be available at wholesale.
    ProductType (default Closeout) {
    Closeout => "CLOSEOUT",
    Overstock => "OVERSTOCK",
    FactoryOverrun => "FACTORY_OVERRUN",
    Branded => "BRANDED",
    PrivateLabel => "PRIVATE_LABEL",
    Liquidation => "LIQUIDATION",
    ShelfPulls => "SHELF_PULLS",
});

//--------------------------------------    ProductStatus    ---------------------------------------------------------
string_enum!(ProductStatus (default Active) {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    OutOfStock => "OUT_OF_STOCK",
    PendingApproval => "PENDING_APPROVAL",
});

string_enum!(VariantStatus (default Active) {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    OutOfStock => "OUT_OF_STOCK",
});

//--------------------------------------     VariantType     ---------------------------------------------------------
string_enum!(VariantType (default Simple) {
    /// No variants. Price and inventory live on the product itself.
    Simple => "SIMPLE",
    /// The product is a container for concrete [`ProductVariant`]s.
    Parent => "PARENT",
});

string_enum!(Condition (default New) {
    New => "NEW",
    Used => "USED",
    Refurbished => "REFURBISHED",
    Damaged => "DAMAGED",
    Intact => "INTACT",
});

//--------------------------------------   ProductVariant    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPricingTier {
    /// Minimum quantity for this tier
    pub quantity: i64,
    /// Price per unit at this tier
    pub price: Money,
}

/// One concrete attribute combination (e.g. "Red / M") of a [`VariantType::Parent`] product. Every field apart from
/// `attributes` is an optional override of the parent's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub sku: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub variant_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub attributes: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient")]
    pub original_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub discounted_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub min_order_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub max_order_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub bulk_pricing: Vec<BulkPricingTier>,
    #[serde(deserialize_with = "lenient")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub primary_image_index: Option<usize>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<VariantStatus>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductVariant {
    pub fn new<K, V, I>(attributes: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let attributes = attributes.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { attributes, ..Default::default() }
    }

    pub fn with_prices(mut self, original: Money, discounted: Money) -> Self {
        self.original_price = Some(original);
        self.discounted_price = Some(discounted);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_images<S: Into<String>, I: IntoIterator<Item = S>>(mut self, images: I) -> Self {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// True if every attribute of this variant is a declared option of the parent, with a declared value.
    pub fn conforms_to(&self, options: &BTreeMap<String, Vec<String>>) -> bool {
        self.attributes.iter().all(|(k, v)| options.get(k).map(|values| values.contains(v)).unwrap_or(false))
    }

    /// The variant's cover image: `images[primary_image_index]` clamped to the list, or the first image.
    pub fn primary_image(&self) -> Option<&str> {
        clamped_image(&self.images, self.primary_image_index.unwrap_or(0))
    }

    /// A human-readable label, e.g. "Red / M". Falls back to joining the attribute values.
    pub fn label(&self) -> String {
        match &self.variant_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.attributes.values().cloned().collect::<Vec<String>>().join(" / "),
        }
    }
}

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    #[serde(deserialize_with = "lenient")]
    pub id: ProductId,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub sku: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub category: ProductCategory,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub product_type: ProductType,
    #[serde(deserialize_with = "lenient")]
    pub original_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub discounted_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub min_order_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub variant_type: VariantType,
    /// Representative starting price of a parent product, usually the lowest variant price.
    #[serde(deserialize_with = "lenient")]
    pub base_price: Option<Money>,
    /// Attribute name -> allowed values, e.g. `{"color": ["Red", "Blue"], "size": ["S", "M"]}`.
    #[serde(deserialize_with = "lenient")]
    pub variant_options: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub variants: Vec<ProductVariant>,
    /// Common attributes used for filtering, e.g. `{"material": "Cotton"}`
    #[serde(deserialize_with = "lenient")]
    pub attributes: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub primary_image_index: usize,
    #[serde(deserialize_with = "lenient")]
    pub status: ProductStatus,
    #[serde(deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_parent(&self) -> bool {
        self.variant_type == VariantType::Parent
    }

    /// The cover image, with `primary_image_index` clamped to the image list.
    pub fn primary_image(&self) -> Option<&str> {
        clamped_image(&self.images, self.primary_image_index)
    }

    /// `base_price` if the backend supplied one, otherwise the lowest discounted variant price.
    pub fn starting_price(&self) -> Option<Money> {
        self.base_price.or_else(|| lowest_price(self.variants.iter().map(|v| v.discounted_price)))
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY_CODE)
    }
}

fn clamped_image(images: &[String], index: usize) -> Option<&str> {
    if images.is_empty() {
        return None;
    }
    let index = index.min(images.len() - 1);
    Some(images[index].as_str())
}

//--------------------------------------    DraftProduct     ---------------------------------------------------------
/// An unsaved candidate product, usually proposed by the AI extraction service and then reviewed by the merchant.
///
/// Nothing is required at creation time; the [`crate::drafts::DraftEditor`] validates drafts before they are submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftProduct {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub brand: String,
    #[serde(deserialize_with = "lenient")]
    pub category: ProductCategory,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub product_type: ProductType,
    #[serde(deserialize_with = "lenient")]
    pub original_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub discounted_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub wholesale_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub retail_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub min_order_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub max_order_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub sku: String,
    #[serde(deserialize_with = "lenient")]
    pub material: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub size: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub condition: Condition,
    #[serde(deserialize_with = "lenient")]
    pub cost_price: Option<Money>,
    #[serde(deserialize_with = "lenient")]
    pub currency: String,
    #[serde(deserialize_with = "lenient")]
    pub rn_number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub upc_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub case_pack: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub fob_port: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub specifications: Option<String>,
    /// Extraction confidence between 0.0 and 1.0. Informational only.
    #[serde(deserialize_with = "lenient")]
    pub confidence_score: Option<f64>,
    /// Provenance tag. Informational only.
    #[serde(deserialize_with = "lenient")]
    pub extraction_source: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub extraction_notes: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub primary_image_index: Option<usize>,
}

impl Default for DraftProduct {
    fn default() -> Self {
        Self {
            name: String::default(),
            description: String::default(),
            brand: String::default(),
            category: ProductCategory::default(),
            product_type: ProductType::default(),
            original_price: None,
            discounted_price: None,
            wholesale_price: None,
            retail_price: None,
            quantity: None,
            min_order_quantity: Some(1),
            max_order_quantity: None,
            sku: String::default(),
            material: None,
            size: None,
            color: None,
            model: None,
            condition: Condition::default(),
            cost_price: None,
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            rn_number: None,
            upc_code: None,
            case_pack: None,
            weight: None,
            fob_port: None,
            specifications: None,
            confidence_score: None,
            extraction_source: None,
            extraction_notes: None,
            images: Vec::new(),
            primary_image_index: None,
        }
    }
}

impl DraftProduct {
    /// A blank draft, as created when the merchant adds a product by hand during review.
    pub fn new_manual() -> Self {
        Self {
            max_order_quantity: Some(1000),
            case_pack: Some(1),
            confidence_score: Some(1.0),
            extraction_source: Some("manual".to_string()),
            ..Default::default()
        }
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

//--------------------------------------     Users & auth    ---------------------------------------------------------
string_enum!(UserRole (default Buyer) {
    Admin => "ADMIN",
    Merchant => "MERCHANT",
    Buyer => "BUYER",
    Reseller => "RESELLER",
});

string_enum!(UserTier (default SmallBusiness) {
    Enterprise => "TIER1_ENTERPRISE",
    Retailer => "TIER2_RETAILER",
    SmallBusiness => "TIER3_SMB",
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub role: UserRole,
    #[serde(deserialize_with = "lenient")]
    pub tier: Option<UserTier>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// The backend's reply to a successful login or registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub tier: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}
