use std::{fmt::Display, str::FromStr};

use mc_common::Money;
use thiserror::Error;

use crate::catalog_types::{Condition, DraftProduct, ProductCategory, ProductType};

#[derive(Debug, Clone, Error)]
pub enum DraftFieldError {
    #[error("'{0}' is not an editable draft field")]
    UnknownField(String),
    #[error("Invalid value for {field}: '{value}'. {reason}")]
    InvalidValue { field: &'static str, value: String, reason: String },
}

/// A single field edit on a [`DraftProduct`].
///
/// Optional fields take an `Option`; `None` clears them. Images are edited through the editor's image operations, and
/// the extraction metadata (confidence, source) is read-only.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Name(String),
    Description(String),
    Brand(String),
    Category(ProductCategory),
    ProductType(ProductType),
    OriginalPrice(Option<Money>),
    DiscountedPrice(Option<Money>),
    WholesalePrice(Option<Money>),
    RetailPrice(Option<Money>),
    CostPrice(Option<Money>),
    Quantity(Option<i64>),
    MinOrderQuantity(Option<i64>),
    MaxOrderQuantity(Option<i64>),
    Sku(String),
    Material(Option<String>),
    Size(Option<String>),
    Color(Option<String>),
    Model(Option<String>),
    Condition(Condition),
    Currency(String),
    RnNumber(Option<String>),
    UpcCode(Option<String>),
    CasePack(Option<i64>),
    Weight(Option<f64>),
    FobPort(Option<String>),
    Specifications(Option<String>),
    ExtractionNotes(Option<String>),
}

impl DraftField {
    /// Builds a field edit from a field name and its textual value, e.g. `("discountedPrice", "12.50")`.
    ///
    /// Names are matched case-insensitively in camelCase, snake_case or kebab-case. An empty value clears optional
    /// fields.
    pub fn parse(name: &str, value: &str) -> Result<Self, DraftFieldError> {
        let key = name.trim().replace(['_', '-'], "").to_ascii_lowercase();
        let value = value.trim();
        let field = match key.as_str() {
            "name" => Self::Name(value.to_string()),
            "description" => Self::Description(value.to_string()),
            "brand" => Self::Brand(value.to_string()),
            "category" => Self::Category(parse_value("category", value)?),
            "type" | "producttype" => Self::ProductType(parse_value("type", value)?),
            "originalprice" => Self::OriginalPrice(parse_optional("originalPrice", value)?),
            "discountedprice" => Self::DiscountedPrice(parse_optional("discountedPrice", value)?),
            "wholesaleprice" => Self::WholesalePrice(parse_optional("wholesalePrice", value)?),
            "retailprice" => Self::RetailPrice(parse_optional("retailPrice", value)?),
            "costprice" => Self::CostPrice(parse_optional("costPrice", value)?),
            "quantity" => Self::Quantity(parse_optional("quantity", value)?),
            "minorderquantity" => Self::MinOrderQuantity(parse_optional("minOrderQuantity", value)?),
            "maxorderquantity" => Self::MaxOrderQuantity(parse_optional("maxOrderQuantity", value)?),
            "sku" => Self::Sku(value.to_string()),
            "material" => Self::Material(optional_text(value)),
            "size" => Self::Size(optional_text(value)),
            "color" => Self::Color(optional_text(value)),
            "model" => Self::Model(optional_text(value)),
            "condition" => Self::Condition(parse_value("condition", value)?),
            "currency" => Self::Currency(value.to_ascii_uppercase()),
            "rnnumber" => Self::RnNumber(optional_text(value)),
            "upccode" => Self::UpcCode(optional_text(value)),
            "casepack" => Self::CasePack(parse_optional("casePack", value)?),
            "weight" => Self::Weight(parse_optional("weight", value)?),
            "fobport" => Self::FobPort(optional_text(value)),
            "specifications" => Self::Specifications(optional_text(value)),
            "extractionnotes" => Self::ExtractionNotes(optional_text(value)),
            _ => return Err(DraftFieldError::UnknownField(name.to_string())),
        };
        Ok(field)
    }

    pub fn apply(self, draft: &mut DraftProduct) {
        match self {
            Self::Name(v) => draft.name = v,
            Self::Description(v) => draft.description = v,
            Self::Brand(v) => draft.brand = v,
            Self::Category(v) => draft.category = v,
            Self::ProductType(v) => draft.product_type = v,
            Self::OriginalPrice(v) => draft.original_price = v,
            Self::DiscountedPrice(v) => draft.discounted_price = v,
            Self::WholesalePrice(v) => draft.wholesale_price = v,
            Self::RetailPrice(v) => draft.retail_price = v,
            Self::CostPrice(v) => draft.cost_price = v,
            Self::Quantity(v) => draft.quantity = v,
            Self::MinOrderQuantity(v) => draft.min_order_quantity = v,
            Self::MaxOrderQuantity(v) => draft.max_order_quantity = v,
            Self::Sku(v) => draft.sku = v,
            Self::Material(v) => draft.material = v,
            Self::Size(v) => draft.size = v,
            Self::Color(v) => draft.color = v,
            Self::Model(v) => draft.model = v,
            Self::Condition(v) => draft.condition = v,
            Self::Currency(v) => draft.currency = v,
            Self::RnNumber(v) => draft.rn_number = v,
            Self::UpcCode(v) => draft.upc_code = v,
            Self::CasePack(v) => draft.case_pack = v,
            Self::Weight(v) => draft.weight = v,
            Self::FobPort(v) => draft.fob_port = v,
            Self::Specifications(v) => draft.specifications = v,
            Self::ExtractionNotes(v) => draft.extraction_notes = v,
        }
    }

    /// The camelCase name of the field, as used in the backend's JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::Brand(_) => "brand",
            Self::Category(_) => "category",
            Self::ProductType(_) => "type",
            Self::OriginalPrice(_) => "originalPrice",
            Self::DiscountedPrice(_) => "discountedPrice",
            Self::WholesalePrice(_) => "wholesalePrice",
            Self::RetailPrice(_) => "retailPrice",
            Self::CostPrice(_) => "costPrice",
            Self::Quantity(_) => "quantity",
            Self::MinOrderQuantity(_) => "minOrderQuantity",
            Self::MaxOrderQuantity(_) => "maxOrderQuantity",
            Self::Sku(_) => "sku",
            Self::Material(_) => "material",
            Self::Size(_) => "size",
            Self::Color(_) => "color",
            Self::Model(_) => "model",
            Self::Condition(_) => "condition",
            Self::Currency(_) => "currency",
            Self::RnNumber(_) => "rnNumber",
            Self::UpcCode(_) => "upcCode",
            Self::CasePack(_) => "casePack",
            Self::Weight(_) => "weight",
            Self::FobPort(_) => "fobPort",
            Self::Specifications(_) => "specifications",
            Self::ExtractionNotes(_) => "extractionNotes",
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_value<T>(field: &'static str, value: &str) -> Result<T, DraftFieldError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|e| DraftFieldError::InvalidValue {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_optional<T>(field: &'static str, value: &str) -> Result<Option<T>, DraftFieldError>
where
    T: FromStr,
    T::Err: Display,
{
    if value.is_empty() {
        return Ok(None);
    }
    parse_value(field, value).map(Some)
}
