//! Sample catalog data shared by unit tests and the cucumber suite.
use std::collections::BTreeMap;

use mc_common::Money;

use crate::catalog_types::{DraftProduct, Product, ProductCategory, ProductVariant, VariantType};

/// A parent product with `color` {Red, Blue} and `size` {S, M} options, and two variants:
/// V1 (Red, S) at $10 without images, and V2 (Blue, M) at $12 with two images, the second of which is primary.
pub fn tee_shirt() -> Product {
    let options: BTreeMap<String, Vec<String>> = [
        ("color".to_string(), vec!["Red".to_string(), "Blue".to_string()]),
        ("size".to_string(), vec!["S".to_string(), "M".to_string()]),
    ]
    .into_iter()
    .collect();
    let v1 = ProductVariant::new([("color", "Red"), ("size", "S")])
        .with_prices(Money::from_units(15), Money::from_units(10));
    let mut v2 = ProductVariant::new([("color", "Blue"), ("size", "M")])
        .with_quantity(40)
        .with_images(["/images/p/blue-m-1.jpg", "/images/p/blue-m-2.jpg"]);
    v2.discounted_price = Some(Money::from_units(12));
    v2.primary_image_index = Some(1);
    Product {
        id: 1,
        name: "Crew neck tee".to_string(),
        sku: Some("TEE-001".to_string()),
        category: ProductCategory::Apparel,
        original_price: Some(Money::from_units(15)),
        discounted_price: Some(Money::from_units(9)),
        quantity: Some(500),
        min_order_quantity: Some(12),
        variant_type: VariantType::Parent,
        variant_options: options,
        variants: vec![v1, v2],
        images: vec!["/images/p/front.jpg".to_string(), "/images/p/back.jpg".to_string()],
        ..Default::default()
    }
}

/// A product without variants, half price.
pub fn simple_product() -> Product {
    Product {
        id: 2,
        name: "Stainless water bottle".to_string(),
        category: ProductCategory::SportsOutdoors,
        original_price: Some(Money::from_cents(3998)),
        discounted_price: Some(Money::from_cents(1999)),
        quantity: Some(1200),
        min_order_quantity: Some(24),
        images: vec!["https://cdn.example.com/bottle.jpg".to_string()],
        ..Default::default()
    }
}

/// A draft that passes validation and has no images.
pub fn valid_draft(name: &str) -> DraftProduct {
    DraftProduct {
        name: name.to_string(),
        original_price: Some(Money::from_units(40)),
        discounted_price: Some(Money::from_units(25)),
        quantity: Some(100),
        confidence_score: Some(0.9),
        extraction_source: Some("pdf".to_string()),
        ..Default::default()
    }
}

/// A valid draft with `count` images named `img0.jpg`, `img1.jpg`, ...
pub fn draft_with_images(count: usize) -> DraftProduct {
    let images = (0..count).map(|i| format!("https://cdn.example.com/img{i}.jpg")).collect();
    DraftProduct { images, ..valid_draft("Canvas tote") }
}
