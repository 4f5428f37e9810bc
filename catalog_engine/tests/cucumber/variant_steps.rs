use catalog_engine::{test_utils::fixtures::tee_shirt, variants::VariantSelection};
use cucumber::{given, then, when};
use mc_common::Money;

use crate::cucumber::CatalogWorld;

#[given("the tee shirt product with color and size variants")]
async fn tee_shirt_product(world: &mut CatalogWorld) {
    world.selection = Some(VariantSelection::new(tee_shirt()));
}

#[when(expr = "I select {word} {word}")]
async fn select_value(world: &mut CatalogWorld, attribute: String, value: String) {
    world.last_selection_accepted = world.selection_mut().select_attribute_value(&attribute, &value);
}

#[when(expr = "I pick thumbnail {int}")]
async fn pick_thumbnail(world: &mut CatalogWorld, index: usize) {
    world.selection_mut().select_image(index);
}

#[then("the selection was rejected")]
async fn selection_rejected(world: &mut CatalogWorld) {
    assert!(!world.last_selection_accepted, "The selection was accepted");
}

#[then(expr = "the selected variant is V{int}")]
async fn selected_variant(world: &mut CatalogWorld, number: usize) {
    assert_eq!(world.selection().selected_variant_index(), Some(number - 1));
}

#[then("no variant is selected")]
async fn no_variant(world: &mut CatalogWorld) {
    assert!(world.selection().selected_variant().is_none(), "A variant is selected");
}

#[then(expr = "the selected value of {word} is {word}")]
async fn selected_attribute(world: &mut CatalogWorld, attribute: String, value: String) {
    let selected = world.selection().selected_attributes().get(&attribute).cloned();
    assert_eq!(selected, Some(value));
}

#[then(expr = "the effective price is {word}")]
async fn effective_price(world: &mut CatalogWorld, price: String) {
    let expected = price.parse::<Money>().expect("Not a valid price");
    assert_eq!(world.selection().effective_price(), Some(expected));
}

#[then(expr = "the effective quantity is {int}")]
async fn effective_quantity(world: &mut CatalogWorld, quantity: i64) {
    assert_eq!(world.selection().effective_quantity(), Some(quantity));
}

#[then(expr = "the discount is {int} percent")]
async fn discount(world: &mut CatalogWorld, percent: i64) {
    assert_eq!(world.selection().discount_percent(), percent);
}

#[then(expr = "the active image is {string}")]
async fn active_image(world: &mut CatalogWorld, image: String) {
    assert_eq!(world.selection().active_image(), Some(image.as_str()));
}

#[then(expr = "resolving again gives the same variant")]
async fn idempotent(world: &mut CatalogWorld) {
    let selection = world.selection();
    assert_eq!(selection.resolve(), selection.selected_variant_index());
    assert_eq!(selection.resolve(), selection.resolve());
}
