use catalog_engine::{
    drafts::{DraftField, ValidationRule},
    test_utils::fixtures::{draft_with_images, valid_draft},
};
use cucumber::{given, then, when};
use mc_common::Money;

use crate::cucumber::CatalogWorld;

fn load(world: &mut CatalogWorld, draft: catalog_engine::catalog_types::DraftProduct) {
    let mut drafts = world.editor.drafts().cloned().collect::<Vec<_>>();
    drafts.push(draft);
    world.editor.load(drafts);
}

#[given("a blank draft with zero prices and quantity")]
async fn zero_draft(world: &mut CatalogWorld) {
    let mut draft = valid_draft("");
    draft.original_price = Some(Money::default());
    draft.discounted_price = Some(Money::default());
    draft.quantity = Some(0);
    load(world, draft);
}

#[given(expr = "a valid draft named {string}")]
async fn named_draft(world: &mut CatalogWorld, name: String) {
    load(world, valid_draft(&name));
}

#[given(expr = "a valid draft with {int} images")]
async fn draft_with_n_images(world: &mut CatalogWorld, count: usize) {
    load(world, draft_with_images(count));
}

#[when("I add a blank draft")]
async fn add_draft(world: &mut CatalogWorld) {
    world.editor.add_draft();
}

#[when(expr = "I remove draft {int}")]
async fn remove_draft(world: &mut CatalogWorld, index: usize) {
    world.editor.remove_draft(index).expect("Draft does not exist");
}

#[when(expr = "I set {word} of draft {int} to {string}")]
async fn set_field(world: &mut CatalogWorld, field: String, index: usize, value: String) {
    let field = DraftField::parse(&field, &value).expect("Invalid field");
    world.editor.update_field(index, field).expect("Draft does not exist");
}

#[when(expr = "I toggle image {int} of draft {int}")]
async fn toggle_image(world: &mut CatalogWorld, image: usize, index: usize) {
    world.editor.toggle_image(index, image).expect("Image does not exist");
}

#[when(expr = "I make image {int} of draft {int} primary")]
async fn make_primary(world: &mut CatalogWorld, image: usize, index: usize) {
    world.editor.set_primary_image(index, image).expect("Image does not exist");
}

#[when(expr = "I deselect all images of draft {int}")]
async fn deselect_all(world: &mut CatalogWorld, index: usize) {
    world.editor.select_all_images(index, false).expect("Draft does not exist");
}

#[when(expr = "I select all images of draft {int}")]
async fn select_all(world: &mut CatalogWorld, index: usize) {
    world.editor.select_all_images(index, true).expect("Draft does not exist");
}

#[when("I prepare the submission")]
async fn prepare(world: &mut CatalogWorld) {
    world.prepared = Some(world.editor.prepare_submission().expect("Drafts are not valid"));
}

#[then(expr = "draft {int} has {int} validation errors")]
async fn error_count(world: &mut CatalogWorld, index: usize, count: usize) {
    assert_eq!(world.editor.issues(index).len(), count, "Issues: {:?}", world.editor.issues(index));
}

#[then(expr = "draft {int} reports {string}")]
async fn reports(world: &mut CatalogWorld, index: usize, message: String) {
    let found = world.editor.issues(index).iter().any(|rule: &ValidationRule| rule.message() == message);
    assert!(found, "'{message}' not in {:?}", world.editor.issues(index));
}

#[then(expr = "draft {int} is named {string}")]
async fn named(world: &mut CatalogWorld, index: usize, name: String) {
    assert_eq!(world.editor.draft(index).map(|d| d.name.as_str()), Some(name.as_str()));
}

#[then(expr = "there are {int} drafts")]
async fn draft_count(world: &mut CatalogWorld, count: usize) {
    assert_eq!(world.editor.len(), count);
}

#[then(expr = "the primary image of draft {int} is {int}")]
async fn primary_image(world: &mut CatalogWorld, index: usize, image: usize) {
    let primary = world.editor.image_selection(index).and_then(|s| s.primary());
    assert_eq!(primary, Some(image));
}

#[then(expr = "draft {int} has no primary image")]
async fn no_primary_image(world: &mut CatalogWorld, index: usize) {
    let primary = world.editor.image_selection(index).and_then(|s| s.primary());
    assert_eq!(primary, None);
}

#[then("the drafts can be submitted")]
async fn submittable(world: &mut CatalogWorld) {
    assert!(world.editor.is_submittable(), "Errors: {:?}", world.editor.validation_errors());
}

#[then("the drafts cannot be submitted")]
async fn not_submittable(world: &mut CatalogWorld) {
    assert!(!world.editor.is_submittable());
    assert!(world.editor.prepare_submission().is_err());
}

#[then(expr = "prepared draft {int} has images {string}")]
async fn prepared_images(world: &mut CatalogWorld, index: usize, names: String) {
    let expected = names
        .split(',')
        .map(|n| format!("https://cdn.example.com/{}.jpg", n.trim()))
        .collect::<Vec<String>>();
    assert_eq!(world.prepared()[index].images, expected);
}

#[then(expr = "prepared draft {int} has primary image index {int}")]
async fn prepared_primary(world: &mut CatalogWorld, index: usize, image: usize) {
    assert_eq!(world.prepared()[index].primary_image_index, Some(image));
}

#[then("preparing again gives the same result")]
async fn prepare_again(world: &mut CatalogWorld) {
    let again = world.editor.prepare_submission().expect("Drafts are not valid");
    assert_eq!(world.prepared(), again.as_slice());
}
