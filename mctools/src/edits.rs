//! Parsing and applying the draft edits given on the `extract` command line.
use anyhow::{anyhow, Result};
use catalog_engine::drafts::{DraftEditor, DraftField};
use log::*;

/// `--set 0:discountedPrice=12.50`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub draft: usize,
    pub field: DraftField,
}

/// `--exclude 0:2`, `--primary 0:1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef {
    pub draft: usize,
    pub image: usize,
}

/// `--select color=Red`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChoice {
    pub attribute: String,
    pub value: String,
}

fn parse_index(s: &str, what: &str) -> Result<usize, String> {
    s.trim().parse::<usize>().map_err(|_| format!("'{s}' is not a valid {what} index"))
}

pub fn parse_field_edit(s: &str) -> Result<FieldEdit, String> {
    let (draft, rest) = s.split_once(':').ok_or_else(|| format!("Expected DRAFT:FIELD=VALUE, got '{s}'"))?;
    let (name, value) = rest.split_once('=').ok_or_else(|| format!("Expected DRAFT:FIELD=VALUE, got '{s}'"))?;
    let draft = parse_index(draft, "draft")?;
    let field = DraftField::parse(name, value).map_err(|e| e.to_string())?;
    Ok(FieldEdit { draft, field })
}

pub fn parse_image_ref(s: &str) -> Result<ImageRef, String> {
    let (draft, image) = s.split_once(':').ok_or_else(|| format!("Expected DRAFT:IMAGE, got '{s}'"))?;
    Ok(ImageRef { draft: parse_index(draft, "draft")?, image: parse_index(image, "image")? })
}

pub fn parse_attribute_choice(s: &str) -> Result<AttributeChoice, String> {
    match s.split_once('=') {
        Some((a, v)) if !a.trim().is_empty() && !v.trim().is_empty() => {
            Ok(AttributeChoice { attribute: a.trim().to_string(), value: v.trim().to_string() })
        },
        _ => Err(format!("Expected ATTRIBUTE=VALUE, got '{s}'")),
    }
}

#[derive(Debug, Clone, Default)]
pub struct DraftEdits {
    pub fields: Vec<FieldEdit>,
    pub exclude: Vec<ImageRef>,
    pub primary: Vec<ImageRef>,
    pub remove: Vec<usize>,
}

impl DraftEdits {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.exclude.is_empty() && self.primary.is_empty() && self.remove.is_empty()
    }

    /// Applies the edits in a fixed order: fields, image exclusions, primary images, then removals. Every index refers
    /// to the drafts as they were extracted, so removals go last and from the back.
    pub fn apply(&self, editor: &mut DraftEditor) -> Result<()> {
        for edit in &self.fields {
            debug!("Draft #{}: setting {}", edit.draft, edit.field.name());
            editor.update_field(edit.draft, edit.field.clone())?;
        }
        for r in &self.exclude {
            let included = editor
                .image_selection(r.draft)
                .map(|sel| sel.is_included(r.image))
                .ok_or_else(|| anyhow!("Draft #{} does not exist", r.draft))?;
            if included {
                editor.toggle_image(r.draft, r.image)?;
            }
        }
        for r in &self.primary {
            if !editor.set_primary_image(r.draft, r.image)? {
                warn!("Image {} of draft #{} is excluded and cannot be the primary image", r.image, r.draft);
            }
        }
        let mut remove = self.remove.clone();
        remove.sort_unstable();
        remove.dedup();
        for &i in remove.iter().rev() {
            let removed = editor.remove_draft(i)?;
            info!("Removed draft #{i} ({})", removed.name);
        }
        Ok(())
    }
}
