use std::fmt::{Display, Write};

use anyhow::Result;
use catalog_engine::{
    catalog_types::{Product, User},
    drafts::{confidence_level, DraftEditor},
    variants::VariantSelection,
};
use prettytable::{
    format::{LinePosition, LineSeparator, TableFormat},
    row,
    Table,
};

fn markdown_format() -> TableFormat {
    prettytable::format::FormatBuilder::new()
        .column_separator('|')
        .borders('|')
        .separator(LinePosition::Title, LineSeparator::new('-', '|', '|', '|'))
        .padding(1, 1)
        .build()
}

fn markdown_style(table: &mut Table) {
    table.set_format(markdown_format());
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_user(user: &User) -> Result<String> {
    let mut f = String::new();
    writeln!(f, "Name:    {}", user.display_name())?;
    writeln!(f, "Email:   {}", user.email)?;
    writeln!(f, "Company: {}", or_dash(user.company_name.as_deref()))?;
    writeln!(f, "Role:    {}", user.role)?;
    writeln!(f, "Tier:    {}", or_dash(user.tier.as_ref()))?;
    Ok(f)
}

pub fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products".to_string();
    }
    let mut table = Table::new();
    table.set_titles(row!["ID", "Name", "SKU", "Category", "Type", "Price", "Original", "Qty", "Variants", "Status"]);
    products.iter().for_each(|p| {
        let price = if p.is_parent() { p.starting_price() } else { p.discounted_price };
        let variants = if p.is_parent() { p.variants.len().to_string() } else { "-".to_string() };
        table.add_row(row![
            p.id,
            p.name,
            or_dash(p.sku.as_deref()),
            p.category,
            p.product_type,
            r->or_dash(price),
            r->or_dash(p.original_price),
            r->or_dash(p.quantity),
            variants,
            p.status
        ]);
    });
    markdown_style(&mut table);
    table.to_string()
}

/// The variant picker followed by the values a buyer would see for the current selection.
pub fn format_selection(selection: &VariantSelection) -> Result<String> {
    let product = selection.product();
    let mut f = String::new();
    writeln!(f, "===============================================================================")?;
    writeln!(f, "#{} {} ({})", product.id, product.name, product.currency())?;
    writeln!(f, "===============================================================================")?;
    let options = selection.options();
    if !options.is_empty() {
        let mut table = Table::new();
        table.set_titles(row!["Attribute", "Values", "Selected"]);
        options.iter().for_each(|o| {
            table.add_row(row![o.name, o.values.join(", "), or_dash(o.selected.as_deref())]);
        });
        markdown_style(&mut table);
        writeln!(f, "{table}")?;
    }
    let variant = match selection.selected_variant() {
        Some(v) => v.label(),
        None if product.is_parent() => "No matching variant".to_string(),
        None => "-".to_string(),
    };
    let discount = match selection.discount_percent() {
        0 => "-".to_string(),
        d => format!("{d}% off"),
    };
    let mut table = Table::new();
    table.add_row(row!["Variant", variant]);
    table.add_row(row!["SKU", or_dash(selection.effective_sku())]);
    table.add_row(row!["Price", or_dash(selection.effective_price())]);
    table.add_row(row!["Original price", or_dash(selection.effective_original_price())]);
    table.add_row(row!["Discount", discount]);
    table.add_row(row!["In stock", or_dash(selection.effective_quantity())]);
    table.add_row(row!["Minimum order", or_dash(selection.effective_min_order_quantity())]);
    table.add_row(row!["Images", selection.effective_images().len()]);
    table.add_row(row!["Active image", or_dash(selection.active_image())]);
    markdown_style(&mut table);
    writeln!(f, "{table}")?;
    Ok(f)
}

/// The drafts under review, with their image selection and any validation issues.
pub fn format_drafts(editor: &DraftEditor) -> Result<String> {
    if editor.is_empty() {
        return Ok("No draft products".to_string());
    }
    let mut table = Table::new();
    table.set_titles(row!["#", "Name", "SKU", "Price", "Original", "Qty", "Images", "Primary", "Confidence"]);
    for (i, draft) in editor.drafts().enumerate() {
        let (images, primary) = match editor.image_selection(i) {
            Some(sel) if !sel.is_empty() => {
                (format!("{}/{}", sel.included_count(), sel.len()), or_dash(sel.primary()))
            },
            _ => ("-".to_string(), "-".to_string()),
        };
        let confidence = draft
            .confidence_score
            .map(|c| format!("{} ({:.0}%)", confidence_level(c), c * 100.0))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            i,
            draft.name,
            draft.sku,
            r->or_dash(draft.discounted_price),
            r->or_dash(draft.original_price),
            r->or_dash(draft.quantity),
            images,
            primary,
            confidence
        ]);
    }
    markdown_style(&mut table);
    let mut f = String::new();
    writeln!(f, "{table}")?;
    let errors = editor.validation_errors();
    if errors.is_empty() {
        writeln!(f, "All {} drafts are ready to submit.", editor.len())?;
    } else {
        writeln!(f, "Issues:")?;
        for (i, issues) in errors {
            for issue in issues {
                writeln!(f, "  #{i} {}: {}", issue.field(), issue.message())?;
            }
        }
    }
    Ok(f)
}
