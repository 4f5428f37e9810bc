use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::edits::{parse_attribute_choice, parse_field_edit, parse_image_ref, AttributeChoice, FieldEdit, ImageRef};

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "login", about = "Sign in to the portal as a merchant")]
    Login(LoginParams),
    #[clap(name = "register", about = "Create a new merchant account and sign in")]
    Register(RegisterParams),
    #[clap(name = "logout", about = "Forget the stored session")]
    Logout,
    #[clap(name = "whoami", about = "Show the signed-in merchant")]
    Whoami,
    #[command(subcommand)]
    /// Browse the catalog
    Products(ProductsCommand),
    #[clap(name = "extract", about = "Extract draft products from a document, review them and optionally create them")]
    Extract(ExtractParams),
}

#[derive(Debug, Args)]
pub struct LoginParams {
    /// The merchant's e-mail address
    #[arg(required = true, index = 1)]
    pub email: String,
    /// The API base URL to sign in to. It is remembered for later commands.
    #[arg(short = 's', long = "server")]
    pub server: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterParams {
    #[arg(required = true, index = 1)]
    pub email: String,
    #[arg(short = 'f', long = "first-name")]
    pub first_name: String,
    #[arg(short = 'l', long = "last-name")]
    pub last_name: String,
    #[arg(short = 'c', long = "company")]
    pub company_name: Option<String>,
    #[arg(short = 'p', long = "phone")]
    pub phone_number: Option<String>,
    #[arg(short = 's', long = "server")]
    pub server: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List the signed-in merchant's own products
    List,
    /// List every public product
    Public,
    /// Search public products by name or description
    Search {
        #[arg(required = true, index = 1)]
        query: String,
    },
    /// List public products in a category, e.g. ELECTRONICS or home-goods
    Category {
        #[arg(required = true, index = 1)]
        category: String,
    },
    /// Show a product, optionally picking a variant by its attributes
    Show(ShowParams),
}

#[derive(Debug, Args)]
pub struct ShowParams {
    #[arg(required = true, index = 1)]
    pub id: i64,
    /// Select an attribute value, e.g. `--select color=Red`. May be repeated; applied in order.
    #[arg(short = 's', long = "select", value_parser = parse_attribute_choice)]
    pub select: Vec<AttributeChoice>,
    /// Make the image at this position the active one
    #[arg(short = 'i', long = "image")]
    pub image: Option<usize>,
    /// Print the product as JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractParams {
    /// A PDF, spreadsheet, image, text or e-mail file describing the products
    #[arg(required = true, index = 1)]
    pub file: PathBuf,
    /// Change a field of a draft, e.g. `--set 0:discountedPrice=12.50`. An empty value clears optional fields.
    #[arg(long = "set", value_parser = parse_field_edit)]
    pub set: Vec<FieldEdit>,
    /// Leave an image out of a draft, e.g. `--exclude 0:2`
    #[arg(long = "exclude", value_parser = parse_image_ref)]
    pub exclude: Vec<ImageRef>,
    /// Make an image the primary image of its draft, e.g. `--primary 0:1`
    #[arg(long = "primary", value_parser = parse_image_ref)]
    pub primary: Vec<ImageRef>,
    /// Discard a draft. Positions refer to the drafts as extracted.
    #[arg(long = "remove")]
    pub remove: Vec<usize>,
    /// Create the products once the drafts are valid
    #[arg(long = "submit")]
    pub submit: bool,
    /// Do not ask for confirmation before creating products
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}
