use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, bail, Result};
use catalog_engine::{
    catalog_types::{ProductCategory, RegisterData},
    traits::UploadFile,
    CreationWizard,
    MerchantSession,
    ProductViewApi,
    WizardError,
};
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use log::*;
use marketplace_api::{MarketplaceApi, MarketplaceApiError, MarketplaceConfig};

use crate::{
    command_def::{Command, ExtractParams, LoginParams, ProductsCommand, RegisterParams, ShowParams},
    edits::DraftEdits,
    formatting::{format_drafts, format_products, format_selection, format_user},
    profile_manager::{read_profile, write_profile, Profile},
};

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again with `mctools login`.";
const NOT_LOGGED_IN: &str = "You are not logged in. Run `mctools login` first.";

pub async fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Login(params) => login(params).await,
        Command::Register(params) => register(params).await,
        Command::Logout => Context::load(None)?.logout(),
        Command::Whoami => Context::load(None)?.whoami(),
        Command::Products(cmd) => Context::load(None)?.products(cmd).await,
        Command::Extract(params) => Context::load(None)?.extract(params).await,
    }
}

/// The stored profile together with an API client configured from it.
struct Context {
    profile: Profile,
    api: MarketplaceApi,
}

impl Context {
    /// `MC_API_URL` wins over the server stored in the profile, which in turn wins over the default.
    fn load(server: Option<&str>) -> Result<Self> {
        let profile = read_profile()?;
        let mut config = MarketplaceConfig::new_from_env_or_default();
        let stored = server.map(String::from).or_else(|| profile.api_url.clone());
        match stored {
            Some(url) if server.is_some() || std::env::var("MC_API_URL").is_err() => {
                config.api_url = url.trim_end_matches('/').to_string();
            },
            _ => {},
        }
        debug!("Using marketplace API at {}", config.api_url);
        let mut api = MarketplaceApi::new(config)?;
        if let Some(session) = profile.merchant_session() {
            api = api.with_session(session);
        }
        Ok(Self { profile, api })
    }

    fn require_session(&self) -> Result<()> {
        if self.api.session().is_none() {
            bail!(NOT_LOGGED_IN);
        }
        Ok(())
    }

    /// Forgets the stored session when the backend no longer accepts it.
    fn expire_session(&mut self) -> Result<()> {
        self.api.end_session();
        if self.profile.sign_out().is_some() {
            write_profile(&self.profile)?;
        }
        Ok(())
    }

    fn check<T>(&mut self, result: Result<T, MarketplaceApiError>) -> Result<T> {
        match result {
            Err(MarketplaceApiError::Unauthorized) => {
                self.expire_session()?;
                Err(anyhow!(SESSION_EXPIRED))
            },
            r => Ok(r?),
        }
    }

    fn check_wizard<T>(&mut self, result: Result<T, WizardError>) -> Result<T> {
        match result {
            Err(e) if e.is_unauthorized() => {
                self.expire_session()?;
                Err(anyhow!(SESSION_EXPIRED))
            },
            r => Ok(r?),
        }
    }

    fn logout(mut self) -> Result<()> {
        match self.profile.sign_out() {
            Some(user) => {
                write_profile(&self.profile)?;
                println!("Signed out {}", user.email);
            },
            None => println!("You are not logged in."),
        }
        Ok(())
    }

    fn whoami(self) -> Result<()> {
        match self.api.session() {
            Some(session) => {
                println!("Signed in to {}", self.api.url(""));
                print!("{}", format_user(session.user())?);
            },
            None => println!("You are not logged in."),
        }
        Ok(())
    }

    //------------------------------------       Products       ----------------------------------------------------

    async fn products(&mut self, command: ProductsCommand) -> Result<()> {
        let products = match command {
            ProductsCommand::List => {
                self.require_session()?;
                let result = self.api.merchant_products().await;
                self.check(result)?
            },
            ProductsCommand::Public => self.api.public_products().await?,
            ProductsCommand::Search { query } => self.api.search_products(&query).await?,
            ProductsCommand::Category { category } => {
                let category = category.parse::<ProductCategory>().map_err(|e| anyhow!("{e}"))?;
                self.api.products_by_category(category).await?
            },
            ProductsCommand::Show(params) => return self.show_product(params).await,
        };
        println!("{}", format_products(&products));
        Ok(())
    }

    async fn show_product(&self, params: ShowParams) -> Result<()> {
        let view = ProductViewApi::new(self.api.clone());
        let mut selection = view.open(params.id).await?.ok_or_else(|| anyhow!("Product #{} not found", params.id))?;
        if params.json {
            println!("{}", serde_json::to_string_pretty(selection.product())?);
            return Ok(());
        }
        for choice in &params.select {
            if !selection.select_attribute_value(&choice.attribute, &choice.value) {
                eprintln!("'{}' is not an available {} for this product", choice.value, choice.attribute);
            }
        }
        if let Some(i) = params.image {
            if !selection.select_image(i) {
                eprintln!("There is no image #{i} for this selection");
            }
        }
        print!("{}", format_selection(&selection)?);
        if let Some(image) = selection.active_image() {
            println!("Image URL: {}", self.api.image_url(image));
        }
        Ok(())
    }

    //------------------------------------    AI extraction     ----------------------------------------------------

    async fn extract(&mut self, params: ExtractParams) -> Result<()> {
        self.require_session()?;
        let file = read_upload(&params.file)?;
        let mut wizard = CreationWizard::new(self.api.clone());
        let pb = spinner(format!("Extracting products from {}...", file.filename));
        let result = wizard.process_file(file).await;
        pb.finish_and_clear();
        let count = self.check_wizard(result)?;
        println!("Extracted {count} draft products");

        let edits = DraftEdits {
            fields: params.set,
            exclude: params.exclude,
            primary: params.primary,
            remove: params.remove,
        };
        if !edits.is_empty() {
            edits.apply(wizard.editor_mut()?)?;
        }
        print!("{}", format_drafts(wizard.editor())?);
        if !params.submit {
            println!("Nothing was created. Run again with --submit to create these products.");
            return Ok(());
        }
        if !wizard.editor().is_submittable() {
            bail!("Some drafts are invalid. Fix the issues above before submitting.");
        }
        let n = wizard.editor().len();
        if !params.yes && !Confirm::new().with_prompt(format!("Create {n} products?")).interact()? {
            bail!("Cancelled");
        }
        let pb = spinner(format!("Creating {n} products..."));
        let result = wizard.submit().await;
        match &result {
            Ok(_) => pb.finish_with_message("Done!"),
            Err(_) => pb.finish_with_message("Error!"),
        }
        let created = self.check_wizard(result)?;
        println!("Successfully created {created} products");
        if !wizard.created_products().is_empty() {
            println!("{}", format_products(wizard.created_products()));
        }
        Ok(())
    }
}

//------------------------------------      Sign in       ----------------------------------------------------------

async fn login(params: LoginParams) -> Result<()> {
    let mut ctx = Context::load(params.server.as_deref())?;
    let password = Password::new().with_prompt("Password").interact()?;
    let session = ctx.api.login(&params.email, &password).await?;
    save_session(&mut ctx, params.server, &session)?;
    println!("Welcome back, {}", session.user().display_name());
    Ok(())
}

async fn register(params: RegisterParams) -> Result<()> {
    let mut ctx = Context::load(params.server.as_deref())?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    let data = RegisterData {
        first_name: params.first_name,
        last_name: params.last_name,
        email: params.email,
        password,
        company_name: params.company_name,
        phone_number: params.phone_number,
        ..Default::default()
    };
    let session = ctx.api.register(data).await?;
    save_session(&mut ctx, params.server, &session)?;
    println!("Welcome to MerchantConnect, {}", session.user().display_name());
    Ok(())
}

fn save_session(ctx: &mut Context, server: Option<String>, session: &MerchantSession) -> Result<()> {
    if let Some(url) = server {
        ctx.profile.api_url = Some(url.trim_end_matches('/').to_string());
    }
    ctx.profile.sign_in(session);
    write_profile(&ctx.profile)?;
    info!("Session for {} saved", session.user().email);
    Ok(())
}

//------------------------------------       Helpers      ----------------------------------------------------------

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    let ticks = ["🕛 ", "🕐 ", "🕑 ", "🕒 ", "🕓 ", "🕔 ", "🕕 ", "🕖 ", "🕗 ", "🕘 ", "🕙 ", "🕚 "];
    let style = ProgressStyle::with_template("{spinner:5} {msg} [{elapsed}]")
        .map(|s| s.tick_strings(&ticks))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message);
    pb
}

fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = fs::read(path).map_err(|e| anyhow!("Could not read {}. {e}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("{} is not a file", path.display()))?;
    let mime_type = guess_mime_type(&filename);
    debug!("Read {} bytes from {filename} ({mime_type})", bytes.len());
    Ok(UploadFile::new(filename, mime_type, bytes))
}

/// Maps a file extension to the MIME type the extraction service expects.
fn guess_mime_type(filename: &str) -> &'static str {
    let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "eml" => "message/rfc822",
        _ => "application/octet-stream",
    }
}
