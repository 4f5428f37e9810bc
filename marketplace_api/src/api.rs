use std::sync::Arc;

use catalog_engine::{
    catalog_types::{AuthResponse, DraftProduct, LoginData, Product, ProductCategory, ProductId, RegisterData, UserRole},
    helpers::ImageResolver,
    traits::{CreationResult, ExtractionResult, ExtractionValidation, UploadFile},
    BackendError,
    CatalogBackend,
    ExtractionBackend,
    MerchantSession,
};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    multipart::{Form, Part},
    Client,
    Method,
    RequestBuilder,
    Response,
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{config::MarketplaceConfig, MarketplaceApiError};

/// Client for the marketplace REST API.
///
/// Public catalog endpoints work without a session. Everything else needs a [`MerchantSession`], supplied with
/// [`MarketplaceApi::with_session`] (usually the one returned by [`MarketplaceApi::login`]).
#[derive(Clone)]
pub struct MarketplaceApi {
    config: MarketplaceConfig,
    client: Arc<Client>,
    images: ImageResolver,
    session: Option<MerchantSession>,
}

impl MarketplaceApi {
    pub fn new(config: MarketplaceConfig) -> Result<Self, MarketplaceApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| MarketplaceApiError::Initialization(e.to_string()))?;
        let images = ImageResolver::new(&config.image_base_url);
        Ok(Self { config, client: Arc::new(client), images, session: None })
    }

    pub fn with_session(mut self, session: MerchantSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Forgets the current session, returning it if there was one.
    pub fn end_session(&mut self) -> Option<MerchantSession> {
        let session = self.session.take();
        if let Some(s) = &session {
            info!("🔐️ Session for {} ended", s.user().email);
        }
        session
    }

    pub fn session(&self) -> Option<&MerchantSession> {
        self.session.as_ref()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    /// The absolute URL for an image reference returned by the API.
    pub fn image_url(&self, image: &str) -> String {
        self.images.resolve(image)
    }

    //------------------------------------    REST plumbing     ----------------------------------------------------

    fn request(&self, method: Method, path: &str, authenticated: bool) -> Result<RequestBuilder, MarketplaceApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url);
        if authenticated {
            let session = self.session.as_ref().ok_or(MarketplaceApiError::NoSession)?;
            let val = HeaderValue::from_str(&session.bearer())
                .map_err(|e| MarketplaceApiError::RestRequestError(e.to_string()))?;
            req = req.header(AUTHORIZATION, val);
        }
        Ok(req)
    }

    async fn send(req: RequestBuilder) -> Result<Response, MarketplaceApiError> {
        let response = req.send().await.map_err(|e| MarketplaceApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("REST query successful. {status}");
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            warn!("🔐️ The backend rejected our credentials");
            return Err(MarketplaceApiError::Unauthorized);
        }
        let message = response.text().await.map_err(|e| MarketplaceApiError::RestResponseError(e.to_string()))?;
        debug!("REST query failed. {status}. {message}");
        Err(MarketplaceApiError::QueryError { status: status.as_u16(), message })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
        authenticated: bool,
    ) -> Result<T, MarketplaceApiError> {
        let mut req = self.request(method, path, authenticated)?;
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = Self::send(req).await?;
        response.json::<T>().await.map_err(|e| MarketplaceApiError::JsonError(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, authenticated: bool) -> Result<T, MarketplaceApiError> {
        self.rest_query::<T, ()>(Method::GET, path, &[], None, authenticated).await
    }

    //------------------------------------    Authentication    ----------------------------------------------------

    /// Logs in and returns the merchant's session. Non-merchant accounts are refused.
    pub async fn login(&self, email: &str, password: &str) -> Result<MerchantSession, MarketplaceApiError> {
        let data = LoginData { email: email.to_string(), password: password.to_string() };
        debug!("🔐️ Logging in as {email}");
        let auth = self.rest_query::<AuthResponse, _>(Method::POST, "/auth/login", &[], Some(data), false).await?;
        Ok(MerchantSession::establish(auth)?)
    }

    /// Registers a new merchant account. The role is always MERCHANT, whatever `data` says.
    pub async fn register(&self, data: RegisterData) -> Result<MerchantSession, MarketplaceApiError> {
        let data = merchant_registration(data);
        debug!("🔐️ Registering {}", data.email);
        let auth = self.rest_query::<AuthResponse, _>(Method::POST, "/auth/register", &[], Some(data), false).await?;
        Ok(MerchantSession::establish(auth)?)
    }

    //------------------------------------       Products       ----------------------------------------------------

    pub async fn public_products(&self) -> Result<Vec<Product>, MarketplaceApiError> {
        self.get("/products/public", false).await
    }

    /// Fetches a public product. Returns `None` if the backend does not know it.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, MarketplaceApiError> {
        match self.get::<Product>(&format!("/products/public/{id}"), false).await {
            Ok(p) => Ok(Some(p)),
            Err(MarketplaceApiError::QueryError { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, MarketplaceApiError> {
        let params = [("query", query)];
        self.rest_query::<_, ()>(Method::GET, "/products/public/search", &params, None, false).await
    }

    pub async fn products_by_category(&self, category: ProductCategory) -> Result<Vec<Product>, MarketplaceApiError> {
        self.get(&format!("/products/public/category/{category}"), false).await
    }

    pub async fn merchant_products(&self) -> Result<Vec<Product>, MarketplaceApiError> {
        self.get("/products/merchant", true).await
    }

    pub async fn create_product(&self, product: &Product) -> Result<Product, MarketplaceApiError> {
        let result = self.rest_query::<Product, _>(Method::POST, "/products", &[], Some(product), true).await?;
        info!("Created product #{} ({})", result.id, result.name);
        Ok(result)
    }

    pub async fn update_product(&self, id: ProductId, product: &Product) -> Result<Product, MarketplaceApiError> {
        let path = format!("/products/{id}");
        let result = self.rest_query::<Product, _>(Method::PUT, &path, &[], Some(product), true).await?;
        info!("Updated product #{id}");
        Ok(result)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), MarketplaceApiError> {
        let req = self.request(Method::DELETE, &format!("/products/{id}"), true)?;
        Self::send(req).await?;
        info!("Deleted product #{id}");
        Ok(())
    }

    //------------------------------------    AI extraction     ----------------------------------------------------

    /// The file types the extraction service accepts. The response shape is defined by the backend.
    pub async fn supported_file_types(&self) -> Result<Value, MarketplaceApiError> {
        self.get("/ai-extraction/supported-types", true).await
    }

    pub async fn upload_and_process(&self, file: UploadFile) -> Result<ExtractionResult, MarketplaceApiError> {
        let size = file.bytes.len();
        let mime = if file.mime_type.trim().is_empty() { "application/octet-stream" } else { file.mime_type.as_str() };
        let part = Part::bytes(file.bytes)
            .file_name(file.filename.clone())
            .mime_str(mime)
            .map_err(|e| MarketplaceApiError::RestRequestError(e.to_string()))?;
        let form = Form::new().part("file", part);
        debug!("Uploading {} ({size} bytes) for extraction", file.filename);
        let req = self.request(Method::POST, "/ai-extraction/upload", true)?.multipart(form);
        let response = Self::send(req).await?;
        response.json::<ExtractionResult>().await.map_err(|e| MarketplaceApiError::JsonError(e.to_string()))
    }

    pub async fn validate_extraction(
        &self,
        drafts: &[DraftProduct],
    ) -> Result<ExtractionValidation, MarketplaceApiError> {
        self.rest_query(Method::POST, "/ai-extraction/validate-extraction", &[], Some(drafts), true).await
    }

    pub async fn create_products_from_extraction(
        &self,
        drafts: &[DraftProduct],
    ) -> Result<CreationResult, MarketplaceApiError> {
        self.rest_query(Method::POST, "/ai-extraction/create-products", &[], Some(drafts), true).await
    }
}

fn merchant_registration(data: RegisterData) -> RegisterData {
    RegisterData { role: Some(UserRole::Merchant.to_string()), ..data }
}

//------------------------------------  Engine backends  -----------------------------------------------------------

impl CatalogBackend for MarketplaceApi {
    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        Ok(self.product(id).await?)
    }

    async fn fetch_merchant_products(&self) -> Result<Vec<Product>, BackendError> {
        Ok(self.merchant_products().await?)
    }
}

impl ExtractionBackend for MarketplaceApi {
    async fn extract_drafts(&self, file: UploadFile) -> Result<ExtractionResult, BackendError> {
        Ok(self.upload_and_process(file).await?)
    }

    async fn validate_drafts(&self, drafts: &[DraftProduct]) -> Result<ExtractionValidation, BackendError> {
        Ok(self.validate_extraction(drafts).await?)
    }

    async fn create_products(&self, drafts: &[DraftProduct]) -> Result<CreationResult, BackendError> {
        Ok(self.create_products_from_extraction(drafts).await?)
    }
}
