//! Where the proxy gets its images from.
use std::time::Duration;

use bytes::Bytes;
use log::*;
use reqwest::{header::ACCEPT, Client};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The upstream `Content-Type`, if it sent one
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Error)]
pub enum ImageFetchError {
    #[error("The image store answered with status {0}")]
    Unavailable(u16),
    #[error("Could not reach the image store. {0}")]
    Transport(String),
}

#[allow(async_fn_in_trait)]
pub trait ImageSource {
    /// Fetches the image stored at `path`, relative to the image store root.
    async fn fetch_image(&self, path: &str) -> Result<FetchedImage, ImageFetchError>;
}

/// Fetches images over HTTP from the marketplace backend.
#[derive(Clone, Debug)]
pub struct BackendImageSource {
    base_url: String,
    client: Client,
}

impl BackendImageSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ImageFetchError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| ImageFetchError::Transport(e.to_string()))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl ImageSource for BackendImageSource {
    async fn fetch_image(&self, path: &str) -> Result<FetchedImage, ImageFetchError> {
        let url = self.url_for(path);
        debug!("🖼️ Proxying image request: {url}");
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "image/*")
            .send()
            .await
            .map_err(|e| ImageFetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!("🖼️ Backend image request failed: {status} for {url}");
            return Err(ImageFetchError::Unavailable(status.as_u16()));
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = response.bytes().await.map_err(|e| ImageFetchError::Transport(e.to_string()))?;
        trace!("🖼️ Fetched {} bytes from {url}", bytes.len());
        Ok(FetchedImage { content_type, bytes })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn urls() {
        let source = BackendImageSource::new("http://localhost:8080/api/images/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url_for("products/7/front.jpg"), "http://localhost:8080/api/images/products/7/front.jpg");
        assert_eq!(source.url_for("/a.png"), "http://localhost:8080/api/images/a.png");
    }
}
