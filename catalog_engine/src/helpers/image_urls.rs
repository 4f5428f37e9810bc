//! Image references in catalog records are either absolute URLs (typically from the extraction service) or paths
//! relative to the backend's image store (e.g. `/images/products/42/front.jpg`). The resolver turns both into
//! something a client can fetch. It is a pure string transform and performs no I/O.

pub const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageResolver {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if is_absolute(reference) {
            return reference.to_string();
        }
        let path = reference.trim_start_matches('/');
        format!("{}/{path}", self.base_url)
    }

    pub fn resolve_all(&self, references: &[String]) -> Vec<String> {
        references.iter().map(|r| self.resolve(r)).collect()
    }
}

fn is_absolute(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

#[cfg(test)]
mod test {
    use super::ImageResolver;

    #[test]
    fn absolute_urls_pass_through() {
        let resolver = ImageResolver::new("http://localhost:8080/api/");
        assert_eq!(resolver.resolve("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
        assert_eq!(resolver.resolve("HTTP://cdn.example.com/b.png"), "HTTP://cdn.example.com/b.png");
    }

    #[test]
    fn relative_paths_join_the_base() {
        let resolver = ImageResolver::new("http://localhost:8080/api/");
        assert_eq!(resolver.base_url(), "http://localhost:8080/api");
        assert_eq!(resolver.resolve("/images/42/front.jpg"), "http://localhost:8080/api/images/42/front.jpg");
        assert_eq!(resolver.resolve("images/42/back.jpg"), "http://localhost:8080/api/images/42/back.jpg");
    }
}
