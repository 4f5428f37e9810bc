use catalog_engine::{BackendError, SessionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketplaceApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("The session is missing, invalid or has expired. Please log in again.")]
    Unauthorized,
    #[error("You need to be logged in to do that")]
    NoSession,
    #[error("{0}")]
    SessionRefused(#[from] SessionError),
}

impl From<MarketplaceApiError> for BackendError {
    fn from(e: MarketplaceApiError) -> Self {
        match e {
            MarketplaceApiError::Unauthorized | MarketplaceApiError::NoSession => BackendError::Unauthorized,
            MarketplaceApiError::JsonError(s) => BackendError::InvalidResponse(s),
            e => BackendError::RequestFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn backend_errors() {
        assert!(matches!(BackendError::from(MarketplaceApiError::Unauthorized), BackendError::Unauthorized));
        assert!(matches!(BackendError::from(MarketplaceApiError::NoSession), BackendError::Unauthorized));
        let e = BackendError::from(MarketplaceApiError::JsonError("expected an array".into()));
        assert!(matches!(e, BackendError::InvalidResponse(ref s) if s == "expected an array"));
        let e = BackendError::from(MarketplaceApiError::QueryError { status: 500, message: "boom".into() });
        assert_eq!(e.to_string(), "Request failed: Query failed. Error 500. boom");
    }
}
