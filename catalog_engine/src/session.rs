//! The signed-in merchant.
//!
//! A [`MerchantSession`] is created once the backend has authenticated a user, and is handed explicitly to whatever
//! needs to make authenticated calls. There is no global session; dropping the value (or calling `end_session` on the
//! client holding it) signs the merchant out.
use log::*;
use mc_common::Secret;
use thiserror::Error;

use crate::catalog_types::{AuthResponse, User, UserRole, UserTier};

pub const MERCHANT_ONLY_MESSAGE: &str = "Access denied. This portal is only for merchants.";

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Access denied. This portal is only for merchants.")]
    NotAMerchant(UserRole),
    #[error("The authentication response did not contain a token")]
    MissingToken,
    #[error("Unrecognised role '{0}'")]
    UnknownRole(String),
}

#[derive(Debug, Clone)]
pub struct MerchantSession {
    token: Secret<String>,
    user: User,
}

impl MerchantSession {
    /// Builds a session from a login or registration response. Only merchants may sign in.
    pub fn establish(auth: AuthResponse) -> Result<Self, SessionError> {
        if auth.token.trim().is_empty() {
            return Err(SessionError::MissingToken);
        }
        let role = auth.role.parse::<UserRole>().map_err(|_| SessionError::UnknownRole(auth.role.clone()))?;
        if role != UserRole::Merchant {
            warn!("🔐️ {} tried to sign in with role {role}", auth.email);
            return Err(SessionError::NotAMerchant(role));
        }
        let tier = auth.tier.as_deref().and_then(|t| t.parse::<UserTier>().ok());
        let user = User {
            id: auth.user_id,
            email: auth.email,
            first_name: auth.first_name,
            last_name: auth.last_name,
            role,
            tier,
            ..Default::default()
        };
        info!("🔐️ Merchant session started for {}", user.email);
        Ok(Self { token: Secret::new(auth.token), user })
    }

    /// Restores a session from a stored token, e.g. a saved CLI profile.
    pub fn restore(token: String, user: User) -> Self {
        Self { token: Secret::new(token), user }
    }

    pub fn token(&self) -> &Secret<String> {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// The value of the `Authorization` header for authenticated requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.reveal())
    }
}
