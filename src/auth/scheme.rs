//! Authentication schemes and the credentials that back them.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication scheme negotiated with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// HTTP Basic, the default installed for every configured node.
    #[default]
    Basic,
    Bearer,
    ApiKey,
}

impl AuthScheme {
    /// Name used in the `Authorization` header.
    pub fn challenge(self) -> &'static str {
        match self {
            AuthScheme::Basic => "Basic",
            AuthScheme::Bearer => "Bearer",
            AuthScheme::ApiKey => "ApiKey",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.challenge())
    }
}

/// Secrets available to the client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
}

impl Credentials {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.api_key.is_none() && self.bearer_token.is_none()
    }

    /// Scheme installed for every node: an API key wins over a bearer
    /// token, which wins over Basic.
    pub fn scheme(&self) -> AuthScheme {
        if self.api_key.is_some() {
            AuthScheme::ApiKey
        } else if self.bearer_token.is_some() {
            AuthScheme::Bearer
        } else {
            AuthScheme::Basic
        }
    }

    /// The `Authorization` header value for `scheme`, if credentials for it exist.
    pub fn authorization(&self, scheme: AuthScheme) -> Option<String> {
        let token = match scheme {
            AuthScheme::Basic => {
                let user = self.username.as_deref()?;
                let pass = self.password.as_deref().unwrap_or_default();
                STANDARD.encode(format!("{}:{}", user, pass))
            }
            AuthScheme::Bearer => self.bearer_token.clone()?,
            AuthScheme::ApiKey => self.api_key.clone()?,
        };
        Some(format!("{} {}", scheme.challenge(), token))
    }
}

// Never print secrets.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .finish()
    }
}
