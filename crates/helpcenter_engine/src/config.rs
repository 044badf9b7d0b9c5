use std::fmt;

use url::Url;

pub const USER_VAR: &str = "ZENDESK_USER";
pub const TOKEN_VAR: &str = "ZENDESK_TOKEN";
pub const DOMAIN_VAR: &str = "ZENDESK_DOMAIN";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingCredential(&'static str),
    #[error("invalid ZENDESK_DOMAIN {domain:?}: {message}")]
    InvalidDomain { domain: String, message: String },
}

/// Credentials and host of the help center to read from.
///
/// Passed explicitly to the client so tests can point it at a fixture server.
#[derive(Clone, PartialEq, Eq)]
pub struct ZendeskConfig {
    pub user: String,
    pub token: String,
    pub domain: String,
}

impl ZendeskConfig {
    pub fn new(user: impl Into<String>, token: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
            domain: domain.into(),
        }
    }

    /// Read `ZENDESK_USER`, `ZENDESK_TOKEN` and `ZENDESK_DOMAIN` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ZendeskConfig::from_env`] with a caller supplied lookup.
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(key))
        };
        Ok(Self {
            user: require(USER_VAR)?,
            token: require(TOKEN_VAR)?,
            domain: require(DOMAIN_VAR)?,
        })
    }

    /// `acme.zendesk.com` becomes `https://acme.zendesk.com/`; a value that
    /// already carries an `http(s)://` scheme is used as is.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.domain.trim().trim_end_matches('/');
        let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };
        let url = Url::parse(&candidate).map_err(|err| ConfigError::InvalidDomain {
            domain: self.domain.clone(),
            message: err.to_string(),
        })?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ConfigError::InvalidDomain {
                domain: self.domain.clone(),
                message: "no host".into(),
            });
        }
        Ok(url)
    }

    /// User name for API token authentication.
    pub fn api_user(&self) -> String {
        format!("{}/token", self.user)
    }
}

impl fmt::Debug for ZendeskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZendeskConfig")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}
