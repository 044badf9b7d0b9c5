use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FetchError, ZendeskConfig};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("helpcenter-export/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One GET returning a decoded JSON page.
pub trait PageSource {
    fn get_page(&self, url: &Url) -> Result<Value, FetchError>;
}

/// Blocking HTTP page source authenticating with an API token.
pub struct HttpPageSource {
    client: Client,
    api_user: String,
    token: String,
}

impl HttpPageSource {
    pub fn new(config: &ZendeskConfig, settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, config.domain.as_str(), err.to_string()))?;
        Ok(Self {
            client,
            api_user: config.api_user(),
            token: config.token.clone(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn get_page(&self, url: &Url) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.api_user, Some(&self.token))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| map_reqwest_error(url, err))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(FetchError::new(
                FailureKind::Unauthorized(status.as_u16()),
                url.as_str(),
                status.to_string(),
            ));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                url.as_str(),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().map_err(|err| map_reqwest_error(url, err))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::InvalidBody, url.as_str(), err.to_string()))
    }
}

fn map_reqwest_error(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, url.as_str(), err.to_string());
    }
    FetchError::new(FailureKind::Network, url.as_str(), err.to_string())
}
