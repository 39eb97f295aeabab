use std::path::PathBuf;
use std::time::Duration;

use chainview_core::ChainviewError;
use url::Url;

use crate::{HttpConnector, PortfolioSource};

const DEFAULT_USER_AGENT: &str = concat!("chainview/", env!("CARGO_PKG_VERSION"));

/// Builder for [`HttpConnector`].
#[derive(Debug, Clone)]
pub struct HttpConnectorBuilder {
    endpoint: Url,
    portfolio: Option<PortfolioSource>,
    client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl HttpConnectorBuilder {
    pub(crate) const fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            portfolio: None,
            client: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Read the portfolio from a local JSON file.
    #[must_use]
    pub fn portfolio_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.portfolio = Some(PortfolioSource::File(path.into()));
        self
    }

    /// Fetch the portfolio with a GET to `url`.
    #[must_use]
    pub fn portfolio_url(mut self, url: Url) -> Self {
        self.portfolio = Some(PortfolioSource::Url(url));
        self
    }

    /// Set the portfolio location directly.
    #[must_use]
    pub fn portfolio(mut self, source: PortfolioSource) -> Self {
        self.portfolio = Some(source);
        self
    }

    /// Per-request timeout applied by the HTTP client.
    ///
    /// Ignored when a custom client is supplied.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    ///
    /// Ignored when a custom client is supplied.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Use a preconfigured `reqwest::Client`.
    #[must_use]
    pub fn custom_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the endpoint is not an http(s) URL or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<HttpConnector, ChainviewError> {
        check_http(&self.endpoint, "endpoint")?;
        if let Some(PortfolioSource::Url(u)) = &self.portfolio {
            check_http(u, "portfolio url")?;
        }
        let client = match self.client {
            Some(c) => c,
            None => {
                let mut b = reqwest::Client::builder().user_agent(
                    self.user_agent
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                );
                if let Some(t) = self.timeout {
                    b = b.timeout(t);
                }
                b.build()
                    .map_err(|e| ChainviewError::InvalidArg(format!("http client: {e}")))?
            }
        };
        Ok(HttpConnector {
            client,
            endpoint: self.endpoint,
            portfolio: self.portfolio,
        })
    }
}

fn check_http(url: &Url, what: &str) -> Result<(), ChainviewError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ChainviewError::InvalidArg(format!(
            "{what} must be http or https, got {other}: {url}"
        ))),
    }
}
