//! chainview-http
//!
//! Connector that implements `ChainConnector` over plain HTTP: the portfolio
//! comes from a local JSON file or a GET to a URL, and option chains are
//! fetched with a single POST carrying the whole portfolio.
#![warn(missing_docs)]

/// Builder for [`HttpConnector`].
pub mod builder;

use std::path::PathBuf;

use async_trait::async_trait;
use chainview_core::connector::{ChainConnector, OptionChainProvider, PortfolioProvider};
use chainview_core::{ChainRequest, ChainviewError, OptionChain, PortfolioEntry};
use url::Url;

pub use builder::HttpConnectorBuilder;

/// Where the portfolio resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioSource {
    /// A JSON file on the local filesystem.
    File(PathBuf),
    /// A JSON document served over http(s).
    Url(Url),
}

/// Public connector type. Construct with [`HttpConnector::builder`].
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
    endpoint: Url,
    portfolio: Option<PortfolioSource>,
}

impl HttpConnector {
    /// Connector name used in error tags and logs.
    pub const NAME: &'static str = "chainview-http";

    /// Start building a connector that POSTs chain requests to `endpoint`.
    #[must_use]
    pub const fn builder(endpoint: Url) -> HttpConnectorBuilder {
        HttpConnectorBuilder::new(endpoint)
    }

    /// Option-chain endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Configured portfolio location, if any.
    #[must_use]
    pub const fn portfolio_source(&self) -> Option<&PortfolioSource> {
        self.portfolio.as_ref()
    }

    fn transport(e: &reqwest::Error) -> ChainviewError {
        ChainviewError::connector(Self::NAME, e.to_string())
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, ChainviewError> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Self::transport(&e))?;
        Self::read_success(resp, url).await
    }

    async fn read_success(
        resp: reqwest::Response,
        url: &Url,
    ) -> Result<Vec<u8>, ChainviewError> {
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %url, "backend returned non-success status");
            return Err(ChainviewError::Status {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = resp.bytes().await.map_err(|e| Self::transport(&e))?;
        Ok(bytes.to_vec())
    }

    async fn read_portfolio(&self, source: &PortfolioSource) -> Result<Vec<u8>, ChainviewError> {
        match source {
            PortfolioSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                ChainviewError::Portfolio(format!("cannot read {}: {e}", path.display()))
            }),
            PortfolioSource::Url(url) => self.get_bytes(url).await,
        }
    }
}

impl ChainConnector for HttpConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "HTTP"
    }

    fn as_portfolio_provider(&self) -> Option<&dyn PortfolioProvider> {
        self.portfolio
            .as_ref()
            .map(|_| self as &dyn PortfolioProvider)
    }

    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        Some(self as &dyn OptionChainProvider)
    }
}

#[async_trait]
impl PortfolioProvider for HttpConnector {
    async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError> {
        let source = self
            .portfolio
            .as_ref()
            .ok_or_else(|| {
                ChainviewError::Portfolio("no portfolio location configured".into())
            })?;
        let bytes = self.read_portfolio(source).await?;
        let entries: Vec<PortfolioEntry> = serde_json::from_slice(&bytes)
            .map_err(|e| ChainviewError::Portfolio(format!("malformed portfolio: {e}")))?;
        tracing::debug!(holdings = entries.len(), "portfolio decoded");
        Ok(entries)
    }
}

#[async_trait]
impl OptionChainProvider for HttpConnector {
    async fn option_chain(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<OptionChain, ChainviewError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&ChainRequest { portfolio })
            .send()
            .await
            .map_err(|e| Self::transport(&e))?;
        let bytes = Self::read_success(resp, &self.endpoint).await?;
        let chain: OptionChain = serde_json::from_slice(&bytes)
            .map_err(|e| ChainviewError::InvalidData(format!("option chain response: {e}")))?;
        tracing::debug!(tickers = chain.len(), "option chain decoded");
        Ok(chain)
    }
}
