use async_trait::async_trait;

use crate::{ChainviewError, OptionChain, PortfolioEntry};

/// Focused role trait for connectors that provide the portfolio resource.
#[async_trait]
pub trait PortfolioProvider: Send + Sync {
    /// Load the holdings the session is built around.
    async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError>;
}

/// Focused role trait for connectors that provide option chains.
#[async_trait]
pub trait OptionChainProvider: Send + Sync {
    /// Fetch option records for every ticker of the portfolio in one request.
    async fn option_chain(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<OptionChain, ChainviewError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
pub trait ChainConnector: Send + Sync {
    /// A stable identifier used in logs and error tags (e.g., "chainview-http").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for portfolio loading.
    fn as_portfolio_provider(&self) -> Option<&dyn PortfolioProvider> {
        None
    }

    /// If implemented, returns a trait object for option-chain retrieval.
    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        None
    }
}
