//! Mock chainview connectors for tests and offline runs.
use async_trait::async_trait;
use chainview_core::connector::{ChainConnector, OptionChainProvider, PortfolioProvider};
use chainview_core::{ChainviewError, OptionChain, PortfolioEntry};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
///
/// Fixture tickers: `AAPL`, `MSFT`, `TSLA`, and `NFLX` (listed with no records).
/// A portfolio containing `FAIL` makes the chain request fail.
pub struct MockConnector {
    portfolio: Vec<PortfolioEntry>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector serving the fixture portfolio.
    #[must_use]
    pub fn new() -> Self {
        Self {
            portfolio: fixtures::portfolio::holdings(),
        }
    }

    /// Connector serving a caller-supplied portfolio against the fixture chains.
    #[must_use]
    pub const fn with_portfolio(portfolio: Vec<PortfolioEntry>) -> Self {
        Self { portfolio }
    }

    fn maybe_fail(portfolio: &[PortfolioEntry]) -> Result<(), ChainviewError> {
        if portfolio.iter().any(|e| e.ticker == "FAIL") {
            return Err(ChainviewError::connector(
                "chainview-mock",
                "forced failure: option-chain",
            ));
        }
        Ok(())
    }
}

impl ChainConnector for MockConnector {
    fn name(&self) -> &'static str {
        "chainview-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_portfolio_provider(&self) -> Option<&dyn PortfolioProvider> {
        Some(self as &dyn PortfolioProvider)
    }
    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        Some(self as &dyn OptionChainProvider)
    }
}

#[async_trait]
impl PortfolioProvider for MockConnector {
    async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError> {
        Ok(self.portfolio.clone())
    }
}

#[async_trait]
impl OptionChainProvider for MockConnector {
    async fn option_chain(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<OptionChain, ChainviewError> {
        Self::maybe_fail(portfolio)?;
        Ok(fixtures::options::chain_for(portfolio))
    }
}
