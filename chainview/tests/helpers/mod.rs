// Shared fixtures for chainview integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chainview::{ChainviewError, Decimal, ExpirationCode, OptionChain, OptionRecord, PortfolioEntry};
use chainview_core::connector::{ChainConnector, PortfolioProvider};

pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TSLA: &str = "TSLA";
pub const NFLX: &str = "NFLX";

pub fn exp(s: &str) -> ExpirationCode {
    ExpirationCode::parse(s).expect("valid test expiration")
}

pub fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

/// Record quoting `strike` at each `(expiration, bid_cents)` pair.
pub fn rec(strike: i64, quotes: &[(&str, i64)], money_flag: i64) -> OptionRecord {
    OptionRecord::new(
        dec(strike),
        quotes.iter().map(|(e, _)| exp(e)).collect(),
        quotes.iter().map(|(_, c)| Some(Decimal::new(*c, 2))).collect(),
        money_flag,
    )
    .expect("aligned test record")
}

pub fn holdings() -> Vec<PortfolioEntry> {
    vec![
        PortfolioEntry::new(AAPL, 300),
        PortfolioEntry::new(MSFT, 100),
        PortfolioEntry::new(NFLX, 150),
    ]
}

/// Small chain: AAPL with three strikes over two expirations, MSFT with one, NFLX empty.
pub fn small_chain() -> OptionChain {
    [
        (
            AAPL,
            vec![
                rec(100, &[("20240216", 450), ("20240119", 300)], 1),
                rec(110, &[("20240119", 120), ("20240216", 210)], 0),
                rec(90, &[("20240119", 1050)], 1),
            ],
        ),
        (MSFT, vec![rec(400, &[("20240315", 900)], 1)]),
        (NFLX, vec![]),
    ]
    .into_iter()
    .collect()
}

/// Connector that only serves portfolios.
pub struct PortfolioOnly {
    pub holdings: Vec<PortfolioEntry>,
}

impl PortfolioOnly {
    pub fn arc(holdings: Vec<PortfolioEntry>) -> Arc<dyn ChainConnector> {
        Arc::new(Self { holdings })
    }
}

impl ChainConnector for PortfolioOnly {
    fn name(&self) -> &'static str {
        "portfolio-only"
    }

    fn as_portfolio_provider(&self) -> Option<&dyn PortfolioProvider> {
        Some(self as &dyn PortfolioProvider)
    }
}

#[async_trait]
impl PortfolioProvider for PortfolioOnly {
    async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError> {
        Ok(self.holdings.clone())
    }
}
