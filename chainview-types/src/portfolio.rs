use serde::{Deserialize, Serialize};

/// Minimum share count (exclusive) for a holding to back option positions.
pub const MIN_ELIGIBLE_QUANTITY: i64 = 100;

/// One holding from the portfolio resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Ticker symbol, e.g. "AAPL".
    pub ticker: String,
    /// Number of shares held.
    pub quantity: i64,
}

impl PortfolioEntry {
    /// Construct an entry.
    pub fn new(ticker: impl Into<String>, quantity: i64) -> Self {
        Self {
            ticker: ticker.into(),
            quantity,
        }
    }

    /// Whether the holding is large enough to be offered in the ticker menu.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.quantity > MIN_ELIGIBLE_QUANTITY
    }
}

/// Request body for option-chain retrieval: `{ "portfolio": [...] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainRequest<'a> {
    /// Holdings to fetch chains for.
    pub portfolio: &'a [PortfolioEntry],
}

/// One entry of the ticker menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerOption {
    /// Ticker symbol.
    pub ticker: String,
    /// Shares held.
    pub quantity: i64,
    /// Why the entry is disabled, if it is.
    pub disabled_reason: Option<&'static str>,
}

impl TickerOption {
    /// Whether the entry can be picked.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.disabled_reason.is_none()
    }
}

impl From<&PortfolioEntry> for TickerOption {
    fn from(entry: &PortfolioEntry) -> Self {
        Self {
            ticker: entry.ticker.clone(),
            quantity: entry.quantity,
            disabled_reason: (!entry.is_eligible())
                .then_some("Quantity is less than or equal to 100"),
        }
    }
}
