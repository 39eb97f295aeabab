use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ExpirationCode, OptionRecord};

/// The user's current pick of ticker, expiration and strike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected ticker; always a key of the loaded chain.
    pub ticker: String,
    /// Selected expiration, if the ticker's first record listed any.
    pub expiration: Option<ExpirationCode>,
    /// Selected strike.
    pub strike: Option<Decimal>,
}

impl Selection {
    /// Default selection for a ticker: first expiration and strike of its first record.
    pub fn first_of(ticker: impl Into<String>, records: &[OptionRecord]) -> Self {
        let first = records.first();
        Self {
            ticker: ticker.into(),
            expiration: first.and_then(|r| r.expirations().first().copied()),
            strike: first.map(OptionRecord::strike),
        }
    }
}
