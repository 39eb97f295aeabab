use std::time::Duration;

use chainview::{ChainviewBuilder, Decimal, Event, ExpirationCode};
use clap::{Parser, ValueEnum};
use url::Url;

/// Print the options-chain table for the holdings of a portfolio.
#[derive(Parser, Debug)]
#[command(name = "chainview", version, about)]
pub struct Cli {
    /// Portfolio JSON: a file path or an http(s) URL
    #[arg(long, default_value = "portfolio.json")]
    pub portfolio: String,

    /// Option-chain endpoint (receives a POST with the whole portfolio)
    #[arg(long, default_value = "http://localhost:5001/get-option-chain")]
    pub endpoint: Url,

    /// Ticker to show instead of the first one in the chain
    #[arg(long)]
    pub ticker: Option<String>,

    /// Expiration to select, as YYYYMMDD or YYYY-MM-DD
    #[arg(long)]
    pub expiration: Option<ExpirationCode>,

    /// Strike to select
    #[arg(long)]
    pub strike: Option<Decimal>,

    /// Strikes shown below the selected one
    #[arg(long, default_value_t = 5)]
    pub before: usize,

    /// Strikes shown above the selected one
    #[arg(long, default_value_t = 4)]
    pub after: usize,

    /// Maximum number of expiration columns
    #[arg(long, default_value_t = 5)]
    pub columns: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Deadline for each retrieval step, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable table
    Text,
    /// The projected view as JSON
    Json,
}

impl Cli {
    /// Apply the table shape and timeout flags to `builder`.
    pub fn configure(&self, builder: ChainviewBuilder) -> ChainviewBuilder {
        let builder = builder
            .window(self.before, self.after)
            .max_columns(self.columns);
        match self.timeout_ms {
            Some(ms) => builder.request_timeout(Duration::from_millis(ms)),
            None => builder,
        }
    }

    /// Selection events in the order a user would make them.
    pub fn events(&self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(t) = &self.ticker {
            events.push(Event::TickerSelected(t.clone()));
        }
        if let Some(e) = self.expiration {
            events.push(Event::ExpirationSelected(e));
        }
        if let Some(s) = self.strike {
            events.push(Event::StrikeSelected(s));
        }
        events
    }
}
