use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Capability;

/// Unified error type for the chainview workspace.
///
/// This covers transport and status failures from connectors, validation of
/// ingested data, selection rejections, and configuration mistakes.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChainviewError {
    /// No registered connector implements the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// The capability that was requested.
        capability: Capability,
    },

    /// Returned data failed validation (misaligned sequences, bad date codes, etc.).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector failed at the transport level.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("unexpected status {code} from {url}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Request URL.
        url: String,
    },

    /// The portfolio resource could not be read or decoded.
    #[error("portfolio unavailable: {0}")]
    Portfolio(String),

    /// The selected ticker has no option records.
    #[error("no data available for ticker: {ticker}")]
    NoDataForTicker {
        /// Ticker that was requested.
        ticker: String,
    },

    /// The picked expiration or strike is not listed for the selected ticker.
    #[error("{what} {value} is not available for ticker: {ticker}")]
    NotInChain {
        /// Ticker the selection refers to.
        ticker: String,
        /// Which part of the selection was refused ("expiration" or "strike").
        what: String,
        /// The refused value as displayed.
        value: String,
    },

    /// A retrieval step exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: Capability,
    },
}

impl ChainviewError {
    /// Helper: build an `Unsupported` error for a capability.
    #[must_use]
    pub const fn unsupported(capability: Capability) -> Self {
        Self::Unsupported { capability }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NoDataForTicker` error.
    pub fn no_data_for_ticker(ticker: impl Into<String>) -> Self {
        Self::NoDataForTicker {
            ticker: ticker.into(),
        }
    }

    /// Helper: build a `NotInChain` error.
    pub fn not_in_chain(
        ticker: impl Into<String>,
        what: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self::NotInChain {
            ticker: ticker.into(),
            what: what.into(),
            value: value.to_string(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub const fn request_timeout(capability: Capability) -> Self {
        Self::RequestTimeout { capability }
    }

    /// Returns true if this error belongs to the retrieval-failure class.
    ///
    /// Retrieval failures end the loading phase for the session. Everything
    /// else is either a local, recoverable rejection or a caller mistake.
    #[must_use]
    pub const fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::Connector { .. }
                | Self::Status { .. }
                | Self::InvalidData(_)
                | Self::Portfolio(_)
                | Self::RequestTimeout { .. }
        )
    }
}
