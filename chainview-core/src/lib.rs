//! chainview-core
//!
//! Core traits and algorithms shared across the chainview workspace.
//!
//! - `types`: re-exported data model, configuration and error types.
//! - `connector`: the `ChainConnector` trait and capability provider traits.
//! - `projection`: pure functions turning an option chain and a selection into
//!   the rows of the strike × expiration table.
#![warn(missing_docs)]

/// Connector capability traits and the primary `ChainConnector` interface.
pub mod connector;
/// Option-chain projection: expirations, strikes, strike window, and table rows.
pub mod projection;
pub mod types;

pub use connector::ChainConnector;
pub use projection::{
    BidCell, ChainRow, ChainView, StrikeWindow, build_rows, list_expirations, list_strikes,
    project, strikes_at_expiration, window_around_strike,
};
pub use types::*;
