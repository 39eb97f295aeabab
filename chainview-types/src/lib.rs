//! Chainview data transfer objects, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod capability;
mod chain;
mod config;
mod error;
mod portfolio;
mod selection;

pub use capability::Capability;
pub use chain::{ExpirationCode, OptionChain, OptionRecord};
pub use config::{ChainviewConfig, ProjectionOptions};
pub use error::ChainviewError;
pub use portfolio::{ChainRequest, MIN_ELIGIBLE_QUANTITY, PortfolioEntry, TickerOption};
pub use selection::Selection;
