//! Re-export of foundational types from `chainview-types`.
// Consolidated re-exports so downstream crates can depend on `chainview-core` only

pub use chainview_types::{Capability, ChainviewError};

pub use chainview_types::{ChainviewConfig, ProjectionOptions};

pub use chainview_types::{
    ChainRequest, ExpirationCode, MIN_ELIGIBLE_QUANTITY, OptionChain, OptionRecord,
    PortfolioEntry, Selection, TickerOption,
};

pub use rust_decimal::Decimal;
