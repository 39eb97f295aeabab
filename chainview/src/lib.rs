//! Chainview loads a portfolio, fetches its option chains, and keeps the
//! selection state behind an options-chain table.
//!
//! Overview
//! - Runs one retrieval sequence per session: the portfolio resource, then a
//!   single option-chain request for the whole portfolio.
//! - Routes each retrieval step to the first registered connector that
//!   implements the `chainview_core` capability for it.
//! - Holds data, selection and load phase in an explicit [`Session`] that only
//!   changes through [`Session::handle`].
//! - Projects the selection into a [`ChainView`]: expiration and strike menus
//!   plus a window of strike rows with one bid cell per expiration column.
//!
//! Behaviors worth knowing
//! - A failed load is final for the session: there is no retry, and the
//!   session stays in its error state.
//! - Selecting a ticker without option records is rejected and the previous
//!   selection is kept.
//! - Selecting an expiration keeps the current strike even when the new
//!   expiration does not quote it; such cells render as "no data".
//! - A selected strike missing from the strike list windows the first few
//!   strikes instead of failing.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use chainview::{Chainview, Transition};
//!
//! let chainview = Chainview::builder()
//!     .with_connector(Arc::new(chainview_mock::MockConnector::new()))
//!     .build()?;
//! let mut session = chainview.start_session().await;
//! if let Transition::Rejected(e) = session.select_ticker("MSFT") {
//!     eprintln!("{e}");
//! }
//! let view = session.view();
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod session;

pub use core::{Chainview, ChainviewBuilder};
pub use session::{Event, LoadedData, Session, SessionState, Transition};

// Re-export core types for convenience
pub use chainview_core::{
    BidCell, Capability, ChainConnector, ChainRow, ChainView, ChainviewConfig, ChainviewError,
    Decimal, ExpirationCode, OptionChain, OptionRecord, PortfolioEntry, ProjectionOptions,
    Selection, StrikeWindow, TickerOption,
};
