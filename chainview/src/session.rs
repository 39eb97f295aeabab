//! Selection reconciliation: the explicit state container behind a chain view.

use chainview_core::{
    ChainView, ChainviewError, Decimal, ExpirationCode, OptionChain, PortfolioEntry,
    ProjectionOptions, Selection, TickerOption, project,
};

/// Result of a successful retrieval sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedData {
    /// Holdings from the portfolio resource.
    pub portfolio: Vec<PortfolioEntry>,
    /// Option records for those holdings.
    pub chain: OptionChain,
}

/// Lifecycle of a session. There is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Retrieval has not completed yet.
    Uninitialized,
    /// Data is available; `selection` is `None` only for an empty chain.
    Loaded {
        /// Retrieved portfolio and chain.
        data: LoadedData,
        /// Current pick.
        selection: Option<Selection>,
    },
    /// Retrieval failed; the session shows nothing for its remaining lifetime.
    Error(ChainviewError),
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The retrieval sequence finished successfully.
    LoadSucceeded(LoadedData),
    /// The retrieval sequence failed.
    LoadFailed(ChainviewError),
    /// The user picked a ticker.
    TickerSelected(String),
    /// The user picked an expiration.
    ExpirationSelected(ExpirationCode),
    /// The user picked a strike.
    StrikeSelected(Decimal),
}

/// What an event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The state changed.
    Applied,
    /// The event was refused and the state kept; the error says why.
    Rejected(ChainviewError),
    /// The event does not apply to the current state.
    Ignored,
}

/// Holds the data, the selection and the load phase; mutated only through [`Session::handle`].
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    options: ProjectionOptions,
}

impl Session {
    /// Fresh, uninitialized session.
    #[must_use]
    pub const fn new(options: ProjectionOptions) -> Self {
        Self {
            state: SessionState::Uninitialized,
            options,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Table shape used by [`view`](Self::view).
    #[must_use]
    pub const fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Loaded data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&LoadedData> {
        match &self.state {
            SessionState::Loaded { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Current selection, if loaded and the chain was not empty.
    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        match &self.state {
            SessionState::Loaded { selection, .. } => selection.as_ref(),
            _ => None,
        }
    }

    /// The retrieval error, if the session failed to load.
    #[must_use]
    pub const fn error(&self) -> Option<&ChainviewError> {
        match &self.state {
            SessionState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) -> Transition {
        // Take ownership of the current state; every arm puts one back.
        let prev = std::mem::replace(&mut self.state, SessionState::Uninitialized);
        let (next, transition) = Self::transition(prev, event);
        self.state = next;
        transition
    }

    /// Shorthand for [`Event::TickerSelected`].
    pub fn select_ticker(&mut self, ticker: impl Into<String>) -> Transition {
        self.handle(Event::TickerSelected(ticker.into()))
    }

    /// Shorthand for [`Event::ExpirationSelected`].
    pub fn select_expiration(&mut self, expiration: ExpirationCode) -> Transition {
        self.handle(Event::ExpirationSelected(expiration))
    }

    /// Shorthand for [`Event::StrikeSelected`].
    pub fn select_strike(&mut self, strike: Decimal) -> Transition {
        self.handle(Event::StrikeSelected(strike))
    }

    fn transition(state: SessionState, event: Event) -> (SessionState, Transition) {
        match (state, event) {
            (SessionState::Uninitialized, Event::LoadSucceeded(data)) => {
                let selection = data
                    .chain
                    .first_ticker()
                    .map(|t| Selection::first_of(t, data.chain.records(t)));
                (
                    SessionState::Loaded { data, selection },
                    Transition::Applied,
                )
            }
            (_, Event::LoadFailed(error)) => {
                tracing::error!(%error, "failed to load option chain data");
                (SessionState::Error(error), Transition::Applied)
            }
            (SessionState::Loaded { data, selection }, Event::TickerSelected(ticker)) => {
                match data.chain.get(&ticker) {
                    Some(records) if !records.is_empty() => {
                        let selection = Some(Selection::first_of(ticker, records));
                        (
                            SessionState::Loaded { data, selection },
                            Transition::Applied,
                        )
                    }
                    _ => {
                        tracing::warn!(%ticker, "no data available for ticker");
                        (
                            SessionState::Loaded { data, selection },
                            Transition::Rejected(ChainviewError::no_data_for_ticker(ticker)),
                        )
                    }
                }
            }
            (
                SessionState::Loaded {
                    data,
                    selection: Some(mut sel),
                },
                Event::ExpirationSelected(expiration),
            ) => {
                let listed = data
                    .chain
                    .records(&sel.ticker)
                    .iter()
                    .any(|r| r.has_expiration(expiration));
                if !listed {
                    tracing::warn!(
                        ticker = %sel.ticker,
                        %expiration,
                        "expiration not listed for ticker"
                    );
                    let error = ChainviewError::not_in_chain(
                        &*sel.ticker,
                        "expiration",
                        expiration.formatted(),
                    );
                    return Self::keep(data, sel, error);
                }
                // The strike is kept even if the new expiration does not quote it.
                sel.expiration = Some(expiration);
                (
                    SessionState::Loaded {
                        data,
                        selection: Some(sel),
                    },
                    Transition::Applied,
                )
            }
            (
                SessionState::Loaded {
                    data,
                    selection: Some(mut sel),
                },
                Event::StrikeSelected(strike),
            ) => {
                let listed = data
                    .chain
                    .records(&sel.ticker)
                    .iter()
                    .any(|r| r.strike() == strike);
                if !listed {
                    tracing::warn!(ticker = %sel.ticker, %strike, "strike not listed for ticker");
                    let error = ChainviewError::not_in_chain(&*sel.ticker, "strike", strike);
                    return Self::keep(data, sel, error);
                }
                sel.strike = Some(strike);
                (
                    SessionState::Loaded {
                        data,
                        selection: Some(sel),
                    },
                    Transition::Applied,
                )
            }
            (state, event) => {
                tracing::debug!(?event, "event ignored in current session state");
                (state, Transition::Ignored)
            }
        }
    }

    fn keep(
        data: LoadedData,
        selection: Selection,
        error: ChainviewError,
    ) -> (SessionState, Transition) {
        (
            SessionState::Loaded {
                data,
                selection: Some(selection),
            },
            Transition::Rejected(error),
        )
    }

    /// Project the current selection, if loaded.
    #[must_use]
    pub fn view(&self) -> Option<ChainView> {
        match &self.state {
            SessionState::Loaded { data, selection } => {
                Some(project(&data.chain, selection.as_ref(), &self.options))
            }
            _ => None,
        }
    }

    /// Ticker menu built from the portfolio; small holdings are listed but disabled.
    #[must_use]
    pub fn ticker_menu(&self) -> Vec<TickerOption> {
        self.data()
            .map(|d| d.portfolio.iter().map(TickerOption::from).collect())
            .unwrap_or_default()
    }
}
