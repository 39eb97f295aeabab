use core::fmt;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::{Decimal, ExpirationCode, OptionChain, ProjectionOptions, Selection};

/// All expirations quoted by any record of `ticker`, de-duplicated and ascending.
///
/// Unknown tickers yield an empty list.
#[must_use]
pub fn list_expirations(chain: &OptionChain, ticker: &str) -> Vec<ExpirationCode> {
    chain
        .records(ticker)
        .iter()
        .flat_map(|r| r.expirations().iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// All strikes of `ticker`, de-duplicated and ascending.
#[must_use]
pub fn list_strikes(chain: &OptionChain, ticker: &str) -> Vec<Decimal> {
    chain
        .records(ticker)
        .iter()
        .map(|r| r.strike())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Strikes of the records quoting `expiration`, in record order.
///
/// The result is neither sorted nor de-duplicated; it feeds the strike menu as-is.
#[must_use]
pub fn strikes_at_expiration(
    chain: &OptionChain,
    ticker: &str,
    expiration: ExpirationCode,
) -> Vec<Decimal> {
    chain
        .records(ticker)
        .iter()
        .filter(|r| r.has_expiration(expiration))
        .map(|r| r.strike())
        .collect()
}

/// Half-open index range `[start, end)` into a sorted strike list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrikeWindow {
    /// First index shown.
    pub start: usize,
    /// One past the last index shown.
    pub end: usize,
}

impl StrikeWindow {
    /// Window of `before` strikes below and `after` strikes above `selected`.
    ///
    /// The inclusive range `[idx - before, idx + after]` is clamped to the list.
    /// A selection missing from `strikes` is positioned at index -1, so the
    /// window covers the first `after` strikes.
    #[must_use]
    pub fn around(
        strikes: &[Decimal],
        selected: Option<Decimal>,
        before: usize,
        after: usize,
    ) -> Self {
        let to_signed = |n: usize| isize::try_from(n).unwrap_or(isize::MAX);
        let len = to_signed(strikes.len());
        let idx = selected
            .and_then(|s| strikes.iter().position(|k| *k == s))
            .map_or(-1, to_signed);

        let start = idx.saturating_sub(to_signed(before)).max(0);
        let last = idx.saturating_add(to_signed(after)).min(len);
        let end = last.saturating_add(1).min(len).max(start);

        Self {
            start: usize::try_from(start).unwrap_or(0),
            end: usize::try_from(end).unwrap_or(0),
        }
    }

    /// Number of strikes covered; an inverted window covers none.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the window covers nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Borrow the covered strikes.
    ///
    /// Bounds are clamped to `strikes`, and an inverted window yields an empty slice.
    #[must_use]
    pub fn apply(self, strikes: &[Decimal]) -> &[Decimal] {
        let end = self.end.min(strikes.len());
        let start = self.start.min(end);
        &strikes[start..end]
    }
}

/// Contiguous run of `strikes` around `selected`; see [`StrikeWindow::around`].
#[must_use]
pub fn window_around_strike(
    strikes: &[Decimal],
    selected: Option<Decimal>,
    before: usize,
    after: usize,
) -> &[Decimal] {
    StrikeWindow::around(strikes, selected, before, after).apply(strikes)
}

/// Table cell for one strike at one expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BidCell {
    /// Quoted bid.
    Bid(Decimal),
    /// The record does not quote this expiration.
    NoData,
}

impl BidCell {
    /// The bid, if any.
    #[must_use]
    pub const fn bid(self) -> Option<Decimal> {
        match self {
            Self::Bid(b) => Some(b),
            Self::NoData => None,
        }
    }
}

impl From<Option<Decimal>> for BidCell {
    fn from(bid: Option<Decimal>) -> Self {
        bid.map_or(Self::NoData, Self::Bid)
    }
}

impl fmt::Display for BidCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid(b) => write!(f, "{b}"),
            Self::NoData => f.write_str("-"),
        }
    }
}

/// One strike row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainRow {
    /// Strike price.
    pub strike: Decimal,
    /// Backend moneyness flag equals 1.
    pub in_the_money: bool,
    /// One cell per displayed expiration column.
    pub cells: Vec<BidCell>,
}

/// Rows for every record of `ticker` whose strike lies in `windowed_strikes`.
///
/// Only the first `max_columns` of `expirations` become cells. Rows come back
/// ordered by strike; records sharing a strike keep their relative order.
#[must_use]
pub fn build_rows(
    chain: &OptionChain,
    ticker: &str,
    windowed_strikes: &[Decimal],
    expirations: &[ExpirationCode],
    max_columns: usize,
) -> Vec<ChainRow> {
    let columns = &expirations[..expirations.len().min(max_columns)];
    let mut rows: Vec<ChainRow> = chain
        .records(ticker)
        .iter()
        .filter(|r| windowed_strikes.contains(&r.strike()))
        .map(|r| ChainRow {
            strike: r.strike(),
            in_the_money: r.in_the_money(),
            cells: columns.iter().map(|e| BidCell::from(r.bid_at(*e))).collect(),
        })
        .collect();
    rows.sort_by_key(|row| row.strike);
    rows
}

/// Everything a front end needs to draw the chain for one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainView {
    /// Tickers present in the chain, in document order.
    pub tickers: Vec<String>,
    /// Selection the view was computed for.
    pub selection: Option<Selection>,
    /// Expiration menu: every expiration of the ticker, ascending.
    pub expirations: Vec<ExpirationCode>,
    /// Expirations shown as table columns.
    pub columns: Vec<ExpirationCode>,
    /// Strike menu: strikes quoted at the selected expiration, in record order.
    pub strike_menu: Vec<Decimal>,
    /// Every strike of the ticker, ascending.
    pub strikes: Vec<Decimal>,
    /// Range of `strikes` shown as rows.
    pub window: StrikeWindow,
    /// Table body.
    pub rows: Vec<ChainRow>,
}

impl ChainView {
    /// Whether the cell at `column` of `row` is the selected strike/expiration pair.
    #[must_use]
    pub fn is_highlighted(&self, row: &ChainRow, column: usize) -> bool {
        let Some(sel) = &self.selection else {
            return false;
        };
        sel.strike == Some(row.strike)
            && sel.expiration.is_some()
            && self.columns.get(column).copied() == sel.expiration
    }
}

/// Compute the full view for `selection` over `chain`.
///
/// Pure: the same inputs always produce an equal view.
#[must_use]
pub fn project(
    chain: &OptionChain,
    selection: Option<&Selection>,
    options: &ProjectionOptions,
) -> ChainView {
    let tickers = chain.tickers().map(str::to_owned).collect();
    let Some(sel) = selection else {
        return ChainView {
            tickers,
            ..ChainView::default()
        };
    };

    let ticker = sel.ticker.as_str();
    let expirations = list_expirations(chain, ticker);
    let columns: Vec<ExpirationCode> = expirations
        .iter()
        .copied()
        .take(options.max_columns)
        .collect();
    let strike_menu = sel
        .expiration
        .map(|e| strikes_at_expiration(chain, ticker, e))
        .unwrap_or_default();
    let strikes = list_strikes(chain, ticker);
    let window = StrikeWindow::around(&strikes, sel.strike, options.before, options.after);
    let rows = build_rows(
        chain,
        ticker,
        window.apply(&strikes),
        &expirations,
        options.max_columns,
    );

    ChainView {
        tickers,
        selection: Some(sel.clone()),
        expirations,
        columns,
        strike_menu,
        strikes,
        window,
        rows,
    }
}
