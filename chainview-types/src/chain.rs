//! Option-chain records as delivered by the backend, validated on ingest.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ChainviewError;

/// Monthly expiration date encoded as `YYYYMMDD`.
///
/// Ordering follows the calendar, which is also the lexicographic order of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpirationCode(NaiveDate);

impl ExpirationCode {
    /// Parse a `YYYYMMDD` code. Dashes are ignored, so `YYYY-MM-DD` is accepted too.
    ///
    /// # Errors
    /// Returns `InvalidData` if the input is not eight digits naming a real date.
    pub fn parse(input: &str) -> Result<Self, ChainviewError> {
        let code: String = input.chars().filter(|c| *c != '-').collect();
        let invalid = || ChainviewError::InvalidData(format!("invalid expiration code: {input:?}"));
        if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = code[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = code[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = code[6..8].parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Calendar date of the expiration.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Human-facing rendering, e.g. `1/19/2024`.
    #[must_use]
    pub fn formatted(self) -> String {
        self.0.format("%-m/%-d/%Y").to_string()
    }
}

impl From<NaiveDate> for ExpirationCode {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for ExpirationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl core::str::FromStr for ExpirationCode {
    type Err = ChainviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExpirationCode {
    type Error = ChainviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpirationCode> for String {
    fn from(code: ExpirationCode) -> Self {
        code.to_string()
    }
}

/// Wire shape of an option record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawOptionRecord {
    strike: Decimal,
    monthly_expirations: Vec<String>,
    monthly_bids: Vec<Option<Decimal>>,
    money_flag: i64,
}

/// Bids for one strike across the monthly expirations.
///
/// `expirations()[i]` and `bids()[i]` always describe the same expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptionRecord", into = "RawOptionRecord")]
pub struct OptionRecord {
    strike: Decimal,
    expirations: Vec<ExpirationCode>,
    bids: Vec<Option<Decimal>>,
    money_flag: i64,
}

impl OptionRecord {
    /// Build a record, enforcing index alignment of expirations and bids.
    ///
    /// # Errors
    /// Returns `InvalidData` when the two sequences differ in length.
    pub fn new(
        strike: Decimal,
        expirations: Vec<ExpirationCode>,
        bids: Vec<Option<Decimal>>,
        money_flag: i64,
    ) -> Result<Self, ChainviewError> {
        if expirations.len() != bids.len() {
            return Err(ChainviewError::InvalidData(format!(
                "strike {strike}: {} expirations but {} bids",
                expirations.len(),
                bids.len()
            )));
        }
        Ok(Self {
            strike,
            expirations,
            bids,
            money_flag,
        })
    }

    /// Strike price.
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Expirations in backend order.
    #[must_use]
    pub fn expirations(&self) -> &[ExpirationCode] {
        &self.expirations
    }

    /// Bids parallel to [`expirations`](Self::expirations); `None` is a missing quote.
    #[must_use]
    pub fn bids(&self) -> &[Option<Decimal>] {
        &self.bids
    }

    /// Raw moneyness flag from the backend.
    #[must_use]
    pub const fn money_flag(&self) -> i64 {
        self.money_flag
    }

    /// `money_flag == 1`.
    #[must_use]
    pub const fn in_the_money(&self) -> bool {
        self.money_flag == 1
    }

    /// Whether the record lists the expiration.
    #[must_use]
    pub fn has_expiration(&self, code: ExpirationCode) -> bool {
        self.expirations.contains(&code)
    }

    /// Bid at the first occurrence of `code`, if the record quotes it.
    #[must_use]
    pub fn bid_at(&self, code: ExpirationCode) -> Option<Decimal> {
        let idx = self.expirations.iter().position(|e| *e == code)?;
        self.bids.get(idx).copied().flatten()
    }
}

impl TryFrom<RawOptionRecord> for OptionRecord {
    type Error = ChainviewError;

    fn try_from(raw: RawOptionRecord) -> Result<Self, Self::Error> {
        let expirations = raw
            .monthly_expirations
            .iter()
            .map(|s| ExpirationCode::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(raw.strike, expirations, raw.monthly_bids, raw.money_flag)
    }
}

impl From<OptionRecord> for RawOptionRecord {
    fn from(rec: OptionRecord) -> Self {
        Self {
            strike: rec.strike,
            monthly_expirations: rec.expirations.into_iter().map(String::from).collect(),
            monthly_bids: rec.bids,
            money_flag: rec.money_flag,
        }
    }
}

/// Option records keyed by ticker, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionChain {
    entries: Vec<(String, Vec<OptionRecord>)>,
}

impl OptionChain {
    /// Empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert records for a ticker. An existing ticker keeps its position and
    /// has its records replaced.
    pub fn insert(&mut self, ticker: impl Into<String>, records: Vec<OptionRecord>) {
        let ticker = ticker.into();
        if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == ticker) {
            slot.1 = records;
        } else {
            self.entries.push((ticker, records));
        }
    }

    /// Records for a ticker, or `None` if the ticker is not a key.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&[OptionRecord]> {
        self.entries
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, r)| r.as_slice())
    }

    /// Records for a ticker; empty if the ticker is not a key.
    #[must_use]
    pub fn records(&self, ticker: &str) -> &[OptionRecord] {
        self.get(ticker).unwrap_or_default()
    }

    /// Tickers in document order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// First ticker in document order.
    #[must_use]
    pub fn first_ticker(&self) -> Option<&str> {
        self.entries.first().map(|(t, _)| t.as_str())
    }

    /// Iterate `(ticker, records)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OptionRecord])> {
        self.entries.iter().map(|(t, r)| (t.as_str(), r.as_slice()))
    }

    /// Number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the chain has no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<OptionRecord>)> for OptionChain {
    fn from_iter<I: IntoIterator<Item = (S, Vec<OptionRecord>)>>(iter: I) -> Self {
        let mut chain = Self::new();
        for (ticker, records) in iter {
            chain.insert(ticker, records);
        }
        chain
    }
}

impl Serialize for OptionChain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ticker, records) in &self.entries {
            map.serialize_entry(ticker, records)?;
        }
        map.end()
    }
}

struct OptionChainVisitor;

impl<'de> Visitor<'de> for OptionChainVisitor {
    type Value = OptionChain;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of ticker to option records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut chain = OptionChain::new();
        while let Some((ticker, records)) = access.next_entry::<String, Vec<OptionRecord>>()? {
            chain.insert(ticker, records);
        }
        Ok(chain)
    }
}

impl<'de> Deserialize<'de> for OptionChain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionChainVisitor)
    }
}
