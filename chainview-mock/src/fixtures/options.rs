use chainview_core::{Decimal, ExpirationCode, OptionChain, OptionRecord, PortfolioEntry};
use chrono::NaiveDate;

const MONTHLIES: [(i32, u32, u32); 6] = [
    (2024, 1, 19),
    (2024, 2, 16),
    (2024, 3, 15),
    (2024, 4, 19),
    (2024, 5, 17),
    (2024, 6, 21),
];

fn monthlies() -> Vec<ExpirationCode> {
    MONTHLIES
        .iter()
        .map(|&(y, m, d)| {
            ExpirationCode::from(NaiveDate::from_ymd_opt(y, m, d).expect("fixture date"))
        })
        .collect()
}

/// Call ladder from `lo` to `hi` around `spot`.
///
/// Strikes above `front_cutoff` are not listed for the front month.
fn ladder(spot: i64, lo: i64, hi: i64, step: i64, front_cutoff: i64) -> Vec<OptionRecord> {
    let exps = monthlies();
    (0..)
        .map(|i| lo + i * step)
        .take_while(|k| *k <= hi)
        .map(|strike| {
            let intrinsic = Decimal::from((spot - strike).max(0));
            let (e, b): (Vec<_>, Vec<_>) = exps
                .iter()
                .enumerate()
                .filter(|(i, _)| *i > 0 || strike <= front_cutoff)
                .map(|(i, code)| {
                    let months = i64::try_from(i).unwrap_or(0) + 1;
                    (*code, Some(intrinsic + Decimal::new(85 * months, 2)))
                })
                .unzip();
            OptionRecord::new(Decimal::from(strike), e, b, i64::from(strike < spot))
                .expect("fixture record is aligned")
        })
        .collect()
}

pub fn records_by_ticker(ticker: &str) -> Option<Vec<OptionRecord>> {
    match ticker {
        "AAPL" => Some(ladder(185, 150, 220, 5, 200)),
        "MSFT" => Some(ladder(415, 400, 440, 10, 440)),
        "TSLA" => Some(ladder(230, 200, 260, 10, 240)),
        "NFLX" => Some(vec![]),
        _ => None,
    }
}

/// Chain for the tickers of `portfolio` that have fixtures, in portfolio order.
pub fn chain_for(portfolio: &[PortfolioEntry]) -> OptionChain {
    portfolio
        .iter()
        .filter_map(|e| records_by_ticker(&e.ticker).map(|r| (e.ticker.clone(), r)))
        .collect()
}
