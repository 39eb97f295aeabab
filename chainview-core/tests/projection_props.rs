use chainview_core::{
    BidCell, Decimal, ExpirationCode, OptionChain, OptionRecord, ProjectionOptions, Selection,
    StrikeWindow, build_rows, list_expirations, list_strikes, project, window_around_strike,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn arb_expiration() -> impl Strategy<Value = ExpirationCode> {
    // Third-Friday-ish days across a few years; duplicates are intended.
    (2023i32..2027, 1u32..=12, 15u32..=21).prop_map(|(y, m, d)| {
        ExpirationCode::from(NaiveDate::from_ymd_opt(y, m, d).expect("day 15..=21 always exists"))
    })
}

fn arb_record() -> impl Strategy<Value = OptionRecord> {
    (
        0i64..60,
        proptest::collection::vec((arb_expiration(), proptest::option::of(0i64..10_000)), 0..8),
        0i64..3,
    )
        .prop_map(|(strike, quotes, flag)| {
            let (exps, bids): (Vec<_>, Vec<_>) = quotes
                .into_iter()
                .map(|(e, b)| (e, b.map(|c| Decimal::new(c, 2))))
                .unzip();
            OptionRecord::new(Decimal::new(strike * 5, 0), exps, bids, flag)
                .expect("unzip keeps sequences aligned")
        })
}

fn arb_chain() -> impl Strategy<Value = OptionChain> {
    proptest::collection::vec(
        (
            prop_oneof![Just("AAPL"), Just("MSFT"), Just("TSLA")],
            proptest::collection::vec(arb_record(), 0..25),
        ),
        0..4,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

fn strictly_ascending<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn expirations_are_unique_and_sorted(chain in arb_chain()) {
        for ticker in chain.tickers() {
            prop_assert!(strictly_ascending(&list_expirations(&chain, ticker)));
        }
    }

    #[test]
    fn strikes_are_unique_and_sorted(chain in arb_chain()) {
        for ticker in chain.tickers() {
            let strikes = list_strikes(&chain, ticker);
            prop_assert!(strictly_ascending(&strikes));
            prop_assert_eq!(strikes.is_empty(), chain.records(ticker).is_empty());
        }
    }

    #[test]
    fn window_is_bounded_and_contiguous(
        len in 0usize..40,
        pick in proptest::option::of(0i64..50),
        before in 0usize..8,
        after in 0usize..8,
    ) {
        let strikes: Vec<Decimal> = (0..len).map(|i| Decimal::from(i as i64)).collect();
        let selected = pick.map(Decimal::from);
        let w = StrikeWindow::around(&strikes, selected, before, after);
        prop_assert!(w.start <= w.end);
        prop_assert!(w.end <= strikes.len());
        prop_assert!(w.len() <= before + after + 1);

        let got = window_around_strike(&strikes, selected, before, after);
        prop_assert_eq!(got, &strikes[w.start..w.end]);
        if let Some(s) = selected {
            if strikes.contains(&s) && !got.is_empty() {
                prop_assert!(got.contains(&s));
            }
        }
    }

    #[test]
    fn rows_never_fail_on_missing_bids(chain in arb_chain(), extra in arb_expiration()) {
        for ticker in chain.tickers() {
            let mut expirations = list_expirations(&chain, ticker);
            expirations.push(extra);
            let strikes = list_strikes(&chain, ticker);
            let rows = build_rows(&chain, ticker, &strikes, &expirations, expirations.len());
            prop_assert_eq!(rows.len(), chain.records(ticker).len());
            for row in &rows {
                prop_assert_eq!(row.cells.len(), expirations.len());
                for (cell, exp) in row.cells.iter().zip(&expirations) {
                    if *cell == BidCell::NoData {
                        prop_assert!(chain
                            .records(ticker)
                            .iter()
                            .filter(|r| r.strike() == row.strike)
                            .any(|r| r.bid_at(*exp).is_none()));
                    }
                }
            }
            prop_assert!(rows.windows(2).all(|w| w[0].strike <= w[1].strike));
        }
    }

    #[test]
    fn projection_is_idempotent(chain in arb_chain(), pick in 0usize..25) {
        let Some(ticker) = chain.first_ticker() else { return Ok(()); };
        let records = chain.records(ticker);
        let mut sel = Selection::first_of(ticker, records);
        if let Some(r) = records.get(pick) {
            sel.strike = Some(r.strike());
        }
        let opts = ProjectionOptions::default();
        let once = project(&chain, Some(&sel), &opts);
        let twice = project(&chain, Some(&sel), &opts);
        prop_assert_eq!(once, twice);
    }
}
