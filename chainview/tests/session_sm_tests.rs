mod helpers;

use chainview::{
    ChainviewError, Event, LoadedData, OptionChain, ProjectionOptions, Session, SessionState,
    Transition,
};
use helpers::{AAPL, MSFT, NFLX, dec, exp, holdings, small_chain};

fn loaded() -> Session {
    let mut session = Session::new(ProjectionOptions::default());
    let t = session.handle(Event::LoadSucceeded(LoadedData {
        portfolio: holdings(),
        chain: small_chain(),
    }));
    assert_eq!(t, Transition::Applied);
    session
}

#[test]
fn load_selects_first_record_of_first_ticker() {
    let session = loaded();
    let sel = session.selection().expect("selection after load");
    assert_eq!(sel.ticker, AAPL);
    // First record's first listed expiration, not the earliest one.
    assert_eq!(sel.expiration, Some(exp("20240216")));
    assert_eq!(sel.strike, Some(dec(100)));
}

#[test]
fn empty_chain_loads_without_selection() {
    let mut session = Session::new(ProjectionOptions::default());
    session.handle(Event::LoadSucceeded(LoadedData {
        portfolio: vec![],
        chain: OptionChain::new(),
    }));
    assert!(matches!(session.state(), SessionState::Loaded { selection: None, .. }));
    let view = session.view().expect("view when loaded");
    assert!(view.tickers.is_empty());
    assert!(view.rows.is_empty());
    assert_eq!(session.select_strike(dec(1)), Transition::Ignored);
    assert_eq!(session.select_expiration(exp("20240119")), Transition::Ignored);
    // There is no ticker to pick, so any ticker is reported as having no data.
    assert_eq!(
        session.select_ticker(AAPL),
        Transition::Rejected(ChainviewError::no_data_for_ticker(AAPL))
    );
    assert!(session.selection().is_none());
}

#[test]
fn ticker_change_resets_expiration_and_strike() {
    let mut session = loaded();
    assert_eq!(session.select_ticker(MSFT), Transition::Applied);
    let sel = session.selection().unwrap();
    assert_eq!(sel.ticker, MSFT);
    assert_eq!(sel.expiration, Some(exp("20240315")));
    assert_eq!(sel.strike, Some(dec(400)));
}

#[test]
fn ticker_without_records_is_rejected_and_selection_kept() {
    let mut session = loaded();
    let before = session.selection().cloned();

    assert_eq!(
        session.select_ticker(NFLX),
        Transition::Rejected(ChainviewError::no_data_for_ticker(NFLX))
    );
    assert_eq!(session.selection().cloned(), before);

    assert_eq!(
        session.select_ticker("ZZZ"),
        Transition::Rejected(ChainviewError::no_data_for_ticker("ZZZ"))
    );
    assert_eq!(session.selection().cloned(), before);
}

#[test]
fn expiration_change_keeps_strike_even_if_unquoted() {
    let mut session = loaded();
    session.select_strike(dec(90));
    assert_eq!(session.select_expiration(exp("20240216")), Transition::Applied);
    let sel = session.selection().unwrap();
    assert_eq!(sel.expiration, Some(exp("20240216")));
    assert_eq!(sel.strike, Some(dec(90)));

    // 90 is only quoted in January; the February cell is empty and nothing is highlighted there.
    let view = session.view().unwrap();
    let row = view.rows.iter().find(|r| r.strike == dec(90)).unwrap();
    assert_eq!(row.cells[1].bid(), None);
    assert!(!view.strike_menu.contains(&dec(90)));
}

#[test]
fn unlisted_expiration_is_rejected_and_selection_kept() {
    let mut session = loaded();
    let before = session.selection().cloned();

    assert_eq!(
        session.select_expiration(exp("20991231")),
        Transition::Rejected(ChainviewError::not_in_chain(AAPL, "expiration", "12/31/2099"))
    );
    assert_eq!(session.selection().cloned(), before);

    // Listed for MSFT, but not for the selected ticker.
    assert!(matches!(
        session.select_expiration(exp("20240315")),
        Transition::Rejected(ChainviewError::NotInChain { .. })
    ));
    assert_eq!(session.selection().cloned(), before);
}

#[test]
fn unlisted_strike_is_rejected_and_selection_kept() {
    let mut session = loaded();
    let before = session.selection().cloned();

    assert_eq!(
        session.select_strike(dec(123_456)),
        Transition::Rejected(ChainviewError::not_in_chain(AAPL, "strike", "123456"))
    );
    // MSFT's strike, not AAPL's.
    assert!(matches!(
        session.select_strike(dec(400)),
        Transition::Rejected(ChainviewError::NotInChain { .. })
    ));
    assert_eq!(session.selection().cloned(), before);

    let view = session.view().unwrap();
    let sel = view.selection.as_ref().unwrap();
    assert!(view.strikes.contains(&sel.strike.unwrap()));
    assert!(view.expirations.contains(&sel.expiration.unwrap()));
}

#[test]
fn strike_change_moves_highlight() {
    let mut session = loaded();
    assert_eq!(session.select_strike(dec(110)), Transition::Applied);
    let view = session.view().unwrap();
    let lit: Vec<_> = view
        .rows
        .iter()
        .flat_map(|row| {
            (0..view.columns.len())
                .filter(|c| view.is_highlighted(row, *c))
                .map(|c| (row.strike, c))
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(lit, vec![(dec(110), 1)]);
}

#[test]
fn selection_events_before_load_are_ignored() {
    let mut session = Session::new(ProjectionOptions::default());
    assert_eq!(session.select_ticker(AAPL), Transition::Ignored);
    assert_eq!(session.select_expiration(exp("20240119")), Transition::Ignored);
    assert_eq!(session.select_strike(dec(100)), Transition::Ignored);
    assert_eq!(session.state(), &SessionState::Uninitialized);
    assert!(session.view().is_none());
    assert!(session.ticker_menu().is_empty());
}

#[test]
fn load_failure_is_final() {
    let mut session = Session::new(ProjectionOptions::default());
    let err = ChainviewError::connector("chainview-http", "connection refused");
    assert_eq!(session.handle(Event::LoadFailed(err.clone())), Transition::Applied);
    assert_eq!(session.error(), Some(&err));

    assert_eq!(session.select_ticker(AAPL), Transition::Ignored);
    let late = Event::LoadSucceeded(LoadedData {
        portfolio: holdings(),
        chain: small_chain(),
    });
    assert_eq!(session.handle(late), Transition::Ignored);
    assert_eq!(session.error(), Some(&err));
    assert!(session.view().is_none());
}

#[test]
fn second_load_is_ignored() {
    let mut session = loaded();
    session.select_ticker(MSFT);
    let again = Event::LoadSucceeded(LoadedData {
        portfolio: vec![],
        chain: OptionChain::new(),
    });
    assert_eq!(session.handle(again), Transition::Ignored);
    assert_eq!(session.selection().unwrap().ticker, MSFT);
}

#[test]
fn ticker_menu_disables_small_holdings() {
    let session = loaded();
    let menu = session.ticker_menu();
    let enabled: Vec<(&str, bool)> = menu.iter().map(|o| (o.ticker.as_str(), o.enabled())).collect();
    assert_eq!(enabled, vec![(AAPL, true), (MSFT, false), (NFLX, true)]);
    assert_eq!(
        menu[1].disabled_reason,
        Some("Quantity is less than or equal to 100")
    );
}
