mod helpers;

use std::io;
use std::sync::{Arc, Mutex};

use chainview::{Event, LoadedData, ProjectionOptions, Session};
use helpers::{NFLX, dec, exp, holdings, small_chain};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a fmt subscriber and return everything it logged.
fn logs_of(f: impl FnOnce()) -> String {
    let buf = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

fn loaded() -> Session {
    let mut session = Session::new(ProjectionOptions::default());
    session.handle(Event::LoadSucceeded(LoadedData {
        portfolio: holdings(),
        chain: small_chain(),
    }));
    session
}

#[test]
fn ticker_without_data_is_logged_as_warning() {
    let mut session = loaded();
    let out = logs_of(|| {
        session.select_ticker(NFLX);
    });
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("no data available for ticker"), "{out}");
    assert!(out.contains("NFLX"), "{out}");
}

#[test]
fn unlisted_selection_values_are_logged_as_warnings() {
    let mut session = loaded();
    let out = logs_of(|| {
        session.select_strike(dec(123_456));
        session.select_expiration(exp("20991231"));
    });
    assert!(out.contains("strike not listed for ticker"), "{out}");
    assert!(out.contains("expiration not listed for ticker"), "{out}");
    assert_eq!(out.matches("WARN").count(), 2, "{out}");
}

#[test]
fn failed_load_is_logged_as_error() {
    let mut session = Session::new(ProjectionOptions::default());
    let out = logs_of(|| {
        session.handle(Event::LoadFailed(chainview::ChainviewError::Portfolio(
            "missing file".into(),
        )));
    });
    assert!(out.contains("ERROR"), "{out}");
    assert!(out.contains("failed to load option chain data"), "{out}");
    assert!(out.contains("missing file"), "{out}");
}

#[test]
fn accepted_selection_logs_nothing_above_debug() {
    let mut session = loaded();
    let out = logs_of(|| {
        session.select_strike(dec(110));
    });
    assert!(!out.contains("WARN"), "{out}");
}
