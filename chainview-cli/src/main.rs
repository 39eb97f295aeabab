use chainview::{Chainview, Transition};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod common;
mod render;

use cli::{Cli, Format};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; RUST_LOG overrides the default `warn` level.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let cli = Cli::parse();
    let connector = common::get_connector(&cli)?;
    let chainview = cli
        .configure(Chainview::builder().with_connector(connector))
        .build()?;

    let mut session = chainview.start_session().await;
    if let Some(e) = session.error() {
        return Err(e.clone().into());
    }

    // A rejected pick stops the remaining flags; they refer to the refused selection.
    let mut events = cli.events().into_iter();
    while let Some(event) = events.next() {
        if let Transition::Rejected(e) = session.handle(event) {
            eprintln!("chainview: {e}");
            let skipped = events.by_ref().count();
            if skipped > 0 {
                eprintln!("chainview: ignoring {skipped} later selection flag(s)");
            }
            break;
        }
    }

    let Some(view) = session.view() else {
        return Ok(());
    };
    let menu = session.ticker_menu();
    match cli.format {
        Format::Text => print!("{}", render::TextView::new(&menu, &view)),
        Format::Json => println!("{}", render::json(&menu, &view)?),
    }
    Ok(())
}
