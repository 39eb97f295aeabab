use std::fmt;

use chainview::{ChainView, TickerOption};
use serde::Serialize;

const STRIKE_WIDTH: usize = 10;
const CELL_WIDTH: usize = 12;

/// Plain-text rendering of the ticker menu, the selection and the chain table.
pub struct TextView<'a> {
    menu: &'a [TickerOption],
    view: &'a ChainView,
}

impl<'a> TextView<'a> {
    pub const fn new(menu: &'a [TickerOption], view: &'a ChainView) -> Self {
        Self { menu, view }
    }

    fn write_menu(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tickers:")?;
        for opt in self.menu {
            match opt.disabled_reason {
                Some(reason) => {
                    writeln!(f, "  {} ({})  [disabled: {reason}]", opt.ticker, opt.quantity)?;
                }
                None => writeln!(f, "  {} ({})", opt.ticker, opt.quantity)?,
            }
        }
        Ok(())
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        write!(f, "{:<STRIKE_WIDTH$}", "Strike")?;
        for col in &view.columns {
            write!(f, "{:>CELL_WIDTH$}", col.formatted())?;
        }
        writeln!(f)?;
        for row in &view.rows {
            let label = format!(
                "{} {}",
                row.strike,
                if row.in_the_money { "ITM" } else { "OTM" }
            );
            write!(f, "{label:<STRIKE_WIDTH$}")?;
            for (col, cell) in row.cells.iter().enumerate() {
                let text = if view.is_highlighted(row, col) {
                    format!("[{cell}]")
                } else {
                    cell.to_string()
                };
                write!(f, "{text:>CELL_WIDTH$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_menu(f)?;
        writeln!(f)?;
        let Some(sel) = &self.view.selection else {
            return writeln!(f, "No option data.");
        };
        write!(f, "Selection: {}", sel.ticker)?;
        if let Some(e) = sel.expiration {
            write!(f, "  expiration {}", e.formatted())?;
        }
        if let Some(s) = sel.strike {
            write!(f, "  strike {s}")?;
        }
        writeln!(f)?;

        let expirations: Vec<String> = self
            .view
            .expirations
            .iter()
            .map(|e| e.formatted())
            .collect();
        writeln!(f, "Expirations: {}", expirations.join(", "))?;
        let strikes: Vec<String> = self
            .view
            .strike_menu
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(f, "Strikes: {}", strikes.join(", "))?;
        writeln!(f)?;
        self.write_table(f)
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    ticker_menu: &'a [TickerOption],
    view: &'a ChainView,
}

/// Ticker menu plus the projected view, pretty-printed.
pub fn json(menu: &[TickerOption], view: &ChainView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        ticker_menu: menu,
        view,
    })
}
