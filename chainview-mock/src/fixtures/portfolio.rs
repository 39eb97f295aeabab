use chainview_core::PortfolioEntry;

pub fn holdings() -> Vec<PortfolioEntry> {
    vec![
        PortfolioEntry::new("AAPL", 300),
        PortfolioEntry::new("MSFT", 100),
        PortfolioEntry::new("TSLA", 200),
        PortfolioEntry::new("NFLX", 150),
    ]
}
