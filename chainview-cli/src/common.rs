use std::sync::Arc;

use chainview::{ChainConnector, ChainviewError};
use chainview_http::HttpConnector;
use url::Url;

use crate::cli::Cli;

/// Return the connector for this run.
///
/// `CHAINVIEW_USE_MOCK` selects the fixture-backed mock; otherwise the HTTP
/// connector is built from the CLI flags.
pub fn get_connector(cli: &Cli) -> Result<Arc<dyn ChainConnector>, ChainviewError> {
    if std::env::var("CHAINVIEW_USE_MOCK").is_ok() {
        tracing::info!("using mock connector");
        return Ok(Arc::new(chainview_mock::MockConnector::new()));
    }
    let builder = HttpConnector::builder(cli.endpoint.clone());
    let builder = if is_url(&cli.portfolio) {
        let url = Url::parse(&cli.portfolio)
            .map_err(|e| ChainviewError::InvalidArg(format!("portfolio url: {e}")))?;
        builder.portfolio_url(url)
    } else {
        builder.portfolio_path(&cli.portfolio)
    };
    Ok(Arc::new(builder.build()?))
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
