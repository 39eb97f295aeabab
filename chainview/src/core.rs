use std::sync::Arc;
use std::time::Duration;

use chainview_core::{
    Capability, ChainConnector, ChainviewConfig, ChainviewError, OptionChain, PortfolioEntry,
    ProjectionOptions,
};

use crate::session::{Event, LoadedData, Session};

/// Orchestrator that runs the portfolio-then-chain retrieval sequence.
pub struct Chainview {
    pub(crate) connectors: Vec<Arc<dyn ChainConnector>>,
    pub(crate) cfg: ChainviewConfig,
}

/// Builder for constructing a `Chainview` orchestrator with custom configuration.
pub struct ChainviewBuilder {
    connectors: Vec<Arc<dyn ChainConnector>>,
    cfg: ChainviewConfig,
}

impl Default for ChainviewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainviewBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors; register at least one via [`with_connector`](Self::with_connector).
    /// Defaults: five strikes below and four above the selection, five expiration
    /// columns, no request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: ChainviewConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Each capability is served by the first registered connector that
    /// advertises it; later connectors are not consulted as fallbacks.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ChainConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ChainviewConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the table shape used by sessions.
    #[must_use]
    pub const fn projection(mut self, options: ProjectionOptions) -> Self {
        self.cfg.projection = options;
        self
    }

    /// Number of strikes shown below and above the selected one.
    #[must_use]
    pub const fn window(mut self, before: usize, after: usize) -> Self {
        self.cfg.projection.before = before;
        self.cfg.projection.after = after;
        self
    }

    /// Maximum number of expiration columns.
    #[must_use]
    pub const fn max_columns(mut self, n: usize) -> Self {
        self.cfg.projection.max_columns = n;
        self
    }

    /// Bound each retrieval step by `timeout`.
    ///
    /// When exceeded the step fails with `RequestTimeout`, which ends the load
    /// like any other retrieval failure.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Build the `Chainview` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, or if the
    /// projection asks for zero columns.
    pub fn build(self) -> Result<Chainview, ChainviewError> {
        if self.connectors.is_empty() {
            return Err(ChainviewError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.projection.max_columns == 0 {
            return Err(ChainviewError::InvalidArg(
                "max_columns must be at least 1".to_string(),
            ));
        }
        Ok(Chainview {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

pub fn tag_err(connector: &str, e: ChainviewError) -> ChainviewError {
    match e {
        e @ (ChainviewError::Connector { .. }
        | ChainviewError::Status { .. }
        | ChainviewError::InvalidData(_)
        | ChainviewError::Portfolio(_)
        | ChainviewError::RequestTimeout { .. }) => e,
        other => ChainviewError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Chainview {
    /// Start building a new `Chainview` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let http = Arc::new(HttpConnector::builder(endpoint).portfolio_path("portfolio.json").build()?);
    /// let chainview = chainview::Chainview::builder()
    ///     .with_connector(http)
    ///     .window(5, 4)
    ///     .build()?;
    /// let session = chainview.start_session().await;
    /// ```
    #[must_use]
    pub fn builder() -> ChainviewBuilder {
        ChainviewBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ChainviewConfig {
        &self.cfg
    }

    /// Wrap a provider future with the optional deadline and standardized timeout error mapping.
    #[tracing::instrument(
        name = "chainview::core::provider_call",
        skip_all,
        fields(
            connector = connector_name,
            capability = %capability,
            timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        ),
    )]
    pub(crate) async fn provider_call<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Option<Duration>,
        fut: Fut,
    ) -> Result<T, ChainviewError>
    where
        Fut: core::future::Future<Output = Result<T, ChainviewError>>,
    {
        let res = match timeout {
            Some(t) => (tokio::time::timeout(t, fut).await)
                .unwrap_or_else(|_| Err(ChainviewError::request_timeout(capability))),
            None => fut.await,
        };
        res.map_err(|e| tag_err(connector_name, e))
    }

    /// Load the portfolio from the first connector that provides it.
    ///
    /// # Errors
    /// Returns `Unsupported` if no connector provides portfolios, otherwise the
    /// connector's failure tagged with its name.
    pub async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError> {
        let (name, provider) = self
            .connectors
            .iter()
            .find_map(|c| c.as_portfolio_provider().map(|p| (c.name(), p)))
            .ok_or(ChainviewError::unsupported(Capability::Portfolio))?;
        Self::provider_call(
            name,
            Capability::Portfolio,
            self.cfg.request_timeout,
            provider.portfolio(),
        )
        .await
    }

    /// Fetch the option chain for `portfolio` from the first connector that provides chains.
    ///
    /// # Errors
    /// Returns `Unsupported` if no connector provides chains, otherwise the
    /// connector's failure tagged with its name.
    pub async fn option_chain(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<OptionChain, ChainviewError> {
        let (name, provider) = self
            .connectors
            .iter()
            .find_map(|c| c.as_option_chain_provider().map(|p| (c.name(), p)))
            .ok_or(ChainviewError::unsupported(Capability::OptionChain))?;
        Self::provider_call(
            name,
            Capability::OptionChain,
            self.cfg.request_timeout,
            provider.option_chain(portfolio),
        )
        .await
    }

    /// Run the retrieval sequence: portfolio first, then its option chain.
    ///
    /// # Errors
    /// Returns the first failing step's error; the chain is not requested when
    /// the portfolio cannot be loaded.
    #[tracing::instrument(name = "chainview::core::load", skip(self))]
    pub async fn load(&self) -> Result<LoadedData, ChainviewError> {
        let portfolio = self.portfolio().await?;
        tracing::debug!(holdings = portfolio.len(), "portfolio loaded");
        let chain = self.option_chain(&portfolio).await?;
        tracing::info!(
            holdings = portfolio.len(),
            tickers = chain.len(),
            "option chain loaded"
        );
        Ok(LoadedData { portfolio, chain })
    }

    /// Load data and feed the outcome into a fresh session.
    ///
    /// Never fails: a retrieval failure leaves the session in its error state.
    pub async fn start_session(&self) -> Session {
        let mut session = Session::new(self.cfg.projection);
        let event = match self.load().await {
            Ok(data) => Event::LoadSucceeded(data),
            Err(e) => Event::LoadFailed(e),
        };
        session.handle(event);
        session
    }
}
