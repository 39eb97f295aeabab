use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use chainview_core::connector::{ChainConnector, OptionChainProvider, PortfolioProvider};
use chainview_core::{Capability, ChainviewError, OptionChain, PortfolioEntry};

/// Instruction for how a method should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ChainviewError),
    /// Hang indefinitely (simulate a stalled backend).
    Hang,
}

#[derive(Default)]
struct InternalState {
    portfolio_rule: Option<MockBehavior<Vec<PortfolioEntry>>>,
    chain_rule: Option<MockBehavior<OptionChain>>,
    portfolio_calls: usize,
    chain_requests: Vec<Vec<PortfolioEntry>>,
}

/// Handle used by tests to script a [`DynamicMockConnector`].
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Configure what the next portfolio reads return.
    pub async fn set_portfolio_behavior(&self, behavior: MockBehavior<Vec<PortfolioEntry>>) {
        self.state.lock().await.portfolio_rule = Some(behavior);
    }

    /// Configure what the next option-chain requests return.
    pub async fn set_chain_behavior(&self, behavior: MockBehavior<OptionChain>) {
        self.state.lock().await.chain_rule = Some(behavior);
    }

    /// Number of portfolio reads seen so far.
    pub async fn portfolio_calls(&self) -> usize {
        self.state.lock().await.portfolio_calls
    }

    /// Return a copy of the option-chain request log (one portfolio per request).
    pub async fn chain_requests(&self) -> Vec<Vec<PortfolioEntry>> {
        self.state.lock().await.chain_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Unconfigured capabilities answer `Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn ChainConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn ChainConnector>, controller)
    }
}

async fn play<T>(
    behavior: Option<MockBehavior<T>>,
    capability: Capability,
) -> Result<T, ChainviewError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(ChainviewError::unsupported(capability)),
    }
}

impl ChainConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_portfolio_provider(&self) -> Option<&dyn PortfolioProvider> {
        Some(self as &dyn PortfolioProvider)
    }

    fn as_option_chain_provider(&self) -> Option<&dyn OptionChainProvider> {
        Some(self as &dyn OptionChainProvider)
    }
}

#[async_trait]
impl PortfolioProvider for DynamicMockConnector {
    async fn portfolio(&self) -> Result<Vec<PortfolioEntry>, ChainviewError> {
        // Snapshot the behavior without holding the lock across the await below.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.portfolio_calls += 1;
            guard.portfolio_rule.clone()
        };
        play(behavior, Capability::Portfolio).await
    }
}

#[async_trait]
impl OptionChainProvider for DynamicMockConnector {
    async fn option_chain(
        &self,
        portfolio: &[PortfolioEntry],
    ) -> Result<OptionChain, ChainviewError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.chain_requests.push(portfolio.to_vec());
            guard.chain_rule.clone()
        };
        play(behavior, Capability::OptionChain).await
    }
}
