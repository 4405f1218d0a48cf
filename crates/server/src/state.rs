use std::sync::Arc;

use matchcount_core::domain::{CounterConfig, MatchCounter};
use matchcount_core::upstream::Transport;

/// Shared by every request; holds nothing mutable
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub counter_config: Arc<CounterConfig>,
}

impl AppState {
    pub fn new(transport: Arc<dyn Transport>, counter_config: CounterConfig) -> Self {
        Self {
            transport,
            counter_config: Arc::new(counter_config),
        }
    }

    /// A counter owned by a single request
    pub fn counter(&self) -> MatchCounter {
        MatchCounter::new(self.transport.clone(), (*self.counter_config).clone())
    }
}
