//! Shared handler state.

use crate::metrics::Metrics;
use std::sync::Arc;
use tourism_governance::GovernanceLedger;
use tourism_storage::GovernanceStore;

/// Ledger over whichever store backend the node was configured with.
pub type Ledger = GovernanceLedger<Box<dyn GovernanceStore>>;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(ledger: Ledger, metrics: Metrics) -> Self {
        Self {
            ledger: Arc::new(ledger),
            metrics: Arc::new(metrics),
        }
    }
}
