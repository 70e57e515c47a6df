use tracing::debug;

use crate::state_machine::{confirm_tx_reducer, ConfirmTransactionState, ConfirmTxAction};

/// Owns the confirmation state and records every action dispatched into it,
/// in order.
///
/// The record is never pruned on its own. A long-lived host should drain it
/// with [`ConfirmTxStore::take_published`] after each flow.
#[derive(Debug, Clone, Default)]
pub struct ConfirmTxStore {
    state: ConfirmTransactionState,
    published: Vec<ConfirmTxAction>,
}

impl ConfirmTxStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ConfirmTransactionState) -> Self {
        Self {
            state,
            published: Vec::new(),
        }
    }

    pub fn state(&self) -> &ConfirmTransactionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: ConfirmTxAction) {
        debug!(action = action.action_type(), "dispatch");
        self.state = confirm_tx_reducer(&self.state, &action);
        self.published.push(action);
    }

    pub fn published(&self) -> &[ConfirmTxAction] {
        &self.published
    }

    pub fn published_types(&self) -> Vec<String> {
        self.published
            .iter()
            .map(|a| a.action_type().to_owned())
            .collect()
    }

    pub fn take_published(&mut self) -> Vec<ConfirmTxAction> {
        std::mem::take(&mut self.published)
    }
}
