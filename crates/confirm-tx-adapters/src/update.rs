use std::sync::Mutex;

use tracing::info;

use confirm_tx_core::{PortError, TransactionMeta, TransactionUpdatePort};

/// Transaction update service that keeps every submitted record in memory.
#[derive(Debug, Default)]
pub struct TransactionUpdateAdapter {
    submitted: Mutex<Vec<(TransactionMeta, bool)>>,
}

impl TransactionUpdateAdapter {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Result<Vec<(TransactionMeta, bool)>, PortError> {
        let guard = self
            .submitted
            .lock()
            .map_err(|e| PortError::Transport(format!("update log poisoned: {e}")))?;
        Ok(guard.clone())
    }
}

impl TransactionUpdatePort for TransactionUpdateAdapter {
    fn update_transaction(&self, tx: &TransactionMeta, resubmit: bool) -> Result<(), PortError> {
        let value = tx
            .tx_params
            .as_ref()
            .and_then(|p| p.value.as_deref())
            .unwrap_or("0x0");
        info!(id = %tx.id, value, resubmit, "transaction updated");
        self.submitted
            .lock()
            .map_err(|e| PortError::Transport(format!("update log poisoned: {e}")))?
            .push((tx.clone(), resubmit));
        Ok(())
    }
}
