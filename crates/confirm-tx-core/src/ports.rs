use thiserror::Error;

use crate::conversion::ConversionError;
use crate::domain::{ConversionContext, GasFeeEstimates, KnownToken, TransactionMeta, TxId};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Unapproved transactions keyed by id.
pub trait TransactionIndexPort {
    fn unconfirmed_transaction(&self, id: &TxId) -> Result<Option<TransactionMeta>, PortError>;
}

pub trait CurrencyRatePort {
    fn conversion_context(&self) -> Result<ConversionContext, PortError>;
}

pub trait GasEstimatePort {
    /// Fallback gas price (hex wei) used when a transaction carries none.
    fn average_gas_price(&self) -> Result<Option<String>, PortError>;
    /// Maximum total gas cost (hex wei) of `tx` under the given estimates.
    fn maximum_gas_total(
        &self,
        tx: &TransactionMeta,
        estimates: &GasFeeEstimates,
    ) -> Result<Option<String>, PortError>;
}

pub trait TokenRegistryPort {
    fn tokens(&self) -> Result<Vec<KnownToken>, PortError>;
}

pub trait AccountPort {
    /// Balance of the selected account as a hex wei quantity.
    fn selected_account_balance(&self) -> Result<String, PortError>;
}

pub trait TransactionUpdatePort {
    fn update_transaction(&self, tx: &TransactionMeta, resubmit: bool) -> Result<(), PortError>;
}
