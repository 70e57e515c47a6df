//! In-memory views over a snapshot of wallet state.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use confirm_tx_core::{
    AccountPort, ConversionContext, CurrencyRatePort, KnownToken, PortError, TokenRegistryPort,
    TransactionIndexPort, TransactionMeta, TxId,
};

use crate::config::ConfirmTxAdapterConfig;
use crate::gas::GasEstimateAdapter;

/// Wallet state as exported by the extension background.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    #[serde(default)]
    pub transactions: Vec<TransactionMeta>,
    #[serde(default)]
    pub tokens: Vec<KnownToken>,
    #[serde(default)]
    pub selected_account_balance: String,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub native_currency: Option<String>,
    #[serde(default)]
    pub current_currency: Option<String>,
    /// Average gas price estimate, hex wei.
    #[serde(default)]
    pub average_gas_price: Option<String>,
}

pub struct SnapshotAdapters {
    pub transactions: TransactionIndexAdapter,
    pub rates: CurrencyRateAdapter,
    pub gas: GasEstimateAdapter,
    pub tokens: TokenRegistryAdapter,
    pub account: AccountAdapter,
}

impl WalletSnapshot {
    pub fn into_adapters(self, config: &ConfirmTxAdapterConfig) -> SnapshotAdapters {
        let context = ConversionContext {
            conversion_rate: self.conversion_rate,
            native_currency: self
                .native_currency
                .unwrap_or_else(|| config.default_native_currency.clone()),
            current_currency: self
                .current_currency
                .unwrap_or_else(|| config.default_current_currency.clone()),
        };
        SnapshotAdapters {
            transactions: TransactionIndexAdapter::new(self.transactions),
            rates: CurrencyRateAdapter::new(context),
            gas: GasEstimateAdapter::new(self.average_gas_price),
            tokens: TokenRegistryAdapter::new(self.tokens),
            account: AccountAdapter::new(self.selected_account_balance),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionIndexAdapter {
    unconfirmed: HashMap<TxId, TransactionMeta>,
}

impl TransactionIndexAdapter {
    pub fn new(transactions: impl IntoIterator<Item = TransactionMeta>) -> Self {
        Self {
            unconfirmed: transactions
                .into_iter()
                .map(|tx| (tx.id.clone(), tx))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.unconfirmed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unconfirmed.is_empty()
    }
}

impl TransactionIndexPort for TransactionIndexAdapter {
    fn unconfirmed_transaction(&self, id: &TxId) -> Result<Option<TransactionMeta>, PortError> {
        let found = self.unconfirmed.get(id).cloned();
        debug!(%id, found = found.is_some(), "transaction lookup");
        Ok(found)
    }
}

#[derive(Debug, Clone)]
pub struct CurrencyRateAdapter {
    context: ConversionContext,
}

impl CurrencyRateAdapter {
    pub fn new(context: ConversionContext) -> Self {
        Self { context }
    }
}

impl CurrencyRatePort for CurrencyRateAdapter {
    fn conversion_context(&self) -> Result<ConversionContext, PortError> {
        Ok(self.context.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenRegistryAdapter {
    tokens: Vec<KnownToken>,
}

impl TokenRegistryAdapter {
    pub fn new(tokens: Vec<KnownToken>) -> Self {
        Self { tokens }
    }
}

impl TokenRegistryPort for TokenRegistryAdapter {
    fn tokens(&self) -> Result<Vec<KnownToken>, PortError> {
        Ok(self.tokens.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountAdapter {
    balance: String,
}

impl AccountAdapter {
    pub fn new(balance: impl Into<String>) -> Self {
        Self {
            balance: balance.into(),
        }
    }
}

impl AccountPort for AccountAdapter {
    fn selected_account_balance(&self) -> Result<String, PortError> {
        if self.balance.is_empty() {
            return Err(PortError::NotFound("selected account balance".to_owned()));
        }
        Ok(self.balance.clone())
    }
}
