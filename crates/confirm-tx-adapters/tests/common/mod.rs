#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use confirm_tx_adapters::{
    AccountAdapter, CurrencyRateAdapter, TokenRegistryAdapter, TransactionIndexAdapter,
    TransactionUpdateAdapter,
};
use confirm_tx_core::{
    ConversionContext, GasEstimatePort, GasFeeEstimates, KnownToken, Orchestrator, PortError,
    TransactionIndexPort, TransactionMeta, TxId,
};

pub const GOERLI_TX_ID: u64 = 2603411941761054;

#[derive(Debug, Default)]
pub struct CountingIndex {
    inner: TransactionIndexAdapter,
    lookups: AtomicUsize,
}

impl CountingIndex {
    pub fn new(transactions: Vec<TransactionMeta>) -> Self {
        Self {
            inner: TransactionIndexAdapter::new(transactions),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TransactionIndexPort for CountingIndex {
    fn unconfirmed_transaction(&self, id: &TxId) -> Result<Option<TransactionMeta>, PortError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.unconfirmed_transaction(id)
    }
}

/// Gas port returning canned values.
#[derive(Debug, Default)]
pub struct FixedGas {
    pub average_gas_price: Option<String>,
    pub maximum_gas_total: Option<String>,
    pub maximum_gas_total_calls: AtomicUsize,
}

impl GasEstimatePort for FixedGas {
    fn average_gas_price(&self) -> Result<Option<String>, PortError> {
        Ok(self.average_gas_price.clone())
    }

    fn maximum_gas_total(
        &self,
        _tx: &TransactionMeta,
        _estimates: &GasFeeEstimates,
    ) -> Result<Option<String>, PortError> {
        self.maximum_gas_total_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.maximum_gas_total.clone())
    }
}

pub type TestOrchestrator = Orchestrator<
    CountingIndex,
    CurrencyRateAdapter,
    FixedGas,
    TokenRegistryAdapter,
    AccountAdapter,
    TransactionUpdateAdapter,
>;

pub fn usd_rates(conversion_rate: Option<f64>) -> CurrencyRateAdapter {
    CurrencyRateAdapter::new(ConversionContext {
        conversion_rate,
        native_currency: "ETH".to_owned(),
        current_currency: "usd".to_owned(),
    })
}

pub fn new_orchestrator(
    transactions: Vec<TransactionMeta>,
    tokens: Vec<KnownToken>,
    gas: FixedGas,
    balance: &str,
) -> TestOrchestrator {
    Orchestrator::new(
        CountingIndex::new(transactions),
        usd_rates(Some(468.58)),
        gas,
        TokenRegistryAdapter::new(tokens),
        AccountAdapter::new(balance),
        TransactionUpdateAdapter::in_memory(),
    )
}

pub fn tx_from_json(value: serde_json::Value) -> TransactionMeta {
    serde_json::from_value(value).expect("valid transaction json")
}

pub fn goerli_transfer() -> TransactionMeta {
    tx_from_json(serde_json::json!({
        "history": [],
        "id": GOERLI_TX_ID,
        "loadingDefaults": false,
        "chainId": "0x5",
        "origin": "faucet.metamask.io",
        "status": "unapproved",
        "time": 1530838113716u64,
        "txParams": {
            "from": "0xc5ae6383e126f901dcb06131d97a88745bfa88d6",
            "gas": "0x33450",
            "gasPrice": "0x2540be400",
            "to": "0x81b7e08f65bdf5648606c89998a9cc8164397647",
            "value": "0xde0b6b3a7640000"
        }
    }))
}

pub fn dai() -> KnownToken {
    KnownToken {
        address: "0x6B175474E89094C44Da98b954EedeAC495271d0F".to_owned(),
        decimals: 18,
        symbol: "DAI".to_owned(),
    }
}

/// `transfer(0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045, 1e18)`
pub const TRANSFER_CALLDATA: &str = "0xa9059cbb000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa960450000000000000000000000000000000000000000000000000de0b6b3a7640000";
