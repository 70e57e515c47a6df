pub mod config;
pub mod gas;
pub mod snapshot;
pub mod update;

pub use config::ConfirmTxAdapterConfig;
pub use gas::GasEstimateAdapter;
pub use snapshot::{
    AccountAdapter, CurrencyRateAdapter, SnapshotAdapters, TokenRegistryAdapter,
    TransactionIndexAdapter, WalletSnapshot,
};
pub use update::TransactionUpdateAdapter;
