pub mod conversion;
pub mod domain;
pub mod orchestrator;
pub mod ports;
pub mod state_machine;
pub mod store;
pub mod token_data;

pub use conversion::ConversionError;
pub use domain::{
    AmountMode, AmountTriple, AssetType, ConversionContext, DisplayPrecision, GasEstimationObject,
    GasFeeEstimates, KnownToken, SendTxDetail, TokenArg, TokenData, TokenProps, TransactionMeta,
    TxId, TxParams,
};
pub use orchestrator::{ConfirmTxCommand, Orchestrator};
pub use ports::{
    AccountPort, CurrencyRatePort, GasEstimatePort, PortError, TokenRegistryPort,
    TransactionIndexPort, TransactionUpdatePort,
};
pub use state_machine::{confirm_tx_reducer, ConfirmTransactionState, ConfirmTxAction};
pub use store::ConfirmTxStore;
pub use token_data::parse_standard_token_transaction_data;
