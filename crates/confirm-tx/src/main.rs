//! confirm-tx: load a wallet transaction for confirmation and print the
//! derived amounts, fees and totals.

use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{Result, WrapErr};

use confirm_tx_adapters::{ConfirmTxAdapterConfig, TransactionUpdateAdapter, WalletSnapshot};
use confirm_tx_core::{
    AmountMode, AssetType, ConfirmTxCommand, ConfirmTxStore, GasFeeEstimates, Orchestrator,
    SendTxDetail, TxId,
};

#[derive(Debug, Parser)]
#[command(name = "confirm-tx", version, about)]
struct Args {
    /// Wallet snapshot JSON (transactions, tokens, rates, balance).
    #[arg(long)]
    snapshot: PathBuf,

    /// Id of the unapproved transaction to confirm.
    #[arg(long)]
    tx_id: String,

    /// Record the transaction as a max-balance native send.
    #[arg(long)]
    max_native: bool,

    /// Gas fee estimate JSON to settle a max-balance send against.
    #[arg(long)]
    settle_max: Option<PathBuf>,

    #[arg(long)]
    native_decimals: Option<u32>,

    #[arg(long)]
    fiat_decimals: Option<u32>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ConfirmTxAdapterConfig::default();
    if let Some(decimals) = args.native_decimals {
        config.native_display_decimals = decimals;
    }
    if let Some(decimals) = args.fiat_decimals {
        config.fiat_display_decimals = decimals;
    }

    let snapshot: WalletSnapshot = read_json(&args.snapshot)?;
    tracing::info!(
        transactions = snapshot.transactions.len(),
        tokens = snapshot.tokens.len(),
        "Loaded wallet snapshot"
    );
    let adapters = snapshot.into_adapters(&config);
    let orch = Orchestrator::new(
        adapters.transactions,
        adapters.rates,
        adapters.gas,
        adapters.tokens,
        adapters.account,
        TransactionUpdateAdapter::in_memory(),
    )
    .with_precision(config.display_precision());

    let id = TxId::from(args.tx_id);
    let mut store = ConfirmTxStore::new();

    if args.max_native {
        orch.handle(
            &mut store,
            ConfirmTxCommand::SetTxDetail {
                transaction_id: id.clone(),
                detail: SendTxDetail {
                    amount_mode: AmountMode::Max,
                    asset_type: AssetType::Native,
                },
            },
        )?;
    }

    orch.handle(&mut store, ConfirmTxCommand::SetTransactionToConfirm { id })?;

    let mut updated_transaction = None;
    if let Some(path) = args.settle_max.as_deref() {
        let estimates: GasFeeEstimates = read_json(path)?;
        updated_transaction = orch
            .handle(&mut store, ConfirmTxCommand::SettleMaxNativeValue { estimates })?
            .updated_transaction;
    }

    let output = serde_json::json!({
        "state": store.state(),
        "published": store.published_types(),
        "updatedTransaction": updated_transaction,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
