use tracing::{debug, error, warn};

use crate::conversion::{
    add_decimals, hex_to_decimal, is_negative_quantity, multiply_hexes, subtract_hexes, sum_hexes,
    transaction_fee, value_from_wei_hex,
};
use crate::domain::{
    AmountMode, AmountTriple, AssetType, DisplayPrecision, GasFeeEstimates, SendTxDetail,
    TokenProps, TransactionMeta, TxId,
};
use crate::ports::{
    AccountPort, CurrencyRatePort, GasEstimatePort, PortError, TokenRegistryPort,
    TransactionIndexPort, TransactionUpdatePort,
};
use crate::state_machine::{
    clear_confirm_transaction, completed_tx, set_details_for_confirm_tx, update_nonce,
    update_token_data, update_token_props, update_transaction_amounts, update_transaction_fees,
    update_transaction_totals, update_tx_data, ConfirmTransactionState, ConfirmTxAction,
};
use crate::store::ConfirmTxStore;
use crate::token_data::parse_standard_token_transaction_data;

#[derive(Debug, Clone)]
pub enum ConfirmTxCommand {
    SetTransactionToConfirm {
        id: TxId,
    },
    UpdateTxDataAndCalculate {
        tx: TransactionMeta,
    },
    SetTxDetail {
        transaction_id: TxId,
        detail: SendTxDetail,
    },
    Clear,
    TransactionCompleted {
        id: TxId,
    },
    SettleMaxNativeValue {
        estimates: GasFeeEstimates,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// Number of actions dispatched into the store.
    pub published: usize,
    /// Transaction handed to the update service, if any.
    pub updated_transaction: Option<TransactionMeta>,
}

pub struct Orchestrator<I, R, G, T, A, U>
where
    I: TransactionIndexPort,
    R: CurrencyRatePort,
    G: GasEstimatePort,
    T: TokenRegistryPort,
    A: AccountPort,
    U: TransactionUpdatePort,
{
    pub transactions: I,
    pub rates: R,
    pub gas: G,
    pub tokens: T,
    pub account: A,
    pub updates: U,
    pub precision: DisplayPrecision,
}

impl<I, R, G, T, A, U> Orchestrator<I, R, G, T, A, U>
where
    I: TransactionIndexPort,
    R: CurrencyRatePort,
    G: GasEstimatePort,
    T: TokenRegistryPort,
    A: AccountPort,
    U: TransactionUpdatePort,
{
    pub fn new(transactions: I, rates: R, gas: G, tokens: T, account: A, updates: U) -> Self {
        Self {
            transactions,
            rates,
            gas,
            tokens,
            account,
            updates,
            precision: DisplayPrecision::default(),
        }
    }

    pub fn with_precision(mut self, precision: DisplayPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn handle(
        &self,
        store: &mut ConfirmTxStore,
        command: ConfirmTxCommand,
    ) -> Result<CommandResult, PortError> {
        let before = store.published().len();
        let mut updated_transaction = None;
        match command {
            ConfirmTxCommand::SetTransactionToConfirm { id } => {
                self.set_transaction_to_confirm(store, &id)?;
            }
            ConfirmTxCommand::UpdateTxDataAndCalculate { tx } => {
                self.update_tx_data_and_calculate(store, tx)?;
            }
            ConfirmTxCommand::SetTxDetail {
                transaction_id,
                detail,
            } => store.dispatch(set_details_for_confirm_tx(transaction_id, detail)),
            ConfirmTxCommand::Clear => store.dispatch(clear_confirm_transaction()),
            ConfirmTxCommand::TransactionCompleted { id } => store.dispatch(completed_tx(id)),
            ConfirmTxCommand::SettleMaxNativeValue { estimates } => {
                updated_transaction =
                    self.update_tx_value_if_max_native_settled(store.state(), &estimates)?;
            }
        }
        Ok(CommandResult {
            published: store.published().len() - before,
            updated_transaction,
        })
    }

    /// Loads transaction `id` into the confirmation state.
    ///
    /// An unknown id is logged and leaves the store untouched. All derived
    /// values are computed before the first dispatch, so a malformed
    /// transaction fails without publishing anything.
    pub fn set_transaction_to_confirm(
        &self,
        store: &mut ConfirmTxStore,
        id: &TxId,
    ) -> Result<(), PortError> {
        let Some(tx) = self.transactions.unconfirmed_transaction(id)? else {
            error!(%id, "transaction with id {id} not found");
            return Ok(());
        };

        let Some(tx_params) = tx.tx_params.clone() else {
            store.dispatch(update_tx_data(tx));
            return Ok(());
        };

        let mut actions = self.calculate(tx)?;

        if let Some(data) = non_empty(&tx_params.data) {
            let token_data = parse_standard_token_transaction_data(data);
            let tokens = self.tokens.tokens()?;
            let current = tx_params.to.as_deref().and_then(|to| {
                tokens
                    .iter()
                    .find(|token| token.address.eq_ignore_ascii_case(to))
            });
            actions.push(update_token_props(TokenProps {
                decimals: current.map(|t| t.decimals),
                symbol: current.map(|t| t.symbol.clone()),
            }));
            actions.push(update_token_data(token_data));
        }

        if let Some(nonce) = non_empty(&tx_params.nonce) {
            actions.push(update_nonce(hex_to_decimal(nonce)?));
        }

        for action in actions {
            store.dispatch(action);
        }
        Ok(())
    }

    /// Publishes `tx` followed by its amounts, fees and totals.
    pub fn update_tx_data_and_calculate(
        &self,
        store: &mut ConfirmTxStore,
        tx: TransactionMeta,
    ) -> Result<(), PortError> {
        for action in self.calculate(tx)? {
            store.dispatch(action);
        }
        Ok(())
    }

    fn calculate(&self, tx: TransactionMeta) -> Result<Vec<ConfirmTxAction>, PortError> {
        let ctx = self.rates.conversion_context()?;
        let precision = self.precision;
        let tx_params = tx.tx_params.clone().unwrap_or_default();

        let value = non_empty(&tx_params.value).unwrap_or("0x0");
        let gas_limit = non_empty(&tx_params.gas).unwrap_or("0x0");
        let gas_price = match non_empty(&tx_params.gas_price) {
            Some(price) => price.to_owned(),
            None => self
                .gas
                .average_gas_price()?
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "0x0".to_owned()),
        };

        let native = ctx.native_currency.as_str();
        let current = ctx.current_currency.as_str();
        let rate = ctx.conversion_rate;

        let fiat_amount = value_from_wei_hex(value, native, current, rate, precision.fiat)?;
        let native_amount = value_from_wei_hex(value, native, native, rate, precision.native)?;

        let hex_fee = multiply_hexes(gas_limit, &gas_price)?;
        let fiat_fee = transaction_fee(&hex_fee, native, current, rate, precision.fiat)?;
        let native_fee = transaction_fee(&hex_fee, native, native, rate, precision.native)?;

        let fiat_total = fiat_amount
            .as_deref()
            .map(|amount| add_decimals(&[&fiat_fee, amount], precision.fiat))
            .transpose()?;
        let native_total = native_amount
            .as_deref()
            .map(|amount| add_decimals(&[&native_fee, amount], precision.native))
            .transpose()?;
        let hex_total = sum_hexes(value, &hex_fee)?;

        let amounts = AmountTriple::new(fiat_amount, native_amount, value);
        let fees = AmountTriple::new(Some(fiat_fee), Some(native_fee), hex_fee);
        let totals = AmountTriple::new(fiat_total, native_total, hex_total);

        Ok(vec![
            update_tx_data(tx),
            update_transaction_amounts(amounts),
            update_transaction_fees(fees),
            update_transaction_totals(totals),
        ])
    }

    /// Shrinks the value of a "send max" native transfer so that value plus
    /// the maximum fee under `estimates` equals the selected account balance.
    ///
    /// Does nothing unless the transaction under confirmation was entered in
    /// max mode for the native asset. The difference is not clamped: a fee
    /// above the balance yields a negative value (`0x-...`).
    pub fn update_tx_value_if_max_native_settled(
        &self,
        state: &ConfirmTransactionState,
        estimates: &GasFeeEstimates,
    ) -> Result<Option<TransactionMeta>, PortError> {
        let Some(tx) = state.tx_data.as_ref().filter(|tx| !tx.id.as_str().is_empty()) else {
            debug!("no transaction under confirmation");
            return Ok(None);
        };
        let is_max_native = state.send_tx_detail(&tx.id).is_some_and(|detail| {
            detail.amount_mode == AmountMode::Max && detail.asset_type == AssetType::Native
        });
        if !is_max_native {
            debug!(id = %tx.id, "not a max native send, value left as is");
            return Ok(None);
        }

        let balance = self.account.selected_account_balance()?;
        let max_fee = self
            .gas
            .maximum_gas_total(tx, estimates)?
            .filter(|fee| !fee.is_empty())
            .unwrap_or_else(|| "0x0".to_owned());
        let value = subtract_hexes(&balance, &max_fee)?;
        if is_negative_quantity(&value) {
            warn!(id = %tx.id, %balance, %max_fee, "maximum fee exceeds balance");
        }

        let updated = tx.with_value(value);
        self.updates.update_transaction(&updated, true)?;
        Ok(Some(updated))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
