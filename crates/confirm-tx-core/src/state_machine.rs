use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AmountTriple, SendTxDetail, TokenData, TokenProps, TransactionMeta, TxId};

/// Everything the confirmation screen knows about the transaction it shows.
///
/// `send_tx_detail_per_id` outlives the other fields: it survives
/// [`ConfirmTxAction::ClearConfirmTransaction`] and only shrinks when a
/// transaction completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmTransactionState {
    pub tx_data: Option<TransactionMeta>,
    pub token_data: Option<TokenData>,
    pub token_props: Option<TokenProps>,
    pub fiat_transaction_amount: String,
    pub fiat_transaction_fee: String,
    pub fiat_transaction_total: String,
    pub native_transaction_amount: String,
    pub native_transaction_fee: String,
    pub native_transaction_total: String,
    pub hex_transaction_amount: String,
    pub hex_transaction_fee: String,
    pub hex_transaction_total: String,
    pub nonce: String,
    pub send_tx_detail_per_id: BTreeMap<TxId, SendTxDetail>,
}

impl ConfirmTransactionState {
    pub fn current_tx_id(&self) -> Option<&TxId> {
        self.tx_data.as_ref().map(|tx| &tx.id)
    }

    pub fn send_tx_detail(&self, id: &TxId) -> Option<&SendTxDetail> {
        self.send_tx_detail_per_id.get(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmTxAction {
    UpdateTxData(TransactionMeta),
    UpdateTokenData(Option<TokenData>),
    UpdateTokenProps(TokenProps),
    UpdateTransactionAmounts(AmountTriple),
    UpdateTransactionFees(AmountTriple),
    UpdateTransactionTotals(AmountTriple),
    UpdateNonce(String),
    SetDetailsForConfirmTx {
        transaction_id: TxId,
        detail: SendTxDetail,
    },
    ClearConfirmTransaction,
    CompletedTx {
        id: TxId,
    },
    /// An action owned by another slice of application state.
    Foreign {
        action_type: String,
    },
}

impl ConfirmTxAction {
    pub fn action_type(&self) -> &str {
        match self {
            Self::UpdateTxData(_) => "metamask/confirm-transaction/UPDATE_TX_DATA",
            Self::UpdateTokenData(_) => "metamask/confirm-transaction/UPDATE_TOKEN_DATA",
            Self::UpdateTokenProps(_) => "metamask/confirm-transaction/UPDATE_TOKEN_PROPS",
            Self::UpdateTransactionAmounts(_) => {
                "metamask/confirm-transaction/UPDATE_TRANSACTION_AMOUNTS"
            }
            Self::UpdateTransactionFees(_) => {
                "metamask/confirm-transaction/UPDATE_TRANSACTION_FEES"
            }
            Self::UpdateTransactionTotals(_) => {
                "metamask/confirm-transaction/UPDATE_TRANSACTION_TOTALS"
            }
            Self::UpdateNonce(_) => "metamask/confirm-transaction/UPDATE_NONCE",
            Self::SetDetailsForConfirmTx { .. } => "SET_DETAILS_FOR_CONFIRM_TX",
            Self::ClearConfirmTransaction => {
                "metamask/confirm-transaction/CLEAR_CONFIRM_TRANSACTION"
            }
            Self::CompletedTx { .. } => "COMPLETED_TX",
            Self::Foreign { action_type } => action_type.as_str(),
        }
    }
}

pub fn update_tx_data(tx: TransactionMeta) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTxData(tx)
}

pub fn update_token_data(token_data: Option<TokenData>) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTokenData(token_data)
}

pub fn update_token_props(token_props: TokenProps) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTokenProps(token_props)
}

pub fn update_transaction_amounts(amounts: AmountTriple) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTransactionAmounts(amounts)
}

pub fn update_transaction_fees(fees: AmountTriple) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTransactionFees(fees)
}

pub fn update_transaction_totals(totals: AmountTriple) -> ConfirmTxAction {
    ConfirmTxAction::UpdateTransactionTotals(totals)
}

pub fn update_nonce(nonce: String) -> ConfirmTxAction {
    ConfirmTxAction::UpdateNonce(nonce)
}

pub fn set_details_for_confirm_tx(
    transaction_id: impl Into<TxId>,
    detail: SendTxDetail,
) -> ConfirmTxAction {
    ConfirmTxAction::SetDetailsForConfirmTx {
        transaction_id: transaction_id.into(),
        detail,
    }
}

pub fn clear_confirm_transaction() -> ConfirmTxAction {
    ConfirmTxAction::ClearConfirmTransaction
}

pub fn completed_tx(id: impl Into<TxId>) -> ConfirmTxAction {
    ConfirmTxAction::CompletedTx { id: id.into() }
}

fn merge_field(incoming: &Option<String>, current: &str) -> String {
    match incoming.as_deref() {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => current.to_owned(),
    }
}

pub fn confirm_tx_reducer(
    state: &ConfirmTransactionState,
    action: &ConfirmTxAction,
) -> ConfirmTransactionState {
    match action {
        ConfirmTxAction::UpdateTxData(tx) => ConfirmTransactionState {
            tx_data: Some(tx.clone()),
            ..state.clone()
        },
        ConfirmTxAction::UpdateTokenData(token_data) => ConfirmTransactionState {
            token_data: token_data.clone(),
            ..state.clone()
        },
        ConfirmTxAction::UpdateTokenProps(token_props) => ConfirmTransactionState {
            token_props: Some(token_props.clone()),
            ..state.clone()
        },
        ConfirmTxAction::UpdateTransactionAmounts(amounts) => ConfirmTransactionState {
            fiat_transaction_amount: merge_field(&amounts.fiat, &state.fiat_transaction_amount),
            native_transaction_amount: merge_field(
                &amounts.native,
                &state.native_transaction_amount,
            ),
            hex_transaction_amount: merge_field(&amounts.hex, &state.hex_transaction_amount),
            ..state.clone()
        },
        ConfirmTxAction::UpdateTransactionFees(fees) => ConfirmTransactionState {
            fiat_transaction_fee: merge_field(&fees.fiat, &state.fiat_transaction_fee),
            native_transaction_fee: merge_field(&fees.native, &state.native_transaction_fee),
            hex_transaction_fee: merge_field(&fees.hex, &state.hex_transaction_fee),
            ..state.clone()
        },
        ConfirmTxAction::UpdateTransactionTotals(totals) => ConfirmTransactionState {
            fiat_transaction_total: merge_field(&totals.fiat, &state.fiat_transaction_total),
            native_transaction_total: merge_field(&totals.native, &state.native_transaction_total),
            hex_transaction_total: merge_field(&totals.hex, &state.hex_transaction_total),
            ..state.clone()
        },
        ConfirmTxAction::UpdateNonce(nonce) => ConfirmTransactionState {
            nonce: nonce.clone(),
            ..state.clone()
        },
        ConfirmTxAction::SetDetailsForConfirmTx {
            transaction_id,
            detail,
        } => {
            let mut send_tx_detail_per_id = state.send_tx_detail_per_id.clone();
            send_tx_detail_per_id.insert(transaction_id.clone(), *detail);
            ConfirmTransactionState {
                send_tx_detail_per_id,
                ..state.clone()
            }
        }
        ConfirmTxAction::ClearConfirmTransaction => ConfirmTransactionState {
            send_tx_detail_per_id: state.send_tx_detail_per_id.clone(),
            ..ConfirmTransactionState::default()
        },
        ConfirmTxAction::CompletedTx { id } => {
            let mut send_tx_detail_per_id = state.send_tx_detail_per_id.clone();
            send_tx_detail_per_id.remove(id);
            ConfirmTransactionState {
                send_tx_detail_per_id,
                ..state.clone()
            }
        }
        ConfirmTxAction::Foreign { .. } => state.clone(),
    }
}
