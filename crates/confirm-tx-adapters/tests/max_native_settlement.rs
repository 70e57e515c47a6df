mod common;

use std::sync::atomic::Ordering;

use common::{new_orchestrator, tx_from_json, FixedGas};
use confirm_tx_core::state_machine::{set_details_for_confirm_tx, update_tx_data};
use confirm_tx_core::{
    AmountMode, AssetType, ConfirmTxCommand, ConfirmTxStore, GasFeeEstimates, SendTxDetail,
};

fn store_with_detail(amount_mode: AmountMode, asset_type: AssetType) -> ConfirmTxStore {
    let mut store = ConfirmTxStore::new();
    store.dispatch(update_tx_data(tx_from_json(serde_json::json!({
        "id": "1",
        "txParams": { "value": "0x3b6" }
    }))));
    store.dispatch(set_details_for_confirm_tx(
        "1",
        SendTxDetail {
            amount_mode,
            asset_type,
        },
    ));
    store
}

fn gas_with_max_total(total: &str) -> FixedGas {
    FixedGas {
        maximum_gas_total: Some(total.to_owned()),
        ..FixedGas::default()
    }
}

#[test]
fn max_native_send_is_reduced_by_the_max_fee() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let store = store_with_detail(AmountMode::Max, AssetType::Native);

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle")
        .expect("transaction updated");

    let value = updated.tx_params.as_ref().and_then(|p| p.value.as_deref());
    assert_eq!(value, Some("0x384"));

    let submitted = orch.updates.submitted().expect("submitted");
    assert_eq!(submitted, vec![(updated, true)]);

    let original = store
        .state()
        .tx_data
        .as_ref()
        .and_then(|tx| tx.tx_params.as_ref())
        .and_then(|p| p.value.as_deref());
    assert_eq!(original, Some("0x3b6"));
}

#[test]
fn input_mode_is_left_alone() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let store = store_with_detail(AmountMode::Input, AssetType::Native);

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle");

    assert!(updated.is_none());
    assert!(orch.updates.submitted().expect("submitted").is_empty());
    assert_eq!(orch.gas.maximum_gas_total_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn token_asset_is_left_alone() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let store = store_with_detail(AmountMode::Max, AssetType::Token);

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle");

    assert!(updated.is_none());
    assert!(orch.updates.submitted().expect("submitted").is_empty());
}

#[test]
fn nothing_under_confirmation_is_a_no_op() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let mut store = ConfirmTxStore::new();
    store.dispatch(set_details_for_confirm_tx(
        "1",
        SendTxDetail {
            amount_mode: AmountMode::Max,
            asset_type: AssetType::Native,
        },
    ));

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle");

    assert!(updated.is_none());
    assert!(orch.updates.submitted().expect("submitted").is_empty());
}

#[test]
fn fee_above_balance_goes_negative() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x3e8"), "0x64");
    let store = store_with_detail(AmountMode::Max, AssetType::Native);

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle")
        .expect("transaction updated");

    let value = updated.tx_params.as_ref().and_then(|p| p.value.as_deref());
    assert_eq!(value, Some("0x-384"));
    assert_eq!(orch.updates.submitted().expect("submitted").len(), 1);
}

#[test]
fn missing_max_fee_counts_as_zero() {
    let orch = new_orchestrator(vec![], vec![], FixedGas::default(), "0x3e8");
    let store = store_with_detail(AmountMode::Max, AssetType::Native);

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle")
        .expect("transaction updated");

    let value = updated.tx_params.as_ref().and_then(|p| p.value.as_deref());
    assert_eq!(value, Some("0x3e8"));
}

#[test]
fn settlement_does_not_touch_the_store() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let mut store = store_with_detail(AmountMode::Max, AssetType::Native);
    let before = store.state().clone();
    let published_before = store.published().len();

    let result = orch
        .handle(
            &mut store,
            ConfirmTxCommand::SettleMaxNativeValue {
                estimates: GasFeeEstimates::None,
            },
        )
        .expect("settle");

    assert_eq!(result.published, 0);
    assert!(result.updated_transaction.is_some());
    assert_eq!(store.state(), &before);
    assert_eq!(store.published().len(), published_before);
}

#[test]
fn completion_prunes_detail_so_later_settlement_is_skipped() {
    let orch = new_orchestrator(vec![], vec![], gas_with_max_total("0x64"), "0x3e8");
    let mut store = store_with_detail(AmountMode::Max, AssetType::Native);

    orch.handle(
        &mut store,
        ConfirmTxCommand::TransactionCompleted { id: "1".into() },
    )
    .expect("complete");

    let updated = orch
        .update_tx_value_if_max_native_settled(store.state(), &GasFeeEstimates::None)
        .expect("settle");
    assert!(updated.is_none());
}
