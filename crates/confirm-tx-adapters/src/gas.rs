use confirm_tx_core::conversion::{dec_gwei_to_hex_wei, multiply_hexes};
use confirm_tx_core::{
    GasEstimatePort, GasEstimationObject, GasFeeEstimates, PortError, TransactionMeta,
};

#[derive(Debug, Clone, Default)]
pub struct GasEstimateAdapter {
    average_gas_price: Option<String>,
}

impl GasEstimateAdapter {
    pub fn new(average_gas_price: Option<String>) -> Self {
        Self { average_gas_price }
    }

    /// Gas parameters `tx` would be sent with under `estimates`. Without an
    /// estimate the transaction's own fee fields are used.
    pub fn gas_estimation_object(
        &self,
        tx: &TransactionMeta,
        estimates: &GasFeeEstimates,
    ) -> Result<GasEstimationObject, PortError> {
        let params = tx.tx_params.clone().unwrap_or_default();
        let gas_limit = params
            .gas
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| "0x0".to_owned());

        let object = match estimates {
            GasFeeEstimates::FeeMarket { medium } => GasEstimationObject {
                gas_limit,
                gas_price: None,
                max_fee_per_gas: Some(dec_gwei_to_hex_wei(&medium.suggested_max_fee_per_gas)?),
                max_priority_fee_per_gas: Some(dec_gwei_to_hex_wei(
                    &medium.suggested_max_priority_fee_per_gas,
                )?),
            },
            GasFeeEstimates::Legacy { medium: gas_price }
            | GasFeeEstimates::EthGasPrice { gas_price } => GasEstimationObject {
                gas_limit,
                gas_price: Some(dec_gwei_to_hex_wei(gas_price)?),
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
            },
            GasFeeEstimates::None => GasEstimationObject {
                gas_limit,
                gas_price: params.gas_price,
                max_fee_per_gas: params.max_fee_per_gas,
                max_priority_fee_per_gas: params.max_priority_fee_per_gas,
            },
        };
        Ok(object)
    }
}

/// `gas_limit * (max_fee_per_gas ?? gas_price)` as hex wei.
pub fn maximum_gas_total_hex_wei(object: &GasEstimationObject) -> Result<String, PortError> {
    let price = object
        .max_fee_per_gas
        .as_deref()
        .or(object.gas_price.as_deref())
        .unwrap_or("0x0");
    Ok(multiply_hexes(&object.gas_limit, price)?)
}

impl GasEstimatePort for GasEstimateAdapter {
    fn average_gas_price(&self) -> Result<Option<String>, PortError> {
        Ok(self.average_gas_price.clone())
    }

    fn maximum_gas_total(
        &self,
        tx: &TransactionMeta,
        estimates: &GasFeeEstimates,
    ) -> Result<Option<String>, PortError> {
        let object = self.gas_estimation_object(tx, estimates)?;
        maximum_gas_total_hex_wei(&object).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confirm_tx_core::domain::FeeMarketEstimate;
    use confirm_tx_core::TxParams;

    fn tx(gas: &str, gas_price: Option<&str>) -> TransactionMeta {
        TransactionMeta::new(
            "1",
            Some(TxParams {
                gas: Some(gas.to_owned()),
                gas_price: gas_price.map(str::to_owned),
                ..TxParams::default()
            }),
        )
    }

    #[test]
    fn legacy_estimate_prices_the_gas_limit() {
        let adapter = GasEstimateAdapter::default();
        let estimates = GasFeeEstimates::Legacy {
            medium: "1".to_owned(),
        };
        let total = adapter
            .maximum_gas_total(&tx("0x5208", None), &estimates)
            .expect("total");
        assert_eq!(total.as_deref(), Some("0x1319718a5000"));
    }

    #[test]
    fn fee_market_uses_max_fee() {
        let adapter = GasEstimateAdapter::default();
        let estimates = GasFeeEstimates::FeeMarket {
            medium: FeeMarketEstimate {
                suggested_max_fee_per_gas: "2".to_owned(),
                suggested_max_priority_fee_per_gas: "1".to_owned(),
            },
        };
        let object = adapter
            .gas_estimation_object(&tx("0x5208", Some("0x1")), &estimates)
            .expect("object");
        assert_eq!(object.max_fee_per_gas.as_deref(), Some("0x77359400"));
        assert_eq!(object.max_priority_fee_per_gas.as_deref(), Some("0x3b9aca00"));
        assert_eq!(
            maximum_gas_total_hex_wei(&object).expect("total"),
            "0x2632e314a000"
        );
    }

    #[test]
    fn no_estimate_falls_back_to_transaction_fields() {
        let adapter = GasEstimateAdapter::default();
        let total = adapter
            .maximum_gas_total(&tx("0x2", Some("0x32")), &GasFeeEstimates::None)
            .expect("total");
        assert_eq!(total.as_deref(), Some("0x64"));
    }
}
