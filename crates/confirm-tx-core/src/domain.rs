use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Transaction identifier as handed out by the transaction controller.
///
/// Ids arrive as JSON numbers from the controller and as strings when used
/// as map keys, so both forms deserialize into the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl TxId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for TxId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TxId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TxId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for TxId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Transaction parameters. Quantities are `0x`-prefixed hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Fields this crate does not interpret, kept so the record round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A transaction record owned by the transaction controller.
///
/// Only `id` and `tx_params` are interpreted here; everything else
/// (status, history, origin, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub id: TxId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_params: Option<TxParams>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionMeta {
    pub fn new(id: impl Into<TxId>, tx_params: Option<TxParams>) -> Self {
        Self {
            id: id.into(),
            tx_params,
            extra: Map::new(),
        }
    }

    /// Returns a new record identical to `self` except for `txParams.value`.
    pub fn with_value(&self, value: String) -> Self {
        let mut tx_params = self.tx_params.clone().unwrap_or_default();
        tx_params.value = Some(value);
        Self {
            id: self.id.clone(),
            tx_params: Some(tx_params),
            extra: self.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountMode {
    Input,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Native,
    Token,
    Nft,
    Unknown,
}

/// How the user entered the amount of a send, remembered per transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTxDetail {
    pub amount_mode: AmountMode,
    pub asset_type: AssetType,
}

/// Partial fiat / native / hex update for one of the amount, fee or total
/// triples. `None` and empty strings leave the stored value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountTriple {
    pub fiat: Option<String>,
    pub native: Option<String>,
    pub hex: Option<String>,
}

impl AmountTriple {
    pub fn new(fiat: Option<String>, native: Option<String>, hex: impl Into<String>) -> Self {
        Self {
            fiat,
            native,
            hex: Some(hex.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProps {
    pub decimals: Option<u8>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenArg {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub value: String,
}

/// Decoded standard token call (ERC-20 / ERC-721 / ERC-1155).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub name: String,
    pub args: Vec<TokenArg>,
}

impl TokenData {
    pub fn arg(&self, name: &str) -> Option<&TokenArg> {
        self.args.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownToken {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
}

/// Inputs for turning wei amounts into display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionContext {
    pub conversion_rate: Option<f64>,
    pub native_currency: String,
    pub current_currency: String,
}

/// Decimal places used when rendering native and fiat values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrecision {
    pub native: u32,
    pub fiat: u32,
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self { native: 6, fiat: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeMarketEstimate {
    /// Decimal gwei.
    pub suggested_max_fee_per_gas: String,
    /// Decimal gwei.
    pub suggested_max_priority_fee_per_gas: String,
}

/// A freshly arrived gas fee estimate, tagged by estimate type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gasEstimateType", content = "gasFeeEstimates")]
pub enum GasFeeEstimates {
    #[serde(rename = "fee-market")]
    FeeMarket { medium: FeeMarketEstimate },
    /// Medium legacy gas price in decimal gwei.
    #[serde(rename = "legacy")]
    Legacy { medium: String },
    /// `eth_gasPrice` result in decimal gwei.
    #[serde(rename = "eth_gasPrice")]
    EthGasPrice {
        #[serde(rename = "gasPrice")]
        gas_price: String,
    },
    #[serde(rename = "none")]
    None,
}

/// Gas parameters a transaction would be submitted with. Hex wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimationObject {
    pub gas_limit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
}
