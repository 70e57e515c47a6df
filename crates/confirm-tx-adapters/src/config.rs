use confirm_tx_core::DisplayPrecision;

#[derive(Debug, Clone)]
pub struct ConfirmTxAdapterConfig {
    pub native_display_decimals: u32,
    pub fiat_display_decimals: u32,
    pub default_native_currency: String,
    pub default_current_currency: String,
}

impl ConfirmTxAdapterConfig {
    pub fn display_precision(&self) -> DisplayPrecision {
        DisplayPrecision {
            native: self.native_display_decimals,
            fiat: self.fiat_display_decimals,
        }
    }
}

impl Default for ConfirmTxAdapterConfig {
    fn default() -> Self {
        Self {
            native_display_decimals: 6,
            fiat_display_decimals: 2,
            default_native_currency: "ETH".to_owned(),
            default_current_currency: "usd".to_owned(),
        }
    }
}
