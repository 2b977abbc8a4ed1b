//! Wallet deployment configuration
//!
//! Initial role holders and the wrapped-native token. The venue identity is
//! not configured here; it comes from the venue capability handed to the
//! wallet at deployment and never changes afterwards.

use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::errors::ConfigError;

/// Deployment parameters for a [`SmartWallet`](crate::wallet::SmartWallet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    /// Initial owner. Defaults to the deployer.
    pub owner: Option<Address>,
    /// Initial trader. Defaults to the resolved owner.
    pub trader: Option<Address>,
    /// Wrapped-native token. When it is the input of a swap the wallet wraps
    /// its native balance first.
    pub wrapped_native: Option<Address>,
}

impl WalletConfig {
    /// Parse a JSON deployment document, e.g.
    /// `{"owner": "0x…", "trader": "0x…", "wrapped_native": "0x…"}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }

    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_trader(mut self, trader: Address) -> Self {
        self.trader = Some(trader);
        self
    }

    pub fn with_wrapped_native(mut self, token: Address) -> Self {
        self.wrapped_native = Some(token);
        self
    }

    /// Owner for a wallet deployed by `deployer`.
    pub fn resolve_owner(&self, deployer: Address) -> Address {
        self.owner.unwrap_or(deployer)
    }

    /// Trader for a wallet deployed by `deployer`.
    pub fn resolve_trader(&self, deployer: Address) -> Address {
        self.trader.unwrap_or_else(|| self.resolve_owner(deployer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_to_deployer() {
        let deployer = Address::repeat_byte(0xd0);
        let config = WalletConfig::default();
        assert_eq!(config.resolve_owner(deployer), deployer);
        assert_eq!(config.resolve_trader(deployer), deployer);
        assert_eq!(config.wrapped_native, None);
    }

    #[test]
    fn test_trader_defaults_to_explicit_owner() {
        let deployer = Address::repeat_byte(0xd0);
        let owner = Address::repeat_byte(0x01);
        let config = WalletConfig::default().with_owner(owner);
        assert_eq!(config.resolve_trader(deployer), owner);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "owner": "0x0101010101010101010101010101010101010101",
            "trader": "0x0202020202020202020202020202020202020202",
            "wrapped_native": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
        }"#;
        let config = WalletConfig::from_json_str(json).unwrap();
        assert_eq!(config.owner, Some(Address::repeat_byte(0x01)));
        assert_eq!(config.trader, Some(Address::repeat_byte(0x02)));
        assert_eq!(
            config.wrapped_native.map(|a| a.to_string()),
            Some("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string())
        );
    }

    #[test]
    fn test_from_json_str_partial() {
        let config = WalletConfig::from_json_str("{}").unwrap();
        assert_eq!(config, WalletConfig::default());
    }

    #[test]
    fn test_from_json_str_rejects_bad_address() {
        let result = WalletConfig::from_json_str(r#"{"owner": "0x1234"}"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_from_json_str_rejects_unknown_field() {
        let result = WalletConfig::from_json_str(r#"{"router": "0x00"}"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
