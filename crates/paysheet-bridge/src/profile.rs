//! # Merchant Profile
//!
//! Merchant configuration for the payment sheet. The profile supplies the
//! registered merchant identifier and defaults for anything the caller's
//! method data omits. Loaded from `PAYSHEET_*` environment variables or a
//! TOML file.
//!
//! Unlike caller input, operator configuration fails loudly: an unknown
//! network name or environment here is a `Configuration` error, not a
//! silent drop.

use paysheet_core::{CardNetwork, SheetError, SheetResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Which platform merchant registration to present against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sandbox / test registration
    Sandbox,
    /// Live registration
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> SheetResult<Self> {
        match value {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(SheetError::Configuration(format!(
                "PAYSHEET_ENVIRONMENT must be sandbox or production, got {:?}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Merchant configuration for payment-sheet requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantProfile {
    /// Registered merchant identifier (must start with "merchant.")
    pub merchant_identifier: String,

    /// Separate identifier for the sandbox registration, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_merchant_identifier: Option<String>,

    /// Name shown on the sheet and in logs
    pub display_name: String,

    /// ISO 3166 country code (default "US")
    #[serde(default = "default_country")]
    pub country_code: String,

    /// ISO 4217 currency code (default "USD")
    #[serde(default = "default_currency")]
    pub currency_code: String,

    /// Networks used when the caller's method data declares none
    #[serde(default)]
    pub default_networks: Vec<CardNetwork>,

    /// Which registration to present against
    #[serde(default)]
    pub environment: Environment,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl MerchantProfile {
    /// Create a profile with defaults (US/USD, production, no sandbox id)
    pub fn new(merchant_identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            merchant_identifier: merchant_identifier.into(),
            sandbox_merchant_identifier: None,
            display_name: display_name.into(),
            country_code: default_country(),
            currency_code: default_currency(),
            default_networks: Vec::new(),
            environment: Environment::Production,
        }
    }

    /// Load the profile from environment variables.
    ///
    /// Required env vars:
    /// - `PAYSHEET_MERCHANT_ID`
    /// - `PAYSHEET_DISPLAY_NAME`
    ///
    /// Optional: `PAYSHEET_SANDBOX_MERCHANT_ID`, `PAYSHEET_COUNTRY`,
    /// `PAYSHEET_CURRENCY`, `PAYSHEET_NETWORKS` (comma-separated),
    /// `PAYSHEET_ENVIRONMENT` (sandbox | production).
    pub fn from_env() -> SheetResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let merchant_identifier = env::var("PAYSHEET_MERCHANT_ID").map_err(|_| {
            SheetError::Configuration("PAYSHEET_MERCHANT_ID not set".to_string())
        })?;

        let display_name = env::var("PAYSHEET_DISPLAY_NAME").map_err(|_| {
            SheetError::Configuration("PAYSHEET_DISPLAY_NAME not set".to_string())
        })?;

        let mut profile = Self::new(merchant_identifier, display_name);

        if let Ok(sandbox_id) = env::var("PAYSHEET_SANDBOX_MERCHANT_ID") {
            profile.sandbox_merchant_identifier = Some(sandbox_id);
        }
        if let Ok(country) = env::var("PAYSHEET_COUNTRY") {
            profile.country_code = country;
        }
        if let Ok(currency) = env::var("PAYSHEET_CURRENCY") {
            profile.currency_code = currency;
        }
        if let Ok(networks) = env::var("PAYSHEET_NETWORKS") {
            profile.default_networks = parse_network_list(&networks)?;
        }
        if let Ok(environment) = env::var("PAYSHEET_ENVIRONMENT") {
            profile.environment = Environment::parse(&environment)?;
        }

        profile.validate()?;
        Ok(profile)
    }

    /// Load the profile from a TOML string
    pub fn from_toml(toml_str: &str) -> SheetResult<Self> {
        let profile: Self = toml::from_str(toml_str)
            .map_err(|e| SheetError::Configuration(format!("profile TOML: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load the profile from a TOML file
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> SheetResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SheetError::Configuration(format!("profile file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Validate identifier and code formats
    pub fn validate(&self) -> SheetResult<()> {
        if !self.merchant_identifier.starts_with("merchant.") {
            return Err(SheetError::Configuration(
                "merchant identifier must start with merchant.".to_string(),
            ));
        }
        if let Some(ref sandbox_id) = self.sandbox_merchant_identifier {
            if !sandbox_id.starts_with("merchant.") {
                return Err(SheetError::Configuration(
                    "sandbox merchant identifier must start with merchant.".to_string(),
                ));
            }
        }
        if self.display_name.trim().is_empty() {
            return Err(SheetError::Configuration(
                "display name must not be empty".to_string(),
            ));
        }
        if self.country_code.len() != 2
            || !self.country_code.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(SheetError::Configuration(format!(
                "country code must be two letters, got {:?}",
                self.country_code
            )));
        }
        if self.currency_code.len() != 3
            || !self.currency_code.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(SheetError::Configuration(format!(
                "currency code must be three letters, got {:?}",
                self.currency_code
            )));
        }
        Ok(())
    }

    /// The identifier to present against: the sandbox identifier in sandbox
    /// (when configured), the live identifier otherwise.
    pub fn effective_merchant_identifier(&self) -> &str {
        match (self.environment, &self.sandbox_merchant_identifier) {
            (Environment::Sandbox, Some(sandbox_id)) => sandbox_id,
            _ => &self.merchant_identifier,
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.environment == Environment::Sandbox
    }

    /// Builder: set the sandbox merchant identifier
    pub fn with_sandbox_identifier(mut self, id: impl Into<String>) -> Self {
        self.sandbox_merchant_identifier = Some(id.into());
        self
    }

    /// Builder: set country code
    pub fn with_country(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    /// Builder: set currency code
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    /// Builder: set fallback networks
    pub fn with_default_networks(mut self, networks: Vec<CardNetwork>) -> Self {
        self.default_networks = networks;
        self
    }

    /// Builder: set the environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

fn parse_network_list(value: &str) -> SheetResult<Vec<CardNetwork>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            CardNetwork::parse(name).ok_or_else(|| {
                SheetError::Configuration(format!(
                    "unknown card network in PAYSHEET_NETWORKS: {:?}",
                    name
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_validation() {
        let profile = MerchantProfile::new("merchant.io.enginevector.shop", "EngineVector Shop");
        assert!(profile.validate().is_ok());

        let bad_prefix = MerchantProfile::new("io.enginevector.shop", "Shop");
        assert!(matches!(
            bad_prefix.validate(),
            Err(SheetError::Configuration(_))
        ));

        let bad_country =
            MerchantProfile::new("merchant.io.enginevector.shop", "Shop").with_country("USA");
        assert!(bad_country.validate().is_err());

        let bad_currency =
            MerchantProfile::new("merchant.io.enginevector.shop", "Shop").with_currency("US");
        assert!(bad_currency.validate().is_err());
    }

    #[test]
    fn test_effective_identifier_by_environment() {
        let profile = MerchantProfile::new("merchant.io.enginevector.shop", "Shop")
            .with_sandbox_identifier("merchant.io.enginevector.shop.sandbox")
            .with_environment(Environment::Sandbox);

        assert!(profile.is_sandbox());
        assert_eq!(
            profile.effective_merchant_identifier(),
            "merchant.io.enginevector.shop.sandbox"
        );

        let live = profile.with_environment(Environment::Production);
        assert_eq!(
            live.effective_merchant_identifier(),
            "merchant.io.enginevector.shop"
        );
    }

    #[test]
    fn test_sandbox_without_sandbox_id_uses_live() {
        let profile = MerchantProfile::new("merchant.io.enginevector.shop", "Shop")
            .with_environment(Environment::Sandbox);
        assert_eq!(
            profile.effective_merchant_identifier(),
            "merchant.io.enginevector.shop"
        );
    }

    #[test]
    fn test_from_toml() {
        let profile = MerchantProfile::from_toml(
            r#"
            merchant_identifier = "merchant.io.enginevector.shop"
            display_name = "EngineVector Shop"
            country_code = "GB"
            currency_code = "GBP"
            default_networks = ["visa", "mastercard"]
            environment = "sandbox"
            "#,
        )
        .unwrap();

        assert_eq!(profile.country_code, "GB");
        assert_eq!(
            profile.default_networks,
            vec![CardNetwork::Visa, CardNetwork::Mastercard]
        );
        assert!(profile.is_sandbox());
    }

    #[test]
    fn test_from_toml_file_missing_path() {
        let result = MerchantProfile::from_toml_file("/nonexistent/paysheet.toml");
        assert!(matches!(result, Err(SheetError::Configuration(_))));
    }

    #[test]
    fn test_from_toml_rejects_unknown_network() {
        let result = MerchantProfile::from_toml(
            r#"
            merchant_identifier = "merchant.io.enginevector.shop"
            display_name = "Shop"
            default_networks = ["visa", "bogus"]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_network_list_parsing() {
        let networks = parse_network_list("visa, mastercard,amex").unwrap();
        assert_eq!(
            networks,
            vec![CardNetwork::Visa, CardNetwork::Mastercard, CardNetwork::Amex]
        );
        assert!(parse_network_list("visa,bogus").is_err());
        assert!(parse_network_list("").unwrap().is_empty());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("sandbox").unwrap(), Environment::Sandbox);
        assert_eq!(
            Environment::parse("production").unwrap(),
            Environment::Production
        );
        assert!(Environment::parse("staging").is_err());
    }
}
