//! # Card Networks and Merchant Capabilities
//!
//! The platform's card-network allow-list and merchant capability flags.
//! Caller-declared names outside the allow-list are dropped silently by the
//! converters (callers may list networks the platform does not yet
//! recognize), so `parse` returns an `Option` rather than an error.

use serde::{Deserialize, Serialize};

/// Card networks the platform payment framework recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Amex,
    Discover,
    Mastercard,
    Visa,
    Jcb,
    ChinaUnionPay,
    Interac,
    PrivateLabel,
}

impl CardNetwork {
    /// Parse a caller-declared network name. Lookup is exact-match on the
    /// platform's lowercase names; anything else is unknown.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "amex" => Some(CardNetwork::Amex),
            "discover" => Some(CardNetwork::Discover),
            "mastercard" => Some(CardNetwork::Mastercard),
            "visa" => Some(CardNetwork::Visa),
            "jcb" => Some(CardNetwork::Jcb),
            "chinaunionpay" => Some(CardNetwork::ChinaUnionPay),
            "interac" => Some(CardNetwork::Interac),
            "privatelabel" => Some(CardNetwork::PrivateLabel),
            _ => None,
        }
    }

    /// Returns the platform name for this network
    pub fn as_str(&self) -> &'static str {
        match self {
            CardNetwork::Amex => "amex",
            CardNetwork::Discover => "discover",
            CardNetwork::Mastercard => "mastercard",
            CardNetwork::Visa => "visa",
            CardNetwork::Jcb => "jcb",
            CardNetwork::ChinaUnionPay => "chinaunionpay",
            CardNetwork::Interac => "interac",
            CardNetwork::PrivateLabel => "privatelabel",
        }
    }
}

impl std::fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Merchant capability flags declared in method data.
///
/// The platform requires at least one; requests default to 3-D Secure when
/// the caller declares none, matching platform guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantCapability {
    #[serde(rename = "supports3DS")]
    Supports3DS,
    #[serde(rename = "supportsCredit")]
    Credit,
    #[serde(rename = "supportsDebit")]
    Debit,
    #[serde(rename = "supportsEMV")]
    Emv,
}

impl MerchantCapability {
    /// Parse a caller-declared capability flag; unknown flags are dropped
    /// silently by the converters, same policy as networks.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "supports3DS" => Some(MerchantCapability::Supports3DS),
            "supportsCredit" => Some(MerchantCapability::Credit),
            "supportsDebit" => Some(MerchantCapability::Debit),
            "supportsEMV" => Some(MerchantCapability::Emv),
            _ => None,
        }
    }

    /// Returns the boundary name for this capability
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantCapability::Supports3DS => "supports3DS",
            MerchantCapability::Credit => "supportsCredit",
            MerchantCapability::Debit => "supportsDebit",
            MerchantCapability::Emv => "supportsEMV",
        }
    }
}

impl std::fmt::Display for MerchantCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parse() {
        assert_eq!(CardNetwork::parse("visa"), Some(CardNetwork::Visa));
        assert_eq!(CardNetwork::parse("amex"), Some(CardNetwork::Amex));
        assert_eq!(CardNetwork::parse("bogus"), None);
        // Exact-match lookup, as the platform mapping does
        assert_eq!(CardNetwork::parse("Visa"), None);
    }

    #[test]
    fn test_network_roundtrip() {
        for name in [
            "amex",
            "discover",
            "mastercard",
            "visa",
            "jcb",
            "chinaunionpay",
            "interac",
            "privatelabel",
        ] {
            let network = CardNetwork::parse(name).unwrap();
            assert_eq!(network.as_str(), name);
        }
    }

    #[test]
    fn test_network_serde() {
        let json = serde_json::to_string(&CardNetwork::ChinaUnionPay).unwrap();
        assert_eq!(json, "\"chinaunionpay\"");
        let parsed: CardNetwork = serde_json::from_str("\"visa\"").unwrap();
        assert_eq!(parsed, CardNetwork::Visa);
    }

    #[test]
    fn test_capability_parse() {
        assert_eq!(
            MerchantCapability::parse("supports3DS"),
            Some(MerchantCapability::Supports3DS)
        );
        assert_eq!(
            MerchantCapability::parse("supportsEMV"),
            Some(MerchantCapability::Emv)
        );
        assert_eq!(MerchantCapability::parse("supportsMagstripe"), None);
    }
}
