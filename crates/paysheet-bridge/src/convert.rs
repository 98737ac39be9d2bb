//! # Request Converters
//!
//! Data-shape conversions from caller input to platform request values.
//! All of these are pure; `PaymentBridge::create_request` composes them.
//!
//! Validation here runs before any UI is shown, so the user never sees a
//! sheet that cannot complete.

use paysheet_core::{
    CardNetwork, ContactField, DisplayItem, MerchantCapability, PaymentDetails,
    PaymentMethodData, PaymentOptions, SheetError, SheetResult, SummaryItem,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Extract the caller-declared card networks from one method-data entry.
///
/// Unknown names are dropped silently (callers may list networks the
/// platform does not yet recognize). Input order is preserved; it is a
/// display order only and carries no priority. Duplicates pass through.
pub fn supported_networks(method: &PaymentMethodData) -> Vec<CardNetwork> {
    method
        .data
        .supported_networks
        .iter()
        .filter_map(|name| match CardNetwork::parse(name) {
            Some(network) => Some(network),
            None => {
                debug!(network = %name, "dropping unrecognized card network");
                None
            }
        })
        .collect()
}

/// Extract the merchant capability flags from one method-data entry.
///
/// Unknown flags are dropped (same policy as networks). When none survive,
/// the request defaults to 3-D Secure, which the platform always expects.
pub fn merchant_capabilities(method: &PaymentMethodData) -> Vec<MerchantCapability> {
    let capabilities: Vec<MerchantCapability> = method
        .data
        .merchant_capabilities
        .iter()
        .filter_map(|name| match MerchantCapability::parse(name) {
            Some(capability) => Some(capability),
            None => {
                debug!(capability = %name, "dropping unrecognized merchant capability");
                None
            }
        })
        .collect();

    if capabilities.is_empty() {
        vec![MerchantCapability::Supports3DS]
    } else {
        capabilities
    }
}

/// Convert one display item into a platform summary item.
///
/// The amount must parse as a non-negative decimal; anything else is
/// `InvalidAmount` naming the offending label and value.
pub fn summary_item(item: &DisplayItem) -> SheetResult<SummaryItem> {
    let amount = Decimal::from_str(&item.amount).map_err(|_| SheetError::InvalidAmount {
        label: item.label.clone(),
        value: item.amount.clone(),
    })?;

    if amount < Decimal::ZERO {
        return Err(SheetError::InvalidAmount {
            label: item.label.clone(),
            value: item.amount.clone(),
        });
    }

    Ok(SummaryItem::new(item.label.clone(), amount))
}

/// Convert payment details into the platform summary-item list: each display
/// item in input order, then one synthesized item for the grand total.
///
/// Fails with `MissingTotal` when the details carry no total; item
/// conversion failures propagate as `InvalidAmount`.
pub fn summary_items(details: &PaymentDetails) -> SheetResult<Vec<SummaryItem>> {
    let total = details.total.as_ref().ok_or(SheetError::MissingTotal)?;

    let mut items = Vec::with_capacity(details.display_items.len() + 1);
    for item in &details.display_items {
        items.push(summary_item(item)?);
    }
    items.push(summary_item(total)?);

    Ok(items)
}

/// Map request options onto the contact fields the sheet must collect
pub fn required_contact_fields(options: &PaymentOptions) -> Vec<ContactField> {
    let mut fields = Vec::new();
    if options.request_payer_name {
        fields.push(ContactField::Name);
    }
    if options.request_payer_email {
        fields.push(ContactField::Email);
    }
    if options.request_payer_phone {
        fields.push(ContactField::Phone);
    }
    if options.request_shipping {
        fields.push(ContactField::PostalAddress);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use paysheet_core::MethodConfig;
    use rust_decimal_macros::dec;

    fn method_with_networks(networks: &[&str]) -> PaymentMethodData {
        PaymentMethodData::new("apple-pay").with_config(MethodConfig {
            supported_networks: networks.iter().map(|s| s.to_string()).collect(),
            ..MethodConfig::default()
        })
    }

    #[test]
    fn test_networks_drop_unknowns_preserve_order() {
        let method = method_with_networks(&["visa", "bogus", "amex"]);
        assert_eq!(
            supported_networks(&method),
            vec![CardNetwork::Visa, CardNetwork::Amex]
        );
    }

    #[test]
    fn test_networks_preserve_duplicates() {
        let method = method_with_networks(&["visa", "visa", "mastercard"]);
        assert_eq!(
            supported_networks(&method),
            vec![
                CardNetwork::Visa,
                CardNetwork::Visa,
                CardNetwork::Mastercard
            ]
        );
    }

    #[test]
    fn test_networks_all_unknown_is_empty() {
        let method = method_with_networks(&["bogus", "alsobogus"]);
        assert!(supported_networks(&method).is_empty());
    }

    #[test]
    fn test_capabilities_default_to_3ds() {
        let method = PaymentMethodData::new("apple-pay");
        assert_eq!(
            merchant_capabilities(&method),
            vec![MerchantCapability::Supports3DS]
        );

        let declared = PaymentMethodData::new("apple-pay").with_config(MethodConfig {
            merchant_capabilities: vec!["supportsDebit".into(), "supportsMagstripe".into()],
            ..MethodConfig::default()
        });
        assert_eq!(
            merchant_capabilities(&declared),
            vec![MerchantCapability::Debit]
        );
    }

    #[test]
    fn test_summary_item_conversion() {
        let item = summary_item(&DisplayItem::new("Widget", "9.99")).unwrap();
        assert_eq!(item.label, "Widget");
        assert_eq!(item.amount, dec!(9.99));

        // Zero is a valid amount
        let free = summary_item(&DisplayItem::new("Coupon", "0.00")).unwrap();
        assert_eq!(free.amount, dec!(0.00));
    }

    #[test]
    fn test_summary_item_rejects_bad_amounts() {
        let malformed = summary_item(&DisplayItem::new("Widget", "nine99"));
        assert!(matches!(
            malformed,
            Err(SheetError::InvalidAmount { ref label, ref value })
                if label == "Widget" && value == "nine99"
        ));

        let negative = summary_item(&DisplayItem::new("Refund", "-1.00"));
        assert!(matches!(negative, Err(SheetError::InvalidAmount { .. })));
    }

    #[test]
    fn test_summary_items_appends_total_last() {
        let details = PaymentDetails::with_total("Total", "9.99").with_item("Widget", "9.99");
        let items = summary_items(&details).unwrap();

        assert_eq!(items.len(), details.display_items.len() + 1);
        assert_eq!(items[0], SummaryItem::new("Widget", dec!(9.99)));
        assert_eq!(items[1], SummaryItem::new("Total", dec!(9.99)));
    }

    #[test]
    fn test_summary_items_order_preserved() {
        let details = PaymentDetails::with_total("Grand Total", "6.00")
            .with_item("B-item", "2.00")
            .with_item("A-item", "3.00")
            .with_item("C-item", "1.00");
        let items = summary_items(&details).unwrap();

        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["B-item", "A-item", "C-item", "Grand Total"]);
    }

    #[test]
    fn test_summary_items_require_total() {
        let details = PaymentDetails::default();
        assert!(matches!(
            summary_items(&details),
            Err(SheetError::MissingTotal)
        ));
    }

    #[test]
    fn test_summary_items_propagate_item_errors() {
        let details = PaymentDetails::with_total("Total", "9.99").with_item("Widget", "oops");
        assert!(matches!(
            summary_items(&details),
            Err(SheetError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_contact_field_mapping() {
        let none = required_contact_fields(&PaymentOptions::default());
        assert!(none.is_empty());

        let options = PaymentOptions {
            request_payer_name: true,
            request_payer_email: true,
            request_payer_phone: false,
            request_shipping: true,
            ..PaymentOptions::default()
        };
        assert_eq!(
            required_contact_fields(&options),
            vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::PostalAddress
            ]
        );
    }
}
