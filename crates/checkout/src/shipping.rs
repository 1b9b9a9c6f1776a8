//! Shipping catalog with a deterministic fallback.
//!
//! The fee table is admin-controlled and served by the backend. When
//! the endpoint is unreachable or returns garbage, checkout must still
//! be able to quote shipping, so every Nigerian state (plus the FCT) is
//! offered at a uniform default fee instead. Loading never fails and
//! never yields an empty catalog.

use tracing::warn;

use adire_core::{Money, ShippingOption, ShippingSelection};

use crate::api::CheckoutBackend;

/// Uniform fee applied to every fallback location, in naira.
pub const DEFAULT_SHIPPING_FEE: i64 = 2500;

/// Fallback shipping locations: the 36 Nigerian states and the FCT.
pub const DEFAULT_SHIPPING_STATES: [&str; 37] = [
    "Abia",
    "Adamawa",
    "Akwa Ibom",
    "Anambra",
    "Bauchi",
    "Bayelsa",
    "Benue",
    "Borno",
    "Cross River",
    "Delta",
    "Ebonyi",
    "Edo",
    "Ekiti",
    "Enugu",
    "Gombe",
    "Imo",
    "Jigawa",
    "Kaduna",
    "Kano",
    "Katsina",
    "Kebbi",
    "Kogi",
    "Kwara",
    "Lagos",
    "Nasarawa",
    "Niger",
    "Ogun",
    "Ondo",
    "Osun",
    "Oyo",
    "Plateau",
    "Rivers",
    "Sokoto",
    "Taraba",
    "Yobe",
    "Zamfara",
    "FCT",
];

/// The deterministic substitute catalog used when the backend is
/// unavailable.
#[must_use]
pub fn fallback_options() -> Vec<ShippingOption> {
    DEFAULT_SHIPPING_STATES
        .iter()
        .map(|state| ShippingOption {
            location: (*state).to_string(),
            fee: Money::from_major(DEFAULT_SHIPPING_FEE),
        })
        .collect()
}

/// Load the shipping catalog, falling back to [`fallback_options`] on
/// any failure. Never raises; the result is always non-empty.
pub async fn load_shipping_options(backend: &impl CheckoutBackend) -> Vec<ShippingOption> {
    match backend.fetch_shipping_prices().await {
        Ok(options) if !options.is_empty() => options,
        Ok(_) => {
            warn!("shipping price endpoint returned an empty list, using fallback catalog");
            fallback_options()
        }
        Err(error) => {
            warn!(%error, "failed to load shipping prices, using fallback catalog");
            fallback_options()
        }
    }
}

/// Resolve a location choice against the catalog. A location missing
/// from the catalog ships at a zero fee rather than blocking checkout.
#[must_use]
pub fn select_option(options: &[ShippingOption], location: &str) -> ShippingSelection {
    let fee = options
        .iter()
        .find(|option| option.location == location)
        .map_or(Money::ZERO, |option| option.fee);
    ShippingSelection {
        location: location.to_string(),
        fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PaymentRequest, PaymentResponse};
    use crate::error::{CheckoutError, Result};
    use adire_core::{Order, OrderDraft};
    use async_trait::async_trait;

    struct DownBackend;

    #[async_trait]
    impl CheckoutBackend for DownBackend {
        async fn fetch_shipping_prices(&self) -> Result<Vec<ShippingOption>> {
            Err(CheckoutError::MalformedResponse("not an array".to_string()))
        }

        async fn fetch_orders(&self) -> Result<Vec<Order>> {
            unreachable!("not used in shipping tests")
        }

        async fn create_order(&self, _draft: &OrderDraft) -> Result<Order> {
            unreachable!("not used in shipping tests")
        }

        async fn create_payment(&self, _request: &PaymentRequest) -> Result<PaymentResponse> {
            unreachable!("not used in shipping tests")
        }
    }

    #[test]
    fn test_fallback_is_never_empty_and_uniform() {
        let options = fallback_options();
        assert_eq!(options.len(), 37);
        assert!(options.iter().all(|o| o.fee == Money::from_major(2500)));
        assert!(options.iter().any(|o| o.location == "Lagos"));
        assert!(options.iter().any(|o| o.location == "FCT"));
    }

    #[tokio::test]
    async fn test_load_falls_back_on_backend_failure() {
        let options = load_shipping_options(&DownBackend).await;
        assert_eq!(options.len(), 37);
    }

    #[test]
    fn test_select_known_location() {
        let options = vec![ShippingOption {
            location: "Lagos".to_string(),
            fee: Money::from_major(2500),
        }];
        let selection = select_option(&options, "Lagos");
        assert_eq!(selection.location, "Lagos");
        assert_eq!(selection.fee, Money::from_major(2500));
    }

    #[test]
    fn test_select_unknown_location_is_zero_fee() {
        let selection = select_option(&[], "Atlantis");
        assert_eq!(selection.location, "Atlantis");
        assert_eq!(selection.fee, Money::ZERO);
    }
}
