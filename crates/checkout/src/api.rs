//! Storefront backend API client.
//!
//! The backend exposes a small REST surface:
//!
//! | Call                  | Method | Path                   |
//! |-----------------------|--------|------------------------|
//! | Load shipping options | GET    | `/api/shipping-prices` |
//! | Load order history    | GET    | `/api/orders`          |
//! | Create order          | POST   | `/api/orders`          |
//! | Initiate payment      | POST   | `/api/create-payment`  |
//!
//! [`CheckoutBackend`] is the seam the rest of the crate depends on,
//! so fallback behavior can be exercised against a mock backend.
//! [`CheckoutApiClient`] is the `reqwest` implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use adire_core::{CartLine, DeliveryInfo, Money, Order, OrderDraft, ShippingOption, ShippingSelection};

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};

/// The storefront backend as seen by the checkout flow.
#[async_trait]
pub trait CheckoutBackend {
    /// `GET /api/shipping-prices` - the admin-controlled shipping fee table.
    async fn fetch_shipping_prices(&self) -> Result<Vec<ShippingOption>>;

    /// `GET /api/orders` - prior orders, oldest first as stored.
    async fn fetch_orders(&self) -> Result<Vec<Order>>;

    /// `POST /api/orders` - create an order server-side.
    async fn create_order(&self, draft: &OrderDraft) -> Result<Order>;

    /// `POST /api/create-payment` - initiate payment for an order.
    async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentResponse>;
}

/// Body of the payment-initiation call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Money,
    pub items: Vec<CartLine>,
    pub shipping: ShippingSelection,
    pub delivery: DeliveryInfo,
    pub order_id: adire_core::OrderId,
}

impl PaymentRequest {
    /// Build the payment payload for a persisted order.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        Self {
            amount: order.charge_amount(),
            items: order.items.clone(),
            shipping: order.shipping.clone(),
            delivery: order.delivery.clone(),
            order_id: order.id.clone(),
        }
    }
}

/// Response of the payment-initiation call. A missing `payment_url`
/// means the provider did not accept the initiation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentResponse {
    #[serde(default)]
    pub payment_url: Option<String>,
}

/// HTTP client for the storefront backend API.
#[derive(Clone)]
pub struct CheckoutApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl CheckoutApiClient {
    /// Create a new backend API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CheckoutConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch a JSON body, turning non-success statuses into
    /// `CheckoutError::Api` and parse failures into
    /// `CheckoutError::MalformedResponse`.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Read as text first for better diagnostics on malformed payloads
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse backend response"
            );
            CheckoutError::MalformedResponse(e.to_string())
        })
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse backend response"
            );
            CheckoutError::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl CheckoutBackend for CheckoutApiClient {
    async fn fetch_shipping_prices(&self) -> Result<Vec<ShippingOption>> {
        let value = self.get_json("/api/shipping-prices").await?;
        parse_array(value, "shipping price list")
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        let value = self.get_json("/api/orders").await?;
        parse_array(value, "order list")
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<Order> {
        let value = self.post_json("/api/orders", draft).await?;
        unwrap_order_response(value)
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
        let value = self.post_json("/api/create-payment", request).await?;
        serde_json::from_value(value)
            .map_err(|e| CheckoutError::MalformedResponse(e.to_string()))
    }
}

/// Parse a response expected to be a JSON array of `T`.
fn parse_array<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> Result<Vec<T>> {
    if !value.is_array() {
        return Err(CheckoutError::MalformedResponse(format!(
            "{what} is not an array"
        )));
    }
    serde_json::from_value(value).map_err(|e| CheckoutError::MalformedResponse(e.to_string()))
}

/// Extract the created order from a create-order response.
///
/// The backend has shipped several envelope shapes; `{order}`, `{data}`,
/// and a bare order body are all accepted.
fn unwrap_order_response(mut value: serde_json::Value) -> Result<Order> {
    if let Some(inner) = value.get_mut("order") {
        value = inner.take();
    } else if let Some(inner) = value.get_mut("data") {
        value = inner.take();
    }
    serde_json::from_value(value).map_err(|e| CheckoutError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_body() -> serde_json::Value {
        json!({
            "id": "ord_7",
            "items": [],
            "subtotal": 4000,
            "shipping": { "state": "Lagos", "fee": 2500 },
            "delivery": { "fullName": "Amina Bello" },
            "total": 6500,
            "createdAt": "2026-08-30T12:00:00Z"
        })
    }

    #[test]
    fn test_unwrap_order_envelope_variants() {
        for envelope in [
            json!({ "order": order_body() }),
            json!({ "data": order_body() }),
            order_body(),
        ] {
            let order = unwrap_order_response(envelope).expect("valid envelope");
            assert_eq!(order.id.as_str(), "ord_7");
            assert_eq!(order.shipping.location, "Lagos");
        }
    }

    #[test]
    fn test_unwrap_order_rejects_garbage() {
        let err = unwrap_order_response(json!({ "ok": true })).expect_err("no order present");
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_array_rejects_non_array() {
        let err = parse_array::<ShippingOption>(json!({ "prices": [] }), "shipping price list")
            .expect_err("object is not an array");
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_shipping_prices() {
        let options: Vec<ShippingOption> = parse_array(
            json!([{ "state": "Lagos", "price": 2500 }, { "state": "Kano", "price": 3000 }]),
            "shipping price list",
        )
        .expect("valid list");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].location, "Lagos");
        assert_eq!(options[0].fee, Money::from_major(2500));
    }

    #[test]
    fn test_payment_response_tolerates_missing_url() {
        let response: PaymentResponse =
            serde_json::from_value(json!({ "error": "provider down" })).expect("lenient parse");
        assert!(response.payment_url.is_none());

        let response: PaymentResponse =
            serde_json::from_value(json!({ "payment_url": "https://pay.example.com/x" }))
                .expect("parse");
        assert_eq!(
            response.payment_url.as_deref(),
            Some("https://pay.example.com/x")
        );
    }

    #[test]
    fn test_payment_request_wire_shape() {
        let order: Order = serde_json::from_value(order_body()).expect("order");
        let request = PaymentRequest::for_order(&order);
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["orderId"], "ord_7");
        assert_eq!(json["shipping"]["state"], "Lagos");
        assert!((json["amount"].as_f64().unwrap_or(0.0) - 6500.0).abs() < f64::EPSILON);
    }
}
