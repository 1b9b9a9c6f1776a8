//! Handoff to the external payment provider.
//!
//! The finalized order is sent to the payment-initiation endpoint,
//! which answers with a redirect URL. This module only obtains the URL;
//! the session decides what happens around it (clearing the cart,
//! closing the preview gate). On any failure the order and cart are
//! left untouched so the user can retry.

use tracing::info;
use url::Url;

use adire_core::Order;

use crate::api::{CheckoutBackend, PaymentRequest};
use crate::error::{CheckoutError, Result};

/// Initiate payment for a persisted order.
///
/// # Errors
///
/// Returns an error if the request fails, if the backend answers
/// without a usable `payment_url`, or if the URL does not parse. All of
/// these are retryable by the user.
pub async fn initiate_payment(backend: &impl CheckoutBackend, order: &Order) -> Result<Url> {
    let request = PaymentRequest::for_order(order);
    let response = backend.create_payment(&request).await?;

    let raw = response
        .payment_url
        .filter(|u| !u.is_empty())
        .ok_or(CheckoutError::MissingPaymentUrl)?;
    let redirect = Url::parse(&raw)?;

    info!(order_id = %order.id, "payment initiated, redirecting to provider");
    Ok(redirect)
}
