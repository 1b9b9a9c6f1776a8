//! Core types for the Adire checkout.
//!
//! This module provides the domain types shared between the checkout
//! library and anything presenting it.

pub mod delivery;
pub mod money;
pub mod order;

pub use delivery::{DeliveryDraft, DeliveryInfo};
pub use money::Money;
pub use order::{CartLine, Order, OrderDraft, OrderId, ShippingOption, ShippingSelection};

use thiserror::Error;

/// Validation failures raised while turning mutable checkout state into
/// an immutable order. Surfaced to the user; always locally recoverable
/// by correcting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Recipient name, phone number, or country is missing.
    #[error("missing delivery information: name, phone, and country are required")]
    MissingDeliveryInfo,

    /// No shipping location has been selected.
    #[error("no shipping location selected")]
    MissingShippingSelection,

    /// Submission attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,
}
