//! Adire Checkout library.
//!
//! Implements the customer-facing checkout flow of the Adire
//! storefront: cart review, delivery-address collection, shipping-fee
//! selection, order creation, and handoff to the payment provider.
//!
//! The heart of the crate is [`session::CheckoutSession`], the
//! order-assembly state machine. It merges client-held mutable state
//! (delivery form, shipping selection, cart contents) into an immutable
//! [`adire_core::Order`], persists it (remotely, or locally as a
//! fallback), and hands it to payment initiation - with consistent
//! behavior when the shipping-price, orders, or payment endpoints are
//! each independently unavailable.
//!
//! Rendering, the cart container, the country/state/city directory, and
//! the payment provider itself are external collaborators; this crate
//! only defines the seams they plug into.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod delivery;
pub mod error;
pub mod history;
pub mod payment;
pub mod session;
pub mod shipping;
