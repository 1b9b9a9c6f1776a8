//! Adire Core - Shared domain types for the checkout flow.
//!
//! This crate provides the types that flow through the checkout:
//! money, cart lines, shipping selections, delivery details, and the
//! immutable `Order` record.
//!
//! # Architecture
//!
//! The core crate contains only types and pure assembly logic - no I/O,
//! no HTTP clients, no storage. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money, cart, delivery, and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
