//! Cart lines, shipping, and the immutable order record.
//!
//! An [`OrderDraft`] is the validated merge of cart contents, shipping
//! selection, and delivery details - everything except a durable
//! identifier. Persistence attaches the identifier (server-assigned or
//! locally minted) to produce an [`Order`], which later stages read and
//! never mutate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;
use super::delivery::{DeliveryDraft, DeliveryInfo};
use super::money::Money;

/// A single line in the cart. Owned by the external cart collaborator;
/// read-only to the checkout core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    /// Unit price; accepts numeric or currency-formatted string wire
    /// forms, malformed values parse as zero.
    #[serde(rename = "price")]
    pub unit_price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, rename = "img", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLine {
    /// `unit_price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// A shipping destination and its fee, as published by the backend
/// (`GET /api/shipping-prices`). Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingOption {
    #[serde(rename = "state")]
    pub location: String,
    #[serde(rename = "price")]
    pub fee: Money,
}

/// The shipping choice committed into an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSelection {
    #[serde(rename = "state")]
    pub location: String,
    pub fee: Money,
}

/// Order identifier. Server-assigned ids arrive as JSON strings or
/// numbers; locally minted ids are time-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a local identifier from the current time, used when the
    /// orders endpoint is unavailable.
    #[must_use]
    pub fn minted_now() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderIdVisitor)
    }
}

struct OrderIdVisitor;

impl Visitor<'_> for OrderIdVisitor {
    type Value = OrderId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an order id as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OrderId, E> {
        Ok(OrderId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<OrderId, E> {
        Ok(OrderId(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<OrderId, E> {
        Ok(OrderId(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<OrderId, E> {
        Ok(OrderId(v.to_string()))
    }
}

/// An order payload prior to receiving a durable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub shipping: ShippingSelection,
    pub delivery: DeliveryInfo,
    pub total: Money,
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Merge cart contents, delivery details, and the shipping choice
    /// into a draft. Validation runs in order, first failure wins:
    /// delivery fields, then shipping selection.
    ///
    /// The subtotal is the exact sum of `unit_price * quantity` over
    /// the lines and `total = subtotal + shipping.fee`; both are
    /// derived here, never trusted from elsewhere.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingDeliveryInfo`] if the recipient name,
    /// phone, or country is empty;
    /// [`ValidationError::MissingShippingSelection`] if no shipping
    /// location has been chosen.
    pub fn assemble(
        items: &[CartLine],
        delivery: &DeliveryDraft,
        shipping: Option<&ShippingSelection>,
    ) -> Result<Self, ValidationError> {
        let delivery = delivery.validate()?;
        let shipping = shipping
            .filter(|s| !s.location.is_empty())
            .ok_or(ValidationError::MissingShippingSelection)?
            .clone();

        let subtotal: Money = items.iter().map(CartLine::line_total).sum();
        let total = subtotal + shipping.fee;

        Ok(Self {
            items: items.to_vec(),
            subtotal,
            shipping,
            delivery,
            total,
            created_at: Utc::now(),
        })
    }
}

/// An immutable order snapshot. Created once by assembly and
/// persistence; later stages read it, never mutate fields in place.
/// History is append-only - orders are never deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub subtotal: Money,
    pub shipping: ShippingSelection,
    pub delivery: DeliveryInfo,
    #[serde(default)]
    pub total: Money,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Order {
    /// Attach an identifier to a draft, producing the final record.
    #[must_use]
    pub fn from_draft(id: OrderId, draft: OrderDraft) -> Self {
        Self {
            id,
            customer: None,
            items: draft.items,
            subtotal: draft.subtotal,
            shipping: draft.shipping,
            delivery: draft.delivery,
            total: draft.total,
            created_at: draft.created_at,
        }
    }

    /// The amount charged at payment: the total, or the subtotal for
    /// foreign records that never carried one.
    #[must_use]
    pub fn charge_amount(&self) -> Money {
        if self.total.is_zero() {
            self.subtotal
        } else {
            self.total
        }
    }
}
