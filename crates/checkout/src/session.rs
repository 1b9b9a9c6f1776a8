//! The checkout session state machine.
//!
//! A [`CheckoutSession`] holds every piece of client-side mutable state
//! the checkout page works with: the shipping catalog and the chosen
//! location, the delivery form, the recent-order list, and the preview
//! gate. Submission merges that state into an immutable order, persists
//! it, and presents it for confirmation; confirmation hands off to the
//! payment provider.
//!
//! Shipping-catalog and order-history loads are triggered independently
//! at session start and may overlap. Each logical load carries a
//! monotonic sequence token; a response belonging to a superseded
//! request is discarded, so "last request wins" deterministically
//! rather than by timing.

use tracing::debug;
use url::Url;

use adire_core::{Order, OrderDraft, ShippingOption, ShippingSelection, ValidationError};

use crate::api::CheckoutBackend;
use crate::cart::Cart;
use crate::delivery::DeliveryForm;
use crate::error::{CheckoutError, Result};
use crate::history::{self, OrderHistoryStore};
use crate::payment;
use crate::shipping;

/// The preview/confirmation gate in front of payment handoff.
///
/// `Hidden -> Showing` when an order has just been persisted;
/// `Showing -> Confirming` on user confirmation; `Showing -> Hidden` on
/// cancellation (the order stays persisted); `Confirming -> Hidden` on
/// successful handoff and back to `Showing` on failure, so the user can
/// retry. While `Confirming`, both controls are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewGate {
    #[default]
    Hidden,
    Showing(Order),
    Confirming(Order),
}

impl PreviewGate {
    /// The order currently presented, if any.
    #[must_use]
    pub const fn order(&self) -> Option<&Order> {
        match self {
            Self::Hidden => None,
            Self::Showing(order) | Self::Confirming(order) => Some(order),
        }
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Token identifying one logical load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Monotonic request-sequence guard for one logical load.
#[derive(Debug, Default)]
struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    fn begin(&mut self) -> LoadToken {
        self.latest += 1;
        LoadToken(self.latest)
    }

    const fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.latest
    }
}

/// Client-held checkout state for one session.
///
/// Backend, durable store, and cart are collaborators passed into the
/// operations that need them; the session itself is pure state.
#[derive(Debug, Default)]
pub struct CheckoutSession {
    shipping_options: Vec<ShippingOption>,
    shipping_selection: Option<ShippingSelection>,
    delivery: DeliveryForm,
    orders: Vec<Order>,
    gate: PreviewGate,
    processing: bool,
    shipping_loads: LoadSequence,
    history_loads: LoadSequence,
}

impl CheckoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Read access
    // =========================================================================

    #[must_use]
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.shipping_options
    }

    #[must_use]
    pub const fn shipping_selection(&self) -> Option<&ShippingSelection> {
        self.shipping_selection.as_ref()
    }

    #[must_use]
    pub const fn delivery(&self) -> &DeliveryForm {
        &self.delivery
    }

    pub const fn delivery_mut(&mut self) -> &mut DeliveryForm {
        &mut self.delivery
    }

    /// Recent orders, most-recent-first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub const fn gate(&self) -> &PreviewGate {
        &self.gate
    }

    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    // =========================================================================
    // Shipping catalog
    // =========================================================================

    /// Start a shipping-catalog load, superseding any in-flight one.
    pub fn begin_shipping_load(&mut self) -> LoadToken {
        self.shipping_loads.begin()
    }

    /// Apply a completed shipping-catalog load. Returns `false` and
    /// leaves state untouched when the token has been superseded.
    pub fn apply_shipping_options(
        &mut self,
        token: LoadToken,
        options: Vec<ShippingOption>,
    ) -> bool {
        if !self.shipping_loads.is_current(token) {
            debug!("discarding stale shipping catalog response");
            return false;
        }
        self.shipping_options = options;
        true
    }

    /// Convenience: load the shipping catalog (with fallback) and apply
    /// it under a fresh token.
    pub async fn refresh_shipping(&mut self, backend: &impl CheckoutBackend) {
        let token = self.begin_shipping_load();
        let options = shipping::load_shipping_options(backend).await;
        self.apply_shipping_options(token, options);
    }

    /// Choose a shipping location by name. The fee is resolved from the
    /// loaded catalog; an empty name clears the selection.
    pub fn select_shipping(&mut self, location: &str) {
        self.shipping_selection = if location.is_empty() {
            None
        } else {
            Some(shipping::select_option(&self.shipping_options, location))
        };
    }

    // =========================================================================
    // Order history
    // =========================================================================

    /// Start an order-history load, superseding any in-flight one.
    pub fn begin_history_load(&mut self) -> LoadToken {
        self.history_loads.begin()
    }

    /// Apply a completed order-history load. Returns `false` and leaves
    /// state untouched when the token has been superseded.
    pub fn apply_history(&mut self, token: LoadToken, orders: Vec<Order>) -> bool {
        if !self.history_loads.is_current(token) {
            debug!("discarding stale order history response");
            return false;
        }
        self.orders = orders;
        true
    }

    /// Convenience: load prior orders (server, else local store, else
    /// empty) and apply them under a fresh token.
    pub async fn refresh_history(
        &mut self,
        backend: &impl CheckoutBackend,
        store: &impl OrderHistoryStore,
    ) {
        let token = self.begin_history_load();
        let orders = history::load_history(backend, store).await;
        self.apply_history(token, orders);
    }

    // =========================================================================
    // Submission and confirmation
    // =========================================================================

    /// Submit the checkout: validate, assemble, persist, and present
    /// the order for confirmation.
    ///
    /// Serialized with respect to itself - a submission while one is in
    /// flight, or while an order is already awaiting confirmation, is
    /// rejected rather than queued.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyProcessing`] on re-entrant submission;
    /// [`CheckoutError::Validation`] when the cart is empty or required
    /// delivery/shipping input is missing. Persistence itself never
    /// fails (it falls back to a locally-identified order).
    pub async fn submit(
        &mut self,
        backend: &impl CheckoutBackend,
        store: &impl OrderHistoryStore,
        cart: &impl Cart,
    ) -> Result<&Order> {
        if self.processing || !self.gate.is_hidden() {
            return Err(CheckoutError::AlreadyProcessing);
        }
        if cart.is_empty() {
            return Err(CheckoutError::Validation(ValidationError::EmptyCart));
        }

        let draft = OrderDraft::assemble(
            cart.lines(),
            self.delivery.draft(),
            self.shipping_selection.as_ref(),
        )?;

        self.processing = true;
        let order = history::persist_order(backend, store, draft).await;
        self.processing = false;

        self.orders.insert(0, order.clone());
        self.gate = PreviewGate::Showing(order);

        match &self.gate {
            PreviewGate::Showing(order) => Ok(order),
            // Set two lines above; nothing else runs in between.
            PreviewGate::Hidden | PreviewGate::Confirming(_) => unreachable!(),
        }
    }

    /// Confirm the previewed order and hand off to payment.
    ///
    /// On success the cart is cleared - irreversibly, under the
    /// assumption payment will proceed - and the returned URL is where
    /// the caller must navigate. On failure the cart and order are left
    /// untouched and the gate returns to `Showing` for a retry.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::NothingToConfirm`] when no order is being
    /// previewed; [`CheckoutError::AlreadyProcessing`] while a
    /// confirmation is in flight; otherwise the payment error.
    pub async fn confirm(
        &mut self,
        backend: &impl CheckoutBackend,
        cart: &mut impl Cart,
    ) -> Result<Url> {
        let order = match std::mem::take(&mut self.gate) {
            PreviewGate::Showing(order) => order,
            PreviewGate::Confirming(order) => {
                self.gate = PreviewGate::Confirming(order);
                return Err(CheckoutError::AlreadyProcessing);
            }
            PreviewGate::Hidden => return Err(CheckoutError::NothingToConfirm),
        };

        self.gate = PreviewGate::Confirming(order.clone());
        self.processing = true;

        let outcome = payment::initiate_payment(backend, &order).await;
        self.processing = false;

        match outcome {
            Ok(redirect) => {
                cart.clear();
                self.gate = PreviewGate::Hidden;
                Ok(redirect)
            }
            Err(error) => {
                // Leave everything retryable: order persisted, cart intact.
                self.gate = PreviewGate::Showing(order);
                Err(error)
            }
        }
    }

    /// Cancel the preview and return to editing. The order remains
    /// persisted; no other side effect.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyProcessing`] while a confirmation is in
    /// flight; [`CheckoutError::NothingToConfirm`] when nothing is
    /// being previewed.
    pub fn cancel(&mut self) -> Result<()> {
        match self.gate {
            PreviewGate::Showing(_) => {
                self.gate = PreviewGate::Hidden;
                Ok(())
            }
            PreviewGate::Confirming(_) => Err(CheckoutError::AlreadyProcessing),
            PreviewGate::Hidden => Err(CheckoutError::NothingToConfirm),
        }
    }
}
