//! Order persistence and history, with a durable local fallback.
//!
//! Orders are created server-side when possible. When the orders
//! endpoint is down, a locally-identified order is synthesized instead;
//! either way the result lands at the head of the durable order list so
//! the customer can always see what they just bought. History loading
//! runs the same chain in reverse: server first, local store second,
//! empty list last.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use adire_core::{Order, OrderDraft, OrderId};

use crate::api::CheckoutBackend;

/// Errors from the durable client-side store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt order list: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable client-side order list, most-recent-first.
///
/// Injectable so the remote/local fallback can be exercised against a
/// mock implementation, and so future storage backends can be swapped
/// in without touching the checkout flow.
pub trait OrderHistoryStore {
    /// Read the full list, most-recent-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is unreadable or corrupt. A missing
    /// slot is an empty list, not an error.
    fn load(&self) -> Result<Vec<Order>, HistoryError>;

    /// Insert an order at the head of the list and write it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be written.
    fn append(&self, order: &Order) -> Result<(), HistoryError>;
}

/// File-backed store: a single JSON-encoded array of orders.
///
/// The list is read-modify-written without a concurrency guard, so
/// concurrent writers (two checkout tabs, say) can lose updates. That
/// is a known limitation of a client-local cache, not something this
/// store papers over.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OrderHistoryStore for FileHistoryStore {
    fn load(&self) -> Result<Vec<Order>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn append(&self, order: &Order) -> Result<(), HistoryError> {
        // A corrupt existing list is dropped rather than blocking the
        // new order from being recorded.
        let mut orders = match self.load() {
            Ok(orders) => orders,
            Err(error) => {
                warn!(%error, "existing order list unreadable, starting a fresh one");
                Vec::new()
            }
        };
        orders.insert(0, order.clone());
        fs::write(&self.path, serde_json::to_string(&orders)?)?;
        Ok(())
    }
}

/// Persist an order draft: server-side when the orders endpoint
/// cooperates, locally minted otherwise. Never fails.
///
/// The resulting order always carries a non-empty identifier and is
/// appended to the head of the durable list. If the durable write
/// itself fails, the order is still returned - degraded to non-durable
/// for this call only.
pub async fn persist_order(
    backend: &impl CheckoutBackend,
    store: &impl OrderHistoryStore,
    draft: OrderDraft,
) -> Order {
    let order = match backend.create_order(&draft).await {
        Ok(order) if !order.id.is_empty() => {
            debug!(order_id = %order.id, "order created server-side");
            order
        }
        Ok(_) => {
            warn!("server accepted the order but returned no id, minting a local one");
            Order::from_draft(OrderId::minted_now(), draft)
        }
        Err(error) => {
            warn!(%error, "order creation failed, persisting locally");
            Order::from_draft(OrderId::minted_now(), draft)
        }
    };

    if let Err(error) = store.append(&order) {
        warn!(%error, order_id = %order.id, "durable order write failed, keeping in-memory copy");
    }

    order
}

/// Load prior orders, most-recent-first: server fetch, else the durable
/// local list, else empty. Never fails.
pub async fn load_history(
    backend: &impl CheckoutBackend,
    store: &impl OrderHistoryStore,
) -> Vec<Order> {
    match backend.fetch_orders().await {
        Ok(mut orders) => {
            // The server stores oldest-first; flip to most-recent-first.
            orders.reverse();
            orders
        }
        Err(error) => {
            warn!(%error, "order history fetch failed, reading local list");
            store.load().unwrap_or_else(|error| {
                warn!(%error, "local order list unreadable, treating history as empty");
                Vec::new()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PaymentRequest, PaymentResponse};
    use crate::error::{CheckoutError, Result};
    use adire_core::{DeliveryDraft, Money, ShippingSelection};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn draft() -> OrderDraft {
        let delivery = DeliveryDraft {
            full_name: "Amina Bello".to_string(),
            phone: "8012345678".to_string(),
            country_name: "Nigeria".to_string(),
            ..DeliveryDraft::default()
        };
        let shipping = ShippingSelection {
            location: "Lagos".to_string(),
            fee: Money::from_major(2500),
        };
        OrderDraft::assemble(&[], &delivery, Some(&shipping)).expect("valid draft")
    }

    /// Backend whose orders endpoint always fails.
    struct OrdersDown;

    #[async_trait]
    impl CheckoutBackend for OrdersDown {
        async fn fetch_shipping_prices(&self) -> Result<Vec<adire_core::ShippingOption>> {
            unreachable!("not used in history tests")
        }

        async fn fetch_orders(&self) -> Result<Vec<Order>> {
            Err(CheckoutError::Api {
                status: 503,
                message: "down".to_string(),
            })
        }

        async fn create_order(&self, _draft: &OrderDraft) -> Result<Order> {
            Err(CheckoutError::Api {
                status: 503,
                message: "down".to_string(),
            })
        }

        async fn create_payment(&self, _request: &PaymentRequest) -> Result<PaymentResponse> {
            unreachable!("not used in history tests")
        }
    }

    /// Backend whose orders endpoint assigns server ids.
    struct OrdersUp;

    #[async_trait]
    impl CheckoutBackend for OrdersUp {
        async fn fetch_shipping_prices(&self) -> Result<Vec<adire_core::ShippingOption>> {
            unreachable!("not used in history tests")
        }

        async fn fetch_orders(&self) -> Result<Vec<Order>> {
            Ok(vec![
                Order::from_draft(OrderId::new("oldest"), draft()),
                Order::from_draft(OrderId::new("newest"), draft()),
            ])
        }

        async fn create_order(&self, draft: &OrderDraft) -> Result<Order> {
            Ok(Order::from_draft(OrderId::new("srv_1"), draft.clone()))
        }

        async fn create_payment(&self, _request: &PaymentRequest) -> Result<PaymentResponse> {
            unreachable!("not used in history tests")
        }
    }

    /// In-memory store used as the durable slot in tests.
    #[derive(Default)]
    struct MemoryStore {
        orders: Mutex<Vec<Order>>,
        fail_writes: bool,
    }

    impl OrderHistoryStore for MemoryStore {
        fn load(&self) -> std::result::Result<Vec<Order>, HistoryError> {
            Ok(self.orders.lock().expect("store lock").clone())
        }

        fn append(&self, order: &Order) -> std::result::Result<(), HistoryError> {
            if self.fail_writes {
                return Err(HistoryError::Io(std::io::Error::other("disk full")));
            }
            self.orders.lock().expect("store lock").insert(0, order.clone());
            Ok(())
        }
    }

    fn temp_store(name: &str) -> FileHistoryStore {
        let path = std::env::temp_dir().join(format!(
            "adire-history-{name}-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        FileHistoryStore::new(path)
    }

    #[tokio::test]
    async fn test_persist_uses_server_id_when_available() {
        let store = MemoryStore::default();
        let order = persist_order(&OrdersUp, &store, draft()).await;
        assert_eq!(order.id.as_str(), "srv_1");
        assert_eq!(store.load().expect("load").len(), 1);
    }

    #[tokio::test]
    async fn test_persist_mints_local_id_when_server_down() {
        let store = MemoryStore::default();
        let order = persist_order(&OrdersDown, &store, draft()).await;
        assert!(!order.id.is_empty());

        let stored = store.load().expect("load");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, order.id);
    }

    #[tokio::test]
    async fn test_persist_survives_durable_write_failure() {
        let store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let order = persist_order(&OrdersDown, &store, draft()).await;
        assert!(!order.id.is_empty());
        assert!(store.load().expect("load").is_empty());
    }

    #[tokio::test]
    async fn test_load_history_reverses_server_order() {
        let store = MemoryStore::default();
        let orders = load_history(&OrdersUp, &store).await;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "newest");
        assert_eq!(orders[1].id.as_str(), "oldest");
    }

    #[tokio::test]
    async fn test_load_history_falls_back_to_store_then_empty() {
        let store = MemoryStore::default();
        store
            .append(&Order::from_draft(OrderId::new("local_1"), draft()))
            .expect("append");

        let orders = load_history(&OrdersDown, &store).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id.as_str(), "local_1");

        let empty = load_history(&OrdersDown, &MemoryStore::default()).await;
        assert!(empty.is_empty());
    }

    #[test]
    fn test_file_store_missing_slot_is_empty() {
        let store = temp_store("missing");
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn test_file_store_appends_head_first_and_survives_reload() {
        let store = temp_store("append");
        store
            .append(&Order::from_draft(OrderId::new("first"), draft()))
            .expect("append");
        store
            .append(&Order::from_draft(OrderId::new("second"), draft()))
            .expect("append");

        // Re-open the same slot to prove durability across sessions.
        let reopened = FileHistoryStore::new(store.path.clone());
        let orders = reopened.load().expect("load");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "second");
        assert_eq!(orders[1].id.as_str(), "first");

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn test_file_store_corrupt_slot_errors_on_load_but_not_append() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "{ not json").expect("write corrupt slot");

        assert!(matches!(store.load(), Err(HistoryError::Corrupt(_))));

        store
            .append(&Order::from_draft(OrderId::new("fresh"), draft()))
            .expect("append resets corrupt slot");
        assert_eq!(store.load().expect("load").len(), 1);

        let _ = fs::remove_file(&store.path);
    }
}
