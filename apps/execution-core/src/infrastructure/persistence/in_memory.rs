//! In-memory order repository.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::order_execution::aggregate::Order;
use crate::domain::order_execution::errors::OrderError;
use crate::domain::order_execution::repository::OrderRepository;
use crate::domain::order_execution::value_objects::OrderStatus;
use crate::domain::shared::{ClientOrderId, VenueOrderId};

/// In-memory implementation of `OrderRepository`.
///
/// Keeps every snapshot per client order id, oldest first.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<ClientOrderId, Vec<Order>>>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Get the number of orders in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }

    /// Clear all orders from the repository.
    pub fn clear(&self) {
        self.orders.write().clear();
    }

    fn latest_where(&self, predicate: impl Fn(&Order) -> bool) -> Vec<Order> {
        let orders = self.orders.read();
        let mut found: Vec<Order> = orders
            .values()
            .filter_map(|snapshots| snapshots.last())
            .filter(|o| predicate(o))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.client_order_id().cmp(b.client_order_id()));
        found
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write();
        let stored = orders
            .get(order.client_order_id())
            .and_then(|snapshots| snapshots.last())
            .map(Order::version);
        let follows = match stored {
            None => order.version() == 0,
            Some(version) => order.version() == version + 1,
        };
        if !follows {
            return Err(OrderError::ConcurrentModification {
                client_order_id: order.client_order_id().clone(),
                expected: stored,
                actual: order.version(),
            });
        }
        orders
            .entry(order.client_order_id().clone())
            .or_default()
            .push(order.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &ClientOrderId) -> Result<Option<Order>, OrderError> {
        Ok(self
            .orders
            .read()
            .get(id)
            .and_then(|snapshots| snapshots.last())
            .cloned())
    }

    fn history(&self, id: &ClientOrderId) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.read().get(id).cloned().unwrap_or_default())
    }

    fn find_by_venue_id(&self, venue_order_id: &VenueOrderId) -> Result<Option<Order>, OrderError> {
        Ok(self
            .latest_where(|o| o.venue_order_id() == Some(venue_order_id))
            .into_iter()
            .next())
    }

    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        Ok(self.latest_where(|o| o.status() == status))
    }

    fn find_open(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.latest_where(|o| !o.is_terminal()))
    }
}
