//! Order Repository Trait
//!
//! Defines the snapshot store for orders.
//! Implemented by adapters in the infrastructure layer.

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;
use crate::domain::shared::{ClientOrderId, VenueOrderId};

/// Append-only store of order snapshots.
///
/// Every snapshot produced by the state machine is kept, so the full
/// lifecycle of an order can be audited. A snapshot may only be saved on top
/// of its direct predecessor (version `n` over version `n - 1`); a stale
/// snapshot fails with `ConcurrentModification`.
pub trait OrderRepository: Send + Sync {
    /// Append a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the snapshot does not directly
    /// follow the latest stored one.
    fn save(&self, order: &Order) -> Result<(), OrderError>;

    /// Latest snapshot of an order.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn find_by_id(&self, id: &ClientOrderId) -> Result<Option<Order>, OrderError>;

    /// Every snapshot of an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn history(&self, id: &ClientOrderId) -> Result<Vec<Order>, OrderError>;

    /// Latest snapshot of the order the venue knows by `venue_order_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn find_by_venue_id(&self, venue_order_id: &VenueOrderId) -> Result<Option<Order>, OrderError>;

    /// Latest snapshots currently in `status`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;

    /// Latest snapshots of every non-terminal order.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    fn find_open(&self) -> Result<Vec<Order>, OrderError>;
}
