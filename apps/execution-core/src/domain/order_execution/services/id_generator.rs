//! Client order identifier generation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::domain::clock::Clock;
use crate::domain::order_execution::value_objects::{IdentityError, OrderIdentity, validate_scope};
use crate::domain::shared::{StrategyId, TraderId};

type CounterKey = (TraderId, StrategyId, NaiveDate);

/// Issues per-(trader, strategy, day) sequence numbers.
///
/// The day is the clock's UTC date at the moment of the call. Each day bucket
/// has its own counter starting at 1, so crossing midnight starts a fresh
/// sequence while earlier buckets keep their counts. Increment-and-read is
/// atomic per key.
pub struct ClientOrderIdGenerator {
    clock: Arc<dyn Clock>,
    counters: Mutex<HashMap<CounterKey, u64>>,
}

impl std::fmt::Debug for ClientOrderIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOrderIdGenerator")
            .field("counters", &self.counters.lock().len())
            .finish_non_exhaustive()
    }
}

impl ClientOrderIdGenerator {
    /// Create a generator reading days from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Issue the next identity for `trader` and `strategy`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidScope` if either id cannot be embedded in a rendered
    /// identity, or `SequenceExhausted` once a bucket's counter is at
    /// `u64::MAX`. No sequence number is consumed in either case.
    pub fn generate(
        &self,
        trader: &TraderId,
        strategy: &StrategyId,
    ) -> Result<OrderIdentity, IdentityError> {
        validate_scope("trader_id", trader.as_str())?;
        validate_scope("strategy_id", strategy.as_str())?;

        let day = self.clock.utc_date();
        let sequence = {
            let mut counters = self.counters.lock();
            let counter = counters
                .entry((trader.clone(), strategy.clone(), day))
                .or_insert(0);
            *counter = counter
                .checked_add(1)
                .ok_or_else(|| IdentityError::SequenceExhausted {
                    trader_id: trader.clone(),
                    strategy_id: strategy.clone(),
                    day,
                })?;
            *counter
        };
        OrderIdentity::new(trader.clone(), strategy.clone(), day, sequence)
    }

    /// Last sequence issued for a bucket, 0 if none.
    #[must_use]
    pub fn count(&self, trader: &TraderId, strategy: &StrategyId, day: NaiveDate) -> u64 {
        self.counters
            .lock()
            .get(&(trader.clone(), strategy.clone(), day))
            .copied()
            .unwrap_or(0)
    }

    /// Restore a bucket's counter, e.g. after a restart.
    ///
    /// The next identity issued for the bucket gets sequence `count + 1`.
    pub fn set_count(&self, trader: &TraderId, strategy: &StrategyId, day: NaiveDate, count: u64) {
        self.counters
            .lock()
            .insert((trader.clone(), strategy.clone(), day), count);
    }

    /// Forget every counter.
    pub fn reset(&self) {
        self.counters.lock().clear();
    }
}
