//! Simulated clock for backtests.
//!
//! Time only moves when the caller advances it. Timers fire synchronously on
//! the caller's thread, in due-time order, with registration order breaking
//! ties. While a callback runs the clock reports that timer's due time.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::clock::{Clock, ClockError, ScheduledTimer, TimeEvent, TimerSpec};
use crate::domain::shared::Timestamp;
use crate::observability::record_timer_event;

#[derive(Debug)]
struct PendingTimer {
    timer: ScheduledTimer,
    due: Timestamp,
    seq: u64,
}

#[derive(Debug)]
struct State {
    now: Timestamp,
    timers: HashMap<String, PendingTimer>,
    next_seq: u64,
}

impl State {
    /// Earliest timer due at or before `until`, by (due, seq).
    fn earliest_due(&self, until: Timestamp) -> Option<String> {
        self.timers
            .iter()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.seq))
            .map(|(name, _)| name.clone())
    }
}

/// Clock whose time is set explicitly by a backtest driver.
#[derive(Debug)]
pub struct SimulatedClock {
    state: Mutex<State>,
}

impl SimulatedClock {
    /// Create a clock holding `start`.
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            state: Mutex::new(State {
                now: start,
                timers: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Move the held time without firing anything.
    pub fn set_time(&self, to: Timestamp) {
        self.state.lock().now = to;
    }

    /// Advance to `to`, firing every timer due at or before it.
    ///
    /// Returns the fired events in firing order. Timers registered by a
    /// callback with a due time at or before `to` fire within the same call.
    ///
    /// # Errors
    ///
    /// Returns `NonMonotonic` if `to` is before the current time; nothing fires.
    pub fn advance_to(&self, to: Timestamp) -> Result<Vec<TimeEvent>, ClockError> {
        {
            let state = self.state.lock();
            if to < state.now {
                return Err(ClockError::NonMonotonic {
                    now: state.now,
                    requested: to,
                });
            }
        }

        let mut fired = Vec::new();
        loop {
            let (event, callback) = {
                let mut state = self.state.lock();
                let Some(name) = state.earliest_due(to) else {
                    state.now = to;
                    break;
                };
                let Some(mut pending) = state.timers.remove(&name) else {
                    break;
                };

                let scheduled_at = pending.due;
                if scheduled_at > state.now {
                    state.now = scheduled_at;
                }
                let event = TimeEvent {
                    name: name.clone(),
                    scheduled_at,
                    fired_at: state.now,
                };
                let callback = pending.timer.callback().clone();

                if let Some(next) = pending.timer.next_after(scheduled_at) {
                    pending.due = next;
                    state.timers.insert(name, pending);
                }
                (event, callback)
            };

            tracing::trace!(
                timer = %event.name,
                scheduled_at = %event.scheduled_at,
                "Simulated timer fired"
            );
            record_timer_event("simulated");
            callback(event.clone());
            fired.push(event);
        }

        Ok(fired)
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Timestamp {
        self.state.lock().now
    }

    fn set_timer(&self, spec: TimerSpec) -> Result<(), ClockError> {
        let mut state = self.state.lock();
        if state.timers.contains_key(spec.name()) {
            return Err(ClockError::DuplicateTimerName {
                name: spec.name().to_string(),
            });
        }
        let timer = spec.resolve(state.now)?;
        let seq = state.next_seq;
        state.next_seq += 1;

        tracing::debug!(
            timer = %timer.name(),
            first_due = %timer.first_due(),
            repeating = timer.is_repeating(),
            "Simulated timer registered"
        );
        state.timers.insert(
            timer.name().to_string(),
            PendingTimer {
                due: timer.first_due(),
                timer,
                seq,
            },
        );
        Ok(())
    }

    fn cancel_timer(&self, name: &str) {
        if self.state.lock().timers.remove(name).is_some() {
            tracing::debug!(timer = %name, "Simulated timer canceled");
        }
    }

    fn cancel_all_timers(&self) {
        self.state.lock().timers.clear();
    }

    fn timer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.lock().timers.keys().cloned().collect();
        names.sort();
        names
    }

    fn timer_count(&self) -> usize {
        self.state.lock().timers.len()
    }

    fn next_time(&self, name: &str) -> Option<Timestamp> {
        self.state.lock().timers.get(name).map(|p| p.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::sync::Arc;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix_nanos(secs * 1_000_000_000)
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(TimeEvent) + Send + Sync + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (log, move |e: TimeEvent| sink.lock().push(e.name))
    }

    #[test]
    fn now_returns_held_time() {
        let clock = SimulatedClock::new(ts(42));
        assert_eq!(clock.now(), ts(42));
        clock.set_time(ts(50));
        assert_eq!(clock.now(), ts(50));
    }

    #[test]
    fn advance_fires_in_due_order_then_registration_order() {
        let clock = SimulatedClock::new(ts(0));
        let (log, cb) = recorder();
        let cb = Arc::new(cb);
        for (name, at) in [("c", 20), ("a", 10), ("b", 10)] {
            let cb = Arc::clone(&cb);
            clock
                .set_timer(TimerSpec::once(name, ts(at), move |e| cb(e)))
                .unwrap();
        }

        let events = clock.advance_to(ts(30)).unwrap();

        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
        assert_eq!(events.len(), 3);
        assert_eq!(clock.now(), ts(30));
        assert_eq!(clock.timer_count(), 0);
    }

    #[test]
    fn periodic_fires_once_per_elapsed_interval() {
        let clock = SimulatedClock::new(ts(0));
        clock
            .set_timer(TimerSpec::repeating("tick", TimeDelta::seconds(10), |_| {}))
            .unwrap();

        let events = clock.advance_to(ts(35)).unwrap();

        let due: Vec<_> = events.iter().map(|e| e.scheduled_at).collect();
        assert_eq!(due, vec![ts(10), ts(20), ts(30)]);
        assert_eq!(clock.next_time("tick"), Some(ts(40)));
    }

    #[test]
    fn advance_backwards_fails_without_firing() {
        let clock = SimulatedClock::new(ts(100));
        let (log, cb) = recorder();
        clock.set_timer(TimerSpec::once("t", ts(50), cb)).unwrap();

        let result = clock.advance_to(ts(90));

        assert!(matches!(result, Err(ClockError::NonMonotonic { .. })));
        assert!(log.lock().is_empty());
        assert_eq!(clock.now(), ts(100));
    }

    #[test]
    fn now_inside_callback_is_due_time() {
        let clock = Arc::new(SimulatedClock::new(ts(0)));
        let seen = Arc::new(Mutex::new(None));
        let (c, s) = (Arc::clone(&clock), Arc::clone(&seen));
        clock
            .set_timer(TimerSpec::once("t", ts(7), move |_| {
                *s.lock() = Some(c.now());
            }))
            .unwrap();

        clock.advance_to(ts(10)).unwrap();

        assert_eq!(*seen.lock(), Some(ts(7)));
    }

    #[test]
    fn duplicate_name_rejected_until_fired() {
        let clock = SimulatedClock::new(ts(0));
        clock.set_timer(TimerSpec::once("t", ts(5), |_| {})).unwrap();

        let dup = clock.set_timer(TimerSpec::once("t", ts(6), |_| {}));
        assert_eq!(
            dup.unwrap_err(),
            ClockError::DuplicateTimerName {
                name: "t".to_string()
            }
        );

        clock.advance_to(ts(5)).unwrap();
        assert!(clock.set_timer(TimerSpec::once("t", ts(6), |_| {})).is_ok());
    }

    #[test]
    fn cancel_timer_prevents_firing() {
        let clock = SimulatedClock::new(ts(0));
        let (log, cb) = recorder();
        clock.set_timer(TimerSpec::once("t", ts(5), cb)).unwrap();

        clock.cancel_timer("t");
        clock.cancel_timer("missing");
        clock.advance_to(ts(10)).unwrap();

        assert!(log.lock().is_empty());
    }

    #[test]
    fn callback_can_cancel_itself() {
        let clock = Arc::new(SimulatedClock::new(ts(0)));
        let c = Arc::clone(&clock);
        clock
            .set_timer(TimerSpec::repeating("tick", TimeDelta::seconds(1), move |e| {
                c.cancel_timer(&e.name);
            }))
            .unwrap();

        let events = clock.advance_to(ts(10)).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(clock.timer_count(), 0);
    }

    #[test]
    fn callback_registered_timer_fires_in_same_advance() {
        let clock = Arc::new(SimulatedClock::new(ts(0)));
        let (log, cb) = recorder();
        let cb = Arc::new(cb);
        let c = Arc::clone(&clock);
        let inner = Arc::clone(&cb);
        clock
            .set_timer(TimerSpec::once("first", ts(5), move |e| {
                inner(e);
                let next = Arc::clone(&inner);
                c.set_timer(TimerSpec::once("second", ts(8), move |e| next(e)))
                    .unwrap();
            }))
            .unwrap();

        clock.advance_to(ts(10)).unwrap();

        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn past_due_timer_fires_without_moving_time_backwards() {
        let clock = SimulatedClock::new(ts(100));
        clock.set_timer(TimerSpec::once("late", ts(50), |_| {})).unwrap();

        let events = clock.advance_to(ts(100)).unwrap();

        assert_eq!(events[0].scheduled_at, ts(50));
        assert_eq!(events[0].fired_at, ts(100));
        assert_eq!(clock.now(), ts(100));
    }

    #[test]
    fn stop_time_ends_series() {
        let clock = SimulatedClock::new(ts(0));
        clock
            .set_timer(
                TimerSpec::repeating("tick", TimeDelta::seconds(10), |_| {}).stopping_at(ts(20)),
            )
            .unwrap();

        let events = clock.advance_to(ts(100)).unwrap();

        assert_eq!(events.len(), 2);
        assert!(clock.timer_names().is_empty());
    }

    #[test]
    fn timer_names_sorted() {
        let clock = SimulatedClock::new(ts(0));
        clock.set_timer(TimerSpec::once("b", ts(1), |_| {})).unwrap();
        clock.set_timer(TimerSpec::once("a", ts(1), |_| {})).unwrap();
        assert_eq!(clock.timer_names(), vec!["a", "b"]);

        clock.cancel_all_timers();
        assert_eq!(clock.timer_count(), 0);
    }
}
