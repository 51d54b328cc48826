//! Wall-clock implementation backed by tokio timers.
//!
//! Each registered timer runs as its own task on the runtime handle supplied
//! at construction. A task sleeps until the due time, re-checking the wall
//! clock after waking so a callback never runs early, and exits as soon as
//! its cancellation token fires.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::domain::clock::{Clock, ClockError, ScheduledTimer, TimeEvent, TimerSpec};
use crate::domain::shared::Timestamp;
use crate::observability::record_timer_event;

#[derive(Debug)]
struct ActiveTimer {
    generation: u64,
    next_due: Timestamp,
    token: CancellationToken,
}

type TimerTable = Arc<Mutex<HashMap<String, ActiveTimer>>>;

/// Clock reading the system time, with timers driven by tokio.
#[derive(Debug)]
pub struct LiveClock {
    handle: Handle,
    timers: TimerTable,
    generation: AtomicU64,
}

impl LiveClock {
    /// Create a clock whose timers run on `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            timers: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }
}

impl Clock for LiveClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn set_timer(&self, spec: TimerSpec) -> Result<(), ClockError> {
        let mut timers = self.timers.lock();
        if timers.contains_key(spec.name()) {
            return Err(ClockError::DuplicateTimerName {
                name: spec.name().to_string(),
            });
        }
        let timer = spec.resolve(Timestamp::now())?;
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        tracing::debug!(
            timer = %timer.name(),
            first_due = %timer.first_due(),
            repeating = timer.is_repeating(),
            "Live timer registered"
        );
        timers.insert(
            timer.name().to_string(),
            ActiveTimer {
                generation,
                next_due: timer.first_due(),
                token: token.clone(),
            },
        );
        drop(timers);

        self.handle.spawn(run_timer(
            Arc::clone(&self.timers),
            timer,
            generation,
            token,
        ));
        Ok(())
    }

    fn cancel_timer(&self, name: &str) {
        if let Some(active) = self.timers.lock().remove(name) {
            active.token.cancel();
            tracing::debug!(timer = %name, "Live timer canceled");
        }
    }

    fn cancel_all_timers(&self) {
        let drained: Vec<ActiveTimer> = self.timers.lock().drain().map(|(_, t)| t).collect();
        for active in drained {
            active.token.cancel();
        }
    }

    fn timer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.timers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn timer_count(&self) -> usize {
        self.timers.lock().len()
    }

    fn next_time(&self, name: &str) -> Option<Timestamp> {
        self.timers.lock().get(name).map(|t| t.next_due)
    }
}

impl Drop for LiveClock {
    fn drop(&mut self) {
        self.cancel_all_timers();
    }
}

async fn run_timer(
    timers: TimerTable,
    timer: ScheduledTimer,
    generation: u64,
    token: CancellationToken,
) {
    let mut due = timer.first_due();
    loop {
        if !sleep_until(due, &token).await {
            return;
        }

        let next = timer.next_after(due);
        {
            let mut table = timers.lock();
            // Canceled or replaced while we were waking up.
            let Some(active) = table
                .get_mut(timer.name())
                .filter(|a| a.generation == generation)
            else {
                return;
            };
            match next {
                Some(next_due) => active.next_due = next_due,
                None => {
                    table.remove(timer.name());
                }
            }
        }

        let event = TimeEvent {
            name: timer.name().to_string(),
            scheduled_at: due,
            fired_at: Timestamp::now(),
        };
        tracing::trace!(
            timer = %event.name,
            scheduled_at = %event.scheduled_at,
            fired_at = %event.fired_at,
            "Live timer fired"
        );
        record_timer_event("live");
        (timer.callback())(event);

        match next {
            Some(next_due) => due = next_due,
            None => return,
        }
    }
}

/// Sleep until the wall clock reaches `due`. Returns false if canceled first.
async fn sleep_until(due: Timestamp, token: &CancellationToken) -> bool {
    loop {
        if token.is_cancelled() {
            return false;
        }
        let now = Timestamp::now();
        if now >= due {
            return true;
        }
        let wait = due.duration_since(now).to_std().unwrap_or_default();
        tokio::select! {
            biased;
            () = token.cancelled() => return false,
            () = tokio::time::sleep(wait) => {}
        }
    }
}
