use std::time::{Duration, Instant};

/// Cancellable repeating deadline driving the stopwatch.
///
/// The ticker does nothing by itself: the event loop asks how long it may
/// sleep and then collects whole periods that have elapsed. A cancelled
/// ticker never reports a tick, so nothing fires after the view goes away.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker {
            // A zero period would make fire_due spin
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// (Re)arm with the first tick one period after `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Time left before the next tick, `None` when cancelled
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Number of whole periods elapsed by `now`; advances the deadline past them.
    pub fn fire_due(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut fired = 0u32;
        while due <= now {
            fired = fired.saturating_add(1);
            due += self.period;
        }
        self.next_due = Some(due);
        fired
    }
}
