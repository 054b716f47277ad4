use std::time::{Duration, Instant};

/// Deadline-based replacement for a repeating timer.
///
/// At most one deadline is outstanding: `arm` on an armed ticker keeps the
/// existing deadline, `restart` replaces it, `cancel` drops it.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    #[cfg(test)]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Consume one elapsed period, if any is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}
