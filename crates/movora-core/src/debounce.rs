use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Single-slot timer that holds the latest value until input goes quiet.
///
/// `arm` replaces any pending value and restarts the interval; `cancel`
/// drops it. [`Debouncer::expired`] resolves once, with the armed value, when
/// the interval passes without a re-arm. It never resolves while disarmed, so
/// it can sit in a `tokio::select!` loop unconditionally.
#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn arm(&mut self, value: T) {
        self.pending = Some((Instant::now() + self.interval, value));
    }

    /// Disarm, returning the value that would have fired
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Wait for the armed value to fire.
    ///
    /// Cancel-safe: dropping the future before it completes leaves the timer
    /// armed with the same deadline.
    pub async fn expired(&mut self) -> T {
        let deadline = match &self.pending {
            Some((deadline, _)) => *deadline,
            None => return std::future::pending().await,
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((_, value)) => value,
            None => std::future::pending().await,
        }
    }
}
