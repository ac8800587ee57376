use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

/// Fixed pause between page requests. A pause can be cut short through a
/// [`PauseInterrupt`] handle; the caller carries on either way.
pub struct RateLimiter {
    delay: Duration,
    interrupt: Arc<Notify>,
    pause_count: usize,
}

/// Cuts the current (or next) pause of a [`RateLimiter`] short
#[derive(Clone)]
pub struct PauseInterrupt(Arc<Notify>);

impl PauseInterrupt {
    pub fn interrupt(&self) {
        self.0.notify_one();
    }
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            interrupt: Arc::new(Notify::new()),
            pause_count: 0,
        }
    }

    pub fn interrupt_handle(&self) -> PauseInterrupt {
        PauseInterrupt(Arc::clone(&self.interrupt))
    }

    /// Sleeps for the configured delay. Returns `false` if the pause was interrupted.
    pub async fn pause(&mut self) -> bool {
        self.increment();
        if self.delay.is_zero() {
            return true;
        }
        tokio::select! {
            _ = sleep(self.delay) => true,
            _ = self.interrupt.notified() => false,
        }
    }

    pub fn pause_count(&self) -> usize {
        self.pause_count
    }

    fn increment(&mut self) {
        self.pause_count += 1;
    }
}
