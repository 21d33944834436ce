use std::{future::Future, time::Duration};

use tokio::{sync::Mutex, time::Instant};

/// A "last request start + minimum gap" guard.
///
/// The lock is held for the whole request, so at most one request is in flight,
/// and every request starts at least `interval` after the previous one started.
pub struct Throttle {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Throttle {
            interval,
            last_start: Mutex::new(None),
        }
    }

    /// Waits for the turn of the caller and then runs `request`.
    pub async fn run<F, Fut, T>(&self, request: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last_start = self.last_start.lock().await;
        if let Some(at) = *last_start {
            tokio::time::sleep_until(at + self.interval).await;
        }

        *last_start = Some(Instant::now());
        request().await
    }
}
