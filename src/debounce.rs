//! Trailing-edge debounce for bursty input such as search boxes.
//! Every `call` supersedes the previous pending one; an action runs only once `quiet`
//! has elapsed without a newer call. An action that has already started is never
//! interrupted.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self { Self { quiet, generation: Arc::new(AtomicU64::new(0)) } }

    /// Uses the configured search debounce.
    pub fn from_config(config: &ClientConfig) -> Self { Self::new(config.debounce) }

    pub fn quiet(&self) -> Duration { self.quiet }

    /// Schedule `action`. The returned handle resolves to `true` if the action ran and
    /// `false` if a later call (or `cancel`) superseded it.
    pub fn call<F>(&self, action: F) -> JoinHandle<bool>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();
        let deadline = tokio::time::Instant::now() + self.quiet;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            action.await;
            true
        })
    }

    /// Drop whatever is pending without scheduling anything new.
    pub fn cancel(&self) { self.generation.fetch_add(1, Ordering::SeqCst); }
}
