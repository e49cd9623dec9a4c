use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::sync::Synchronizer;

/// Default period between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

type TickFn = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Drives periodic synchronization while auto-refresh is on.
///
/// Two states: stopped and polling. While polling exactly one background
/// task owns the timer; starting again is a no-op. Each tick awaits its
/// fetch set before the next tick can fire, so ticks never overlap.
pub struct PollScheduler {
    period: Duration,
    tick: TickFn,
    active: Option<ActivePoll>,
}

struct ActivePoll {
    token: CancellationToken,
}

impl PollScheduler {
    /// Create a stopped scheduler that runs `tick` every `period`
    pub fn new<F>(period: Duration, tick: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self {
            period,
            tick: Arc::new(tick),
            active: None,
        }
    }

    /// Poll changes and stats through `sync`. Config is not re-fetched on ticks.
    pub fn for_synchronizer(period: Duration, sync: Synchronizer) -> Self {
        Self::new(period, move || {
            let sync = sync.clone();
            Box::pin(async move { sync.refresh().await })
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_polling(&self) -> bool {
        self.active.is_some()
    }

    /// Start polling. Returns `false` if already polling.
    pub fn start(&mut self) -> bool {
        if self.active.is_some() {
            debug!("Poll scheduler already running");
            return false;
        }

        let token = CancellationToken::new();
        tokio::spawn(poll_loop(self.period, self.tick.clone(), token.clone()));
        self.active = Some(ActivePoll { token });
        info!("Auto-refresh started ({}ms)", self.period.as_millis());
        true
    }

    /// Stop polling. A tick already in flight completes; no further tick fires.
    /// Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.token.cancel();
                info!("Auto-refresh stopped");
                true
            }
            None => false,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Flip the auto-refresh state, returning the new state
    pub fn toggle(&mut self) -> bool {
        let enabled = !self.is_polling();
        self.set_enabled(enabled);
        enabled
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for PollScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollScheduler")
            .field("period", &self.period)
            .field("polling", &self.is_polling())
            .finish()
    }
}

async fn poll_loop(period: Duration, tick: TickFn, token: CancellationToken) {
    // First tick one period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {}
        }
        tick().await;
    }

    debug!("Poll loop exited");
}
