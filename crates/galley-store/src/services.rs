//! # Injected Services
//!
//! Everything the store needs from the outside world, behind a trait so tests
//! can pin it down.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          StoreServices                                  │
//! │                                                                         │
//! │   Trait          Production            Tests                            │
//! │   ───────────    ─────────────────     ──────────────────────           │
//! │   Clock          SystemClock           ManualClock                      │
//! │   RandomSource   ThreadRandom          FixedDraw                        │
//! │   Delay          TokioDelay            TokioDelay + paused time         │
//! │   IdGenerator    UuidGenerator         SequentialIds                    │
//! │   Notifier       TracingNotifier       BroadcastNotifier                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::notify::{Notifier, TracingNotifier};

// =============================================================================
// Clock
// =============================================================================

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = at;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Randomness
// =============================================================================

/// Uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync + 'static {
    fn draw(&self) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same draw, forcing one branch of the confirmation.
#[derive(Debug, Clone, Copy)]
pub struct FixedDraw(pub f64);

impl FixedDraw {
    /// A draw that passes any failure probability below 0.99.
    pub const fn success() -> Self {
        FixedDraw(0.99)
    }

    /// A draw that fails every failure probability.
    pub const fn failure() -> Self {
        FixedDraw(0.0)
    }
}

impl RandomSource for FixedDraw {
    fn draw(&self) -> f64 {
        self.0
    }
}

// =============================================================================
// Delay
// =============================================================================

#[async_trait]
pub trait Delay: Send + Sync + 'static {
    async fn sleep(&self, duration: Duration);
}

/// `tokio::time::sleep`, which honours paused time in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Must never hand out the same id twice.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `prefix-1`, `prefix-2`, ... for readable test output.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// The collaborators a `RestaurantStore` is built with.
#[derive(Clone)]
pub struct StoreServices {
    pub clock: Arc<dyn Clock>,
    pub random: Arc<dyn RandomSource>,
    pub delay: Arc<dyn Delay>,
    pub ids: Arc<dyn IdGenerator>,
    pub notifier: Arc<dyn Notifier>,
}

impl StoreServices {
    /// Real clock, thread RNG, tokio timer, UUIDs, log notifications.
    pub fn system() -> Self {
        StoreServices {
            clock: Arc::new(SystemClock),
            random: Arc::new(ThreadRandom),
            delay: Arc::new(TokioDelay),
            ids: Arc::new(UuidGenerator),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

impl Default for StoreServices {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for StoreServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreServices").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(chrono::Duration::seconds(30));
        assert_eq!(clock.now(), start + chrono::Duration::seconds(30));
        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_thread_random_is_in_unit_interval() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let d = rng.draw();
            assert!((0.0..1.0).contains(&d));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let seq = SequentialIds::new("m");
        assert_eq!(seq.next_id(), "m-1");
        assert_eq!(seq.next_id(), "m-2");

        let uuids = UuidGenerator;
        assert_ne!(uuids.next_id(), uuids.next_id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_uses_virtual_time() {
        let start = tokio::time::Instant::now();
        TokioDelay.sleep(Duration::from_millis(500)).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
