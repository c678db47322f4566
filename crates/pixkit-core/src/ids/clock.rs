//! Time sources used to seed digit generation.

use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Host capability supplying the time seed.
pub trait Clock {
    /// Wall-clock time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> f64;

    /// A high-resolution monotonic reading in milliseconds, if available.
    fn high_res_millis(&self) -> Option<f64> {
        None
    }
}

/// The system wall clock plus a monotonic timer started with the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    fn high_res_millis(&self) -> Option<f64> {
        Some(process_start().elapsed().as_secs_f64() * 1000.0)
    }
}

fn process_start() -> Instant {
    static START: OnceLock<Instant> = OnceLock::new();
    *START.get_or_init(Instant::now)
}

/// A clock frozen at fixed readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock {
    pub millis: f64,
    pub high_res: Option<f64>,
}

impl FixedClock {
    pub fn new(millis: f64) -> Self {
        Self {
            millis,
            high_res: None,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> f64 {
        self.millis
    }

    fn high_res_millis(&self) -> Option<f64> {
        self.high_res
    }
}
