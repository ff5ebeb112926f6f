// Frame timing: seconds since startup as f64, and the 1 ms yield the main
// loop takes between frames.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SysClock {
    start: Instant,
}

impl SysClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created.
    pub fn seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for SysClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Give the scheduler a breather between frames.
pub fn sleep_frame() {
    thread::sleep(Duration::from_millis(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_near_zero() {
        let clock = SysClock::new();
        assert!(clock.seconds() < 1.0);
    }

    #[test]
    fn is_monotonic() {
        let clock = SysClock::new();
        let first = clock.seconds();
        sleep_frame();
        let second = clock.seconds();
        assert!(second > first);
    }
}
