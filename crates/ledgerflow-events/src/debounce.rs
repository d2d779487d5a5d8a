//! Trailing-edge debounce for resize-driven rebuilds.
//!
//! Rebuilding and re-laying-out the graph on every intermediate resize tick
//! causes visible layout thrash; the correct policy is to fire once after
//! resize activity settles. The debouncer holds no timer of its own: callers
//! feed it `Instant`s (their tick loop, or synthetic ones in tests), which
//! keeps the pipeline free of timing behavior.

use std::time::{Duration, Instant};

/// Default quiet period before a burst of signals is considered settled.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    last_signal: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            last_signal: None,
        }
    }

    /// Records one raw signal (e.g. a resize tick) at `now`. Each signal
    /// pushes the pending fire further out.
    pub fn signal(&mut self, now: Instant) {
        self.last_signal = Some(now);
    }

    /// Returns true exactly once per burst, when the quiet period has
    /// elapsed since the last signal. After firing it re-arms for the next
    /// burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_signal {
            Some(last) if now.duration_since(last) >= self.quiet_period => {
                self.last_signal = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a burst is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.last_signal.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn does_not_fire_before_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));

        debouncer.signal(start);
        assert!(!debouncer.poll(start));
        assert!(!debouncer.poll(start + ms(99)));
        assert!(debouncer.is_pending());
    }

    #[test]
    fn fires_once_on_trailing_edge_then_rearms() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));

        debouncer.signal(start);
        assert!(debouncer.poll(start + ms(100)));
        // Burst consumed; no repeat fire.
        assert!(!debouncer.poll(start + ms(200)));
        assert!(!debouncer.is_pending());

        debouncer.signal(start + ms(300));
        assert!(debouncer.poll(start + ms(400)));
    }

    #[test]
    fn repeated_signals_extend_the_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));

        debouncer.signal(start);
        debouncer.signal(start + ms(80));
        // 100ms after the first signal, but only 20ms after the last.
        assert!(!debouncer.poll(start + ms(100)));
        assert!(debouncer.poll(start + ms(180)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.poll(Instant::now()));
        assert!(!debouncer.is_pending());
    }
}
