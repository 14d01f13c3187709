//! Manually-driven countdown replacing wall-clock interval timers.
//!
//! The host schedules one `tick()` per second (a UI frame loop, a tokio
//! interval, a test calling it directly); the engine never touches real time,
//! so expiry races cannot occur and tests advance virtual seconds
//! synchronously.

/// One-second countdown with explicit arm/cancel lifecycle.
///
/// `cancel` only disarms: the remaining value is left readable so callers can
/// compute time spent after stopping the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    armed: bool,
}

/// Outcome of advancing a countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown is not armed; nothing happened.
    Idle,
    /// One second elapsed.
    Running { remaining: u32 },
    /// The countdown was at zero and has fired. It disarms itself, so a
    /// countdown expires exactly once per arm.
    Expired,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown at `secs` seconds.
    pub fn arm(&mut self, secs: u32) {
        self.remaining = secs;
        self.armed = true;
    }

    /// Stop the countdown, keeping the remaining value readable.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left; frozen at its last value once cancelled.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one second.
    ///
    /// The expiry fires on the tick *after* remaining reaches zero, matching a
    /// display that shows "0" for a full second before timing out.
    pub fn tick(&mut self) -> Tick {
        if !self.armed {
            return Tick::Idle;
        }
        if self.remaining == 0 {
            self.armed = false;
            return Tick::Expired;
        }
        self.remaining -= 1;
        Tick::Running {
            remaining: self.remaining,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_countdown_is_idle() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn counts_down_then_expires_once() {
        let mut countdown = Countdown::new();
        countdown.arm(2);

        assert_eq!(countdown.tick(), Tick::Running { remaining: 1 });
        assert_eq!(countdown.tick(), Tick::Running { remaining: 0 });
        assert_eq!(countdown.tick(), Tick::Expired);
        assert_eq!(countdown.tick(), Tick::Idle);
    }

    #[test]
    fn cancel_freezes_remaining() {
        let mut countdown = Countdown::new();
        countdown.arm(10);
        let _ = countdown.tick();
        let _ = countdown.tick();
        countdown.cancel();

        assert!(!countdown.is_armed());
        assert_eq!(countdown.remaining(), 8);
        assert_eq!(countdown.tick(), Tick::Idle);
    }

    #[test]
    fn rearming_resets_remaining() {
        let mut countdown = Countdown::new();
        countdown.arm(3);
        let _ = countdown.tick();
        countdown.arm(5);
        assert_eq!(countdown.remaining(), 5);
        assert!(countdown.is_armed());
    }

    #[test]
    fn zero_second_arm_expires_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.arm(0);
        assert_eq!(countdown.tick(), Tick::Expired);
    }
}
