use crate::animation::ease::Ease;
use crate::foundation::core::TimeMs;
use crate::foundation::math::lerp;

/// A scalar transition from `from` to `to` over `duration_ms`, starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: TimeMs,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Tween {
    /// A tween already resting at `value`.
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: TimeMs(0),
            duration_ms: 0,
            ease: Ease::Linear,
        }
    }

    pub fn progress(&self, now: TimeMs) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (now.since(self.start) as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: TimeMs) -> f64 {
        lerp(self.from, self.to, self.ease.apply(self.progress(now)))
    }

    pub fn is_done(&self, now: TimeMs) -> bool {
        now.since(self.start) >= self.duration_ms
    }

    /// Interrupt and head for `to`, starting from the value at `now`.
    pub fn retarget(&self, now: TimeMs, to: f64, duration_ms: u64, ease: Ease) -> Self {
        Self {
            from: self.sample(now),
            to,
            start: now,
            duration_ms,
            ease,
        }
    }
}
