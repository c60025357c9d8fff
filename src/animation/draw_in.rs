use crate::animation::ease::Ease;
use crate::foundation::core::TimeMs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawInPhase {
    /// The line is being revealed.
    Drawing,
    /// The line is complete and point markers fade in.
    Fading,
    Done,
}

/// Presentation values of the draw-in at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawInFrame {
    pub phase: DrawInPhase,
    /// Eased fraction of the path length that is visible, `0..=1`.
    pub reveal: f64,
    /// Opacity of the point markers, `0..=1`.
    pub points_opacity: f64,
}

impl DrawInFrame {
    /// Dash offset hiding the unrevealed part of a path of `length`.
    pub fn dash_offset(&self, length: f64) -> f64 {
        length * (1.0 - self.reveal)
    }
}

/// Two-stage reveal: stroke the line from 0 to 100% of its length, then fade the markers in.
///
/// Started once per dataset load; it is a pure function of elapsed time, so re-rendering never
/// restarts it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawIn {
    pub started: TimeMs,
    pub line_ms: u64,
    pub line_ease: Ease,
    pub fade_ms: u64,
}

impl DrawIn {
    pub fn new(started: TimeMs, line_ms: u64, line_ease: Ease, fade_ms: u64) -> Self {
        Self {
            started,
            line_ms,
            line_ease,
            fade_ms,
        }
    }

    pub fn sample(&self, now: TimeMs) -> DrawInFrame {
        let elapsed = now.since(self.started);
        if elapsed < self.line_ms {
            let t = elapsed as f64 / self.line_ms as f64;
            return DrawInFrame {
                phase: DrawInPhase::Drawing,
                reveal: self.line_ease.apply(t),
                points_opacity: 0.0,
            };
        }

        let fade_elapsed = elapsed - self.line_ms;
        if fade_elapsed < self.fade_ms {
            let t = fade_elapsed as f64 / self.fade_ms as f64;
            return DrawInFrame {
                phase: DrawInPhase::Fading,
                reveal: 1.0,
                points_opacity: Ease::InOutCubic.apply(t),
            };
        }

        DrawInFrame {
            phase: DrawInPhase::Done,
            reveal: 1.0,
            points_opacity: 1.0,
        }
    }

    /// Instant after which the frame no longer changes.
    pub fn ends_at(&self) -> TimeMs {
        self.started.after(self.line_ms).after(self.fade_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/draw_in.rs"]
mod tests;
