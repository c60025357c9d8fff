use std::collections::HashMap;

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::foundation::core::TimeMs;
use crate::scene::ShapeKey;

/// What a pointer update changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<ShapeKey>,
    pub entered: Option<ShapeKey>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Tracks the hovered shape and a per-shape emphasis level in `0..=1`.
///
/// Entering a shape tweens its emphasis toward 1; leaving tweens it back toward 0 from
/// wherever it currently is, so quick in/out movements never jump.
#[derive(Clone, Debug)]
pub struct HoverTracker {
    hovered: Option<ShapeKey>,
    emphasis: HashMap<ShapeKey, Tween>,
    duration_ms: u64,
}

impl HoverTracker {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            hovered: None,
            emphasis: HashMap::new(),
            duration_ms,
        }
    }

    pub fn hovered(&self) -> Option<&ShapeKey> {
        self.hovered.as_ref()
    }

    /// Feed the result of a hit test.
    pub fn update(&mut self, now: TimeMs, hit: Option<ShapeKey>) -> HoverChange {
        if hit == self.hovered {
            return HoverChange::default();
        }
        self.gc(now);

        let left = self.hovered.take();
        if let Some(k) = &left {
            self.retarget(now, k, 0.0);
        }
        if let Some(k) = &hit {
            self.retarget(now, k, 1.0);
        }
        self.hovered = hit.clone();
        HoverChange { left, entered: hit }
    }

    pub fn leave(&mut self, now: TimeMs) -> HoverChange {
        self.update(now, None)
    }

    /// Current emphasis of `key`; `0` for shapes never hovered.
    pub fn emphasis(&self, key: &ShapeKey, now: TimeMs) -> f64 {
        self.emphasis.get(key).map_or(0.0, |t| t.sample(now))
    }

    pub fn is_animating(&self, now: TimeMs) -> bool {
        self.emphasis.values().any(|t| !t.is_done(now))
    }

    /// Forget shapes that no longer exist. Returns `true` if the hovered shape was dropped.
    pub fn retain(&mut self, mut present: impl FnMut(&ShapeKey) -> bool) -> bool {
        self.emphasis.retain(|k, _| present(k));
        let gone = self.hovered.as_ref().is_some_and(|k| !present(k));
        if gone {
            self.hovered = None;
        }
        gone
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.emphasis.clear();
    }

    fn retarget(&mut self, now: TimeMs, key: &ShapeKey, to: f64) {
        let current = self
            .emphasis
            .get(key)
            .copied()
            .unwrap_or_else(|| Tween::settled(0.0));
        self.emphasis.insert(
            key.clone(),
            current.retarget(now, to, self.duration_ms, Ease::InOutCubic),
        );
    }

    // Settled-at-zero entries carry no information.
    fn gc(&mut self, now: TimeMs) {
        self.emphasis.retain(|_, t| !(t.is_done(now) && t.to == 0.0));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/hover.rs"]
mod tests;
