use crate::animation::timer::{TimerHandle, TimerId, TimerQueue};
use crate::chart::view_state::ViewState;
use crate::foundation::core::TimeMs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// Year-stepping playback loop.
///
/// While playing it holds the interval [`TimerHandle`]; pausing or dropping the controller
/// releases the handle, which cancels the timer. It is the only writer of
/// `ViewState::selected_year` on ticks and never stops by itself: past the last year it wraps
/// to the first.
#[derive(Debug)]
pub struct Playback {
    interval_ms: u64,
    task: Option<TimerHandle>,
}

impl Playback {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            task: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        if self.task.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    pub fn play(&mut self, view: &mut ViewState, timers: &mut TimerQueue, now: TimeMs) {
        if self.task.is_none() {
            self.task = Some(timers.schedule_interval(now, self.interval_ms));
            tracing::debug!(year = view.selected_year, "playback started");
        }
        view.is_playing = true;
    }

    pub fn pause(&mut self, view: &mut ViewState) {
        if self.task.take().is_some() {
            tracing::debug!(year = view.selected_year, "playback paused");
        }
        view.is_playing = false;
    }

    /// Flip between playing and paused; returns the new state.
    pub fn toggle(
        &mut self,
        view: &mut ViewState,
        timers: &mut TimerQueue,
        now: TimeMs,
    ) -> PlaybackState {
        match self.state() {
            PlaybackState::Paused => self.play(view, timers, now),
            PlaybackState::Playing => self.pause(view),
        }
        self.state()
    }

    /// Handle a fired timer. Returns `true` when it was this controller's tick and the year
    /// advanced.
    pub fn on_timer(&mut self, id: TimerId, view: &mut ViewState) -> bool {
        match &self.task {
            Some(h) if h.id() == id && view.is_playing => {
                view.step_year();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playback.rs"]
mod tests;
