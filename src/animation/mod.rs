//! Time-driven presentation: easing, tweens, the draw-in reveal, timers and playback.

pub mod draw_in;
pub mod ease;
pub mod playback;
pub mod timer;
pub mod tween;
