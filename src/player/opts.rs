use std::rc::Rc;

use crate::animation::{
    animator::DEFAULT_DURATION_MS,
    clock::{FrameClock, Monotonic},
    tick::{DEFAULT_INTERVAL_MS, TickSourceKind},
};

/// Options controlling how a [`crate::Player`] is driven.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerOpts {
    /// Tick source used by [`PlayerOpts::frame_clock`].
    pub tick_source: TickSourceKind,
    /// Period of the interval tick source, in milliseconds.
    pub interval_ms: f64,
    /// Duration used for transitions whose own duration is missing or invalid.
    pub default_duration_ms: f64,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            tick_source: TickSourceKind::AnimationFrame,
            interval_ms: DEFAULT_INTERVAL_MS,
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl PlayerOpts {
    /// Frame clock with the configured tick source, reading time from `time`.
    pub fn frame_clock(&self, time: Rc<dyn Monotonic>) -> FrameClock {
        FrameClock::new(self.tick_source.build(self.interval_ms), time)
    }

    pub(crate) fn fallback_duration_ms(&self) -> f64 {
        if self.default_duration_ms.is_finite() && self.default_duration_ms > 0.0 {
            self.default_duration_ms
        } else {
            DEFAULT_DURATION_MS
        }
    }
}
