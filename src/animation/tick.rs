//! Tick sources: the host capability that decides when the frame clock ticks.
//!
//! The frame clock never schedules itself. It asks its [`TickSource`] to start when the
//! first animator registers and to stop when the last one leaves; the host then calls
//! [`crate::FrameClock::pump`] from its event loop, and the source decides whether a tick
//! is due.

/// Which tick source a player should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSourceKind {
    /// Tick once per display refresh; the host pumps on every redraw.
    #[default]
    AnimationFrame,
    /// Tick on a fixed interval; the host pumps whenever it wakes up.
    Interval,
}

impl TickSourceKind {
    /// Instantiate the source. `interval_ms` is only used by [`TickSourceKind::Interval`].
    pub fn build(self, interval_ms: f64) -> Box<dyn TickSource> {
        match self {
            Self::AnimationFrame => Box::new(AnimationFrame::default()),
            Self::Interval => Box::new(IntervalTimer::new(interval_ms)),
        }
    }
}

/// A start/stop-able source of ticks.
pub trait TickSource {
    /// Begin producing ticks. Called when the running animator count goes 0 -> 1.
    fn start(&mut self, now_ms: f64);

    /// Stop producing ticks. Called when the running animator count goes 1 -> 0.
    fn stop(&mut self);

    /// Whether the source is currently producing ticks.
    fn is_active(&self) -> bool;

    /// Whether a tick is due at `now_ms`. Consumes the tick when it returns `true`.
    fn poll(&mut self, now_ms: f64) -> bool;

    /// When the next tick is due, for hosts that sleep between ticks.
    fn next_deadline_ms(&self) -> Option<f64> {
        None
    }

    /// Which kind of source this is.
    fn kind(&self) -> TickSourceKind;
}

/// Display-synchronized source: every pump while active is a tick.
#[derive(Clone, Debug, Default)]
pub struct AnimationFrame {
    requested: bool,
}

impl TickSource for AnimationFrame {
    fn start(&mut self, _now_ms: f64) {
        self.requested = true;
    }

    fn stop(&mut self) {
        self.requested = false;
    }

    fn is_active(&self) -> bool {
        self.requested
    }

    fn poll(&mut self, _now_ms: f64) -> bool {
        self.requested
    }

    fn kind(&self) -> TickSourceKind {
        TickSourceKind::AnimationFrame
    }
}

/// Default fallback period, in milliseconds.
pub const DEFAULT_INTERVAL_MS: f64 = 40.0;

/// Fixed-interval fallback source.
///
/// Missed deadlines collapse into a single tick; the timer never bursts to catch up.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period_ms: f64,
    next_ms: Option<f64>,
}

impl IntervalTimer {
    /// Timer with the given period. Non-positive or non-finite periods use the default.
    pub fn new(period_ms: f64) -> Self {
        let period_ms = if period_ms.is_finite() && period_ms > 0.0 {
            period_ms
        } else {
            DEFAULT_INTERVAL_MS
        };
        Self {
            period_ms,
            next_ms: None,
        }
    }

    /// Tick period in milliseconds.
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

impl TickSource for IntervalTimer {
    fn start(&mut self, now_ms: f64) {
        self.next_ms = Some(now_ms + self.period_ms);
    }

    fn stop(&mut self) {
        self.next_ms = None;
    }

    fn is_active(&self) -> bool {
        self.next_ms.is_some()
    }

    fn poll(&mut self, now_ms: f64) -> bool {
        let Some(next) = self.next_ms else {
            return false;
        };
        if now_ms < next {
            return false;
        }
        let mut following = next + self.period_ms;
        if following <= now_ms {
            following = now_ms + self.period_ms;
        }
        self.next_ms = Some(following);
        true
    }

    fn next_deadline_ms(&self) -> Option<f64> {
        self.next_ms
    }

    fn kind(&self) -> TickSourceKind {
        TickSourceKind::Interval
    }
}
