use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Instant,
};

use crate::animation::{
    animator::{Animator, AnimatorShared},
    tick::{TickSource, TickSourceKind},
};

/// Monotonic time in milliseconds, the only time base animators use.
pub trait Monotonic {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> f64;
}

/// Wall-clock backed [`Monotonic`] using [`std::time::Instant`].
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Monotonic for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually advanced [`Monotonic`] for deterministic drivers (headless export, tests).
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    /// Clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    /// Move time forward by `delta_ms`. Negative deltas are ignored.
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now_ms.set(self.now_ms.get() + delta_ms);
        }
    }

    /// Jump to `now_ms` if it is not in the past.
    pub fn set(&self, now_ms: f64) {
        if now_ms > self.now_ms.get() {
            self.now_ms.set(now_ms);
        }
    }
}

impl Monotonic for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

struct ClockInner {
    time: Rc<dyn Monotonic>,
    source: RefCell<Box<dyn TickSource>>,
    running: RefCell<Vec<Weak<AnimatorShared>>>,
    ticks: Cell<u64>,
}

/// Cooperative scheduler that steps every running [`Animator`] once per tick.
///
/// Cloning yields another handle to the same clock. The tick source is active exactly
/// while at least one animator is registered, so an idle clock does no work.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<ClockInner>,
}

impl FrameClock {
    /// Clock driven by `source`, reading time from `time`.
    pub fn new(source: Box<dyn TickSource>, time: Rc<dyn Monotonic>) -> Self {
        Self {
            inner: Rc::new(ClockInner {
                time,
                source: RefCell::new(source),
                running: RefCell::new(Vec::new()),
                ticks: Cell::new(0),
            }),
        }
    }

    /// Current time of the clock's time source.
    pub fn now_ms(&self) -> f64 {
        self.inner.time.now_ms()
    }

    /// Kind of the underlying tick source.
    pub fn source_kind(&self) -> TickSourceKind {
        self.inner.source.borrow().kind()
    }

    /// Whether the tick source is currently active.
    pub fn is_ticking(&self) -> bool {
        self.inner.source.borrow().is_active()
    }

    /// Number of live registered animators.
    pub fn running_count(&self) -> usize {
        self.inner
            .running
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Number of ticks delivered so far.
    pub fn tick_count(&self) -> u64 {
        self.inner.ticks.get()
    }

    /// Next deadline of the tick source, if it has one.
    pub fn next_deadline_ms(&self) -> Option<f64> {
        self.inner.source.borrow().next_deadline_ms()
    }

    pub(crate) fn register(&self, animator: &Animator) {
        let weak = animator.downgrade();
        let became_busy = {
            let mut running = self.inner.running.borrow_mut();
            running.retain(|w| w.strong_count() > 0);
            if running.iter().any(|w| w.ptr_eq(&weak)) {
                return;
            }
            running.push(weak);
            running.len() == 1
        };
        if became_busy {
            let now = self.now_ms();
            tracing::debug!(now_ms = now, "frame clock started");
            self.inner.source.borrow_mut().start(now);
        }
    }

    pub(crate) fn unregister(&self, animator: &Animator) {
        let weak = animator.downgrade();
        let became_idle = {
            let mut running = self.inner.running.borrow_mut();
            let before = running.len();
            running.retain(|w| w.strong_count() > 0 && !w.ptr_eq(&weak));
            before > 0 && running.is_empty()
        };
        if became_idle {
            tracing::debug!("frame clock stopped");
            self.inner.source.borrow_mut().stop();
        }
    }

    /// Step every registered animator once, at a single shared timestamp.
    ///
    /// Iterates a snapshot: animators stopped by an earlier animator's listeners in the
    /// same tick are skipped, animators started during the tick wait for the next one.
    /// Returns the number of animators stepped.
    pub fn tick(&self) -> usize {
        let now = self.now_ms();
        self.tick_at(now)
    }

    fn tick_at(&self, now_ms: f64) -> usize {
        self.inner.ticks.set(self.inner.ticks.get() + 1);
        let snapshot: Vec<Animator> = self
            .inner
            .running
            .borrow()
            .iter()
            .filter_map(Animator::upgrade)
            .collect();
        tracing::trace!(now_ms, animators = snapshot.len(), "tick");

        let mut stepped = 0;
        for animator in snapshot {
            if animator.is_running() {
                animator.step(now_ms);
                stepped += 1;
            }
        }

        // Animators dropped without stopping leave dead entries behind.
        let became_idle = {
            let mut running = self.inner.running.borrow_mut();
            let before = running.len();
            running.retain(|w| w.strong_count() > 0);
            before > 0 && running.is_empty()
        };
        if became_idle && self.is_ticking() {
            self.inner.source.borrow_mut().stop();
        }
        stepped
    }

    /// Let the host drive the clock: tick if the source says a tick is due now.
    ///
    /// Returns whether a tick happened.
    pub fn pump(&self) -> bool {
        let now = self.now_ms();
        let due = self.inner.source.borrow_mut().poll(now);
        if due {
            self.tick_at(now);
        }
        due
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("source", &self.source_kind())
            .field("running", &self.running_count())
            .field("ticks", &self.tick_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
