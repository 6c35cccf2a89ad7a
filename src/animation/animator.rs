use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use crate::animation::{
    clock::FrameClock,
    events::{EventEmitter, ListenerId},
    timing::TimingFunction,
};

/// Duration substituted for missing, non-finite or non-positive durations.
pub const DEFAULT_DURATION_MS: f64 = 500.0;

/// Events emitted by an [`Animator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorEvent {
    /// Eased progress for the current tick.
    Step(f64),
    /// The animation reached its end. Always preceded by `Step(1.0)`.
    Done,
}

pub(crate) struct AnimatorShared {
    clock: FrameClock,
    timing: Cell<TimingFunction>,
    duration_ms: Cell<f64>,
    initial_time_ms: Cell<f64>,
    running: Cell<bool>,
    events: EventEmitter<AnimatorEvent>,
}

/// Restartable, cancellable timed interpolation driven by a [`FrameClock`].
///
/// State machine: `idle -> running -> idle`. While running the animator is registered
/// exactly once with its clock. Cloning yields another handle to the same animator.
#[derive(Clone)]
pub struct Animator {
    shared: Rc<AnimatorShared>,
}

impl Animator {
    /// Idle animator ticked by `clock`.
    pub fn new(clock: &FrameClock) -> Self {
        Self {
            shared: Rc::new(AnimatorShared {
                clock: clock.clone(),
                timing: Cell::new(TimingFunction::Linear),
                duration_ms: Cell::new(DEFAULT_DURATION_MS),
                initial_time_ms: Cell::new(0.0),
                running: Cell::new(false),
                events: EventEmitter::new(),
            }),
        }
    }

    /// Start (or re-arm) the animation.
    ///
    /// Emits `Step(0.0)` synchronously, before any tick. Re-arming a running animator
    /// resets its start time, duration and timing without registering it twice.
    pub fn start(&self, duration_ms: f64, timing: TimingFunction) {
        let duration_ms = if duration_ms.is_finite() && duration_ms > 0.0 {
            duration_ms
        } else {
            tracing::warn!(duration_ms, "invalid animation duration, using default");
            DEFAULT_DURATION_MS
        };
        let s = &self.shared;
        s.duration_ms.set(duration_ms);
        s.timing.set(timing);
        s.initial_time_ms.set(s.clock.now_ms());

        s.events.emit(&AnimatorEvent::Step(0.0));

        if !s.running.get() {
            s.running.set(true);
            s.clock.register(self);
        }
    }

    /// Cancel the animation. No `Done` event is emitted. No-op when idle.
    pub fn stop(&self) {
        let s = &self.shared;
        if s.running.get() {
            s.running.set(false);
            s.clock.unregister(self);
        }
    }

    /// Whether the animator is running.
    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    /// Duration of the current (or last) run, in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.shared.duration_ms.get()
    }

    /// Timing function of the current (or last) run.
    pub fn timing(&self) -> TimingFunction {
        self.shared.timing.get()
    }

    /// Advance to `now_ms`. Called by the frame clock on every tick.
    pub(crate) fn step(&self, now_ms: f64) {
        let s = &self.shared;
        let elapsed = now_ms - s.initial_time_ms.get();
        let duration = s.duration_ms.get();
        if elapsed >= duration {
            s.events.emit(&AnimatorEvent::Step(1.0));
            self.stop();
            s.events.emit(&AnimatorEvent::Done);
        } else {
            let progress = s.timing.get().apply(elapsed.max(0.0) / duration);
            s.events.emit(&AnimatorEvent::Step(progress));
        }
    }

    /// Listen to every event.
    pub fn subscribe(&self, listener: impl Fn(&AnimatorEvent) + 'static) -> ListenerId {
        self.shared.events.subscribe(listener)
    }

    /// Listen to progress events only.
    pub fn on_step(&self, listener: impl Fn(f64) + 'static) -> ListenerId {
        self.subscribe(move |e| {
            if let AnimatorEvent::Step(p) = *e {
                listener(p);
            }
        })
    }

    /// Listen to completion events only.
    pub fn on_done(&self, listener: impl Fn() + 'static) -> ListenerId {
        self.subscribe(move |e| {
            if matches!(e, AnimatorEvent::Done) {
                listener();
            }
        })
    }

    /// Remove a listener added with any of the subscribe methods.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.shared.events.unsubscribe(id)
    }

    pub(crate) fn downgrade(&self) -> Weak<AnimatorShared> {
        Rc::downgrade(&self.shared)
    }

    pub(crate) fn upgrade(weak: &Weak<AnimatorShared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("running", &self.is_running())
            .field("duration_ms", &self.duration_ms())
            .field("timing", &self.timing())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
