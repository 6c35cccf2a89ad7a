use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use crate::{
    animation::{
        animator::{Animator, AnimatorEvent},
        clock::FrameClock,
        events::{EventEmitter, ListenerId},
        timing::TimingFunction,
    },
    camera::{
        state::CameraState,
        viewport::{ViewTransform, Viewport},
    },
    foundation::{core::Size, error::SwoopResult},
    player::{opts::PlayerOpts, transition::TransitionPlan},
    presentation::model::Presentation,
};

/// Notifications sent to [`Player`] listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// A move from frame `from` towards frame `to` began.
    TransitionStart {
        /// Frame the move leaves.
        from: usize,
        /// Frame the move heads to.
        to: usize,
    },
    /// The viewport cameras changed.
    Step,
    /// Frame `index` became the current frame.
    FrameChange {
        /// The new current frame.
        index: usize,
    },
    /// Playback was started or paused.
    PlaybackChange {
        /// Whether the player is now playing.
        playing: bool,
    },
}

/// Frame navigation and playback over a [`Presentation`].
///
/// The player owns the live [`Viewport`]. Every move interpolates each layer from its
/// live camera to the target frame's camera; interrupting a move starts the next one
/// from wherever the cameras are. While playing, each frame's `timeout_ms` advances to
/// the next frame; playback stops at the last frame.
///
/// Cloning yields another handle to the same player.
#[derive(Clone)]
pub struct Player {
    shared: Rc<PlayerShared>,
}

struct PlayerShared {
    presentation: Presentation,
    opts: PlayerOpts,
    clock: FrameClock,
    viewport: RefCell<Viewport>,
    state: RefCell<PlayState>,
    generation: Cell<u64>,
    timeout: Animator,
    events: EventEmitter<PlayerEvent>,
}

#[derive(Default)]
struct PlayState {
    current: usize,
    target: usize,
    playing: bool,
    active: Option<ActiveTransition>,
}

struct ActiveTransition {
    generation: u64,
    plan: TransitionPlan,
    animators: Vec<Animator>,
    // Per-layer completion; a single entry when all layers share one animator.
    done: Vec<bool>,
}

impl ActiveTransition {
    fn stop(&self) {
        for a in &self.animators {
            a.stop();
        }
    }
}

impl Player {
    /// Player showing the first frame of `presentation` in a viewport of `viewport_size`.
    ///
    /// Fails when the presentation does not validate.
    pub fn new(
        presentation: Presentation,
        viewport_size: Size,
        clock: &FrameClock,
        opts: PlayerOpts,
    ) -> SwoopResult<Self> {
        presentation.validate()?;
        let viewport = Viewport::new(viewport_size, presentation.layers.len());
        let shared = Rc::new(PlayerShared {
            presentation,
            opts,
            clock: clock.clone(),
            viewport: RefCell::new(viewport),
            state: RefCell::new(PlayState::default()),
            generation: Cell::new(0),
            timeout: Animator::new(clock),
            events: EventEmitter::new(),
        });

        shared.show_frame(0);

        let weak = Rc::downgrade(&shared);
        shared.timeout.on_done(move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_timeout();
            }
        });

        Ok(Self { shared })
    }

    /// The presentation being played.
    pub fn presentation(&self) -> &Presentation {
        &self.shared.presentation
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.shared.presentation.frames.len()
    }

    /// The frame last arrived at.
    pub fn current_frame(&self) -> usize {
        self.shared.state.borrow().current
    }

    /// The frame being moved to, or the current frame when idle.
    pub fn target_frame(&self) -> usize {
        self.shared.state.borrow().target
    }

    /// Whether timeouts advance frames automatically.
    pub fn is_playing(&self) -> bool {
        self.shared.state.borrow().playing
    }

    /// Whether a move is in progress.
    pub fn is_transitioning(&self) -> bool {
        self.shared.state.borrow().active.is_some()
    }

    /// Live cameras and viewport size.
    ///
    /// Do not hold the returned borrow across calls that move the cameras.
    pub fn viewport(&self) -> Ref<'_, Viewport> {
        self.shared.viewport.borrow()
    }

    /// Screen mapping of `layer` for the live camera.
    pub fn transform(&self, layer: usize) -> Option<ViewTransform> {
        self.shared.viewport.borrow().transform(layer)
    }

    /// Resize the viewport, re-fitting cameras that track a reference element.
    ///
    /// A move in progress keeps going towards its target cameras, re-fitted to `size`.
    pub fn resize(&self, size: Size) {
        self.shared.viewport.borrow_mut().resize(size);
        if let Some(active) = self.shared.state.borrow_mut().active.as_mut() {
            for layer in &mut active.plan.layers {
                layer.to.refit(size);
            }
        }
        self.shared.events.emit(&PlayerEvent::Step);
    }

    /// Apply an interactive change to the live camera of `layer`.
    ///
    /// Interaction takes over from the player: any move in progress is cancelled and
    /// playback is paused. Returns `false` for an unknown layer.
    pub fn interact(&self, layer: usize, f: impl FnOnce(&mut CameraState)) -> bool {
        if layer >= self.shared.viewport.borrow().layer_count() {
            return false;
        }
        self.shared.cancel_transition();
        self.shared.set_playing(false);
        let Some(mut cam) = self.shared.viewport.borrow().camera(layer).cloned() else {
            return false;
        };
        f(&mut cam);
        self.shared.viewport.borrow_mut().set_camera(layer, cam);
        self.shared.events.emit(&PlayerEvent::Step);
        true
    }

    /// Show frame `index` immediately, cancelling any move in progress.
    ///
    /// Returns `false` (and does nothing) when `index` is out of range.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn jump_to_frame(&self, index: usize) -> bool {
        self.shared.jump_to_frame(index)
    }

    /// Animate to frame `index`, starting from the live cameras.
    ///
    /// Returns `false` (and does nothing) when `index` is out of range.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn move_to_frame(&self, index: usize) -> bool {
        self.shared.move_to_frame(index)
    }

    /// Animate to the frame after the target frame.
    pub fn move_to_next(&self) -> bool {
        self.shared.move_to_next()
    }

    /// Animate to the frame before the target frame.
    pub fn move_to_previous(&self) -> bool {
        let target = self.target_frame();
        target > 0 && self.shared.move_to_frame(target - 1)
    }

    /// Animate to the first frame.
    pub fn move_to_first(&self) -> bool {
        self.shared.move_to_frame(0)
    }

    /// Animate to the last frame.
    pub fn move_to_last(&self) -> bool {
        self.shared.move_to_frame(self.frame_count() - 1)
    }

    /// Start auto-advancing. Returns `false` when already playing or at the last frame.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn play(&self) -> bool {
        self.shared.play()
    }

    /// Stop auto-advancing. A move in progress completes. Returns `false` when paused.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn pause(&self) -> bool {
        self.shared.set_playing(false)
    }

    /// Listen to player events.
    pub fn subscribe(&self, listener: impl Fn(&PlayerEvent) + 'static) -> ListenerId {
        self.shared.events.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.shared.events.unsubscribe(id)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("current_frame", &self.current_frame())
            .field("target_frame", &self.target_frame())
            .field("playing", &self.is_playing())
            .field("transitioning", &self.is_transitioning())
            .finish()
    }
}

impl PlayerShared {
    fn frame_count(&self) -> usize {
        self.presentation.frames.len()
    }

    fn jump_to_frame(&self, index: usize) -> bool {
        if index >= self.frame_count() {
            return false;
        }
        self.timeout.stop();
        self.cancel_transition();
        {
            let mut state = self.state.borrow_mut();
            state.current = index;
            state.target = index;
        }
        self.show_frame(index);
        self.events.emit(&PlayerEvent::Step);
        self.events.emit(&PlayerEvent::FrameChange { index });
        self.arrived(index);
        true
    }

    fn move_to_next(self: &Rc<Self>) -> bool {
        let target = self.state.borrow().target;
        self.move_to_frame(target + 1)
    }

    fn move_to_frame(self: &Rc<Self>, to: usize) -> bool {
        if to >= self.frame_count() {
            return false;
        }
        self.timeout.stop();
        self.cancel_transition();

        let from = self.state.borrow().current;
        let (live, size) = {
            let viewport = self.viewport.borrow();
            (viewport.cameras().to_vec(), viewport.size())
        };
        let plan = TransitionPlan::new(
            &self.presentation,
            &live,
            from,
            to,
            size,
            self.opts.fallback_duration_ms(),
        );

        let backward = plan.backward;
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        // Arm the animators before any of them starts: starting emits progress 0 at once.
        let starts: Vec<(Animator, f64, TimingFunction)> = match plan.shared_duration_ms() {
            Some(duration_ms) => vec![(
                self.animator(generation, None),
                duration_ms,
                TimingFunction::Linear,
            )],
            None => plan
                .layers
                .iter()
                .enumerate()
                .map(|(i, l)| (self.animator(generation, Some(i)), l.duration_ms, l.timing))
                .collect(),
        };

        {
            let mut state = self.state.borrow_mut();
            state.target = to;
            state.active = Some(ActiveTransition {
                generation,
                plan,
                animators: starts.iter().map(|(a, _, _)| a.clone()).collect(),
                done: vec![false; starts.len()],
            });
        }

        tracing::debug!(from, to, backward, generation, "transition started");
        self.events.emit(&PlayerEvent::TransitionStart { from, to });
        for (animator, duration_ms, timing) in starts {
            animator.start(duration_ms, timing);
        }
        true
    }

    fn animator(self: &Rc<Self>, generation: u64, layer: Option<usize>) -> Animator {
        let animator = Animator::new(&self.clock);
        let weak = Rc::downgrade(self);
        animator.subscribe(move |event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match *event {
                AnimatorEvent::Step(p) => shared.on_step(generation, layer, p),
                AnimatorEvent::Done => shared.on_done(generation, layer),
            }
        });
        animator
    }

    // `layer == None`: one animator drives every layer with linear progress and each
    // layer applies its own timing. `Some(i)`: progress is already eased for layer `i`.
    fn on_step(&self, generation: u64, layer: Option<usize>, p: f64) {
        let cameras: Vec<(usize, CameraState)> = {
            let state = self.state.borrow();
            let Some(active) = state.active.as_ref().filter(|a| a.generation == generation)
            else {
                return;
            };
            match layer {
                None => active
                    .plan
                    .cameras_at(|l| l.timing.apply(p))
                    .into_iter()
                    .enumerate()
                    .collect(),
                Some(i) => active
                    .plan
                    .layers
                    .get(i)
                    .map(|l| vec![(i, l.camera_at(p))])
                    .unwrap_or_default(),
            }
        };
        {
            let mut viewport = self.viewport.borrow_mut();
            for (i, cam) in cameras {
                viewport.set_camera(i, cam);
            }
        }
        tracing::trace!(generation, ?layer, p, "transition step");
        self.events.emit(&PlayerEvent::Step);
    }

    fn on_done(&self, generation: u64, layer: Option<usize>) {
        let (finished, index) = {
            let mut state = self.state.borrow_mut();
            let Some(active) = state.active.as_mut().filter(|a| a.generation == generation)
            else {
                return;
            };
            if let Some(slot) = active.done.get_mut(layer.unwrap_or(0)) {
                *slot = true;
            }
            if !active.done.iter().all(|d| *d) {
                return;
            }
            let finished = state.active.take();
            state.current = state.target;
            (finished, state.target)
        };
        drop(finished);

        tracing::debug!(index, "arrived at frame");
        self.show_frame(index);
        self.events.emit(&PlayerEvent::Step);
        self.events.emit(&PlayerEvent::FrameChange { index });
        self.arrived(index);
    }

    // Snap every layer to the exact frame camera, reference included.
    fn show_frame(&self, index: usize) {
        let Some(frame) = self.presentation.frames.get(index) else {
            return;
        };
        let mut viewport = self.viewport.borrow_mut();
        let size = viewport.size();
        for (i, lf) in frame.layers.iter().enumerate() {
            let mut cam = lf.camera.clone();
            cam.refit(size);
            viewport.set_camera(i, cam);
        }
    }

    // While playing: hold on the last frame, otherwise arm the frame's timeout.
    fn arrived(&self, index: usize) {
        {
            let state = self.state.borrow();
            // A listener may already have moved on.
            if !state.playing || state.active.is_some() || state.current != index {
                return;
            }
        }
        if index + 1 >= self.frame_count() {
            self.set_playing(false);
            return;
        }
        if let Some(timeout_ms) = self.presentation.frames[index].timeout_ms {
            self.timeout
                .start(timeout_ms.max(f64::MIN_POSITIVE), TimingFunction::Linear);
        }
    }

    fn play(&self) -> bool {
        let (current, transitioning) = {
            let state = self.state.borrow();
            if state.playing {
                return false;
            }
            (state.current, state.active.is_some())
        };
        if !transitioning && current + 1 >= self.frame_count() {
            return false;
        }
        self.state.borrow_mut().playing = true;
        self.events.emit(&PlayerEvent::PlaybackChange { playing: true });
        if !transitioning {
            self.arrived(current);
        }
        true
    }

    fn set_playing(&self, playing: bool) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.playing == playing {
                return false;
            }
            state.playing = playing;
        }
        if !playing {
            self.timeout.stop();
        }
        self.events.emit(&PlayerEvent::PlaybackChange { playing });
        true
    }

    fn on_timeout(self: &Rc<Self>) {
        if !self.state.borrow().playing {
            return;
        }
        if !self.move_to_next() {
            self.set_playing(false);
        }
    }

    // Stops the move in progress without completing it. The target frame reverts to
    // the current frame.
    fn cancel_transition(&self) {
        let cancelled = {
            let mut state = self.state.borrow_mut();
            state.target = state.current;
            state.active.take()
        };
        if let Some(active) = cancelled {
            tracing::debug!(
                from = active.plan.from_frame,
                to = active.plan.to_frame,
                "transition cancelled"
            );
            active.stop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/controller.rs"]
mod tests;
