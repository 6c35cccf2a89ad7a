//! Swoop is the camera animation engine of a frame-based SVG presentation player.
//!
//! A [`Presentation`] lists frames; each frame gives every layer of the drawing a
//! [`CameraState`] and the transition used to move there. The engine:
//!
//! - interpolates cameras between frames ([`interpolate`]): geometric zoom with an
//!   optional mid-move zoom overshoot, shortest-way rotation, clip blending, and
//!   travel along SVG paths
//! - drives every running [`Animator`] from a single cooperative [`FrameClock`], ticked
//!   by the host through a [`TickSource`]
//! - navigates and plays frames with a [`Player`] that reports to listeners
//!
//! Everything is single-threaded and host-driven: nothing advances until the host calls
//! [`FrameClock::pump`] (or [`FrameClock::tick`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod camera;
pub(crate) mod player;
pub(crate) mod presentation;

pub use crate::foundation::core::{Affine, BezPath, Lerp, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{SwoopError, SwoopResult};

pub use crate::animation::animator::{Animator, AnimatorEvent, DEFAULT_DURATION_MS};
pub use crate::animation::clock::{FrameClock, InstantClock, ManualClock, Monotonic};
pub use crate::animation::events::{EventEmitter, ListenerId};
pub use crate::animation::tick::{
    AnimationFrame, DEFAULT_INTERVAL_MS, IntervalTimer, TickSource, TickSourceKind,
};
pub use crate::animation::timing::{
    CubicBezier, StepPosition, Steps, TimingFunction, make_bezier, make_steps,
};
pub use crate::camera::interpolate::{
    InterpolationParams, MIN_RELATIVE_ZOOM, interpolate, interpolate_rotation, interpolate_scale,
};
pub use crate::camera::state::{CameraState, ReferenceElement};
pub use crate::camera::trajectory::Trajectory;
pub use crate::camera::viewport::{ViewTransform, Viewport};
pub use crate::player::controller::{Player, PlayerEvent};
pub use crate::player::opts::PlayerOpts;
pub use crate::presentation::builder::{FrameBuilder, PresentationBuilder};
pub use crate::presentation::model::{Frame, LayerFrame, LayerInfo, Presentation, TransitionParams};
pub use crate::presentation::svg::SvgDocument;
