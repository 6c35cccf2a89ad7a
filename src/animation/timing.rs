//! Timing functions (easing curves) mapping normalized progress to eased progress.
//!
//! Every function is a pure `[0, 1] -> [0, 1]` map with a time-reversed counterpart,
//! selected when a presentation is played backward.
//!
//! | name         | curve                          | reverse      |
//! |--------------|--------------------------------|--------------|
//! | `linear`     | identity                       | `linear`     |
//! | `ease`       | `cubic-bezier(.25,.1,.25,1)`   | `ease`       |
//! | `easeIn`     | `cubic-bezier(.42,0,1,1)`      | `easeOut`    |
//! | `easeOut`    | `cubic-bezier(0,0,.58,1)`      | `easeIn`     |
//! | `easeInOut`  | `cubic-bezier(.42,0,.58,1)`    | `easeInOut`  |
//! | `stepStart`  | one step, rounded up           | `stepEnd`    |
//! | `stepEnd`    | one step, rounded down         | `stepStart`  |
//! | `stepMiddle` | jump at the midpoint           | `stepMiddle` |

/// Newton–Raphson iterations used to invert the x-component of a Bézier curve.
const NEWTON_ITERATIONS: usize = 4;

/// Below this x-slope the Newton step is abandoned.
const MIN_SLOPE: f64 = 1e-12;

const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

/// Cubic Bézier easing curve through `(0,0), (x1,y1), (x2,y2), (1,1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    /// First control point, x.
    pub x1: f64,
    /// First control point, y.
    pub y1: f64,
    /// Second control point, x.
    pub x2: f64,
    /// Second control point, y.
    pub y2: f64,
}

impl CubicBezier {
    /// Curve with the given control points.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether both control points sit on the diagonal, making the curve the identity.
    pub fn is_identity(&self) -> bool {
        self.x1 == self.y1 && self.x2 == self.y2
    }

    /// Evaluate the curve's y-coordinate at the parameter whose x-coordinate is `x`.
    ///
    /// The parameter is found with a fixed number of Newton–Raphson iterations starting
    /// from `t = x`. A vanishing slope ends the iteration with the current estimate.
    pub fn apply(&self, x: f64) -> f64 {
        if self.is_identity() {
            return x;
        }

        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            t -= (bezier_coord(t, self.x1, self.x2) - x) / slope;
        }
        bezier_coord(t, self.y1, self.y2)
    }

    /// The point-mirrored curve `x -> 1 - f(1 - x)`.
    pub fn mirrored(&self) -> Self {
        Self::new(1.0 - self.x2, 1.0 - self.y2, 1.0 - self.x1, 1.0 - self.y1)
    }
}

// One coordinate of the curve; endpoints are fixed at 0 and 1.
fn bezier_coord(t: f64, c1: f64, c2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * c1 + 3.0 * mt * t * t * c2 + t * t * t
}

fn bezier_slope(t: f64, c1: f64, c2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * c1 + 6.0 * mt * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}

/// Rounding direction of a step function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (round up).
    Start,
    /// Jump at the end of each interval (round down).
    End,
}

impl StepPosition {
    /// Parse a direction keyword; anything other than `"start"` means [`StepPosition::End`].
    pub fn from_keyword(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("start") {
            Self::Start
        } else {
            Self::End
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Step function quantizing progress into `count` equal steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Steps {
    count: u32,
    position: StepPosition,
}

impl Steps {
    /// Step function with `count` steps (at least one).
    pub fn new(count: u32, position: StepPosition) -> Self {
        Self {
            count: count.max(1),
            position,
        }
    }

    /// Number of steps.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Rounding direction.
    pub fn position(&self) -> StepPosition {
        self.position
    }

    /// Quantize `x`. The input is expected in `[0, 1]` and is not clamped.
    pub fn apply(&self, x: f64) -> f64 {
        let n = f64::from(self.count);
        match self.position {
            StepPosition::Start => (n * x).ceil() / n,
            StepPosition::End => (n * x).floor() / n,
        }
    }
}

/// Build a cubic Bézier timing function.
pub fn make_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> TimingFunction {
    TimingFunction::Bezier(CubicBezier::new(x1, y1, x2, y2))
}

/// Build a step timing function; `direction == "start"` rounds up, anything else rounds down.
pub fn make_steps(count: u32, direction: &str) -> TimingFunction {
    TimingFunction::Steps(Steps::new(count, StepPosition::from_keyword(direction)))
}

/// A named or custom timing function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimingFunction {
    /// Identity.
    #[default]
    Linear,
    /// CSS `ease`.
    Ease,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
    /// Single step taken immediately.
    StepStart,
    /// Single step taken at the end.
    StepEnd,
    /// Single step taken at the midpoint.
    StepMiddle,
    /// Custom cubic Bézier curve.
    Bezier(CubicBezier),
    /// Custom step function.
    Steps(Steps),
}

impl TimingFunction {
    /// Every named timing function, in registry order.
    pub const NAMED: [TimingFunction; 8] = [
        Self::Linear,
        Self::Ease,
        Self::EaseIn,
        Self::EaseOut,
        Self::EaseInOut,
        Self::StepStart,
        Self::StepEnd,
        Self::StepMiddle,
    ];

    /// Look up a named timing function. Accepts camelCase, snake_case and kebab-case.
    pub fn by_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let f = match key.as_str() {
            "linear" => Self::Linear,
            "ease" => Self::Ease,
            "easein" => Self::EaseIn,
            "easeout" => Self::EaseOut,
            "easeinout" => Self::EaseInOut,
            "stepstart" => Self::StepStart,
            "stepend" => Self::StepEnd,
            "stepmiddle" => Self::StepMiddle,
            _ => return None,
        };
        Some(f)
    }

    /// Parse a registry name or a CSS-style `cubic-bezier(x1, y1, x2, y2)` /
    /// `steps(n[, start|end])` expression.
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        if let Some(f) = Self::by_name(expr) {
            return Some(f);
        }
        let (func, args) = expr.strip_suffix(')')?.split_once('(')?;
        let args: Vec<&str> = args.split(',').map(str::trim).collect();
        match (func.trim().to_ascii_lowercase().as_str(), args.as_slice()) {
            ("cubic-bezier", [x1, y1, x2, y2]) => {
                let [x1, y1, x2, y2] = [x1, y1, x2, y2].map(|v| v.parse::<f64>().ok());
                let (x1, y1, x2, y2) = (x1?, y1?, x2?, y2?);
                // x must stay in [0, 1] for the curve to be a function of time.
                let xs_ok = [x1, x2].iter().all(|x| (0.0..=1.0).contains(x));
                (xs_ok && y1.is_finite() && y2.is_finite()).then(|| make_bezier(x1, y1, x2, y2))
            }
            ("steps", [n]) => Some(make_steps(n.parse().ok()?, "end")),
            ("steps", [n, dir]) => Some(make_steps(n.parse().ok()?, dir)),
            _ => None,
        }
    }

    /// Parse `name`, falling back to [`TimingFunction::Linear`] when absent or unknown.
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::Linear;
        };
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(name, "unknown timing function, using linear");
            Self::Linear
        })
    }

    /// Registry name of a named function; `None` for custom curves.
    pub fn name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "easeIn",
            Self::EaseOut => "easeOut",
            Self::EaseInOut => "easeInOut",
            Self::StepStart => "stepStart",
            Self::StepEnd => "stepEnd",
            Self::StepMiddle => "stepMiddle",
            Self::Bezier(_) | Self::Steps(_) => return None,
        })
    }

    /// Whether this is a discrete step function.
    pub fn is_step(&self) -> bool {
        matches!(
            self,
            Self::StepStart | Self::StepEnd | Self::StepMiddle | Self::Steps(_)
        )
    }

    /// Whether eased progress can leave `[0, 1]` (custom curves with out-of-range handles).
    pub fn may_overshoot(&self) -> bool {
        match self {
            Self::Bezier(b) => ![b.y1, b.y2].iter().all(|y| (0.0..=1.0).contains(y)),
            _ => false,
        }
    }

    /// Map progress `x` (expected in `[0, 1]`) to eased progress.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Ease => EASE.apply(x),
            Self::EaseIn => EASE_IN.apply(x),
            Self::EaseOut => EASE_OUT.apply(x),
            Self::EaseInOut => EASE_IN_OUT.apply(x),
            Self::StepStart => Steps::new(1, StepPosition::Start).apply(x),
            Self::StepEnd => Steps::new(1, StepPosition::End).apply(x),
            Self::StepMiddle => {
                if x < 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Bezier(b) => b.apply(x),
            Self::Steps(s) => s.apply(x),
        }
    }

    /// The counterpart used when playing backward.
    pub fn reverse(&self) -> Self {
        match *self {
            Self::Linear => Self::Linear,
            Self::Ease => Self::Ease,
            Self::EaseIn => Self::EaseOut,
            Self::EaseOut => Self::EaseIn,
            Self::EaseInOut => Self::EaseInOut,
            Self::StepStart => Self::StepEnd,
            Self::StepEnd => Self::StepStart,
            Self::StepMiddle => Self::StepMiddle,
            Self::Bezier(b) => Self::Bezier(b.mirrored()),
            Self::Steps(s) => Self::Steps(Steps::new(s.count, s.position.flipped())),
        }
    }

    /// `self` when playing forward, [`TimingFunction::reverse`] when playing backward.
    pub fn directed(&self, reverse: bool) -> Self {
        if reverse { self.reverse() } else { *self }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
