//! Entrance-animation presentation for revealed targets.
//!
//! A reveal maps the latch onto two presentation states (hidden+offset
//! and visible+settled) interpolated over a fixed duration with a cubic
//! Bézier easing and an optional stagger delay.

use std::sync::Arc;

use serde::Serialize;

use super::observer::VisibilityObserver;
use super::target::{RevealTarget, PRESET_THRESHOLD};

/// CSS-style cubic Bézier easing with endpoints (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Fast start, long settle
pub const SMOOTH_OUT: CubicBezier = CubicBezier::new(0.22, 1.0, 0.36, 1.0);

/// Overshoots slightly before settling
pub const SPRING_OUT: CubicBezier = CubicBezier::new(0.34, 1.56, 0.64, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `cubic-bezier(x1,y1,x2,y2)`
    pub fn css(&self) -> String {
        format!("cubic-bezier({},{},{},{})", self.x1, self.y1, self.x2, self.y2)
    }

    /// Eased progress for linear progress `x` (clamped to 0-1)
    pub fn sample(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        bezier(self.solve_t(x), self.y1, self.y2)
    }

    /// Find the curve parameter whose x-coordinate is `x`
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        // Newton-Raphson first; it converges in a few steps on sane curves.
        let mut t = x;
        for _ in 0..8 {
            let err = bezier(t, self.x1, self.x2) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // Bisection fallback; x(t) is monotonic for x1, x2 in 0-1.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > EPSILON {
            let value = bezier(t, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Entrance animation presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealStyle {
    FadeUp,
    FadeLeft,
    FadeRight,
    ScaleIn,
}

impl RevealStyle {
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::FadeUp => 850,
            Self::FadeLeft | Self::FadeRight => 900,
            Self::ScaleIn => 650,
        }
    }

    pub fn easing(&self) -> CubicBezier {
        match self {
            Self::ScaleIn => SPRING_OUT,
            _ => SMOOTH_OUT,
        }
    }

    fn hidden_transform(&self) -> &'static str {
        match self {
            Self::FadeUp => "translateY(44px)",
            Self::FadeLeft => "translateX(-64px)",
            Self::FadeRight => "translateX(64px)",
            Self::ScaleIn => "scale(0.85) translateY(28px)",
        }
    }

    fn settled_transform(&self) -> &'static str {
        match self {
            Self::FadeUp => "translateY(0px)",
            Self::FadeLeft | Self::FadeRight => "translateX(0px)",
            Self::ScaleIn => "scale(1) translateY(0px)",
        }
    }
}

/// Resolved presentation for one latch state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub opacity: f64,
    pub transform: &'static str,
    pub transition: String,
}

impl Presentation {
    /// Inline style declaration
    pub fn to_css(&self) -> String {
        format!(
            "opacity: {}; transform: {}; transition: {};",
            self.opacity, self.transform, self.transition
        )
    }
}

/// A preset plus the caller's stagger delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealAnimation {
    pub style: RevealStyle,
    pub delay_ms: u64,
}

impl RevealAnimation {
    pub fn new(style: RevealStyle) -> Self {
        Self { style, delay_ms: 0 }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Create the target this animation is bound to
    pub fn target(&self, observer: Arc<dyn VisibilityObserver>) -> RevealTarget {
        RevealTarget::new(observer, PRESET_THRESHOLD)
    }

    /// CSS transition shorthand for opacity and transform
    pub fn transition(&self) -> String {
        let seconds = self.style.duration_ms() as f64 / 1000.0;
        let easing = self.style.easing().css();
        format!(
            "opacity {s}s {e} {d}ms, transform {s}s {e} {d}ms",
            s = seconds,
            e = easing,
            d = self.delay_ms
        )
    }

    /// Presentation for the given latch value
    pub fn presentation(&self, revealed: bool) -> Presentation {
        let (opacity, transform) = if revealed {
            (1.0, self.style.settled_transform())
        } else {
            (0.0, self.style.hidden_transform())
        };

        Presentation {
            opacity,
            transform,
            transition: self.transition(),
        }
    }

    /// Eased progress `elapsed_ms` after the latch flipped, delay included
    pub fn progress_at(&self, elapsed_ms: u64) -> f64 {
        let active = elapsed_ms.saturating_sub(self.delay_ms) as f64;
        self.style
            .easing()
            .sample(active / self.style.duration_ms() as f64)
    }
}
