//! Easing functions applied to the interpolation gradient between two keys

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Shape of the ease-in curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    Quadratic,
    Cubic,
    Quartic,
    Quintic,
    Sine,
    Circle,
    /// `(e^(k·t) − 1) / (e^k − 1)`; non-positive exponents degrade to linear
    Exponential(f32),
    /// CSS-style cubic bezier `(x1, y1, x2, y2)`
    BezierCurve(f32, f32, f32, f32),
}

/// Which half of the curve the easing applies to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    #[default]
    In,
    Out,
    InOut,
}

/// An easing function with its mode
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Easing {
    pub function: EasingFunction,
    #[serde(default)]
    pub mode: EasingMode,
}

impl Easing {
    pub fn new(function: EasingFunction, mode: EasingMode) -> Self {
        Self { function, mode }
    }

    pub fn ease_in(function: EasingFunction) -> Self {
        Self::new(function, EasingMode::In)
    }

    pub fn ease_out(function: EasingFunction) -> Self {
        Self::new(function, EasingMode::Out)
    }

    pub fn ease_in_out(function: EasingFunction) -> Self {
        Self::new(function, EasingMode::InOut)
    }

    /// Apply the easing to a gradient (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self.mode {
            EasingMode::In => self.function.ease_in(t),
            EasingMode::Out => 1.0 - self.function.ease_in(1.0 - t),
            EasingMode::InOut => {
                if t >= 0.5 {
                    (1.0 - self.function.ease_in((1.0 - t) * 2.0)) * 0.5 + 0.5
                } else {
                    self.function.ease_in(t * 2.0) * 0.5
                }
            }
        }
    }
}

impl EasingFunction {
    /// The ease-in form of the function
    pub fn ease_in(&self, t: f32) -> f32 {
        match *self {
            EasingFunction::Quadratic => t * t,
            EasingFunction::Cubic => t * t * t,
            EasingFunction::Quartic => t.powi(4),
            EasingFunction::Quintic => t.powi(5),
            EasingFunction::Sine => 1.0 - (FRAC_PI_2 * (1.0 - t)).sin(),
            EasingFunction::Circle => {
                let t = t.clamp(0.0, 1.0);
                1.0 - (1.0 - t * t).sqrt()
            }
            EasingFunction::Exponential(exponent) => {
                if exponent <= 0.0 {
                    t
                } else {
                    ((exponent * t).exp() - 1.0) / (exponent.exp() - 1.0)
                }
            }
            EasingFunction::BezierCurve(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

/// Cubic bezier easing (CSS semantics).
///
/// Newton-Raphson on the x polynomial with a bisection fallback, in f64.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_component(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_component(p, y1, y2) as f32;
        }
        let slope = bezier_component_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = x;
    for _ in 0..20 {
        let val = bezier_component(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_component(p, y1, y2) as f32
}

/// One axis of a unit cubic bezier with endpoints 0 and 1
#[inline]
fn bezier_component(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_component_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
