//! Monotone cubic Hermite evaluation of the five-point tone curve.

use crate::params::ParameterSet;

/// Fixed x positions of the five control points.
pub const CONTROL_X: [f32; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

const POINTS: usize = CONTROL_X.len();

/// One control point of the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub x: f32,
    pub y: f32,
}

impl CurvePoint {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Build the five control points from the three adjustable y-values.
///
/// The endpoints are always (0,0) and (1,1).
pub fn control_points(shadows: f32, midtones: f32, highlights: f32) -> [CurvePoint; 5] {
    [
        CurvePoint::new(CONTROL_X[0], 0.0),
        CurvePoint::new(CONTROL_X[1], shadows),
        CurvePoint::new(CONTROL_X[2], midtones),
        CurvePoint::new(CONTROL_X[3], highlights),
        CurvePoint::new(CONTROL_X[4], 1.0),
    ]
}

/// Evaluate the curve through `points` at `x`.
///
/// Convenience form of [`ToneCurve::evaluate`] for one-off lookups; the
/// pipeline builds a [`ToneCurve`] once per render instead.
pub fn evaluate(x: f32, points: &[CurvePoint; 5]) -> f32 {
    ToneCurve::from_points(*points).evaluate(x)
}

/// A prepared tone curve: control points plus precomputed tangents.
///
/// Building the curve solves for the tangents once; [`ToneCurve::evaluate`]
/// is then a segment lookup and one cubic. The type is `Copy`, `Send` and
/// `Sync` and holds no interior state.
///
/// # Example
///
/// ```
/// use tone_pipeline::ToneCurve;
///
/// let curve = ToneCurve::new(0.3, 0.5, 0.8);
/// assert_eq!(curve.evaluate(0.0), 0.0);
/// assert_eq!(curve.evaluate(1.0), 1.0);
/// assert!((curve.evaluate(0.25) - 0.3).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    points: [CurvePoint; POINTS],
    tangents: [f32; POINTS],
}

impl ToneCurve {
    /// Curve through (0,0), (.25,`shadows`), (.5,`midtones`),
    /// (.75,`highlights`), (1,1).
    pub fn new(shadows: f32, midtones: f32, highlights: f32) -> Self {
        Self::from_points(control_points(shadows, midtones, highlights))
    }

    /// Curve for the tone fields of a parameter set.
    pub fn from_params(params: &ParameterSet) -> Self {
        Self::from_points(params.curve_points())
    }

    /// The straight line y = x.
    pub fn identity() -> Self {
        Self::new(CONTROL_X[1], CONTROL_X[2], CONTROL_X[3])
    }

    /// Curve through arbitrary points. The x-coordinates must be strictly
    /// increasing.
    pub fn from_points(points: [CurvePoint; POINTS]) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].x < w[1].x),
            "tone curve x-coordinates must be strictly increasing"
        );
        Self {
            points,
            tangents: monotone_tangents(&points),
        }
    }

    #[inline]
    pub fn points(&self) -> &[CurvePoint; POINTS] {
        &self.points
    }

    /// Whether every control point lies on y = x.
    pub fn is_identity(&self) -> bool {
        self.points.iter().all(|p| p.y == p.x)
    }

    /// Map `x` through the curve.
    ///
    /// `x` must be in 0.0..=1.0; callers clamp. The curve itself does not,
    /// and outside that range the result is unspecified.
    ///
    /// # Panics (debug only)
    /// Debug-asserts that `x` is within 0.0..=1.0.
    #[inline]
    pub fn evaluate(&self, x: f32) -> f32 {
        debug_assert!(
            (0.0..=1.0).contains(&x),
            "ToneCurve::evaluate: input {x} out of range 0.0..=1.0"
        );

        let p = &self.points;
        let m = &self.tangents;

        let mut i = 0;
        while i < POINTS - 2 && x >= p[i + 1].x {
            i += 1;
        }

        let h = p[i + 1].x - p[i].x;
        let t = (x - p[i].x) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        // Cubic Hermite basis
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p[i].y + h10 * h * m[i] + h01 * p[i + 1].y + h11 * h * m[i + 1]
    }
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::identity()
    }
}

/// Fritsch-Carlson tangents: weighted harmonic mean of neighbouring secants,
/// zero at local extrema, then scaled into the monotonicity region
/// (alpha^2 + beta^2 <= 9) per segment.
fn monotone_tangents(points: &[CurvePoint; POINTS]) -> [f32; POINTS] {
    let mut h = [0.0f32; POINTS - 1];
    let mut delta = [0.0f32; POINTS - 1];
    for i in 0..POINTS - 1 {
        h[i] = points[i + 1].x - points[i].x;
        delta[i] = (points[i + 1].y - points[i].y) / h[i];
    }

    let mut m = [0.0f32; POINTS];
    m[0] = delta[0];
    m[POINTS - 1] = delta[POINTS - 2];

    for i in 1..POINTS - 1 {
        if delta[i - 1] * delta[i] > 0.0 {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            m[i] = (w1 + w2) / (w1 / delta[i - 1] + w2 / delta[i]);
        }
    }

    for i in 0..POINTS - 1 {
        if delta[i] == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let alpha = m[i] / delta[i];
        let beta = m[i + 1] / delta[i];
        let radius = alpha * alpha + beta * beta;
        if radius > 9.0 {
            let tau = 3.0 / radius.sqrt();
            m[i] = tau * alpha * delta[i];
            m[i + 1] = tau * beta * delta[i];
        }
    }

    m
}
