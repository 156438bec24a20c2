//! Tone curve through five control points.
//!
//! The curve is pinned at (0,0) and (1,1) and passes through three caller
//! supplied points at x = 0.25, 0.5 and 0.75. Between points it uses
//! monotone piecewise-cubic Hermite interpolation (Fritsch-Carlson), which
//! gives a C1-smooth curve that never overshoots the y-range of a segment:
//!
//! ```text
//! y
//! 1 |                         *
//!   |                  *  .-'
//!   |            . -*'
//!   |      * -'
//!   |   .-'
//! 0 *-----+-----+-----+-----+ x
//!   0   .25    .5   .75     1
//! ```
//!
//! Because segments cannot overshoot, control points in any order (for
//! example shadows above highlights) still yield a bounded, smooth mapping
//! through every point. A local extremum flattens to a zero slope instead
//! of ringing.

mod tone_curve;

pub use tone_curve::{control_points, evaluate, CurvePoint, ToneCurve, CONTROL_X};
