//! Tolerance defaults shared by the whole kernel.
//!
//! Policy
//! - Two tolerances with distinct jobs: `EPSILON` for "are these two values the same
//!   position/coefficient", `LITTLE_EPSILON` for "is this length/determinant/denominator
//!   degenerate".
//! - Fixed constants; call sites that need another tolerance take an explicit `eps`.

/// General closeness tolerance (vector/plane/polygon comparisons).
pub const EPSILON: f64 = f32::EPSILON as f64 * 1e3;
/// Degeneracy tolerance for divisions, normalization and determinants.
pub const LITTLE_EPSILON: f64 = f64::EPSILON * 1e3;
/// Coarse positional tolerance used when slice positions are imprecise.
pub const MRI_EPSILON: f64 = 0.001;

/// Number of samples used when testing whether a segment lies inside a polygon.
pub(crate) const SEGMENT_SAMPLES: usize = 50;
