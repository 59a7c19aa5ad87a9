//! Wrapper module to allow switching the float type globally.
//!
//! All of the functions from `f32`/`f64` are glob imported into this module, so that they can be
//! used elsewhere.

/// Type alias for the selected global float type
///
/// Geometry is accumulated through long chains of relative moves, so this is `f64` to keep the
/// drift well below what's visible on either output.
pub type Float = f64;

// import everything to do with the float
pub use std::f64::consts::*;

/// Returns the sine of an angle given in degrees
pub fn sin_deg(degrees: Float) -> Float {
    degrees.to_radians().sin()
}

/// Returns the cosine of an angle given in degrees
pub fn cos_deg(degrees: Float) -> Float {
    degrees.to_radians().cos()
}
