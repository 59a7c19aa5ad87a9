//! Wrapper module around the `Point` type

use crate::float::{cos_deg, sin_deg};
use crate::Float;
use serde::Deserialize;
use std::ops::*;

/// A point on the drawing surface, in surface units (pixels)
///
/// We treat positive X as to the right and positive Y as *down*, matching the preview canvas.
/// This distinction matters for headings: a heading of 90° points up the screen, towards
/// negative Y.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Point {
    pub x: Float,
    pub y: Float,
}

impl Point {
    /// Returns the unit vector pointing along the given heading, in degrees
    ///
    /// Headings are measured counter-clockwise as seen on the surface, so the Y component is
    /// flipped relative to the usual trig.
    pub fn from_heading(heading: Float) -> Self {
        Point {
            x: cos_deg(heading),
            y: -sin_deg(heading),
        }
    }

    /// Returns the euclidean length of the point as a vector from the origin
    pub fn norm(self) -> Float {
        self.x.hypot(self.y)
    }

    /// Returns the distance between the two points
    pub fn distance(self, other: Point) -> Float {
        (self - other).norm()
    }

    /// Returns the 2D cross product (z component) of the two vectors
    #[cfg(test)]
    pub fn cross(self, other: Point) -> Float {
        self.x * other.y - self.y * other.x
    }

    /// Returns `true` if both coordinates are within `tolerance`
    #[cfg(test)]
    pub fn approx_eq(self, other: Point, tolerance: Float) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add<Point> for Point {
    type Output = Self;

    fn add(self, other: Point) -> Self {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub<Point> for Point {
    type Output = Self;

    fn sub(self, other: Point) -> Self {
        self + -1.0 * other
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<Point> for Float {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        point * self
    }
}

impl Mul<Float> for Point {
    type Output = Self;

    fn mul(self, scale: Float) -> Self {
        Point {
            x: scale * self.x,
            y: scale * self.y,
        }
    }
}
