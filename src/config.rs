//! Wrapper module for the run configuration, [`TreeConfig`]
//!
//! Every field has a default, so a JSON config file only needs to give the values it wants to
//! change.

use crate::{Float, Point};
use eyre::{eyre, Context};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Default width of a branch, in pixels
pub const BRANCH_WIDTH: Float = 10.0;

/// Default length of every branch, in pixels
pub const BRANCH_LENGTH: Float = 60.0;

/// Default included angle between the two arms of a fork, in degrees
pub const BRANCH_ANGLE: Float = 70.0;

/// Scale factor converting pixels on the preview into millimetres in the DXF
pub const FABRICATION_SCALE: Float = 1.0 / 3.0;

/// Thickness of the sheet being cut, in millimetres. This is 1/8".
pub const MATERIAL_THICKNESS: Float = 3.175;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    /// Width of a branch, in pixels
    pub branch_width: Float,
    /// Length of each branch, in pixels
    pub branch_length: Float,
    /// Included angle between the arms of a fork, in degrees. Must be in (0, 180).
    pub branch_angle: Float,
    /// Multiplier from pixels to millimetres, applied to everything written to the DXF
    pub fabrication_scale: Float,
    /// Sheet thickness in millimetres; sets the width of the slots in the stand
    pub material_thickness: Float,

    /// Radius of the circle ornament, and the outer radius of the donut, in pixels
    pub circle_radius: Float,
    /// Radius of the donut's inner ring, in pixels
    pub donut_inner_radius: Float,

    /// Where the turtle starts, in pixels. The stand is drawn outwards from here.
    pub start: Point,
    /// Preview canvas dimensions, in pixels
    pub canvas: CanvasSize,
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            branch_width: BRANCH_WIDTH,
            branch_length: BRANCH_LENGTH,
            branch_angle: BRANCH_ANGLE,
            fabrication_scale: FABRICATION_SCALE,
            material_thickness: MATERIAL_THICKNESS,
            circle_radius: 32.0,
            donut_inner_radius: 22.0,
            start: Point { x: 400.0, y: 600.0 },
            canvas: CanvasSize {
                width: 1000,
                height: 900,
            },
        }
    }
}

impl TreeConfig {
    /// Reads and validates a config from a JSON file
    pub fn from_file(file: &Path) -> eyre::Result<Self> {
        let f = File::open(file).wrap_err_with(|| format!("failed to open {:?}", file))?;
        let config: TreeConfig = serde_json::from_reader(BufReader::new(f))
            .wrap_err_with(|| format!("failed to parse JSON config {:?}", file))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the values that the geometry itself doesn't
    ///
    /// The branch angle and lengths are checked again by [`TreeGeometry::new`], which has to
    /// compute the mitre from them anyway.
    ///
    /// [`TreeGeometry::new`]: crate::geometry::TreeGeometry::new
    pub fn validate(&self) -> eyre::Result<()> {
        let positive = [
            ("branch_width", self.branch_width),
            ("branch_length", self.branch_length),
            ("fabrication_scale", self.fabrication_scale),
            ("material_thickness", self.material_thickness),
            ("circle_radius", self.circle_radius),
            ("donut_inner_radius", self.donut_inner_radius),
        ];

        for &(name, value) in &positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(eyre!("must be positive and finite (got {})", value))
                    .with_context(|| format!("invalid value at .{} in tree config", name));
            }
        }

        if self.donut_inner_radius >= self.circle_radius {
            return Err(eyre!(
                "donut inner radius ({}) must be less than the circle radius ({})",
                self.donut_inner_radius,
                self.circle_radius
            ))
            .context("invalid value at .donut_inner_radius in tree config");
        }

        if !(self.start.x.is_finite() && self.start.y.is_finite()) {
            return Err(eyre!("start position must be finite (got {:?})", self.start))
                .context("invalid value at .start in tree config");
        }

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(eyre!(
                "canvas must be non-empty (got {}x{})",
                self.canvas.width,
                self.canvas.height
            ))
            .context("invalid value at .canvas in tree config");
        }

        Ok(())
    }

    /// Width of a slot in the stand, in pixels: one material thickness once scaled to the DXF
    pub fn slot_unit(&self) -> Float {
        self.material_thickness / self.fabrication_scale
    }

    /// The basic length unit of the stand, which grows with both the material and the branches
    pub fn stand_unit(&self) -> Float {
        self.slot_unit() + self.branch_width / 2.0
    }
}
