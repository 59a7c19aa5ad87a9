//! The fabrication sink: a DXF drawing for the laser cutter
//!
//! Entities are added to a [`dxf::Drawing`] in the order they arrive, all on one layer, and the
//! file is only written by [`DxfDrawing::save`], once the tree is finished.

use crate::render::{Arc, Segment, Sink};
use crate::{Float, Point};

use dxf::entities::{self, Entity, EntityType};
use dxf::enums::{AcadVersion, Units};
use dxf::tables::Layer;
use dxf::Color;
use eyre::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The layer everything is drawn on
pub const LAYER: &str = "LINES";

pub struct DxfDrawing {
    layer: String,
    drawing: dxf::Drawing,
}

impl Default for DxfDrawing {
    fn default() -> Self {
        DxfDrawing::new(LAYER)
    }
}

/// Converts a surface point into a DXF point on the Z = 0 plane
fn dxf_point(p: Point) -> dxf::Point {
    dxf::Point::new(p.x, p.y, 0.0)
}

impl DxfDrawing {
    pub fn new(layer: &str) -> Self {
        let mut drawing = dxf::Drawing::new();
        // $INSUNITS only exists from R2000 onwards
        drawing.header.version = AcadVersion::R2000;
        drawing.header.default_drawing_units = Units::Millimeters;
        drawing.add_layer(Layer {
            name: layer.to_owned(),
            ..Default::default()
        });

        DxfDrawing {
            layer: layer.to_owned(),
            drawing,
        }
    }

    #[cfg(test)]
    pub fn drawing(&self) -> &dxf::Drawing {
        &self.drawing
    }

    /// Writes the drawing to `path`, replacing anything already there
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        let file =
            File::create(path).wrap_err_with(|| format!("failed to create DXF file {:?}", path))?;

        let mut writer = BufWriter::new(file);
        self.drawing
            .save(&mut writer)
            .wrap_err_with(|| format!("failed to write DXF file {:?}", path))?;
        writer
            .flush()
            .wrap_err_with(|| format!("failed to write DXF file {:?}", path))
    }

    fn push(&mut self, specific: EntityType, color: u8) {
        let mut entity = Entity::new(specific);
        entity.common.layer = self.layer.clone();
        entity.common.color = Color::from_index(color);
        self.drawing.add_entity(entity);
    }
}

/// Puts an angle in degrees into [0, 360)
fn normalize(angle: Float) -> Float {
    angle.rem_euclid(360.0)
}

impl Sink for DxfDrawing {
    fn line(&mut self, seg: Segment) {
        let line = entities::Line::new(dxf_point(seg.from), dxf_point(seg.to));
        self.push(EntityType::Line(line), seg.ink.dxf_color());
    }

    fn arc(&mut self, arc: Arc) {
        let dxf_arc = entities::Arc::new(
            dxf_point(arc.center),
            arc.radius,
            normalize(arc.start),
            normalize(arc.start + arc.extent),
        );
        self.push(EntityType::Arc(dxf_arc), arc.ink.dxf_color());
    }
}
