//! Output plumbing: the primitives that get drawn, and the [`DualRenderer`] that sends each one to
//! both the preview and the fabrication sink

use crate::geometry::fabrication_angle;
use crate::{Float, Point};

/// The ink a primitive is drawn with
///
/// Both sinks map these onto their own colour systems: RGB for the preview and DXF colour indices
/// for the fabrication file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ink {
    /// Regular outlines -- everything except the inner ring of a donut
    Blue,
    Red,
}

impl Ink {
    /// Returns the AutoCAD colour index for the ink
    pub fn dxf_color(self) -> u8 {
        match self {
            Ink::Blue => 5,
            Ink::Red => 1,
        }
    }

    /// Returns the ink as an RGB integer, suitable for [`img::rgb`](crate::img::rgb)
    pub fn rgb(self) -> u32 {
        match self {
            Ink::Blue => 0x0000ff,
            Ink::Red => 0xff0000,
        }
    }
}

/// A straight line between two points
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub ink: Ink,
}

impl Segment {
    pub fn length(&self) -> Float {
        self.from.distance(self.to)
    }

    /// Returns the segment with both endpoints scaled about the origin
    pub fn scaled(self, scale: Float) -> Self {
        Segment {
            from: self.from * scale,
            to: self.to * scale,
            ..self
        }
    }
}

/// A circular arc
///
/// Angles are in degrees. `start` is measured in whatever convention the receiving sink uses, and
/// the arc sweeps `extent` degrees counter-clockwise (in that same convention) from there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: Float,
    pub start: Float,
    pub extent: Float,
    pub ink: Ink,
}

impl Arc {
    /// Returns the length of the arc along its curve
    pub fn length(&self) -> Float {
        self.radius * self.extent.abs().to_radians()
    }
}

/// A single output target -- something that accepts lines and arcs
///
/// Sinks are append-only. They receive primitives in generation order and must keep that order.
pub trait Sink {
    fn line(&mut self, seg: Segment);
    fn arc(&mut self, arc: Arc);
}

/// The interface the turtle draws through
///
/// Primitives are given in surface units and in the preview's angle convention. The `heading` is
/// the turtle's heading at the time of the call, which is required to translate arc angles for the
/// fabrication sink.
pub trait Renderer {
    fn emit_segment(&mut self, seg: Segment);
    fn emit_arc(&mut self, arc: Arc, heading: Float);
}

/// Totals of the primitives that have passed through a [`DualRenderer`]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EmitCounts {
    pub segments: usize,
    pub arcs: usize,
    /// Total length of everything sent to the fabrication sink, in its (scaled) units
    pub cut_length: Float,
}

/// Renderer that emits every primitive to two sinks in one call
///
/// The preview sink receives primitives unchanged. The fabrication sink receives them scaled by
/// `scale`, with arc start angles converted by [`fabrication_angle`].
pub struct DualRenderer<P, F> {
    preview: P,
    fabrication: F,
    scale: Float,
    counts: EmitCounts,
}

impl<P: Sink, F: Sink> DualRenderer<P, F> {
    pub fn new(preview: P, fabrication: F, scale: Float) -> Self {
        DualRenderer {
            preview,
            fabrication,
            scale,
            counts: EmitCounts::default(),
        }
    }

    pub fn counts(&self) -> EmitCounts {
        self.counts
    }

    #[cfg(test)]
    pub fn preview(&self) -> &P {
        &self.preview
    }

    /// Consumes the renderer, returning `(preview, fabrication)`
    pub fn into_sinks(self) -> (P, F) {
        (self.preview, self.fabrication)
    }
}

impl<P: Sink, F: Sink> Renderer for DualRenderer<P, F> {
    fn emit_segment(&mut self, seg: Segment) {
        let scaled = seg.scaled(self.scale);

        self.preview.line(seg);
        self.fabrication.line(scaled);
        self.counts.segments += 1;
        self.counts.cut_length += scaled.length();
    }

    fn emit_arc(&mut self, arc: Arc, heading: Float) {
        let scaled = Arc {
            center: arc.center * self.scale,
            radius: arc.radius * self.scale,
            start: fabrication_angle(arc.start, heading),
            ..arc
        };

        self.preview.arc(arc);
        self.fabrication.arc(scaled);
        self.counts.arcs += 1;
        self.counts.cut_length += scaled.length();
    }
}

/// A primitive captured by a [`Recording`]
#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive {
    Line(Segment),
    Arc(Arc),
}

/// Sink (and renderer) that just remembers everything it was given
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recording {
    pub primitives: Vec<Primitive>,
}

#[cfg(test)]
impl Recording {
    pub fn lines(&self) -> Vec<Segment> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn arcs(&self) -> Vec<Arc> {
        self.primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Arc(a) => Some(*a),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Sink for Recording {
    fn line(&mut self, seg: Segment) {
        self.primitives.push(Primitive::Line(seg));
    }

    fn arc(&mut self, arc: Arc) {
        self.primitives.push(Primitive::Arc(arc));
    }
}

#[cfg(test)]
impl Renderer for Recording {
    fn emit_segment(&mut self, seg: Segment) {
        self.line(seg);
    }

    fn emit_arc(&mut self, arc: Arc, _heading: Float) {
        self.arc(arc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> DualRenderer<Recording, Recording> {
        DualRenderer::new(Recording::default(), Recording::default(), 1.0 / 3.0)
    }

    #[test]
    fn segments_reach_both_sinks_scaled() {
        let mut r = dual();
        let seg = Segment {
            from: Point { x: 400.0, y: 600.0 },
            to: Point { x: 460.0, y: 520.0 },
            ink: Ink::Blue,
        };
        r.emit_segment(seg);

        let (preview, fab) = r.into_sinks();
        assert_eq!(preview.lines(), vec![seg]);

        let scaled = fab.lines()[0];
        assert!((scaled.length() - seg.length() / 3.0).abs() < 1e-9);
        assert!(scaled.from.approx_eq(Point { x: 400.0 / 3.0, y: 200.0 }, 1e-9));
        assert_eq!(scaled.ink, Ink::Blue);
    }

    #[test]
    fn arcs_get_converted_start_angle() {
        let mut r = dual();
        let arc = Arc {
            center: Point { x: 30.0, y: 60.0 },
            radius: 32.0,
            start: 280.0,
            extent: 340.0,
            ink: Ink::Blue,
        };
        r.emit_arc(arc, 90.0);

        assert_eq!(r.counts().segments, 0);
        assert_eq!(r.counts().arcs, 1);
        assert!((r.counts().cut_length - arc.length() / 3.0).abs() < 1e-9);

        let (preview, fab) = r.into_sinks();
        assert_eq!(preview.arcs(), vec![arc]);

        let converted = fab.arcs()[0];
        assert_eq!(converted.start, 100.0);
        assert_eq!(converted.extent, 340.0);
        assert!((converted.radius - 32.0 / 3.0).abs() < 1e-12);
        assert!((converted.length() - arc.length() / 3.0).abs() < 1e-9);
    }
}
