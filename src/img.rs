//! The preview sink: an off-screen raster of the drawing surface, saved as a PNG

use crate::config::CanvasSize;
use crate::float::{cos_deg, sin_deg};
use crate::render::{Arc, Ink, Segment, Sink};
use crate::{Float, Point};

use eyre::Context;
use image::{ImageBuffer, Rgba};
use imageproc::drawing;
use std::path::Path;

/// Creates a color from the provided RGBA integer
///
/// See also: [`rgb`].
///
/// ## Examples
///
/// ```
/// let transparent = rgba(0x00000000);
/// let red_tint = rgba(0xff000077);
/// let teal = rgba(0x00ffffff);
/// ```
pub fn rgba(int: u32) -> Color {
    let r = ((int >> 24) & 0xff) as u8;
    let g = ((int >> 16) & 0xff) as u8;
    let b = ((int >> 8) & 0xff) as u8;
    let a = (int & 0xff) as u8;

    Rgba([r, g, b, a])
}

/// Creates a color from the provided RGB integer
///
/// See also: [`rgba`].
///
/// ## Panics
///
/// This function panics if the provided integer is greater than `0xffffff`.
pub fn rgb(int: u32) -> Color {
    assert!(int <= 0xffffff);

    rgba((int << 8) + 0xff)
}

/// The color type we're using
pub type Color = Rgba<u8>;

/// Type alias to represent a number of pixels. This is only provided so that the meaning behind
/// types can be more clear.
pub type PixelCount = u32;

/// Arcs are drawn as polylines with roughly this many degrees per segment
const ARC_STEP_DEGREES: Float = 2.0;

/// The preview canvas
///
/// Coordinates map one-to-one onto pixels, with the origin at the top-left corner and Y growing
/// downwards -- the same as the turtle's surface, so there's no transform. Anything that falls
/// outside the canvas is clipped.
pub struct PreviewCanvas {
    image: ImageBuffer<Color, Vec<u8>>,
}

impl PreviewCanvas {
    pub fn new(size: CanvasSize) -> Self {
        PreviewCanvas::with_background(size.width, size.height, rgb(0xffffff))
    }

    pub fn with_background(width: PixelCount, height: PixelCount, background: Color) -> Self {
        PreviewCanvas {
            image: ImageBuffer::from_pixel(width, height, background),
        }
    }

    #[cfg(test)]
    pub fn image(&self) -> &ImageBuffer<Color, Vec<u8>> {
        &self.image
    }

    /// Writes the canvas out as a PNG
    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        self.image
            .save(path)
            .wrap_err_with(|| format!("failed to write preview image {:?}", path))
    }

    fn draw_line(&mut self, from: Point, to: Point, ink: Ink) {
        drawing::draw_line_segment_mut(
            &mut self.image,
            (from.x as f32, from.y as f32),
            (to.x as f32, to.y as f32),
            rgb(ink.rgb()),
        );
    }
}

/// Returns the point at `angle` degrees around the arc's circle
///
/// As on the surface, angles go counter-clockwise as seen, from 3 o'clock.
fn point_on(arc: &Arc, angle: Float) -> Point {
    Point {
        x: arc.center.x + arc.radius * cos_deg(angle),
        y: arc.center.y - arc.radius * sin_deg(angle),
    }
}

impl Sink for PreviewCanvas {
    fn line(&mut self, seg: Segment) {
        self.draw_line(seg.from, seg.to, seg.ink);
    }

    fn arc(&mut self, arc: Arc) {
        let steps = (arc.extent.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
        let step = arc.extent / steps as Float;

        let mut prev = point_on(&arc, arc.start);
        for i in 1..=steps {
            let next = point_on(&arc, arc.start + step * i as Float);
            self.draw_line(prev, next, arc.ink);
            prev = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn canvas() -> PreviewCanvas {
        PreviewCanvas::new(CanvasSize {
            width: 100,
            height: 80,
        })
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(rgb(0x0000ff), Rgba([0, 0, 255, 255]));
        assert_eq!(rgba(0xff000077), Rgba([255, 0, 0, 0x77]));
    }

    #[test]
    fn lines_are_drawn_in_surface_coordinates() {
        let mut c = canvas();
        c.line(Segment {
            from: Point { x: 10.0, y: 20.0 },
            to: Point { x: 60.0, y: 20.0 },
            ink: Ink::Blue,
        });

        assert_eq!(*c.image().get_pixel(30, 20), rgb(0x0000ff));
        assert_eq!(*c.image().get_pixel(30, 60), rgb(0xffffff));
    }

    #[test]
    fn arcs_skip_their_gap() {
        let mut c = canvas();
        // everything but the quarter around 3 o'clock
        c.arc(Arc {
            center: Point { x: 50.0, y: 40.0 },
            radius: 20.0,
            start: 45.0,
            extent: 270.0,
            ink: Ink::Red,
        });

        let red = rgb(0xff0000);
        // 9 o'clock and 12 o'clock (up the canvas) are on the arc
        assert_eq!(*c.image().get_pixel(30, 40), red);
        assert_eq!(*c.image().get_pixel(50, 20), red);
        // 3 o'clock is in the gap
        assert_ne!(*c.image().get_pixel(70, 40), red);
    }

    #[test]
    fn offscreen_lines_are_clipped() {
        let mut c = canvas();
        c.line(Segment {
            from: Point { x: -50.0, y: -50.0 },
            to: Point { x: 500.0, y: -10.0 },
            ink: Ink::Blue,
        });
        assert!(c.image().pixels().all(|p| *p == rgb(0xffffff)));
    }

    #[test]
    fn saves_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        canvas().save(&path).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.dimensions(), (100, 80));
    }
}
