//! The pen/turtle drawing state and its primitive moves

use crate::render::{Arc, Ink, Renderer, Segment};
use crate::{Float, Point};

/// Pose and pen state of the turtle
///
/// This is `Copy` so that a snapshot is just a value: forks save one before drawing an arm and put
/// it back afterwards, which is the only thing stopping one subtree's motion from leaking into its
/// sibling's.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurtleState {
    pub pos: Point,
    /// Heading in degrees, counter-clockwise on the surface from the positive X axis
    pub heading: Float,
    pub pen_down: bool,
}

/// A single turtle instruction
///
/// Outlines that don't depend on anything but their parameters are expressed as lists of these
/// so they can be built (and checked) without a turtle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    PenUp,
    PenDown,
    Forward(Float),
    Turn(Float),
    /// Draws the arc if the pen is down. Does not move the turtle.
    Arc(Arc),
}

/// The turtle itself, drawing through the renderer `R`
pub struct Turtle<R> {
    state: TurtleState,
    renderer: R,
}

impl<R: Renderer> Turtle<R> {
    /// Creates a turtle at `pos` with heading 0 and the pen down
    pub fn new(renderer: R, pos: Point) -> Self {
        Turtle {
            state: TurtleState {
                pos,
                heading: 0.0,
                pen_down: true,
            },
            renderer,
        }
    }

    /// Moves forward along the current heading, drawing a line if the pen is down
    pub fn forward(&mut self, distance: Float) {
        let old = self.state.pos;
        let new = old + distance * Point::from_heading(self.state.heading);

        if self.state.pen_down {
            self.renderer.emit_segment(Segment {
                from: old,
                to: new,
                ink: Ink::Blue,
            });
        }

        self.state.pos = new;
    }

    /// Turns by `angle` degrees. Positive values turn clockwise on the surface.
    pub fn turn(&mut self, angle: Float) {
        self.state.heading -= angle;
    }

    pub fn pen_up(&mut self) {
        self.state.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.state.pen_down = true;
    }

    /// Emits an arc, if the pen is down
    ///
    /// The arc's start angle is given in the preview convention; the renderer uses the current
    /// heading to convert it for fabrication.
    pub fn arc(&mut self, arc: Arc) {
        if self.state.pen_down {
            self.renderer.emit_arc(arc, self.state.heading);
        }
    }

    /// Executes each step in order
    pub fn run(&mut self, steps: &[Step]) {
        for step in steps {
            match *step {
                Step::PenUp => self.pen_up(),
                Step::PenDown => self.pen_down(),
                Step::Forward(d) => self.forward(d),
                Step::Turn(a) => self.turn(a),
                Step::Arc(arc) => self.arc(arc),
            }
        }
    }

    /// Returns a copy of the full turtle state
    pub fn snapshot(&self) -> TurtleState {
        self.state
    }

    /// Resets the turtle to a previous snapshot. Nothing is drawn.
    pub fn restore(&mut self, state: TurtleState) {
        self.state = state;
    }

    #[cfg(test)]
    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Recording;

    fn turtle() -> Turtle<Recording> {
        Turtle::new(Recording::default(), Point { x: 400.0, y: 600.0 })
    }

    #[test]
    fn forward_and_back_returns_home() {
        for &heading in &[0.0, 17.0, 90.0, 135.5, 270.0, -42.0] {
            for &dist in &[0.5, 10.0, 333.3] {
                let mut t = turtle();
                t.turn(heading);
                let start = t.state().pos;

                t.forward(dist);
                t.turn(180.0);
                t.forward(dist);

                assert!(
                    t.state().pos.approx_eq(start, 1e-9),
                    "heading {}, distance {}: ended at {:?}",
                    heading,
                    dist,
                    t.state().pos
                );
            }
        }
    }

    #[test]
    fn positive_turn_is_clockwise() {
        let mut t = turtle();
        t.turn(-90.0);
        assert_eq!(t.state().heading, 90.0);

        t.pen_up();
        t.forward(10.0);
        // heading 90 is up the surface, i.e. towards smaller y
        assert!(t.state().pos.approx_eq(Point { x: 400.0, y: 590.0 }, 1e-9));

        t.turn(90.0);
        t.forward(10.0);
        assert!(t.state().pos.approx_eq(Point { x: 410.0, y: 590.0 }, 1e-9));
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut t = turtle();
        t.pen_up();
        t.forward(50.0);
        t.arc(Arc {
            center: Point { x: 0.0, y: 0.0 },
            radius: 1.0,
            start: 0.0,
            extent: 90.0,
            ink: Ink::Red,
        });
        assert!(t.renderer().primitives.is_empty());
        assert!(t.state().pos.approx_eq(Point { x: 450.0, y: 600.0 }, 1e-9));

        t.pen_down();
        t.forward(5.0);
        let lines = t.renderer().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].from.approx_eq(Point { x: 450.0, y: 600.0 }, 1e-9));
        assert!(lines[0].to.approx_eq(Point { x: 455.0, y: 600.0 }, 1e-9));
    }

    #[test]
    fn restore_puts_back_the_whole_state() {
        let mut t = turtle();
        let saved = t.snapshot();

        t.run(&[Step::Turn(33.0), Step::PenUp, Step::Forward(12.0)]);
        assert_ne!(*t.state(), saved);

        t.restore(saved);
        assert_eq!(*t.state(), saved);
        assert!(t.state().pen_down);
    }
}
