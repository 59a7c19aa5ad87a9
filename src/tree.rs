//! The recursive branch generator, [`TreeGenerator`]
//!
//! The tree is never stored before it's drawn: each fork is drawn as it's decided, and the shape
//! of what was drawn is returned afterwards as a [`Node`].

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::geometry::{ShapeKind, TreeGeometry};
use crate::render::Renderer;
use crate::stand::{self, StandDims, StandType};
use crate::turtle::{Step, Turtle};
use crate::Float;

/// What grows from the tip of an arm
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Terminal(ShapeKind),
    Fork,
}

/// The table that [`RandomChooser`] draws from, uniformly
///
/// Every ornament appears once and forking appears three times, so an arm forks again with
/// probability 3/8.
pub const CHOICES: [Choice; 8] = [
    Choice::Terminal(ShapeKind::Diamond),
    Choice::Terminal(ShapeKind::Donut),
    Choice::Terminal(ShapeKind::Circle),
    Choice::Terminal(ShapeKind::Square),
    Choice::Terminal(ShapeKind::Hexagon),
    Choice::Fork,
    Choice::Fork,
    Choice::Fork,
];

impl Choice {
    /// Returns the probability of this choice being drawn from [`CHOICES`]
    #[cfg(test)]
    pub fn probability(self) -> Float {
        let n = CHOICES.iter().filter(|&&c| c == self).count();
        n as Float / CHOICES.len() as Float
    }
}

/// Source of decisions for the generator
///
/// `depth` is the depth of the fork whose arm is being decided, starting at 1 for the fork on top
/// of the trunk.
pub trait ForkChooser {
    /// Decides what to put at the end of an arm
    fn choose(&mut self, depth: usize) -> Choice;

    /// Picks an ornament for an arm that isn't allowed to fork
    fn choose_terminal(&mut self, depth: usize) -> ShapeKind;
}

/// Chooser drawing uniformly from [`CHOICES`]
pub struct RandomChooser<R> {
    rng: R,
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        RandomChooser { rng }
    }
}

impl<R: Rng> ForkChooser for RandomChooser<R> {
    fn choose(&mut self, _depth: usize) -> Choice {
        CHOICES[self.rng.gen_range(0, CHOICES.len())]
    }

    fn choose_terminal(&mut self, _depth: usize) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0, ShapeKind::ALL.len())]
    }
}

/// The shape of a generated tree, starting from the fork on top of the trunk
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A fork, with the arms in the order they were drawn
    Fork(Box<Node>, Box<Node>),
    Terminal(ShapeKind),
}

impl Node {
    pub fn forks(&self) -> usize {
        match self {
            Node::Fork(l, r) => 1 + l.forks() + r.forks(),
            Node::Terminal(_) => 0,
        }
    }

    pub fn ornaments(&self) -> usize {
        match self {
            Node::Fork(l, r) => l.ornaments() + r.ornaments(),
            Node::Terminal(_) => 1,
        }
    }

    /// Returns the number of forks on the longest path down from this node
    pub fn depth(&self) -> usize {
        match self {
            Node::Fork(l, r) => 1 + l.depth().max(r.depth()),
            Node::Terminal(_) => 0,
        }
    }
}

/// Draws a tree: the stand, a trunk, and then forks until every arm has an ornament
pub struct TreeGenerator<R, C> {
    turtle: Turtle<R>,
    chooser: C,
    geometry: TreeGeometry,
    /// If present, arms of forks at this depth always get an ornament
    max_depth: Option<NonZeroUsize>,
    /// The number of ornaments drawn so far
    ornaments: usize,
}

impl<R: Renderer, C: ForkChooser> TreeGenerator<R, C> {
    pub fn new(turtle: Turtle<R>, chooser: C, geometry: TreeGeometry) -> Self {
        TreeGenerator {
            turtle,
            chooser,
            geometry,
            max_depth: None,
            ornaments: 0,
        }
    }

    /// Limits the depth of forks. `None` (the default) leaves it unbounded.
    pub fn with_max_depth(mut self, max_depth: Option<NonZeroUsize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Draws the whole thing, starting from the turtle's current pose
    pub fn start(&mut self, stand: StandType, dims: StandDims) -> Node {
        info!("drawing base {}", stand);
        self.turtle.run(&stand::outline(stand, dims));

        self.branch(0.0, 0.0);
        self.vee(1)
    }

    /// Draws the two edges of a branch forwards from the current pose, then moves to its far end
    /// with the pen up
    ///
    /// Each edge skips its mitre before it starts drawing. The mitres don't affect where the
    /// turtle ends up.
    pub fn branch(&mut self, left_mitre: Float, right_mitre: Float) {
        let half_width = self.geometry.branch_width / 2.0;
        let length = self.geometry.branch_length;
        let origin = self.turtle.snapshot();

        self.turtle.run(&[
            Step::PenUp,
            Step::Turn(-90.0),
            Step::Forward(half_width),
            Step::Turn(90.0),
            Step::Forward(left_mitre),
            Step::PenDown,
            Step::Forward(length - left_mitre),
        ]);

        self.turtle.restore(origin);
        self.turtle.run(&[
            Step::PenUp,
            Step::Turn(90.0),
            Step::Forward(half_width),
            Step::Turn(-90.0),
            Step::Forward(right_mitre),
            Step::PenDown,
            Step::Forward(length - right_mitre),
        ]);

        self.turtle.restore(origin);
        self.turtle.pen_up();
        self.turtle.forward(length);
    }

    /// Draws a fork at the current pose, and whatever grows from each of its arms
    ///
    /// The first arm leans clockwise, so its inner edge is its left one; the second arm mirrors
    /// it. Both start from the same snapshot of the turtle.
    pub fn vee(&mut self, depth: usize) -> Node {
        let half_width = self.geometry.branch_width / 2.0;
        let lean = 90.0 - self.geometry.branch_angle / 2.0;
        let mitre = self.geometry.mitre;

        trace!(depth, "fork");
        let entry = self.turtle.snapshot();

        self.turtle.run(&[
            Step::PenUp,
            Step::Turn(90.0),
            Step::Forward(half_width),
            Step::Turn(-90.0),
            Step::Turn(-lean),
            Step::Forward(half_width),
            Step::Turn(90.0),
        ]);
        self.branch(mitre, 0.0);
        let left = self.grow(depth);

        self.turtle.restore(entry);
        self.turtle.run(&[
            Step::PenUp,
            Step::Turn(-90.0),
            Step::Forward(half_width),
            Step::Turn(90.0),
            Step::Turn(lean),
            Step::Forward(half_width),
            Step::Turn(-90.0),
        ]);
        self.branch(0.0, mitre);
        let right = self.grow(depth);

        Node::Fork(Box::new(left), Box::new(right))
    }

    /// Decides and draws what goes at the tip of an arm of a fork at `depth`
    fn grow(&mut self, depth: usize) -> Node {
        let choice = match self.chooser.choose(depth) {
            Choice::Fork if self.at_max_depth(depth) => {
                let kind = self.chooser.choose_terminal(depth);
                debug!(depth, %kind, "maximum depth reached, drawing ornament instead of fork");
                Choice::Terminal(kind)
            }
            choice => choice,
        };

        match choice {
            Choice::Terminal(kind) => {
                self.ornament(kind);
                Node::Terminal(kind)
            }
            Choice::Fork => self.vee(depth + 1),
        }
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(false, |max| depth >= max.get())
    }

    /// Draws an ornament at the current pose, leaving the turtle where it was with the pen up
    fn ornament(&mut self, kind: ShapeKind) {
        trace!(%kind, "ornament");
        let tip = self.turtle.snapshot();
        let steps = self.geometry.ornament(kind, &tip);

        self.turtle.run(&steps);
        self.turtle.restore(tip);
        self.turtle.pen_up();

        self.ornaments += 1;
    }

    /// Returns the number of ornaments drawn so far
    pub fn ornament_count(&self) -> usize {
        self.ornaments
    }

    #[cfg(test)]
    pub fn turtle(&self) -> &Turtle<R> {
        &self.turtle
    }

    pub fn into_turtle(self) -> Turtle<R> {
        self.turtle
    }
}
