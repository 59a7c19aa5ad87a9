//! Pure geometry: mitre lengths, the fabrication angle convention, and ornament outlines
//!
//! Nothing in here touches a turtle. Outlines are returned as lists of [`Step`]s that the caller
//! runs from the tip of a branch.

use crate::config::TreeConfig;
use crate::float::{self, cos_deg, sin_deg};
use crate::render::{Arc, Ink};
use crate::turtle::{Step, TurtleState};
use crate::{Float, Point};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Sweep of the donut's inner ring. Just short of a full turn, so that sinks which treat equal
/// start and end angles as empty still draw it.
const FULL_RING_EXTENT: Float = 359.999;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The included angle between forked branches has no usable mitre
    #[error("branch angle {angle}° must be strictly between 0° and 180°")]
    DegenerateAngle { angle: Float },
    #[error("`{name}` must be positive and finite (got {value})")]
    NonPositive { name: &'static str, value: Float },
    /// The circle ornaments need room for the branch to enter them
    #[error("branch width {width} does not fit inside a circle ornament of radius {radius}")]
    BranchTooWide { width: Float, radius: Float },
}

/// Returns the distance by which the inner edge of a forked branch is shortened, so that the two
/// arms of a fork meet flush
///
/// With `s = w·cos(a/2) − w/2`, the mitre is `s / sin(a/2)`. Only angles strictly between 0° and
/// 180° are accepted.
pub fn mitre_length(branch_width: Float, branch_angle: Float) -> Result<Float, GeometryError> {
    if !(branch_angle > 0.0 && branch_angle < 180.0) {
        return Err(GeometryError::DegenerateAngle {
            angle: branch_angle,
        });
    }

    let half = branch_angle / 2.0;
    let denominator = sin_deg(half);
    if denominator == 0.0 {
        return Err(GeometryError::DegenerateAngle {
            angle: branch_angle,
        });
    }

    let s = branch_width * cos_deg(half) - branch_width / 2.0;
    Ok(s / denominator)
}

/// Converts an arc start angle on the preview surface into the fabrication file's convention
///
/// The fabrication sink winds the other way and its origin doesn't follow the turtle's turns, so
/// this is `draw_angle − 2·heading`. It is only valid when `heading` is the heading that was used
/// to compute `draw_angle`, and for arcs symmetric about that heading (which all ornament arcs
/// are).
pub fn fabrication_angle(draw_angle: Float, heading: Float) -> Float {
    draw_angle - 2.0 * heading
}

/// The terminal ornaments that can be drawn at the tip of a branch
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Diamond,
    Donut,
    Circle,
    Square,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Diamond,
        ShapeKind::Donut,
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Hexagon,
    ];
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ShapeKind::Diamond => "diamond",
            ShapeKind::Donut => "donut",
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Hexagon => "hexagon",
        };
        f.write_str(name)
    }
}

/// Validated dimensions of the tree, fixed for the duration of a run
///
/// The mitre is computed once here, so that a bad angle is reported at startup rather than at the
/// first fork.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeGeometry {
    pub branch_width: Float,
    pub branch_length: Float,
    /// Included angle between the two arms of a fork, in degrees
    pub branch_angle: Float,
    pub mitre: Float,
    pub circle_radius: Float,
    pub donut_inner_radius: Float,
}

impl TreeGeometry {
    pub fn new(config: &TreeConfig) -> Result<Self, GeometryError> {
        let positive = |name, value: Float| match value.is_finite() && value > 0.0 {
            true => Ok(value),
            false => Err(GeometryError::NonPositive { name, value }),
        };

        let branch_width = positive("branch_width", config.branch_width)?;
        let branch_length = positive("branch_length", config.branch_length)?;
        let circle_radius = positive("circle_radius", config.circle_radius)?;
        let donut_inner_radius = positive("donut_inner_radius", config.donut_inner_radius)?;

        if branch_width >= 2.0 * circle_radius {
            return Err(GeometryError::BranchTooWide {
                width: branch_width,
                radius: circle_radius,
            });
        }

        Ok(TreeGeometry {
            branch_width,
            branch_length,
            branch_angle: config.branch_angle,
            mitre: mitre_length(branch_width, config.branch_angle)?,
            circle_radius,
            donut_inner_radius,
        })
    }

    /// Returns the outline of the ornament, to be run from the tip of a branch with pose `tip`
    ///
    /// The pen is raised at the start and end of every outline. Arcs are computed from `tip`, so
    /// the steps are only valid for a turtle in exactly that pose.
    pub fn ornament(&self, kind: ShapeKind, tip: &TurtleState) -> Vec<Step> {
        match kind {
            ShapeKind::Diamond => diamond(self.branch_width),
            ShapeKind::Donut => donut(
                tip,
                self.circle_radius,
                self.donut_inner_radius,
                self.branch_width,
            ),
            ShapeKind::Circle => circle(tip, self.circle_radius, self.branch_width),
            ShapeKind::Square => square(self.branch_width),
            ShapeKind::Hexagon => hexagon(self.branch_width),
        }
    }
}

/// Steps from the branch tip centre to its left edge, then lowers the pen
fn to_left_edge(branch_width: Float) -> [Step; 4] {
    [
        Step::PenUp,
        Step::Turn(-90.0),
        Step::Forward(branch_width / 2.0),
        Step::PenDown,
    ]
}

/// A square of side `5w`, entered through a gap of width `w` in the middle of one side
pub fn square(branch_width: Float) -> Vec<Step> {
    let w = branch_width;
    let mut steps = to_left_edge(w).to_vec();

    steps.push(Step::Forward(w * 2.0));
    for _ in 0..3 {
        steps.push(Step::Turn(90.0));
        steps.push(Step::Forward(w * 5.0));
    }
    steps.push(Step::Turn(90.0));
    steps.push(Step::Forward(w * 2.0));
    steps.push(Step::PenUp);

    steps
}

/// A square of side `5w` stood on one corner, with the corner cut off where the branch enters
pub fn diamond(branch_width: Float) -> Vec<Step> {
    let w = branch_width;
    let subtract = float::SQRT_2 * w;
    let side = 5.0 * w;

    let mut steps = to_left_edge(w).to_vec();
    steps.extend_from_slice(&[
        Step::Turn(45.0),
        Step::Forward(side - subtract),
        Step::Turn(90.0),
        Step::Forward(side - subtract / 2.0),
        Step::Turn(90.0),
        Step::Forward(side - subtract / 2.0),
        Step::Turn(90.0),
        Step::Forward(side - subtract),
        Step::PenUp,
    ]);

    steps
}

/// A regular hexagon of side `3w`, entered through a gap of width `w` in the middle of one side
pub fn hexagon(branch_width: Float) -> Vec<Step> {
    let w = branch_width;
    let side = 3.0 * w;
    let half_side = 0.5 * side - 0.5 * w;

    let mut steps = to_left_edge(w).to_vec();
    steps.push(Step::Forward(half_side));
    for _ in 0..5 {
        steps.push(Step::Turn(60.0));
        steps.push(Step::Forward(side));
    }
    steps.push(Step::Turn(60.0));
    steps.push(Step::Forward(half_side));
    steps.push(Step::PenUp);

    steps
}

/// The arc of the circle ornament: a circle of `radius` sitting just ahead of the tip, notched
/// where the branch enters
fn notched_arc(tip: &TurtleState, radius: Float, branch_width: Float) -> Arc {
    let notch = (branch_width / (radius * 2.0)).asin().to_degrees();

    Arc {
        center: tip.pos + radius * Point::from_heading(tip.heading),
        radius,
        start: tip.heading + 180.0 + notch,
        extent: 360.0 - notch * 2.0,
        ink: Ink::Blue,
    }
}

pub fn circle(tip: &TurtleState, radius: Float, branch_width: Float) -> Vec<Step> {
    vec![
        Step::PenDown,
        Step::Arc(notched_arc(tip, radius, branch_width)),
        Step::PenUp,
    ]
}

/// The circle ornament with an extra, concentric inner ring in red
pub fn donut(
    tip: &TurtleState,
    outer_radius: Float,
    inner_radius: Float,
    branch_width: Float,
) -> Vec<Step> {
    let outer = notched_arc(tip, outer_radius, branch_width);
    let inner = Arc {
        radius: inner_radius,
        start: 0.0,
        extent: FULL_RING_EXTENT,
        ink: Ink::Red,
        ..outer
    };

    vec![
        Step::PenDown,
        Step::Arc(outer),
        Step::Arc(inner),
        Step::PenUp,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Recording;
    use crate::turtle::Turtle;

    fn tip_turtle() -> Turtle<Recording> {
        let mut t = Turtle::new(Recording::default(), Point { x: 100.0, y: 100.0 });
        t.turn(-90.0);
        t.pen_up();
        t
    }

    #[test]
    fn mitre_for_default_tree() {
        let mitre = mitre_length(10.0, 70.0).unwrap();
        assert!((mitre - 5.564246089315654).abs() < 1e-6, "got {}", mitre);
    }

    #[test]
    fn mitre_rejects_degenerate_angles() {
        for &angle in &[0.0, 180.0, 360.0, -70.0, Float::NAN] {
            match mitre_length(10.0, angle) {
                Err(GeometryError::DegenerateAngle { .. }) => (),
                other => panic!("angle {}: expected DegenerateAngle, got {:?}", angle, other),
            }
        }
    }

    #[test]
    fn right_angle_fork_has_negative_mitre() {
        // At 90° the outer corner extends past the centreline, so the inner edge starts *behind* it
        let mitre = mitre_length(10.0, 90.0).unwrap();
        let expected = (10.0 * cos_deg(45.0) - 5.0) / sin_deg(45.0);
        assert!((mitre - expected).abs() < 1e-12);
    }

    #[test]
    fn fabrication_angle_subtracts_twice_heading() {
        assert_eq!(fabrication_angle(280.0, 90.0), 100.0);
        assert_eq!(fabrication_angle(0.0, 0.0), 0.0);
        assert_eq!(fabrication_angle(45.0, -10.0), 65.0);
    }

    #[test]
    fn geometry_rejects_bad_config() {
        let mut config = TreeConfig::default();
        config.branch_angle = 180.0;
        assert!(matches!(
            TreeGeometry::new(&config),
            Err(GeometryError::DegenerateAngle { .. })
        ));

        let mut config = TreeConfig::default();
        config.branch_length = 0.0;
        assert!(matches!(
            TreeGeometry::new(&config),
            Err(GeometryError::NonPositive { name: "branch_length", .. })
        ));

        let mut config = TreeConfig::default();
        config.branch_width = 64.0;
        assert!(matches!(
            TreeGeometry::new(&config),
            Err(GeometryError::BranchTooWide { .. })
        ));
    }

    /// Runs the outline from a branch tip pointing up at (100, 100) and checks that it starts on
    /// the tip's left edge and finishes on its right edge
    fn check_open_outline(steps: &[Step], expected_lines: usize) {
        let mut t = tip_turtle();
        t.run(steps);

        let lines = t.renderer().lines();
        assert_eq!(lines.len(), expected_lines);
        assert!(lines[0].from.approx_eq(Point { x: 95.0, y: 100.0 }, 1e-9));
        assert!(
            lines[lines.len() - 1].to.approx_eq(Point { x: 105.0, y: 100.0 }, 1e-9),
            "ended at {:?}",
            lines[lines.len() - 1].to
        );

        // continuous path
        for pair in lines.windows(2) {
            assert!(pair[0].to.approx_eq(pair[1].from, 1e-9));
        }
        assert!(!t.state().pen_down);
    }

    #[test]
    fn square_outline() {
        check_open_outline(&square(10.0), 5);
    }

    #[test]
    fn diamond_outline() {
        check_open_outline(&diamond(10.0), 4);
    }

    #[test]
    fn hexagon_outline() {
        let steps = hexagon(10.0);
        check_open_outline(&steps, 7);

        let mut t = tip_turtle();
        t.run(&steps);
        let lines = t.renderer().lines();
        for side in &lines[1..6] {
            assert!((side.length() - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn circle_is_notched_around_the_branch() {
        let mut t = tip_turtle();
        let tip = *t.state();
        t.run(&circle(&tip, 32.0, 10.0));

        let arcs = t.renderer().arcs();
        assert_eq!(arcs.len(), 1);
        let arc = arcs[0];

        assert!(arc.center.approx_eq(Point { x: 100.0, y: 68.0 }, 1e-9));
        // the gap in the arc is centred on the way back down the branch (270°)
        assert!((arc.start - (270.0 + 8.989299345162808)).abs() < 1e-9);
        assert!((arc.start + arc.extent - 360.0 - (270.0 - 8.989299345162808)).abs() < 1e-9);

        // the arc starts on the right edge of the branch
        let start = arc.center + arc.radius * Point::from_heading(arc.start);
        assert!((start.x - 105.0).abs() < 1e-9);
        assert!(!t.state().pen_down);
        assert!(t.state().pos.approx_eq(tip.pos, 1e-12));
    }

    #[test]
    fn donut_has_inner_ring() {
        let tip = *tip_turtle().state();
        let steps = donut(&tip, 32.0, 22.0, 10.0);

        let arcs: Vec<Arc> = steps
            .iter()
            .filter_map(|s| match s {
                Step::Arc(a) => Some(*a),
                _ => None,
            })
            .collect();

        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].center, arcs[1].center);
        assert_eq!(arcs[1].radius, 22.0);
        assert_eq!(arcs[1].ink, Ink::Red);
        assert_eq!(steps.first(), Some(&Step::PenDown));
        assert_eq!(steps.last(), Some(&Step::PenUp));
    }
}
