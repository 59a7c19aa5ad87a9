//! The base stand that the tree slots into
//!
//! Both variants are outlines with two slots for crossing pieces, drawn from the top middle and
//! left open where the trunk attaches. They finish with the turtle centred on that
//! gap, pointing up, with the pen raised.

use crate::config::TreeConfig;
use crate::turtle::Step;
use crate::Float;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which stand outline to draw
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StandType {
    /// The shorter stand, with its slots near the middle
    A,
    /// The longer stand, with its slots near the ends
    B,
}

impl StandType {
    pub const NAMES: [&'static str; 2] = ["A", "B"];
}

impl FromStr for StandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "A" => Ok(StandType::A),
            "B" => Ok(StandType::B),
            _ => Err(String::from("Standtype must be \"A\" or \"B\"")),
        }
    }
}

impl Display for StandType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StandType::A => f.write_str("A"),
            StandType::B => f.write_str("B"),
        }
    }
}

/// The lengths a stand is built from, in pixels
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StandDims {
    /// The basic unit of length; see [`TreeConfig::stand_unit`]
    pub stand_unit: Float,
    /// Width of a slot, equal to one material thickness once scaled
    pub slot_unit: Float,
    pub branch_width: Float,
}

impl StandDims {
    pub fn from_config(config: &TreeConfig) -> Self {
        StandDims {
            stand_unit: config.stand_unit(),
            slot_unit: config.slot_unit(),
            branch_width: config.branch_width,
        }
    }
}

/// Returns the steps for the chosen stand outline, starting from a turtle with heading 0
pub fn outline(stand: StandType, dims: StandDims) -> Vec<Step> {
    let StandDims {
        stand_unit: su,
        slot_unit: sl,
        branch_width: w,
    } = dims;

    use Step::{Forward as F, Turn as T};

    let mut steps = vec![Step::PenDown, T(-180.0)];

    #[rustfmt::skip]
    let path = match stand {
        StandType::A => vec![
            F(su * 9.0 + sl),
            T(-90.0), F(su * 3.0),
            T(90.0), F(su * 5.0),
            T(-90.0), F(su * 2.0),
            T(-90.0), F(su * 8.0),
            // first slot
            T(-90.0), F(su * 3.0),
            T(90.0), F(sl),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 6.0), F(w), F(su * 6.0),
            // second slot
            T(-90.0), F(su * 3.0),
            T(90.0), F(sl),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 8.0),
            T(-90.0), F(su * 2.0),
            T(-90.0), F(su * 5.0),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 9.0 + sl),
        ],
        StandType::B => vec![
            F(su * 6.0),
            // first slot
            T(-90.0), F(su * 3.0),
            T(90.0), F(sl),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 3.0),
            T(-90.0), F(su * 3.0),
            T(90.0), F(su * 5.0),
            T(-90.0), F(su * 2.0),
            T(-90.0), F(su * 14.0), F(w + 2.0 * sl), F(su * 14.0),
            T(-90.0), F(su * 2.0),
            T(-90.0), F(su * 5.0),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 3.0),
            // second slot
            T(-90.0), F(su * 3.0),
            T(90.0), F(sl),
            T(90.0), F(su * 3.0),
            T(-90.0), F(su * 6.0),
        ],
    };
    steps.extend(path);

    // step into the middle of the trunk's gap and face up
    steps.extend_from_slice(&[Step::PenUp, F(w / 2.0), T(90.0)]);
    steps
}
