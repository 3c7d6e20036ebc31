use crate::util::Interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The extent of an obstacle or of the ego vehicle in the path-relative
/// ("SL") frame: `s` is the longitudinal distance along the route,
/// `l` the lateral offset from the route centre line.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlBoundary {
    /// The longitudinal extent in m.
    pub s: Interval<f64>,
    /// The lateral extent in m.
    pub l: Interval<f64>,
}

impl SlBoundary {
    /// Creates a boundary from its four edges.
    pub const fn new(start_s: f64, end_s: f64, start_l: f64, end_l: f64) -> Self {
        Self {
            s: Interval::new(start_s, end_s),
            l: Interval::new(start_l, end_l),
        }
    }

    /// The near (rearmost) longitudinal edge in m.
    pub fn start_s(&self) -> f64 {
        self.s.min
    }

    /// The far (foremost) longitudinal edge in m.
    pub fn end_s(&self) -> f64 {
        self.s.max
    }

    /// The right lateral edge in m.
    pub fn start_l(&self) -> f64 {
        self.l.min
    }

    /// The left lateral edge in m.
    pub fn end_l(&self) -> f64 {
        self.l.max
    }
}

/// A perceived obstacle, as reported for the current planning cycle.
#[derive(Clone, Debug)]
pub struct Obstacle {
    /// The obstacle's extent in the path-relative frame.
    perception_sl: SlBoundary,
    /// Whether the obstacle is stationary.
    is_static: bool,
    /// Whether the obstacle is virtual (e.g. a stop fence),
    /// as opposed to a physically perceived object.
    is_virtual: bool,
}

impl Obstacle {
    /// Creates a static, non-virtual obstacle.
    pub fn new_static(perception_sl: SlBoundary) -> Self {
        Self {
            perception_sl,
            is_static: true,
            is_virtual: false,
        }
    }

    /// Creates a moving obstacle.
    pub fn new_dynamic(perception_sl: SlBoundary) -> Self {
        Self {
            perception_sl,
            is_static: false,
            is_virtual: false,
        }
    }

    /// Creates a virtual obstacle.
    pub fn new_virtual(perception_sl: SlBoundary) -> Self {
        Self {
            perception_sl,
            is_static: true,
            is_virtual: true,
        }
    }

    /// The obstacle's extent in the path-relative frame.
    pub fn perception_sl_boundary(&self) -> &SlBoundary {
        &self.perception_sl
    }

    /// Whether the obstacle is stationary.
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Whether the obstacle is virtual.
    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }
}
