use crate::decision::PathDecision;
use crate::math::Point2d;
use crate::obstacle::SlBoundary;

/// The kind of route a reference line follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// The straight lane-keeping route.
    LaneKeeping,
    /// A route that departs the current lane (e.g. a lane change).
    LaneChange,
}

/// A point on the ego vehicle's planned trajectory.
#[derive(Clone, Copy, Debug)]
pub struct TrajectoryPoint {
    /// The world space coordinates of the point.
    pub pos: Point2d,
    /// The velocity at the point in m/s.
    pub v: f64,
}

impl TrajectoryPoint {
    /// Creates a stationary trajectory point at the given position.
    pub fn stationary(pos: Point2d) -> Self {
        Self { pos, v: 0.0 }
    }
}

/// One candidate route for the current planning cycle, together with the
/// ego vehicle's state projected onto it and this cycle's obstacle catalog.
pub struct ReferenceLineInfo {
    /// The kind of route.
    route: RouteKind,
    /// The ego vehicle's extent in the path-relative frame.
    adc_sl_boundary: SlBoundary,
    /// The ego vehicle's current trajectory point.
    adc_planning_point: TrajectoryPoint,
    /// The obstacle catalog and decision sink.
    path_decision: PathDecision,
}

impl ReferenceLineInfo {
    /// Creates a reference line for this cycle.
    pub fn new(
        route: RouteKind,
        adc_sl_boundary: SlBoundary,
        adc_planning_point: TrajectoryPoint,
        path_decision: PathDecision,
    ) -> Self {
        Self {
            route,
            adc_sl_boundary,
            adc_planning_point,
            path_decision,
        }
    }

    /// Whether this is the straight lane-keeping route.
    pub fn is_lane_keeping(&self) -> bool {
        self.route == RouteKind::LaneKeeping
    }

    /// The ego vehicle's extent in the path-relative frame.
    pub fn adc_sl_boundary(&self) -> &SlBoundary {
        &self.adc_sl_boundary
    }

    /// The ego vehicle's current trajectory point.
    pub fn adc_planning_point(&self) -> &TrajectoryPoint {
        &self.adc_planning_point
    }

    /// Gets the obstacle catalog.
    pub fn path_decision(&self) -> &PathDecision {
        &self.path_decision
    }

    /// Gets the obstacle catalog mutably.
    pub fn path_decision_mut(&mut self) -> &mut PathDecision {
        &mut self.path_decision
    }
}
