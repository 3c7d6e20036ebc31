//! Tests for the blocking-obstacle detection behind the sidepass rule.
//!
//! The detector has no public surface of its own; these tests observe it
//! through the state machine, which only leaves `Driving` for `Wait` when
//! a blocking obstacle was found while the vehicle is stopped.

use sidepass_rule::{
    math::Point2d, Clock, Obstacle, ObstacleId, PathDecision, ReferenceLineInfo, RouteKind,
    SidepassState, SidepassStatus, SidepassVehicle, SlBoundary, TrajectoryPoint,
};

/// A clock frozen at a fixed instant; the detector itself is timeless.
struct FrozenClock(f64);

impl Clock for FrozenClock {
    fn now_in_seconds(&self) -> f64 {
        self.0
    }
}

/// The ego vehicle's extent used throughout: `s = [0, 5]`, centred laterally.
const ADC_END_S: f64 = 5.0;

/// Runs two cycles of the rule over a stopped vehicle facing the given
/// obstacles and reports whether any of them was judged blocking.
fn detects_blockage(obstacles: Vec<Obstacle>) -> (bool, Option<ObstacleId>) {
    let mut path_decision = PathDecision::new();
    for obstacle in obstacles {
        path_decision.add_obstacle(obstacle);
    }
    let mut info = ReferenceLineInfo::new(
        RouteKind::LaneKeeping,
        SlBoundary::new(0.0, ADC_END_S, -1.0, 1.0),
        TrajectoryPoint::stationary(Point2d::new(0.0, 0.0)),
        path_decision,
    );

    let rule = SidepassVehicle::default();
    let clock = FrozenClock(0.0);
    let mut state = SidepassState::new();
    rule.apply_rule(&mut info, &mut state, &clock);
    rule.apply_rule(&mut info, &mut state, &clock);

    (state.status() == SidepassStatus::Wait, state.obstacle_id())
}

#[test]
fn static_obstacle_ahead_in_band_is_blocking() {
    let (blocked, id) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 5.0,
        ADC_END_S + 9.0,
        -0.5,
        0.5,
    ))]);
    assert!(blocked);
    assert!(id.is_some());
}

#[test]
fn dynamic_obstacle_is_ignored() {
    let (blocked, _) = detects_blockage(vec![Obstacle::new_dynamic(SlBoundary::new(
        ADC_END_S + 5.0,
        ADC_END_S + 9.0,
        -0.5,
        0.5,
    ))]);
    assert!(!blocked);
}

#[test]
fn virtual_obstacle_is_ignored() {
    let (blocked, _) = detects_blockage(vec![Obstacle::new_virtual(SlBoundary::new(
        ADC_END_S + 5.0,
        ADC_END_S + 9.0,
        -0.5,
        0.5,
    ))]);
    assert!(!blocked);
}

#[test]
fn obstacle_outside_lateral_band_is_ignored() {
    let (blocked, _) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 5.0,
        ADC_END_S + 9.0,
        1.5,
        2.5,
    ))]);
    assert!(!blocked);
}

#[test]
fn obstacle_touching_the_band_edge_is_blocking() {
    let (blocked, _) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 5.0,
        ADC_END_S + 9.0,
        1.0,
        2.0,
    ))]);
    assert!(blocked);
}

#[test]
fn obstacle_behind_or_alongside_is_ignored() {
    // Overlapping the vehicle longitudinally.
    let (blocked, _) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        ADC_END_S - 2.0,
        ADC_END_S + 2.0,
        -0.5,
        0.5,
    ))]);
    assert!(!blocked);

    // Fully behind.
    let (blocked, _) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        -10.0, -6.0, -0.5, 0.5,
    ))]);
    assert!(!blocked);
}

#[test]
fn obstacle_beyond_the_distance_horizon_is_ignored() {
    let (blocked, _) = detects_blockage(vec![Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 20.0,
        ADC_END_S + 24.0,
        -0.5,
        0.5,
    ))]);
    assert!(!blocked);
}

#[test]
fn first_qualifying_obstacle_in_catalog_order_wins() {
    let near = Obstacle::new_static(SlBoundary::new(ADC_END_S + 8.0, ADC_END_S + 10.0, -0.5, 0.5));
    let far = Obstacle::new_static(SlBoundary::new(ADC_END_S + 2.0, ADC_END_S + 4.0, -0.5, 0.5));

    // Insertion order, not longitudinal order, decides the pick.
    let mut path_decision = PathDecision::new();
    let first = path_decision.add_obstacle(near);
    path_decision.add_obstacle(far);
    let mut info = ReferenceLineInfo::new(
        RouteKind::LaneKeeping,
        SlBoundary::new(0.0, ADC_END_S, -1.0, 1.0),
        TrajectoryPoint::stationary(Point2d::new(0.0, 0.0)),
        path_decision,
    );

    let rule = SidepassVehicle::default();
    let clock = FrozenClock(0.0);
    let mut state = SidepassState::new();
    rule.apply_rule(&mut info, &mut state, &clock);
    rule.apply_rule(&mut info, &mut state, &clock);

    assert_eq!(state.status(), SidepassStatus::Wait);
    assert_eq!(state.obstacle_id(), Some(first));
}

#[test]
fn shielded_candidate_is_still_reported_as_blocking() {
    // A second obstacle sits directly ahead of the candidate, covering its
    // lateral extent. Shielding is computed but deliberately not applied
    // (fragments of one large vehicle would otherwise mask each other), so
    // the candidate is still picked.
    let candidate = Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 2.0,
        ADC_END_S + 4.0,
        -0.5,
        0.5,
    ));
    let shield = Obstacle::new_static(SlBoundary::new(
        ADC_END_S + 8.0,
        ADC_END_S + 10.0,
        -0.6,
        0.6,
    ));

    let mut path_decision = PathDecision::new();
    let candidate_id = path_decision.add_obstacle(candidate);
    path_decision.add_obstacle(shield);
    let mut info = ReferenceLineInfo::new(
        RouteKind::LaneKeeping,
        SlBoundary::new(0.0, ADC_END_S, -1.0, 1.0),
        TrajectoryPoint::stationary(Point2d::new(0.0, 0.0)),
        path_decision,
    );

    let rule = SidepassVehicle::default();
    let clock = FrozenClock(0.0);
    let mut state = SidepassState::new();
    rule.apply_rule(&mut info, &mut state, &clock);
    rule.apply_rule(&mut info, &mut state, &clock);

    assert_eq!(state.status(), SidepassStatus::Wait);
    assert_eq!(state.obstacle_id(), Some(candidate_id));
}
