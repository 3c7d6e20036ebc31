use crate::clock::Clock;
use crate::decision::{ObjectDecision, PathDecision};
use crate::obstacle::SlBoundary;
use crate::reference_line::{ReferenceLineInfo, TrajectoryPoint};
use crate::util::Interval;
use crate::ObstacleId;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The sidepass state machine, advanced once per planning cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SidepassStatus {
    /// The state before the first cycle.
    #[default]
    Unknown,
    /// Driving normally; no commitment to a sidepass.
    Driving,
    /// Stopped behind a blocking obstacle, waiting out the dwell period.
    Wait,
    /// Committed to sidepassing the blocking obstacle.
    Sidepass,
}

/// The rule's state that must survive across planning cycles.
///
/// The owner keeps one instance alive per vehicle session for the lifetime
/// of the planning process and passes it into [SidepassVehicle::apply_rule]
/// each cycle; the rule object itself holds no mutable state.
///
/// Invariants maintained by the rule:
/// * `wait_start` is present if and only if the status is [SidepassStatus::Wait].
/// * `obstacle_id` is present whenever the status is [SidepassStatus::Sidepass].
#[derive(Clone, Debug, Default)]
pub struct SidepassState {
    /// The current state machine status.
    status: SidepassStatus,
    /// The time at which the vehicle entered [SidepassStatus::Wait], in s.
    wait_start: Option<f64>,
    /// The obstacle most recently judged to be blocking the lane.
    obstacle_id: Option<ObstacleId>,
}

impl SidepassState {
    /// Creates the state for a fresh vehicle session.
    pub fn new() -> Self {
        Default::default()
    }

    /// The current state machine status.
    pub fn status(&self) -> SidepassStatus {
        self.status
    }

    /// The time at which the vehicle entered the wait state, in s.
    pub fn wait_start(&self) -> Option<f64> {
        self.wait_start
    }

    /// The obstacle most recently judged to be blocking the lane.
    pub fn obstacle_id(&self) -> Option<ObstacleId> {
        self.obstacle_id
    }
}

/// The tunable parameters of the sidepass rule.
#[derive(Clone, Copy, Debug)]
pub struct SidepassConfig {
    /// The speed below which the vehicle counts as stopped, in m/s.
    pub stop_speed_threshold: f64,
    /// The blockage duration required before committing to a sidepass, in s.
    pub wait_duration: f64,
    /// How far ahead of the vehicle an obstacle can be and still count
    /// as blocking, in m.
    pub distance_horizon: f64,
    /// The lateral band around the route centre line an obstacle must
    /// intrude on to count as blocking, in m.
    pub lateral_band: Interval<f64>,
}

impl Default for SidepassConfig {
    fn default() -> Self {
        Self {
            stop_speed_threshold: 0.1,
            wait_duration: 2.0,
            distance_horizon: 15.0,
            lateral_band: Interval::new(-1.0, 1.0),
        }
    }
}

/// A traffic rule that decides, once per planning cycle, whether the ego
/// vehicle should sidepass a stationary obstacle blocking its lane, and
/// tags the blocking obstacle with the resulting lateral decision.
pub struct SidepassVehicle {
    config: SidepassConfig,
}

impl SidepassVehicle {
    /// The tag under which this rule attaches its decisions.
    pub const TAG: &'static str = "sidepass_vehicle";

    /// Creates the rule with the given configuration.
    pub fn new(config: SidepassConfig) -> Self {
        Self { config }
    }

    /// Evaluates the rule for one planning cycle.
    ///
    /// The rule only runs on the lane-keeping route; alternative routes are
    /// left untouched. It is advisory and never fails the planning cycle,
    /// so this always returns `true`.
    pub fn apply_rule(
        &self,
        reference_line_info: &mut ReferenceLineInfo,
        state: &mut SidepassState,
        clock: &dyn Clock,
    ) -> bool {
        if reference_line_info.is_lane_keeping() {
            let adc_sl_boundary = *reference_line_info.adc_sl_boundary();
            let adc_planning_point = *reference_line_info.adc_planning_point();
            self.make_sidepass_obstacle_decision(
                &adc_sl_boundary,
                &adc_planning_point,
                reference_line_info.path_decision_mut(),
                state,
                clock,
            );
        }
        true
    }

    /// Advances the state machine, then emits the sidepass decision if the
    /// machine has committed to one.
    fn make_sidepass_obstacle_decision(
        &self,
        adc_sl_boundary: &SlBoundary,
        adc_planning_point: &TrajectoryPoint,
        path_decision: &mut PathDecision,
        state: &mut SidepassState,
        clock: &dyn Clock,
    ) {
        self.update_sidepass_status(adc_sl_boundary, adc_planning_point, path_decision, state, clock);
        debug!("sidepass status: {:?}", state.status);

        if state.status == SidepassStatus::Sidepass {
            let id = state
                .obstacle_id
                .expect("committed to a sidepass without a blocking obstacle id");
            path_decision.add_lateral_decision(Self::TAG, id, ObjectDecision::Sidepass);
        }
    }

    /// Runs one step of the state machine given this cycle's observations.
    fn update_sidepass_status(
        &self,
        adc_sl_boundary: &SlBoundary,
        adc_planning_point: &TrajectoryPoint,
        path_decision: &PathDecision,
        state: &mut SidepassState,
        clock: &dyn Clock,
    ) {
        let has_blocking_obstacle = self.find_blocking_obstacle(adc_sl_boundary, path_decision, state);

        match state.status {
            SidepassStatus::Unknown => {
                state.status = SidepassStatus::Driving;
            }
            SidepassStatus::Driving => {
                if has_blocking_obstacle && adc_planning_point.v < self.config.stop_speed_threshold {
                    state.status = SidepassStatus::Wait;
                    state.wait_start = Some(clock.now_in_seconds());
                }
            }
            SidepassStatus::Wait => {
                if has_blocking_obstacle {
                    let wait_start = state
                        .wait_start
                        .expect("in the wait state without a wait-start timestamp");
                    if clock.now_in_seconds() - wait_start > self.config.wait_duration {
                        state.status = SidepassStatus::Sidepass;
                        state.wait_start = None;
                    }
                } else {
                    state.status = SidepassStatus::Driving;
                    state.wait_start = None;
                }
            }
            SidepassStatus::Sidepass => {
                if !has_blocking_obstacle {
                    state.status = SidepassStatus::Driving;
                }
            }
        }
    }

    /// Scans the obstacle catalog for the first obstacle blocking forward
    /// travel, recording its ID in the state on success.
    ///
    /// The catalog's insertion order decides which obstacle is picked when
    /// several qualify.
    fn find_blocking_obstacle(
        &self,
        adc_sl_boundary: &SlBoundary,
        path_decision: &PathDecision,
        state: &mut SidepassState,
    ) -> bool {
        for (id, obstacle) in path_decision.obstacles() {
            if obstacle.is_virtual() || !obstacle.is_static() {
                continue;
            }
            let sl = obstacle.perception_sl_boundary();
            if sl.start_s() <= adc_sl_boundary.end_s() {
                // Behind or alongside the vehicle.
                continue;
            }
            if sl.start_s() > adc_sl_boundary.end_s() + self.config.distance_horizon {
                // Too far ahead to matter yet.
                continue;
            }
            if !sl.l.overlaps(&self.config.lateral_band) {
                continue;
            }

            // Upstream segmentation can split a large vehicle into fragments
            // that appear to shield one another, so the shielding result is
            // not yet allowed to suppress a candidate.
            // TODO: skip shielded candidates once segmentation is fixed.
            let _shielded = self.is_shielded_by_others(id, sl, path_decision);

            debug!("blocking obstacle {:?} ahead", id);
            state.obstacle_id = Some(id);
            return true;
        }
        false
    }

    /// Whether another obstacle sits directly ahead of the candidate,
    /// covering its lateral extent within the distance horizon.
    fn is_shielded_by_others(
        &self,
        candidate: ObstacleId,
        candidate_sl: &SlBoundary,
        path_decision: &PathDecision,
    ) -> bool {
        path_decision.obstacles().any(|(other_id, other)| {
            if other_id == candidate {
                return false;
            }
            let other_sl = other.perception_sl_boundary();
            if !other_sl.l.overlaps(&candidate_sl.l) {
                return false;
            }
            let delta_s = other_sl.start_s() - candidate_sl.end_s();
            (0.0..=self.config.distance_horizon).contains(&delta_s)
        })
    }
}

impl Default for SidepassVehicle {
    fn default() -> Self {
        Self::new(SidepassConfig::default())
    }
}
