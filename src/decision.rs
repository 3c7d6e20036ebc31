use crate::obstacle::Obstacle;
use crate::{ObstacleId, ObstacleSet};
use slotmap::SecondaryMap;
use smallvec::SmallVec;

/// A lateral decision a traffic rule may attach to an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectDecision {
    /// Steer around the obstacle while staying on the current route.
    Sidepass,
}

/// A lateral decision together with the tag of the rule that made it.
#[derive(Clone, Debug)]
pub struct LateralDecision {
    /// The tag of the rule that attached the decision.
    pub tag: String,
    /// The decision itself.
    pub decision: ObjectDecision,
}

/// The catalog of obstacles perceived this cycle, and the sink for the
/// decisions the traffic rules attach to them.
///
/// Obstacles are iterated in insertion order, so rules that select the
/// first matching obstacle behave deterministically for a given snapshot.
#[derive(Default)]
pub struct PathDecision {
    /// The obstacles in the catalog.
    obstacles: ObstacleSet,
    /// The obstacle IDs in insertion order.
    order: Vec<ObstacleId>,
    /// The lateral decisions attached to each obstacle.
    lateral: SecondaryMap<ObstacleId, SmallVec<[LateralDecision; 2]>>,
}

impl PathDecision {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds an obstacle to the catalog.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        let id = self.obstacles.insert(obstacle);
        self.order.push(id);
        id
    }

    /// Gets a reference to the obstacle with the given ID.
    pub fn get_obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    /// Returns an iterator over all obstacles in insertion order.
    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.order.iter().map(|id| (*id, &self.obstacles[*id]))
    }

    /// Attaches a lateral decision to an obstacle.
    ///
    /// # Panics
    /// Panics if the obstacle is not in the catalog. A rule must only
    /// tag obstacles it found in this cycle's snapshot.
    pub fn add_lateral_decision(&mut self, tag: &str, id: ObstacleId, decision: ObjectDecision) {
        assert!(
            self.obstacles.contains_key(id),
            "lateral decision {:?} tagged {:?} references unknown obstacle {:?}",
            decision,
            tag,
            id
        );
        self.lateral
            .entry(id)
            .expect("obstacle key was checked above")
            .or_default()
            .push(LateralDecision {
                tag: tag.to_owned(),
                decision,
            });
    }

    /// Gets the lateral decisions attached to an obstacle.
    pub fn lateral_decisions(&self, id: ObstacleId) -> &[LateralDecision] {
        self.lateral.get(id).map(|d| d.as_slice()).unwrap_or(&[])
    }
}
