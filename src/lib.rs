pub use cgmath;
pub use clock::{Clock, SystemClock};
pub use decision::{LateralDecision, ObjectDecision, PathDecision};
pub use obstacle::{Obstacle, SlBoundary};
pub use reference_line::{ReferenceLineInfo, RouteKind, TrajectoryPoint};
pub use rule::{SidepassConfig, SidepassState, SidepassStatus, SidepassVehicle};
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;

mod clock;
mod decision;
pub mod math;
mod obstacle;
mod reference_line;
mod rule;
mod util;

new_key_type! {
    /// Unique ID of an [Obstacle].
    pub struct ObstacleId;
}

type ObstacleSet = SlotMap<ObstacleId, Obstacle>;
