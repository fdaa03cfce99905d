//! Notifications produced during updates for the host to act on.

use engine_core::BehaviorTag;
use glam::Vec3;
use std::fmt;

use crate::instance::VehicleId;

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    BehaviorChanged {
        id: VehicleId,
        from: Option<BehaviorTag>,
        to: BehaviorTag,
    },
    /// Play `cue` at `position`.
    SoundTriggered {
        id: VehicleId,
        cue: String,
        position: Vec3,
    },
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::BehaviorChanged { id, from: Some(from), to } => {
                write!(f, "{id}: {from} -> {to}")
            }
            SimEvent::BehaviorChanged { id, from: None, to } => write!(f, "{id}: starts {to}"),
            SimEvent::SoundTriggered { id, cue, position } => {
                write!(f, "{id}: sound '{cue}' at ({:.1}, {:.1}, {:.1})", position.x, position.y, position.z)
            }
        }
    }
}
