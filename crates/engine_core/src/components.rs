//! Common components and tags shared by the simulation crates.

use std::fmt;

/// Which collection an instance lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Behavior-driven creature with a state machine.
    Creature,
    /// Decorative set-piece; only queried for proximity.
    ScriptedVehicle,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Creature => "creature",
            Category::ScriptedVehicle => "scripted vehicle",
        }
    }
}

/// Behavior a creature can run. Each species permits a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorTag {
    /// Drift along a looping, time-parameterized path.
    Patrol,
    /// Chase the nearest other creature.
    Hunt,
    /// Slow forward walk with occasional random turns.
    Graze,
    Pack,
    Stalk,
    Defend,
}

impl BehaviorTag {
    pub const ALL: [BehaviorTag; 6] = [
        BehaviorTag::Patrol,
        BehaviorTag::Hunt,
        BehaviorTag::Graze,
        BehaviorTag::Pack,
        BehaviorTag::Stalk,
        BehaviorTag::Defend,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BehaviorTag::Patrol => "patrol",
            BehaviorTag::Hunt => "hunt",
            BehaviorTag::Graze => "graze",
            BehaviorTag::Pack => "pack",
            BehaviorTag::Stalk => "stalk",
            BehaviorTag::Defend => "defend",
        }
    }

    /// Parse a lowercase tag name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for BehaviorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Linear and angular speed of an instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// World units per second.
    pub speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
}

impl Motion {
    pub fn new(speed: f32, turn_speed: f32) -> Self {
        Self { speed, turn_speed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_names_roundtrip() {
        for tag in BehaviorTag::ALL {
            assert_eq!(BehaviorTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(BehaviorTag::from_name("fly"), None);
    }
}
