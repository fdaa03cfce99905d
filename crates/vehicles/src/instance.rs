//! Per-instance runtime state: identity, behavior timer, animation clips, sound cue.

use engine_core::{BehaviorTag, Category, Entity, Motion, TypeDescriptor};
use procgen::VisualNode;
use std::fmt;
use std::sync::Arc;

/// Identity of a live creature or vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub(crate) Entity);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vehicle #{}", self.0.id())
    }
}

/// Behavior state machine slot. `current` is `None` until the first re-roll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BehaviorState {
    pub current: Option<BehaviorTag>,
    /// Seconds since the last re-roll.
    pub time_since_change: f32,
}

/// Looping animation clip bound to a behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Loop length in seconds.
    pub duration: f32,
    time: f32,
    playing: bool,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            time: 0.0,
            playing: false,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop and rewind.
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Playback position in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.time += dt;
        if self.duration > 0.0 {
            self.time %= self.duration;
        }
    }
}

/// Clips an instance can play, keyed by behavior; at most one plays at a time.
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: Vec<(BehaviorTag, AnimationClip)>,
}

impl AnimationSet {
    /// Bind `clip` to `tag`, replacing any previous binding.
    pub fn bind(&mut self, tag: BehaviorTag, clip: AnimationClip) {
        match self.clips.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, slot)) => *slot = clip,
            None => self.clips.push((tag, clip)),
        }
    }

    pub fn clip(&self, tag: BehaviorTag) -> Option<&AnimationClip> {
        self.clips.iter().find(|(t, _)| *t == tag).map(|(_, c)| c)
    }

    /// The clip currently playing, if any.
    pub fn active(&self) -> Option<&AnimationClip> {
        self.clips.iter().map(|(_, c)| c).find(|c| c.is_playing())
    }

    /// Stop every clip, then start the one bound to `tag`.
    /// Returns whether a clip was found for `tag`.
    pub fn switch_to(&mut self, tag: BehaviorTag) -> bool {
        for (_, clip) in &mut self.clips {
            clip.stop();
        }
        match self.clips.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, clip)) => {
                clip.play();
                true
            }
            None => false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        for (_, clip) in &mut self.clips {
            clip.advance(dt);
        }
    }
}

/// Positional audio cue played on some behavior changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub name: String,
    /// Probability of playing on each behavior change.
    pub chance: f32,
}

impl SoundCue {
    pub fn new(name: impl Into<String>, chance: f32) -> Self {
        Self {
            name: name.into(),
            chance: chance.clamp(0.0, 1.0),
        }
    }
}

/// One live creature or vehicle. The world transform is stored next to it as
/// its own component so the renderer can query transforms alone.
#[derive(Debug, Clone)]
pub struct VehicleInstance {
    pub descriptor: Arc<TypeDescriptor>,
    /// Display name: the species, or the ship role.
    pub role: String,
    pub node: VisualNode,
    pub motion: Motion,
    pub behavior: BehaviorState,
    pub animations: AnimationSet,
    pub sound: Option<SoundCue>,
}

impl VehicleInstance {
    pub fn new(descriptor: Arc<TypeDescriptor>, node: VisualNode) -> Self {
        Self {
            role: descriptor.name.clone(),
            motion: descriptor.motion(),
            descriptor,
            node,
            behavior: BehaviorState::default(),
            animations: AnimationSet::default(),
            sound: None,
        }
    }

    pub fn category(&self) -> Category {
        self.descriptor.category
    }

    /// Whether the current behavior, if any, is permitted for the species.
    pub fn behavior_is_permitted(&self) -> bool {
        self.behavior
            .current
            .map_or(true, |tag| self.descriptor.permits(tag))
    }
}
