//! Dinosaurs and hovering spaceships for a host scene.
//!
//! The host owns the render loop: it calls [`VehicleSimulation::update`] with each
//! frame's delta, reads transforms back from the registry and plays the sound cues
//! reported by [`VehicleSimulation::drain_events`].

pub mod behavior;
pub mod config;
pub mod error;
pub mod events;
pub mod instance;
pub mod population;
pub mod proximity;
pub mod registry;
pub mod scene;
pub mod simulation;

pub use behavior::{BehaviorController, BehaviorSettings};
pub use config::SimConfig;
pub use error::SimError;
pub use events::SimEvent;
pub use instance::*;
pub use population::{starting_population, SpawnPlan};
pub use registry::VehicleRegistry;
pub use scene::{RecordingScene, SceneEntry, SceneGraph};
pub use simulation::{VehicleHandle, VehicleSimulation};
