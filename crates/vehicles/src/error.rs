//! Simulation errors.

use engine_core::BehaviorTag;
use procgen::ModelError;
use thiserror::Error;

use crate::instance::VehicleId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0} is not in the registry")]
    UnknownVehicle(VehicleId),
    #[error("{id} ({species}) is in behavior '{tag}', which its species does not permit")]
    ForeignBehavior {
        id: VehicleId,
        species: String,
        tag: BehaviorTag,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}
