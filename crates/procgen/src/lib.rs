//! Procedural generation of creature and vehicle models and their skins.

pub mod model;
pub mod model_factory;
pub mod primitive;
pub mod textures;

pub use model::*;
pub use model_factory::*;
pub use primitive::*;
pub use textures::*;
