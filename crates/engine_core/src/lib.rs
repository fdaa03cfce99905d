//! Core types shared by the vehicle simulation crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform and spatial components
//! - Simulation clock driven by host-supplied frame deltas
//! - Behavior tags, categories and motion parameters
//! - The static type catalog of species and vehicle roles

pub mod catalog;
pub mod components;
pub mod time;
pub mod transform;

pub use catalog::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
