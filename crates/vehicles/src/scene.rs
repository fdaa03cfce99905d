//! Boundary to the host's scene graph.

use procgen::VisualNode;

use crate::instance::VehicleId;

/// Receives visual nodes as instances come and go.
pub trait SceneGraph {
    fn insert(&mut self, id: VehicleId, node: &VisualNode);
    fn remove(&mut self, id: VehicleId);
}

/// Scene entry kept by `RecordingScene`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    pub id: VehicleId,
    pub name: String,
    pub meshes: usize,
}

/// Headless scene that only records what is attached.
#[derive(Debug, Default)]
pub struct RecordingScene {
    entries: Vec<SceneEntry>,
    removed: usize,
}

impl RecordingScene {
    pub fn contains(&self, id: VehicleId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of nodes detached so far.
    pub fn removed(&self) -> usize {
        self.removed
    }
}

impl SceneGraph for RecordingScene {
    fn insert(&mut self, id: VehicleId, node: &VisualNode) {
        self.entries.push(SceneEntry {
            id,
            name: node.name.clone(),
            meshes: node.mesh_count(),
        });
    }

    fn remove(&mut self, id: VehicleId) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.removed += before - self.entries.len();
    }
}
