//! Minimal scene graph.
//!
//! The scene holds shared references to the point clouds it renders. A field
//! swaps its node out when it rebuilds, so the renderer never sees a cloud
//! whose backing points were already replaced.

use std::sync::Arc;

use crate::field::PointCloud;

/// A named renderable in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub cloud: Arc<PointCloud>,
}

/// Ordered collection of renderables.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a renderable at the end of the draw order.
    pub fn add(&mut self, name: impl Into<String>, cloud: Arc<PointCloud>) {
        self.nodes.push(SceneNode {
            name: name.into(),
            cloud,
        });
    }

    /// Remove the first node with `name`, returning its cloud.
    pub fn remove(&mut self, name: &str) -> Option<Arc<PointCloud>> {
        let index = self.nodes.iter().position(|n| n.name == name)?;
        Some(self.nodes.remove(index).cloud)
    }

    /// Cloud of the first node with `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<PointCloud>> {
        self.nodes.iter().find(|n| n.name == name).map(|n| &n.cloud)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
