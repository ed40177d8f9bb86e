//! Per-frame scene assembly
//!
//! Reads the store after the step has finished; never mutates it.

use glam::Vec2;

use super::shapes::{BODY_SEGMENTS, BOUNDARY_SEGMENTS, CircleMesh};
use super::vertex::{Vertex, colors, rgba};
use crate::sim::BodyStore;

/// Outline width as a fraction of the boundary radius
const OUTLINE_FRACTION: f32 = 0.006;

/// Reusable geometry for drawing frames
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    boundary_radius: f32,
    body_mesh: CircleMesh,
    boundary_mesh: CircleMesh,
    vertices: Vec<Vertex>,
}

impl SceneBuilder {
    pub fn new(boundary_radius: f32) -> Self {
        Self {
            boundary_radius,
            body_mesh: CircleMesh::new(BODY_SEGMENTS),
            boundary_mesh: CircleMesh::new(BOUNDARY_SEGMENTS),
            vertices: Vec::new(),
        }
    }

    /// World-space vertices: boundary fill, outline, then bodies in store order
    pub fn build(&mut self, store: &BodyStore) -> &[Vertex] {
        self.vertices.clear();
        self.vertices.reserve(
            self.boundary_mesh.disk_vertex_count()
                + self.boundary_mesh.ring_vertex_count()
                + store.len() * self.body_mesh.disk_vertex_count(),
        );

        let r = self.boundary_radius;
        self.boundary_mesh
            .push_disk(&mut self.vertices, Vec2::ZERO, r, colors::BOUNDARY_FILL);
        self.boundary_mesh.push_ring(
            &mut self.vertices,
            Vec2::ZERO,
            r * (1.0 - OUTLINE_FRACTION),
            r,
            colors::BOUNDARY_OUTLINE,
        );

        for body in store {
            self.body_mesh
                .push_disk(&mut self.vertices, body.pos, body.radius, rgba(body.color));
        }

        &self.vertices
    }
}
