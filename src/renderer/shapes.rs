//! Shape generation for 2D primitives
//!
//! Every body is the same disk shifted, so the unit circle is computed once
//! and reused for the whole population.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segments per body disk
pub const BODY_SEGMENTS: usize = 32;
/// Segments for the boundary fill and outline
pub const BOUNDARY_SEGMENTS: usize = 100;

/// Precomputed points on the unit circle
#[derive(Debug, Clone)]
pub struct CircleMesh {
    points: Vec<Vec2>,
}

impl CircleMesh {
    /// `segments + 1` points, the last equal to the first (closed loop)
    pub fn new(segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..=segments)
            .map(|i| {
                let theta = TAU * i as f32 / segments as f32;
                Vec2::new(theta.cos(), theta.sin())
            })
            .collect();
        Self { points }
    }

    pub fn segments(&self) -> usize {
        self.points.len() - 1
    }

    /// Vertices a single `push_disk` call emits
    pub fn disk_vertex_count(&self) -> usize {
        self.segments() * 3
    }

    /// Vertices a single `push_ring` call emits
    pub fn ring_vertex_count(&self) -> usize {
        self.segments() * 6
    }

    /// Filled disk as a triangle list (fan unrolled)
    pub fn push_disk(&self, out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
        for pair in self.points.windows(2) {
            out.push(Vertex::at(center, color));
            out.push(Vertex::at(center + pair[0] * radius, color));
            out.push(Vertex::at(center + pair[1] * radius, color));
        }
    }

    /// Hollow ring between two radii (stands in for a line loop)
    pub fn push_ring(
        &self,
        out: &mut Vec<Vertex>,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        color: [f32; 4],
    ) {
        for pair in self.points.windows(2) {
            let inner1 = center + pair[0] * inner_radius;
            let outer1 = center + pair[0] * outer_radius;
            let inner2 = center + pair[1] * inner_radius;
            let outer2 = center + pair[1] * outer_radius;

            // Two triangles per segment
            out.push(Vertex::at(inner1, color));
            out.push(Vertex::at(outer1, color));
            out.push(Vertex::at(inner2, color));

            out.push(Vertex::at(inner2, color));
            out.push(Vertex::at(outer1, color));
            out.push(Vertex::at(outer2, color));
        }
    }
}
