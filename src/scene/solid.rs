//! Static solid geometry
//!
//! Flat reference-by-index tables; nothing here changes at runtime.

use crate::rasterizer::{Color, Vec3};

/// A quadrilateral face: four vertex indices and a base color.
///
/// Indices are wound so that `(v1 - v0) x (v2 - v0)` points out of the solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub indices: [usize; 4],
    pub color: Color,
}

impl Quad {
    pub const fn new(indices: [usize; 4], color: Color) -> Self {
        Self { indices, color }
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.indices.contains(&vertex)
    }

    /// The two triangles covering this quad, sharing the first vertex
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        let [a, b, c, d] = self.indices;
        [[a, b, c], [a, c, d]]
    }
}

/// An outline edge between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// A convex solid made of quads
#[derive(Debug)]
pub struct Solid {
    pub vertices: &'static [Vec3],
    pub faces: &'static [Quad],
    pub edges: &'static [Edge],
}

impl Solid {
    /// Number of the given faces that contain both endpoints of `edge`
    pub fn faces_sharing(&self, edge: Edge, visible: impl Iterator<Item = usize>) -> usize {
        visible
            .filter(|&f| {
                let quad = &self.faces[f];
                quad.contains(edge.a) && quad.contains(edge.b)
            })
            .count()
    }
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

const CUBE_FACES: [Quad; 6] = [
    Quad::new([0, 3, 2, 1], Color::new(255, 0, 128)), // back  (-Z)
    Quad::new([5, 6, 7, 4], Color::new(0, 128, 255)), // front (+Z)
    Quad::new([4, 7, 3, 0], Color::new(0, 255, 80)),  // left  (-X)
    Quad::new([1, 2, 6, 5], Color::new(255, 128, 0)), // right (+X)
    Quad::new([3, 7, 6, 2], Color::new(200, 0, 255)), // top   (+Y)
    Quad::new([4, 0, 1, 5], Color::new(255, 220, 0)), // bottom (-Y)
];

const CUBE_EDGES: [Edge; 12] = [
    Edge::new(0, 1),
    Edge::new(1, 2),
    Edge::new(2, 3),
    Edge::new(3, 0),
    Edge::new(4, 5),
    Edge::new(5, 6),
    Edge::new(6, 7),
    Edge::new(7, 4),
    Edge::new(0, 4),
    Edge::new(1, 5),
    Edge::new(2, 6),
    Edge::new(3, 7),
];

/// The 2x2x2 cube centered on the origin
pub static CUBE: Solid = Solid {
    vertices: &CUBE_VERTICES,
    faces: &CUBE_FACES,
    edges: &CUBE_EDGES,
};
