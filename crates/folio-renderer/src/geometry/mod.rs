//! Triangle meshes for the scene solids and their wireframe edges.

mod edges;
mod polyhedra;
mod torus_knot;

pub use edges::wireframe_edges;
pub use polyhedra::{dodecahedron, icosahedron, octahedron};
pub use torus_knot::torus_knot;

use crate::matrix::Vec3;

/// An indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flattened line-list indices, one pair per unique edge.
    pub fn edge_indices(&self) -> Vec<u32> {
        wireframe_edges(&self.indices)
            .into_iter()
            .flat_map(|[a, b]| [a, b])
            .collect()
    }
}

/// The parametric solids the scene can show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
    Icosahedron { radius: f32 },
    Octahedron { radius: f32 },
    Dodecahedron { radius: f32 },
}

impl GeometryKind {
    pub fn build(&self) -> Mesh {
        match *self {
            GeometryKind::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot(radius, tube, tubular_segments, radial_segments, p, q),
            GeometryKind::Icosahedron { radius } => icosahedron(radius),
            GeometryKind::Octahedron { radius } => octahedron(radius),
            GeometryKind::Dodecahedron { radius } => dodecahedron(radius),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::TorusKnot { .. } => "torus-knot",
            GeometryKind::Icosahedron { .. } => "icosahedron",
            GeometryKind::Octahedron { .. } => "octahedron",
            GeometryKind::Dodecahedron { .. } => "dodecahedron",
        }
    }
}
