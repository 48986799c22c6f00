//! Regular polyhedra (no subdivision), scaled to a circumradius.

use super::Mesh;
use crate::matrix::{normalize, scale, Vec3};

const PHI: f32 = 1.618_034;

fn from_table(vertices: &[f32], indices: &[u32], radius: f32) -> Mesh {
    Mesh {
        positions: vertices
            .chunks_exact(3)
            .map(|v| scale(normalize([v[0], v[1], v[2]]), radius))
            .collect::<Vec<Vec3>>(),
        indices: indices.to_vec(),
    }
}

pub fn icosahedron(radius: f32) -> Mesh {
    let t = PHI;
    #[rustfmt::skip]
    let vertices = [
        -1.0, t, 0.0,   1.0, t, 0.0,   -1.0, -t, 0.0,   1.0, -t, 0.0,
        0.0, -1.0, t,   0.0, 1.0, t,   0.0, -1.0, -t,   0.0, 1.0, -t,
        t, 0.0, -1.0,   t, 0.0, 1.0,   -t, 0.0, -1.0,   -t, 0.0, 1.0,
    ];
    #[rustfmt::skip]
    let indices = [
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];
    from_table(&vertices, &indices, radius)
}

pub fn octahedron(radius: f32) -> Mesh {
    #[rustfmt::skip]
    let vertices = [
        1.0, 0.0, 0.0,   -1.0, 0.0, 0.0,   0.0, 1.0, 0.0,
        0.0, -1.0, 0.0,  0.0, 0.0, 1.0,    0.0, 0.0, -1.0,
    ];
    #[rustfmt::skip]
    let indices = [
        0, 2, 4,   0, 4, 3,   0, 3, 5,   0, 5, 2,
        1, 2, 5,   1, 5, 3,   1, 3, 4,   1, 4, 2,
    ];
    from_table(&vertices, &indices, radius)
}

/// Twelve pentagons, each split into three triangles.
pub fn dodecahedron(radius: f32) -> Mesh {
    let t = PHI;
    let r = 1.0 / PHI;
    #[rustfmt::skip]
    let vertices = [
        -1.0, -1.0, -1.0,   -1.0, -1.0, 1.0,   -1.0, 1.0, -1.0,   -1.0, 1.0, 1.0,
        1.0, -1.0, -1.0,    1.0, -1.0, 1.0,    1.0, 1.0, -1.0,    1.0, 1.0, 1.0,
        0.0, -r, -t,   0.0, -r, t,   0.0, r, -t,   0.0, r, t,
        -r, -t, 0.0,   -r, t, 0.0,   r, -t, 0.0,   r, t, 0.0,
        -t, 0.0, -r,   t, 0.0, -r,   -t, 0.0, r,   t, 0.0, r,
    ];
    #[rustfmt::skip]
    let indices = [
        3, 11, 7,    3, 7, 15,    3, 15, 13,
        7, 19, 17,   7, 17, 6,    7, 6, 15,
        17, 4, 8,    17, 8, 10,   17, 10, 6,
        8, 0, 16,    8, 16, 2,    8, 2, 10,
        0, 12, 1,    0, 1, 18,    0, 18, 16,
        6, 10, 2,    6, 2, 13,    6, 13, 15,
        2, 16, 18,   2, 18, 3,    2, 3, 13,
        18, 1, 9,    18, 9, 11,   18, 11, 3,
        4, 14, 12,   4, 12, 0,    4, 0, 8,
        11, 9, 5,    11, 5, 19,   11, 19, 7,
        19, 5, 14,   19, 14, 4,   19, 4, 17,
        1, 12, 14,   1, 14, 5,    1, 5, 9,
    ];
    from_table(&vertices, &indices, radius)
}
