use std::f32::consts::TAU;

use super::Mesh;
use crate::matrix::{add, cross, normalize, scale, sub, Vec3};

/// A (p, q) torus knot swept by a circular tube.
///
/// Produces `(tubular + 1) * (radial + 1)` vertices; the seam vertices are
/// duplicated so each ring is closed.
pub fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32) -> Mesh {
    let tubular = tubular.max(3);
    let radial = radial.max(3);
    let (pf, qf) = (p.max(1) as f32, q as f32);

    let mut positions = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = curve_point(u, pf, qf, radius);
        let p2 = curve_point(u + 0.01, pf, qf, radius);

        // Frame along the curve
        let t = sub(p2, p1);
        let n = add(p2, p1);
        let b = normalize(cross(t, n));
        let n = normalize(cross(b, t));

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            positions.push(add(p1, add(scale(n, cx), scale(b, cy))));
        }
    }

    let stride = radial + 1;
    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Mesh { positions, indices }
}

fn curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let cu = u.cos();
    let su = u.sin();
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    [
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::length;

    #[test]
    fn vertex_and_triangle_counts() {
        let mesh = torus_knot(4.0, 1.2, 100, 16, 2, 3);
        assert_eq!(mesh.positions.len(), 101 * 17);
        assert_eq!(mesh.triangle_count(), 100 * 16 * 2);
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.positions.len()));
    }

    #[test]
    fn tube_surrounds_curve() {
        let mesh = torus_knot(4.0, 1.2, 100, 16, 2, 3);
        let center = curve_point(0.0, 2.0, 3.0, 4.0);
        for v in &mesh.positions[..17] {
            assert!((length(sub(*v, center)) - 1.2).abs() < 1e-3);
        }
    }

    #[test]
    fn bounded_by_radius_and_tube() {
        let mesh = torus_knot(4.0, 1.2, 100, 16, 2, 3);
        // Curve radius peaks at 1.5 * radius
        assert!(mesh.positions.iter().all(|p| length(*p) <= 6.0 + 1.2 + 1e-3));
    }
}
