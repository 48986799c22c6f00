use std::collections::HashSet;

/// Unique undirected edges of a triangle list, in first-seen order.
pub fn wireframe_edges(indices: &[u32]) -> Vec<[u32; 2]> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { [a, b] } else { [b, a] };
            if seen.insert(key) {
                edges.push(key);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_counted_once() {
        // Two triangles sharing edge 0-2
        let edges = wireframe_edges(&[0, 1, 2, 0, 2, 3]);
        assert_eq!(edges, vec![[0, 1], [1, 2], [0, 2], [2, 3], [0, 3]]);
    }

    #[test]
    fn trailing_partial_triangle_ignored() {
        assert_eq!(wireframe_edges(&[0, 1, 2, 3]).len(), 3);
    }
}
