use crate::error::GraphError;

/// Per-vertex neighbor sets of an undirected vertex/edge graph.
///
/// Built once from a mesh's edge list and read-only afterwards, so the
/// traversal never touches a live mesh structure.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<u32>>,
}

impl Adjacency {
    /// Builds the adjacency mapping from an edge list.
    ///
    /// The mapping is symmetric: if `b` is a neighbor of `a`, then `a` is
    /// a neighbor of `b`. Vertices with no edges map to an empty neighbor
    /// set. Self-loops are skipped, and duplicate edges contribute a
    /// single neighbor entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge endpoint is not below `vertex_count`.
    pub fn from_edges(vertex_count: usize, edges: &[[u32; 2]]) -> Result<Self, GraphError> {
        for (index, &pair) in edges.iter().enumerate() {
            for vertex in pair {
                if vertex as usize >= vertex_count {
                    return Err(GraphError::EdgeOutOfRange {
                        index,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        let mut neighbors = vec![Vec::new(); vertex_count];
        for &[a, b] in edges {
            if a == b {
                continue;
            }
            // Symmetric by construction, so checking one side is enough.
            if !neighbors[a as usize].contains(&b) {
                neighbors[a as usize].push(b);
                neighbors[b as usize].push(a);
            }
        }
        Ok(Self { neighbors })
    }

    /// Returns the number of vertices in the graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the neighbors of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not below [`Adjacency::vertex_count`].
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        &self.neighbors[vertex as usize]
    }
}
