/// Per-vertex data of a skin skeleton.
///
/// Mirrors the host's skin-modifier vertex: two radii (X and Y of the
/// skin ellipse) and a root flag marking the skeleton's starting vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinVertex {
    /// Skin radii along the local X and Y axes.
    pub radius: [f64; 2],
    /// True if this vertex is a skeleton root.
    pub root: bool,
}

impl SkinVertex {
    /// Creates a non-root skin vertex with the given radii.
    #[must_use]
    pub fn new(radius: [f64; 2]) -> Self {
        Self {
            radius,
            root: false,
        }
    }

    /// Creates a root skin vertex with the given radii.
    #[must_use]
    pub fn root(radius: [f64; 2]) -> Self {
        Self { radius, root: true }
    }
}

/// Skin-modifier data for a whole mesh, one entry per vertex.
#[derive(Debug, Clone, Default)]
pub struct SkinLayer {
    /// Per-vertex skin data, indexed like the mesh's vertex list.
    pub vertices: Vec<SkinVertex>,
}

impl SkinLayer {
    /// Creates a skin layer from per-vertex data.
    #[must_use]
    pub fn new(vertices: Vec<SkinVertex>) -> Self {
        Self { vertices }
    }

    /// Creates a layer of `count` non-root vertices with a uniform radius.
    #[must_use]
    pub fn uniform(count: usize, radius: f64) -> Self {
        Self {
            vertices: vec![SkinVertex::new([radius, radius]); count],
        }
    }

    /// Returns the indices of all root vertices.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn root_indices(&self) -> Vec<u32> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.root)
            .map(|(i, _)| i as u32)
            .collect()
    }
}
