mod attribute;
mod skin;

pub use attribute::{AttributeData, AttributeDomain, AttributeId, AttributeStore, AttributeValues};
pub use skin::{SkinLayer, SkinVertex};

use crate::error::MeshError;
use crate::math::{Point2, Point3};

/// A named UV layer, one coordinate per triangle corner.
#[derive(Debug, Clone)]
pub struct UvLayer {
    /// Layer name, unique among the mesh's UV layers.
    pub name: String,
    /// Per-corner texture coordinates, indexed like the mesh's corners.
    pub uv: Vec<Point2>,
}

impl UvLayer {
    /// Creates a new UV layer.
    #[must_use]
    pub fn new(name: impl Into<String>, uv: Vec<Point2>) -> Self {
        Self {
            name: name.into(),
            uv,
        }
    }
}

/// A mesh owning vertex positions, connectivity, UV layers, named
/// attribute layers and optional skin data.
///
/// Vertices are identified by zero-based index into `positions`. Corner
/// `c` refers to vertex `triangles[c / 3][c % 3]`. UV layers are a
/// separate namespace from generic attributes, matching how the host
/// editor splits the two.
#[derive(Debug, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Unordered vertex index pairs. Skin skeletons are edge-only meshes.
    pub edges: Vec<[u32; 2]>,
    /// Triangle corner indices.
    pub triangles: Vec<[u32; 3]>,
    /// Named UV layers, one entry per corner.
    pub uv_layers: Vec<UvLayer>,
    /// Named attribute layers.
    pub attributes: AttributeStore,
    /// Skin-modifier data, if the mesh carries a skeleton.
    pub skin: Option<SkinLayer>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangle corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        3 * self.triangles.len()
    }

    /// Returns the vertex index a corner refers to.
    ///
    /// # Panics
    ///
    /// Panics if `corner` is not below [`Mesh::corner_count`].
    #[must_use]
    pub fn corner_vertex(&self, corner: usize) -> u32 {
        self.triangles[corner / 3][corner % 3]
    }

    /// Returns the number of elements in an attribute domain.
    #[must_use]
    pub fn domain_len(&self, domain: AttributeDomain) -> usize {
        match domain {
            AttributeDomain::Point => self.vertex_count(),
            AttributeDomain::Corner => self.corner_count(),
        }
    }

    /// Adds a zero-filled UV layer sized to the current corner count.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer with the same name already exists.
    pub fn add_uv_layer(&mut self, name: impl Into<String>) -> Result<&mut UvLayer, MeshError> {
        let name = name.into();
        if self.uv_layer(&name).is_some() {
            return Err(MeshError::DuplicateUvLayer(name));
        }
        self.uv_layers
            .push(UvLayer::new(name, vec![Point2::origin(); self.corner_count()]));
        let index = self.uv_layers.len() - 1;
        Ok(&mut self.uv_layers[index])
    }

    /// Returns the UV layer with the given name, if any.
    #[must_use]
    pub fn uv_layer(&self, name: &str) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|layer| layer.name == name)
    }

    /// Checks index ranges and per-layer lengths.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found: an edge or triangle
    /// referencing a vertex out of range, a UV or attribute layer whose
    /// length does not match its domain, a duplicate UV layer name, or a
    /// skin layer not sized to the vertex count.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        for (edge, &pair) in self.edges.iter().enumerate() {
            for vertex in pair {
                if vertex as usize >= vertex_count {
                    return Err(MeshError::EdgeOutOfRange {
                        edge,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }
        for (triangle, &corners) in self.triangles.iter().enumerate() {
            for vertex in corners {
                if vertex as usize >= vertex_count {
                    return Err(MeshError::TriangleOutOfRange {
                        triangle,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }
        for (index, layer) in self.uv_layers.iter().enumerate() {
            if layer.uv.len() != self.corner_count() {
                return Err(MeshError::UvLayerLengthMismatch {
                    name: layer.name.clone(),
                    actual: layer.uv.len(),
                    expected: self.corner_count(),
                });
            }
            if self.uv_layers[..index]
                .iter()
                .any(|other| other.name == layer.name)
            {
                return Err(MeshError::DuplicateUvLayer(layer.name.clone()));
            }
        }
        for (_, data) in self.attributes.iter() {
            let expected = self.domain_len(data.domain);
            if data.values.len() != expected {
                return Err(MeshError::AttributeLengthMismatch {
                    name: data.name.clone(),
                    domain: data.domain.name(),
                    actual: data.values.len(),
                    expected,
                });
            }
        }
        if let Some(skin) = &self.skin {
            if skin.vertices.len() != vertex_count {
                return Err(MeshError::SkinLengthMismatch {
                    actual: skin.vertices.len(),
                    expected: vertex_count,
                });
            }
        }
        Ok(())
    }
}
