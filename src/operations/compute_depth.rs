use crate::error::{MeshError, Result};
use crate::graph::{propagate_depth, Adjacency};
use crate::mesh::{AttributeData, AttributeDomain, AttributeId, AttributeValues, Mesh};

/// Name of the integer attribute the depth field is written to.
pub const DEPTH_ATTRIBUTE: &str = "Depth";

/// Computes a skeletal depth field over a skinned mesh.
///
/// The skin layer's root vertices get depth 1; every other vertex gets
/// 1 + its edge-hop distance to the nearest root, with 0 left on
/// vertices the skeleton never reaches. The result is written to an
/// integer point attribute named [`DEPTH_ATTRIBUTE`].
#[derive(Debug, Default)]
pub struct ComputeDepth;

impl ComputeDepth {
    /// Creates a new `ComputeDepth` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, returning the ID of the depth attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has no skin layer, the skin layer is
    /// not sized to the vertex count, or the edge list references
    /// vertices out of range.
    #[allow(clippy::cast_possible_wrap)]
    pub fn execute(&self, mesh: &mut Mesh) -> Result<AttributeId> {
        let skin = mesh.skin.as_ref().ok_or(MeshError::MissingSkinLayer)?;
        if skin.vertices.len() != mesh.vertex_count() {
            return Err(MeshError::SkinLengthMismatch {
                actual: skin.vertices.len(),
                expected: mesh.vertex_count(),
            }
            .into());
        }
        let roots = skin.root_indices();

        let adjacency = Adjacency::from_edges(mesh.vertex_count(), &mesh.edges)?;
        let depth = propagate_depth(&adjacency, &roots)?;
        tracing::debug!(
            vertices = depth.len(),
            roots = roots.len(),
            max_depth = depth.iter().max().copied().unwrap_or(0),
            "computed depth field"
        );

        let values: Vec<i32> = depth.into_iter().map(|d| d as i32).collect();
        let id = mesh.attributes.replace_or_insert(AttributeData::new(
            DEPTH_ATTRIBUTE,
            AttributeDomain::Point,
            AttributeValues::Int(values),
        ));
        Ok(id)
    }
}
