use crate::error::{MeshError, Result};
use crate::mesh::{AttributeData, AttributeDomain, AttributeId, AttributeValues, Mesh};

/// Name of the float attribute the skin radii are written to.
pub const RADIUS_ATTRIBUTE: &str = "Radius";

/// Copies the skin layer's per-vertex X radius into a float point
/// attribute named [`RADIUS_ATTRIBUTE`].
#[derive(Debug, Default)]
pub struct SkinRadiusToAttribute;

impl SkinRadiusToAttribute {
    /// Creates a new `SkinRadiusToAttribute` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, returning the ID of the radius attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has no skin layer or the skin layer
    /// is not sized to the vertex count.
    pub fn execute(&self, mesh: &mut Mesh) -> Result<AttributeId> {
        let skin = mesh.skin.as_ref().ok_or(MeshError::MissingSkinLayer)?;
        if skin.vertices.len() != mesh.vertex_count() {
            return Err(MeshError::SkinLengthMismatch {
                actual: skin.vertices.len(),
                expected: mesh.vertex_count(),
            }
            .into());
        }

        let values: Vec<f64> = skin.vertices.iter().map(|v| v.radius[0]).collect();
        tracing::debug!(vertices = values.len(), "copied skin radii");
        let id = mesh.attributes.replace_or_insert(AttributeData::new(
            RADIUS_ATTRIBUTE,
            AttributeDomain::Point,
            AttributeValues::Float(values),
        ));
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FlexmeshError;
    use crate::math::Point3;
    use crate::mesh::{SkinLayer, SkinVertex};

    #[test]
    fn copies_x_radius_per_vertex() {
        let mut mesh = Mesh::new();
        mesh.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        mesh.skin = Some(SkinLayer::new(vec![
            SkinVertex::root([0.5, 0.1]),
            SkinVertex::new([0.25, 0.2]),
            SkinVertex::new([0.125, 0.3]),
        ]));

        let id = SkinRadiusToAttribute::new().execute(&mut mesh).unwrap();
        let data = mesh.attributes.attribute(id).unwrap();
        assert_eq!(data.name, RADIUS_ATTRIBUTE);
        assert_eq!(data.domain, AttributeDomain::Point);
        assert_eq!(data.values, AttributeValues::Float(vec![0.5, 0.25, 0.125]));
    }

    #[test]
    fn missing_skin_layer_is_an_error() {
        let mut mesh = Mesh::new();
        mesh.positions = vec![Point3::new(0.0, 0.0, 0.0)];

        let err = SkinRadiusToAttribute::new().execute(&mut mesh).unwrap_err();
        assert!(matches!(
            err,
            FlexmeshError::Mesh(MeshError::MissingSkinLayer)
        ));
    }

    #[test]
    fn mismatched_skin_length_is_an_error() {
        let mut mesh = Mesh::new();
        mesh.positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        mesh.skin = Some(SkinLayer::uniform(1, 0.25));

        let err = SkinRadiusToAttribute::new().execute(&mut mesh).unwrap_err();
        assert!(matches!(
            err,
            FlexmeshError::Mesh(MeshError::SkinLengthMismatch {
                actual: 1,
                expected: 2,
            })
        ));
    }
}
