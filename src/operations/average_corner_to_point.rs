use crate::error::{MeshError, OperationError, Result};
use crate::mesh::{AttributeData, AttributeDomain, AttributeId, AttributeValues, Mesh};

/// Converts a corner layer into a point attribute of the same name by
/// averaging the values of all corners incident to each vertex.
///
/// The name may refer to a corner-domain attribute or to a UV layer;
/// UV layers convert into `Float2` point attributes. Vertices with no
/// incident corner get zeros. Integer attributes are rejected, since
/// averaging them would silently truncate.
#[derive(Debug)]
pub struct AverageCornerToPoint {
    name: String,
}

impl AverageCornerToPoint {
    /// Creates a new `AverageCornerToPoint` operation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Executes the operation, returning the ID of the point attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if no corner attribute or UV layer has the given
    /// name, the layer is not sized to the corner count, or the
    /// attribute holds integer values.
    pub fn execute(&self, mesh: &mut Mesh) -> Result<AttributeId> {
        let corner_vertices: Vec<u32> = (0..mesh.corner_count())
            .map(|corner| mesh.corner_vertex(corner))
            .collect();
        let vertex_count = mesh.vertex_count();

        let values = if let Some(id) = mesh.attributes.id_by_name(&self.name) {
            let attr = mesh.attributes.attribute(id)?;
            if attr.domain != AttributeDomain::Corner {
                return Err(OperationError::InvalidInput(format!(
                    "attribute \"{}\" is not in the corner domain",
                    self.name
                ))
                .into());
            }
            if attr.values.len() != corner_vertices.len() {
                return Err(MeshError::AttributeLengthMismatch {
                    name: attr.name.clone(),
                    domain: attr.domain.name(),
                    actual: attr.values.len(),
                    expected: corner_vertices.len(),
                }
                .into());
            }
            Self::average_attribute(&corner_vertices, vertex_count, &attr.values)?
        } else if let Some(layer) = mesh.uv_layer(&self.name) {
            if layer.uv.len() != corner_vertices.len() {
                return Err(MeshError::UvLayerLengthMismatch {
                    name: layer.name.clone(),
                    actual: layer.uv.len(),
                    expected: corner_vertices.len(),
                }
                .into());
            }
            let uv: Vec<[f64; 2]> = layer.uv.iter().map(|p| [p.x, p.y]).collect();
            AttributeValues::Float2(average_corners(&corner_vertices, vertex_count, &uv))
        } else {
            return Err(MeshError::AttributeNotFound(self.name.clone()).into());
        };

        tracing::debug!(layer = %self.name, "averaged corner values onto points");
        let id = mesh.attributes.replace_or_insert(AttributeData::new(
            self.name.clone(),
            AttributeDomain::Point,
            values,
        ));
        Ok(id)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn average_attribute(
        corner_vertices: &[u32],
        vertex_count: usize,
        values: &AttributeValues,
    ) -> Result<AttributeValues> {
        let averaged = match values {
            AttributeValues::Float(v) => {
                let scalars: Vec<[f64; 1]> = v.iter().map(|&x| [x]).collect();
                AttributeValues::Float(
                    average_corners(corner_vertices, vertex_count, &scalars)
                        .into_iter()
                        .map(|[x]| x)
                        .collect(),
                )
            }
            AttributeValues::Float2(v) => {
                AttributeValues::Float2(average_corners(corner_vertices, vertex_count, v))
            }
            AttributeValues::Float3(v) => {
                AttributeValues::Float3(average_corners(corner_vertices, vertex_count, v))
            }
            AttributeValues::Color(v) => {
                let wide: Vec<[f64; 4]> = v.iter().map(|c| c.map(f64::from)).collect();
                AttributeValues::Color(
                    average_corners(corner_vertices, vertex_count, &wide)
                        .into_iter()
                        .map(|c| c.map(|x| x as f32))
                        .collect(),
                )
            }
            AttributeValues::ByteColor(v) => {
                let wide: Vec<[f64; 4]> = v.iter().map(|c| c.map(f64::from)).collect();
                AttributeValues::ByteColor(
                    average_corners(corner_vertices, vertex_count, &wide)
                        .into_iter()
                        .map(|c| c.map(|x| x.round().clamp(0.0, 255.0) as u8))
                        .collect(),
                )
            }
            AttributeValues::Int(_) => {
                return Err(OperationError::InvalidInput(
                    "cannot average an integer corner attribute".into(),
                )
                .into());
            }
        };
        Ok(averaged)
    }
}

fn average_corners<const N: usize>(
    corner_vertices: &[u32],
    vertex_count: usize,
    values: &[[f64; N]],
) -> Vec<[f64; N]> {
    let mut sums = vec![[0.0; N]; vertex_count];
    let mut counts = vec![0u32; vertex_count];
    for (&vertex, value) in corner_vertices.iter().zip(values) {
        let v = vertex as usize;
        counts[v] += 1;
        for (sum, component) in sums[v].iter_mut().zip(value) {
            *sum += component;
        }
    }
    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count > 0 {
            for component in sum.iter_mut() {
                *component /= f64::from(count);
            }
        }
    }
    sums
}
