use crate::error::{MeshError, Result};
use crate::math::Point2;
use crate::mesh::{AttributeDomain, AttributeValues, Mesh};

/// Copies the R and G channels of corner color attributes into the UV
/// layers with matching names.
///
/// Only corner-domain color layers participate; attributes without a
/// name-matched UV layer are skipped. Byte colors are normalized to the
/// 0..1 range.
#[derive(Debug, Default)]
pub struct ColorToUv;

impl ColorToUv {
    /// Creates a new `ColorToUv` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, returning the number of UV layers written.
    ///
    /// Zero matches is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a matched color attribute or UV layer is not
    /// sized to the corner count.
    pub fn execute(&self, mesh: &mut Mesh) -> Result<usize> {
        let corner_count = mesh.corner_count();
        let mut copied = 0;
        for (_, attr) in mesh.attributes.iter() {
            if attr.domain != AttributeDomain::Corner {
                continue;
            }
            let Some(layer) = mesh
                .uv_layers
                .iter_mut()
                .find(|layer| layer.name == attr.name)
            else {
                continue;
            };

            let channels: Vec<[f64; 2]> = match &attr.values {
                AttributeValues::Color(values) => values
                    .iter()
                    .map(|c| [f64::from(c[0]), f64::from(c[1])])
                    .collect(),
                AttributeValues::ByteColor(values) => values
                    .iter()
                    .map(|c| [f64::from(c[0]) / 255.0, f64::from(c[1]) / 255.0])
                    .collect(),
                _ => continue,
            };
            if channels.len() != corner_count {
                return Err(MeshError::AttributeLengthMismatch {
                    name: attr.name.clone(),
                    domain: attr.domain.name(),
                    actual: channels.len(),
                    expected: corner_count,
                }
                .into());
            }
            if layer.uv.len() != corner_count {
                return Err(MeshError::UvLayerLengthMismatch {
                    name: layer.name.clone(),
                    actual: layer.uv.len(),
                    expected: corner_count,
                }
                .into());
            }

            for (uv, rg) in layer.uv.iter_mut().zip(&channels) {
                *uv = Point2::new(rg[0], rg[1]);
            }
            tracing::trace!(layer = %attr.name, "copied color channels into UV layer");
            copied += 1;
        }
        tracing::debug!(layers = copied, "color to UV finished");
        Ok(copied)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::mesh::AttributeData;

    fn one_triangle_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        mesh.triangles = vec![[0, 1, 2]];
        mesh
    }

    #[test]
    fn copies_red_green_into_matching_layer() {
        let mut mesh = one_triangle_mesh();
        mesh.add_uv_layer("UVMap").unwrap();
        mesh.attributes
            .insert(AttributeData::new(
                "UVMap",
                AttributeDomain::Corner,
                AttributeValues::Color(vec![
                    [0.1, 0.2, 0.9, 1.0],
                    [0.3, 0.4, 0.9, 1.0],
                    [0.5, 0.6, 0.9, 1.0],
                ]),
            ))
            .unwrap();

        let copied = ColorToUv::new().execute(&mut mesh).unwrap();
        assert_eq!(copied, 1);

        let layer = mesh.uv_layer("UVMap").unwrap();
        let expected = [[0.1f32, 0.2f32], [0.3, 0.4], [0.5, 0.6]];
        for (uv, rg) in layer.uv.iter().zip(expected) {
            assert!((uv.x - f64::from(rg[0])).abs() < 1e-12);
            assert!((uv.y - f64::from(rg[1])).abs() < 1e-12);
        }
    }

    #[test]
    fn byte_colors_are_normalized() {
        let mut mesh = one_triangle_mesh();
        mesh.add_uv_layer("Mask").unwrap();
        mesh.attributes
            .insert(AttributeData::new(
                "Mask",
                AttributeDomain::Corner,
                AttributeValues::ByteColor(vec![[255, 0, 0, 255]; 3]),
            ))
            .unwrap();

        ColorToUv::new().execute(&mut mesh).unwrap();
        let layer = mesh.uv_layer("Mask").unwrap();
        assert!((layer.uv[0].x - 1.0).abs() < 1e-12);
        assert!((layer.uv[0].y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn unmatched_and_non_color_layers_are_skipped() {
        let mut mesh = one_triangle_mesh();
        mesh.add_uv_layer("UVMap").unwrap();
        // A color attribute with no matching UV layer.
        mesh.attributes
            .insert(AttributeData::new(
                "Paint",
                AttributeDomain::Corner,
                AttributeValues::Color(vec![[1.0, 1.0, 1.0, 1.0]; 3]),
            ))
            .unwrap();
        // A float attribute whose name matches the UV layer.
        mesh.attributes
            .insert(AttributeData::new(
                "UVMap",
                AttributeDomain::Corner,
                AttributeValues::Float(vec![7.0; 3]),
            ))
            .unwrap();

        let copied = ColorToUv::new().execute(&mut mesh).unwrap();
        assert_eq!(copied, 0);
        let layer = mesh.uv_layer("UVMap").unwrap();
        assert!(layer.uv.iter().all(|uv| uv.x == 0.0 && uv.y == 0.0));
    }

    #[test]
    fn point_domain_colors_are_skipped() {
        let mut mesh = one_triangle_mesh();
        mesh.add_uv_layer("UVMap").unwrap();
        mesh.attributes
            .insert(AttributeData::new(
                "UVMap",
                AttributeDomain::Point,
                AttributeValues::Color(vec![[0.5, 0.5, 0.5, 1.0]; 3]),
            ))
            .unwrap();

        let copied = ColorToUv::new().execute(&mut mesh).unwrap();
        assert_eq!(copied, 0);
    }

    #[test]
    fn short_color_layer_is_an_error() {
        let mut mesh = one_triangle_mesh();
        mesh.add_uv_layer("UVMap").unwrap();
        mesh.attributes
            .insert(AttributeData::new(
                "UVMap",
                AttributeDomain::Corner,
                AttributeValues::Color(vec![[0.0, 0.0, 0.0, 1.0]; 2]),
            ))
            .unwrap();

        assert!(ColorToUv::new().execute(&mut mesh).is_err());
    }
}
