use crate::error::FormatError;
use crate::format::{FmtAttribute, FmtDocument, FmtScalar, ScalarType, Topology};
use crate::math::Point3;
use crate::mesh::{AttributeData, AttributeDomain, AttributeValues, Mesh};

impl FmtDocument {
    /// Converts the document into a mesh.
    ///
    /// The document is validated first. It must carry a `POSITION`
    /// attribute laid out as three `float32` components; indices become
    /// edges or triangles per the document's topology, and every other
    /// semantic becomes a point attribute of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the document fails [`FmtDocument::validate`],
    /// has no `float32` x3 `POSITION` attribute, or declares a layout
    /// the attribute model cannot hold.
    pub fn to_mesh(&self) -> Result<Mesh, FormatError> {
        self.validate()?;
        let position = self
            .header
            .attributes
            .get("POSITION")
            .ok_or_else(|| FormatError::MissingSemantic("POSITION".into()))?;
        if position.scalar != ScalarType::Float32 || position.count != 3 {
            return Err(FormatError::UnsupportedLayout {
                semantic: "POSITION".into(),
                scalar: position.scalar.name(),
                count: position.count,
            });
        }

        let mut mesh = Mesh::new();
        for record in &self.data.vertices {
            // Validation guarantees the record carries POSITION with arity 3.
            let Some(value) = record.get("POSITION") else {
                return Err(FormatError::MissingSemantic("POSITION".into()));
            };
            let s = value.scalars();
            mesh.positions
                .push(Point3::new(s[0].to_f64(), s[1].to_f64(), s[2].to_f64()));
        }

        let indices = self
            .data
            .indices
            .iter()
            .map(|&value| {
                u32::try_from(value).map_err(|_| FormatError::IndexOutOfRange {
                    position: 0,
                    value,
                    vertex_count: self.header.vertices_count,
                })
            })
            .collect::<Result<Vec<u32>, FormatError>>()?;
        match self.header.topology {
            Topology::Edge => {
                mesh.edges = indices.chunks_exact(2).map(|pair| [pair[0], pair[1]]).collect();
            }
            Topology::Triangle => {
                mesh.triangles = indices
                    .chunks_exact(3)
                    .map(|corners| [corners[0], corners[1], corners[2]])
                    .collect();
            }
        }

        for (semantic, layout) in self.header.attributes.iter() {
            if semantic == "POSITION" {
                continue;
            }
            let values = self.column(semantic, *layout)?;
            mesh.attributes.replace_or_insert(AttributeData::new(
                semantic,
                AttributeDomain::Point,
                values,
            ));
        }
        tracing::debug!(
            vertices = mesh.vertex_count(),
            attributes = mesh.attributes.len(),
            "materialized mesh from flexible-mesh document"
        );
        Ok(mesh)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn column(
        &self,
        semantic: &str,
        layout: FmtAttribute,
    ) -> Result<AttributeValues, FormatError> {
        let mut components: Vec<Vec<FmtScalar>> = Vec::with_capacity(self.data.vertices.len());
        for record in &self.data.vertices {
            let Some(value) = record.get(semantic) else {
                return Err(FormatError::MissingSemantic(semantic.into()));
            };
            components.push(value.scalars().to_vec());
        }

        let int_component = |scalar: FmtScalar, vertex: usize| -> Result<i64, FormatError> {
            match scalar {
                FmtScalar::Int(value) => Ok(value),
                FmtScalar::Float(_) => Err(FormatError::ValueOutOfRange {
                    vertex,
                    semantic: semantic.into(),
                    scalar: layout.scalar.name(),
                    value: scalar.display(),
                }),
            }
        };

        let values = match (layout.scalar, layout.count) {
            (ScalarType::Float32, 1) => AttributeValues::Float(
                components.iter().map(|c| c[0].to_f64()).collect(),
            ),
            (ScalarType::Float32, 2) => AttributeValues::Float2(
                components
                    .iter()
                    .map(|c| [c[0].to_f64(), c[1].to_f64()])
                    .collect(),
            ),
            (ScalarType::Float32, 3) => AttributeValues::Float3(
                components
                    .iter()
                    .map(|c| [c[0].to_f64(), c[1].to_f64(), c[2].to_f64()])
                    .collect(),
            ),
            (ScalarType::Float32, 4) => AttributeValues::Color(
                components
                    .iter()
                    .map(|c| {
                        [
                            c[0].to_f64() as f32,
                            c[1].to_f64() as f32,
                            c[2].to_f64() as f32,
                            c[3].to_f64() as f32,
                        ]
                    })
                    .collect(),
            ),
            (ScalarType::Int32, 1) => {
                let mut values = Vec::with_capacity(components.len());
                for (vertex, c) in components.iter().enumerate() {
                    let wide = int_component(c[0], vertex)?;
                    values.push(wide as i32);
                }
                AttributeValues::Int(values)
            }
            (ScalarType::Uint8, 4) => {
                let mut values = Vec::with_capacity(components.len());
                for (vertex, c) in components.iter().enumerate() {
                    let mut color = [0u8; 4];
                    for (slot, &scalar) in color.iter_mut().zip(c.iter()) {
                        *slot = int_component(scalar, vertex)? as u8;
                    }
                    values.push(color);
                }
                AttributeValues::ByteColor(values)
            }
            (scalar, count) => {
                return Err(FormatError::UnsupportedLayout {
                    semantic: semantic.into(),
                    scalar: scalar.name(),
                    count,
                });
            }
        };
        Ok(values)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::format::{
        AttributeMapping, ExportFlexibleMesh, FmtAttribute, FmtValue, SemanticMap,
    };
    use crate::math::TOLERANCE;

    fn exported_document() -> FmtDocument {
        let mut mesh = Mesh::new();
        mesh.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.5),
            Point3::new(2.0, 1.0, 0.0),
        ];
        mesh.edges = vec![[0, 1], [1, 2]];
        mesh.attributes
            .insert(AttributeData::new(
                "Depth",
                AttributeDomain::Point,
                AttributeValues::Int(vec![1, 2, 3]),
            ))
            .unwrap();
        mesh.attributes
            .insert(AttributeData::new(
                "Tint",
                AttributeDomain::Point,
                AttributeValues::ByteColor(vec![[255, 0, 0, 255]; 3]),
            ))
            .unwrap();
        ExportFlexibleMesh::new(
            vec![
                AttributeMapping::new("position", "POSITION"),
                AttributeMapping::new("Depth", "TEXCOORD0"),
                AttributeMapping::new("Tint", "TEXCOORD1"),
            ],
            crate::format::Topology::Edge,
        )
        .execute(&mesh)
        .unwrap()
    }

    #[test]
    fn round_trip_through_json() {
        let json = exported_document().to_json_string().unwrap();
        let mesh = FmtDocument::from_json_str(&json).unwrap().to_mesh().unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert!((mesh.positions[1].z - 0.5).abs() < TOLERANCE);
        assert_eq!(mesh.edges, [[0, 1], [1, 2]]);
        assert_eq!(
            mesh.attributes.by_name("TEXCOORD0").unwrap().values,
            AttributeValues::Int(vec![1, 2, 3])
        );
        assert_eq!(
            mesh.attributes.by_name("TEXCOORD1").unwrap().values,
            AttributeValues::ByteColor(vec![[255, 0, 0, 255]; 3])
        );
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn triangle_topology_rebuilds_triangles() {
        let mut document = exported_document();
        document.header.topology = crate::format::Topology::Triangle;
        document.header.indices_count = 3;
        document.data.indices = vec![0, 1, 2];

        let mesh = document.to_mesh().unwrap();
        assert_eq!(mesh.triangles, [[0, 1, 2]]);
        assert!(mesh.edges.is_empty());
    }

    #[test]
    fn missing_position_rejected() {
        let mut document = exported_document();
        let attributes: SemanticMap<FmtAttribute> = document
            .header
            .attributes
            .iter()
            .filter(|(semantic, _)| *semantic != "POSITION")
            .map(|(semantic, layout)| (semantic.to_string(), *layout))
            .collect();
        document.header.attributes = attributes;
        let vertices: Vec<SemanticMap<FmtValue>> = document
            .data
            .vertices
            .iter()
            .map(|record| {
                record
                    .iter()
                    .filter(|(semantic, _)| *semantic != "POSITION")
                    .map(|(semantic, value)| (semantic.to_string(), value.clone()))
                    .collect()
            })
            .collect();
        document.data.vertices = vertices;

        let err = document.to_mesh().unwrap_err();
        assert!(matches!(err, FormatError::MissingSemantic(name) if name == "POSITION"));
    }

    #[test]
    fn unsupported_layout_rejected() {
        let mut document = exported_document();
        document.header.attributes.insert("TEXCOORD0", FmtAttribute {
            scalar: ScalarType::Int32,
            count: 2,
        });
        for record in &mut document.data.vertices {
            record.insert(
                "TEXCOORD0",
                FmtValue::Array(vec![FmtScalar::Int(1), FmtScalar::Int(2)]),
            );
        }

        let err = document.to_mesh().unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnsupportedLayout {
                scalar: "int32",
                count: 2,
                ..
            }
        ));
    }
}
