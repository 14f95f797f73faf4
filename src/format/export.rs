use crate::error::{MeshError, OperationError, Result};
use crate::format::{
    FmtAttribute, FmtData, FmtDocument, FmtHeader, FmtScalar, FmtValue, ScalarType, SemanticMap,
    Topology,
};
use crate::mesh::{AttributeDomain, AttributeValues, Mesh};

/// Reserved attribute name that addresses the mesh's vertex positions.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Maps one mesh attribute onto a semantic in the exported document.
#[derive(Debug, Clone)]
pub struct AttributeMapping {
    /// Source attribute name; [`POSITION_ATTRIBUTE`] addresses positions.
    pub attribute: String,
    /// Target semantic, e.g. `POSITION` or `TEXCOORD0`.
    pub semantic: String,
}

impl AttributeMapping {
    /// Creates a new attribute mapping entry.
    #[must_use]
    pub fn new(attribute: impl Into<String>, semantic: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            semantic: semantic.into(),
        }
    }
}

/// Exports mesh attributes into a flexible-mesh document through an
/// ordered attribute-to-semantic mapping.
///
/// Mapping order becomes the header's attribute order, which the engine
/// importer turns into its vertex buffer layout. Only point-domain
/// attributes export; corner layers must be converted with
/// `AverageCornerToPoint` first.
#[derive(Debug)]
pub struct ExportFlexibleMesh {
    mapping: Vec<AttributeMapping>,
    topology: Topology,
}

impl ExportFlexibleMesh {
    /// Creates a new `ExportFlexibleMesh` operation.
    #[must_use]
    pub fn new(mapping: Vec<AttributeMapping>, topology: Topology) -> Self {
        Self { mapping, topology }
    }

    /// Prefills a mapping from the mesh's point attributes.
    ///
    /// Positions map to `POSITION`; every point attribute maps to a
    /// semantic of its own name. Callers usually rename the semantics
    /// before exporting.
    #[must_use]
    pub fn default_mapping(mesh: &Mesh) -> Vec<AttributeMapping> {
        let mut mapping = vec![AttributeMapping::new(POSITION_ATTRIBUTE, "POSITION")];
        for (_, data) in mesh.attributes.iter() {
            if data.domain == AttributeDomain::Point {
                mapping.push(AttributeMapping::new(&data.name, &data.name));
            }
        }
        mapping
    }

    /// Executes the export, building the document.
    ///
    /// # Errors
    ///
    /// Returns an error if a mapped attribute does not exist, is not in
    /// the point domain, is not sized to the vertex count, or if two
    /// mapping entries share a semantic.
    pub fn execute(&self, mesh: &Mesh) -> Result<FmtDocument> {
        let vertex_count = mesh.vertex_count();
        let mut attributes = SemanticMap::new();
        let mut columns: Vec<(String, Vec<FmtValue>)> = Vec::new();

        for entry in &self.mapping {
            if attributes.get(&entry.semantic).is_some() {
                return Err(OperationError::InvalidInput(format!(
                    "semantic \"{}\" is mapped twice",
                    entry.semantic
                ))
                .into());
            }
            let (layout, values) = if entry.attribute == POSITION_ATTRIBUTE {
                let values = mesh
                    .positions
                    .iter()
                    .map(|p| {
                        FmtValue::Array(vec![
                            FmtScalar::Float(p.x),
                            FmtScalar::Float(p.y),
                            FmtScalar::Float(p.z),
                        ])
                    })
                    .collect();
                (
                    FmtAttribute {
                        scalar: ScalarType::Float32,
                        count: 3,
                    },
                    values,
                )
            } else {
                let data = mesh.attributes.by_name(&entry.attribute)?;
                if data.domain != AttributeDomain::Point {
                    return Err(OperationError::InvalidInput(format!(
                        "attribute \"{}\" is in the corner domain; average it onto points first",
                        entry.attribute
                    ))
                    .into());
                }
                if data.values.len() != vertex_count {
                    return Err(MeshError::AttributeLengthMismatch {
                        name: data.name.clone(),
                        domain: data.domain.name(),
                        actual: data.values.len(),
                        expected: vertex_count,
                    }
                    .into());
                }
                column_values(&data.values)
            };
            attributes.insert(entry.semantic.clone(), layout);
            columns.push((entry.semantic.clone(), values));
        }

        let indices: Vec<i64> = match self.topology {
            Topology::Edge => mesh.edges.iter().flatten().copied().map(i64::from).collect(),
            Topology::Triangle => mesh
                .triangles
                .iter()
                .flatten()
                .copied()
                .map(i64::from)
                .collect(),
        };

        let vertices: Vec<SemanticMap<FmtValue>> = (0..vertex_count)
            .map(|vertex| {
                columns
                    .iter()
                    .map(|(semantic, values)| (semantic.clone(), values[vertex].clone()))
                    .collect()
            })
            .collect();

        tracing::debug!(
            vertices = vertex_count,
            indices = indices.len(),
            semantics = attributes.len(),
            topology = self.topology.name(),
            "built flexible-mesh document"
        );
        Ok(FmtDocument {
            header: FmtHeader {
                vertices_count: vertex_count,
                indices_count: indices.len(),
                topology: self.topology,
                attributes,
            },
            data: FmtData { vertices, indices },
        })
    }
}

fn column_values(values: &AttributeValues) -> (FmtAttribute, Vec<FmtValue>) {
    let (scalar, count, values) = match values {
        AttributeValues::Float(v) => (
            ScalarType::Float32,
            1,
            v.iter()
                .map(|&x| FmtValue::Scalar(FmtScalar::Float(x)))
                .collect(),
        ),
        AttributeValues::Float2(v) => (
            ScalarType::Float32,
            2,
            v.iter()
                .map(|value| FmtValue::Array(value.iter().map(|&x| FmtScalar::Float(x)).collect()))
                .collect(),
        ),
        AttributeValues::Float3(v) => (
            ScalarType::Float32,
            3,
            v.iter()
                .map(|value| FmtValue::Array(value.iter().map(|&x| FmtScalar::Float(x)).collect()))
                .collect(),
        ),
        AttributeValues::Int(v) => (
            ScalarType::Int32,
            1,
            v.iter()
                .map(|&x| FmtValue::Scalar(FmtScalar::Int(i64::from(x))))
                .collect(),
        ),
        AttributeValues::Color(v) => (
            ScalarType::Float32,
            4,
            v.iter()
                .map(|value| {
                    FmtValue::Array(
                        value
                            .iter()
                            .map(|&x| FmtScalar::Float(f64::from(x)))
                            .collect(),
                    )
                })
                .collect(),
        ),
        AttributeValues::ByteColor(v) => (
            ScalarType::Uint8,
            4,
            v.iter()
                .map(|value| {
                    FmtValue::Array(value.iter().map(|&x| FmtScalar::Int(i64::from(x))).collect())
                })
                .collect(),
        ),
    };
    (FmtAttribute { scalar, count }, values)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FlexmeshError;
    use crate::math::Point3;
    use crate::mesh::AttributeData;

    fn skeleton_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
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
                "Radius",
                AttributeDomain::Point,
                AttributeValues::Float(vec![0.5, 0.25, 0.125]),
            ))
            .unwrap();
        mesh
    }

    #[test]
    fn mapping_order_becomes_header_order() {
        let mesh = skeleton_mesh();
        let export = ExportFlexibleMesh::new(
            vec![
                AttributeMapping::new(POSITION_ATTRIBUTE, "POSITION"),
                AttributeMapping::new("Radius", "TEXCOORD0"),
                AttributeMapping::new("Depth", "TEXCOORD1"),
            ],
            Topology::Edge,
        );

        let document = export.execute(&mesh).unwrap();
        document.validate().unwrap();

        let semantics: Vec<&str> = document.header.attributes.keys().collect();
        assert_eq!(semantics, ["POSITION", "TEXCOORD0", "TEXCOORD1"]);
        assert_eq!(document.header.vertices_count, 3);
        assert_eq!(document.header.indices_count, 4);
        assert_eq!(document.data.indices, [0, 1, 1, 2]);

        let record = &document.data.vertices[1];
        assert_eq!(
            record.get("POSITION"),
            Some(&FmtValue::Array(vec![
                FmtScalar::Float(1.0),
                FmtScalar::Float(0.0),
                FmtScalar::Float(0.0),
            ]))
        );
        assert_eq!(
            record.get("TEXCOORD0"),
            Some(&FmtValue::Scalar(FmtScalar::Float(0.25)))
        );
        assert_eq!(
            record.get("TEXCOORD1"),
            Some(&FmtValue::Scalar(FmtScalar::Int(2)))
        );
    }

    #[test]
    fn triangle_topology_draws_from_triangles() {
        let mut mesh = skeleton_mesh();
        mesh.triangles = vec![[0, 1, 2]];
        let export = ExportFlexibleMesh::new(
            vec![AttributeMapping::new(POSITION_ATTRIBUTE, "POSITION")],
            Topology::Triangle,
        );

        let document = export.execute(&mesh).unwrap();
        assert_eq!(document.header.topology, Topology::Triangle);
        assert_eq!(document.data.indices, [0, 1, 2]);
    }

    #[test]
    fn default_mapping_lists_point_attributes() {
        let mut mesh = skeleton_mesh();
        mesh.attributes
            .insert(AttributeData::new(
                "Paint",
                AttributeDomain::Corner,
                AttributeValues::Color(vec![]),
            ))
            .unwrap();

        let mapping = ExportFlexibleMesh::default_mapping(&mesh);
        let attributes: Vec<&str> = mapping.iter().map(|m| m.attribute.as_str()).collect();
        assert_eq!(attributes, [POSITION_ATTRIBUTE, "Depth", "Radius"]);
        assert_eq!(mapping[0].semantic, "POSITION");
    }

    #[test]
    fn corner_attribute_rejected() {
        let mut mesh = skeleton_mesh();
        mesh.triangles = vec![[0, 1, 2]];
        mesh.attributes
            .insert(AttributeData::new(
                "Paint",
                AttributeDomain::Corner,
                AttributeValues::Color(vec![[1.0, 0.0, 0.0, 1.0]; 3]),
            ))
            .unwrap();
        let export = ExportFlexibleMesh::new(
            vec![AttributeMapping::new("Paint", "TEXCOORD0")],
            Topology::Triangle,
        );

        let err = export.execute(&mesh).unwrap_err();
        assert!(matches!(
            err,
            FlexmeshError::Operation(OperationError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_attribute_rejected() {
        let mesh = skeleton_mesh();
        let export = ExportFlexibleMesh::new(
            vec![AttributeMapping::new("Missing", "TEXCOORD0")],
            Topology::Edge,
        );

        let err = export.execute(&mesh).unwrap_err();
        assert!(matches!(
            err,
            FlexmeshError::Mesh(MeshError::AttributeNotFound(_))
        ));
    }

    #[test]
    fn duplicate_semantic_rejected() {
        let mesh = skeleton_mesh();
        let export = ExportFlexibleMesh::new(
            vec![
                AttributeMapping::new("Depth", "TEXCOORD0"),
                AttributeMapping::new("Radius", "TEXCOORD0"),
            ],
            Topology::Edge,
        );

        let err = export.execute(&mesh).unwrap_err();
        assert!(matches!(
            err,
            FlexmeshError::Operation(OperationError::InvalidInput(_))
        ));
    }
}
