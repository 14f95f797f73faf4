mod export;
mod import;
mod semantic_map;

pub use export::{AttributeMapping, ExportFlexibleMesh, POSITION_ATTRIBUTE};
pub use semantic_map::SemanticMap;

use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Scalar type of a flexible-mesh attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    #[serde(rename = "float32")]
    Float32,
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "uint8")]
    Uint8,
}

impl ScalarType {
    /// Returns the wire name of the scalar type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Int32 => "int32",
            Self::Uint8 => "uint8",
        }
    }

    /// Returns the packed size of one scalar in bytes.
    #[must_use]
    pub fn byte_size(self) -> usize {
        match self {
            Self::Float32 | Self::Int32 => 4,
            Self::Uint8 => 1,
        }
    }
}

/// Index topology of a flexible mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Indices form vertex pairs.
    #[serde(rename = "EDGE")]
    Edge,
    /// Indices form vertex triples.
    #[serde(rename = "TRIANGLE")]
    Triangle,
}

impl Topology {
    /// Returns the number of indices per primitive.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Edge => 2,
            Self::Triangle => 3,
        }
    }

    /// Returns the wire name of the topology.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Edge => "EDGE",
            Self::Triangle => "TRIANGLE",
        }
    }
}

/// Declared layout of one vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FmtAttribute {
    /// Scalar type of each component.
    #[serde(rename = "type")]
    pub scalar: ScalarType,
    /// Number of components per vertex.
    pub count: u32,
}

/// The document header: counts, topology and the vertex layout.
///
/// The mixed casing of the count fields is part of the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmtHeader {
    /// Number of vertex records in the data section.
    #[serde(rename = "verticesCount")]
    pub vertices_count: usize,
    /// Number of indices in the data section.
    #[serde(rename = "IndicesCount")]
    pub indices_count: usize,
    /// Index topology.
    pub topology: Topology,
    /// Vertex layout; object order defines the importer's buffer layout.
    pub attributes: SemanticMap<FmtAttribute>,
}

/// One scalar of a vertex attribute.
///
/// Integer and float tokens are kept apart so that `int32` and `uint8`
/// values serialize without a decimal point, which the engine importer
/// requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FmtScalar {
    /// An integer JSON number.
    Int(i64),
    /// A floating-point JSON number.
    Float(f64),
}

impl FmtScalar {
    /// Returns the scalar widened to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    fn fits(self, scalar: ScalarType) -> bool {
        match scalar {
            ScalarType::Float32 => true,
            ScalarType::Int32 => matches!(self, Self::Int(v) if i32::try_from(v).is_ok()),
            ScalarType::Uint8 => matches!(self, Self::Int(v) if (0..=255).contains(&v)),
        }
    }

    fn display(self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

/// One vertex attribute value: a bare scalar or an array of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FmtValue {
    /// A single component, used when the declared count is 1.
    Scalar(FmtScalar),
    /// Multiple components, used when the declared count is above 1.
    Array(Vec<FmtScalar>),
}

impl FmtValue {
    /// Returns the value's components as a slice.
    #[must_use]
    pub fn scalars(&self) -> &[FmtScalar] {
        match self {
            Self::Scalar(scalar) => std::slice::from_ref(scalar),
            Self::Array(scalars) => scalars,
        }
    }
}

/// The document data section: vertex records and the index buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmtData {
    /// One record per vertex, keyed by semantic.
    pub vertices: Vec<SemanticMap<FmtValue>>,
    /// Flat index buffer, grouped by the topology's arity.
    pub indices: Vec<i64>,
}

/// A flexible-mesh (`.fmt`) document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmtDocument {
    /// Counts, topology and vertex layout.
    pub header: FmtHeader,
    /// Vertex records and indices.
    pub data: FmtData,
}

impl FmtDocument {
    /// Checks the data section against the header.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found: count mismatches, an index
    /// buffer not divisible by the topology's arity or referencing
    /// vertices out of range, a vertex record missing a declared
    /// semantic or carrying an undeclared one, a component count not
    /// matching the declared arity, or a scalar that does not fit the
    /// declared type.
    pub fn validate(&self) -> Result<(), FormatError> {
        let vertex_count = self.header.vertices_count;
        if self.data.vertices.len() != vertex_count {
            return Err(FormatError::VertexCountMismatch {
                declared: vertex_count,
                actual: self.data.vertices.len(),
            });
        }
        if self.data.indices.len() != self.header.indices_count {
            return Err(FormatError::IndexCountMismatch {
                declared: self.header.indices_count,
                actual: self.data.indices.len(),
            });
        }
        let arity = self.header.topology.arity();
        if self.data.indices.len() % arity != 0 {
            return Err(FormatError::IndexCountNotDivisible {
                count: self.data.indices.len(),
                arity,
                topology: self.header.topology.name(),
            });
        }
        let index_limit = i64::try_from(vertex_count).unwrap_or(i64::MAX);
        for (position, &value) in self.data.indices.iter().enumerate() {
            if value < 0 || value >= index_limit {
                return Err(FormatError::IndexOutOfRange {
                    position,
                    value,
                    vertex_count,
                });
            }
        }

        for (vertex, record) in self.data.vertices.iter().enumerate() {
            for (semantic, layout) in self.header.attributes.iter() {
                let Some(value) = record.get(semantic) else {
                    return Err(FormatError::MissingAttribute {
                        vertex,
                        semantic: semantic.to_string(),
                    });
                };
                let bare_scalar = matches!(value, FmtValue::Scalar(_));
                let scalars = value.scalars();
                if (layout.count == 1) != bare_scalar || scalars.len() != layout.count as usize {
                    return Err(FormatError::ArityMismatch {
                        vertex,
                        semantic: semantic.to_string(),
                        declared: layout.count,
                        actual: scalars.len(),
                    });
                }
                for &scalar in scalars {
                    if !scalar.fits(layout.scalar) {
                        return Err(FormatError::ValueOutOfRange {
                            vertex,
                            semantic: semantic.to_string(),
                            scalar: layout.scalar.name(),
                            value: scalar.display(),
                        });
                    }
                }
            }
            for semantic in record.keys() {
                if self.header.attributes.get(semantic).is_none() {
                    return Err(FormatError::UndeclaredAttribute {
                        vertex,
                        semantic: semantic.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document as JSON to a sink.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), FormatError> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// Writes the document as JSON to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), FormatError> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }

    /// Parses and validates a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the document fails
    /// [`FmtDocument::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, FormatError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    /// Parses and validates a document from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the JSON is malformed, or the
    /// document fails [`FmtDocument::validate`].
    pub fn read_from<R: Read>(reader: R) -> Result<Self, FormatError> {
        let document: Self = serde_json::from_reader(reader)?;
        document.validate()?;
        Ok(document)
    }

    /// Parses and validates a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the JSON is
    /// malformed, or the document fails [`FmtDocument::validate`].
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let file = std::fs::File::open(path)?;
        Self::read_from(std::io::BufReader::new(file))
    }
}
