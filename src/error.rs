use thiserror::Error;

/// Top-level error type for the flexmesh toolkit.
#[derive(Debug, Error)]
pub enum FlexmeshError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors related to the mesh data model and attribute storage.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    #[error("duplicate UV layer name: {0}")]
    DuplicateUvLayer(String),

    #[error("attribute \"{name}\" has {actual} values, expected {expected} for the {domain} domain")]
    AttributeLengthMismatch {
        name: String,
        domain: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("UV layer \"{name}\" has {actual} entries, expected {expected} corners")]
    UvLayerLengthMismatch {
        name: String,
        actual: usize,
        expected: usize,
    },

    #[error("skin layer has {actual} entries, expected {expected} vertices")]
    SkinLengthMismatch { actual: usize, expected: usize },

    #[error("mesh has no skin layer")]
    MissingSkinLayer,

    #[error("triangle {triangle} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    TriangleOutOfRange {
        triangle: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("edge {edge} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        vertex: u32,
        vertex_count: usize,
    },
}

/// Errors related to vertex-graph construction and traversal.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {index} endpoint {vertex} is out of range for {vertex_count} vertices")]
    EdgeOutOfRange {
        index: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("root vertex {vertex} is out of range for {vertex_count} vertices")]
    RootOutOfRange { vertex: u32, vertex_count: usize },
}

/// Errors related to mesh operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to the `.fmt` interchange format.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("header declares {declared} vertices, data contains {actual}")]
    VertexCountMismatch { declared: usize, actual: usize },

    #[error("header declares {declared} indices, data contains {actual}")]
    IndexCountMismatch { declared: usize, actual: usize },

    #[error("vertex {vertex} is missing attribute \"{semantic}\"")]
    MissingAttribute { vertex: usize, semantic: String },

    #[error("vertex {vertex} carries attribute \"{semantic}\" that is not declared in the header")]
    UndeclaredAttribute { vertex: usize, semantic: String },

    #[error("vertex {vertex} attribute \"{semantic}\" has {actual} values, header declares {declared}")]
    ArityMismatch {
        vertex: usize,
        semantic: String,
        declared: u32,
        actual: usize,
    },

    #[error("vertex {vertex} attribute \"{semantic}\" value {value} does not fit {scalar}")]
    ValueOutOfRange {
        vertex: usize,
        semantic: String,
        scalar: &'static str,
        value: String,
    },

    #[error("index {value} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        value: i64,
        vertex_count: usize,
    },

    #[error("index count {count} is not divisible by {arity} for {topology} topology")]
    IndexCountNotDivisible {
        count: usize,
        arity: usize,
        topology: &'static str,
    },

    #[error("document has no \"{0}\" attribute")]
    MissingSemantic(String),

    #[error("attribute \"{semantic}\" layout {scalar} x{count} has no mesh representation")]
    UnsupportedLayout {
        semantic: String,
        scalar: &'static str,
        count: u32,
    },
}

/// Convenience type alias for results using [`FlexmeshError`].
pub type Result<T> = std::result::Result<T, FlexmeshError>;
