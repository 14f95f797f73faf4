use crate::error::MeshError;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for an attribute layer in the attribute store.
    pub struct AttributeId;
}

/// The mesh element an attribute layer is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeDomain {
    /// One value per vertex.
    Point,
    /// One value per triangle corner.
    Corner,
}

impl AttributeDomain {
    /// Returns the domain name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Corner => "corner",
        }
    }
}

/// Typed values of an attribute layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    /// Scalar floats.
    Float(Vec<f64>),
    /// 2-component float vectors (texture coordinates).
    Float2(Vec<[f64; 2]>),
    /// 3-component float vectors.
    Float3(Vec<[f64; 3]>),
    /// Scalar 32-bit integers.
    Int(Vec<i32>),
    /// RGBA colors with float channels.
    Color(Vec<[f32; 4]>),
    /// RGBA colors with 8-bit channels.
    ByteColor(Vec<[u8; 4]>),
}

impl AttributeValues {
    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Float2(v) => v.len(),
            Self::Float3(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Color(v) => v.len(),
            Self::ByteColor(v) => v.len(),
        }
    }

    /// Returns true if the layer holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the type name used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Float2(_) => "float2",
            Self::Float3(_) => "float3",
            Self::Int(_) => "int",
            Self::Color(_) => "color",
            Self::ByteColor(_) => "byte color",
        }
    }
}

/// A named attribute layer.
#[derive(Debug, Clone)]
pub struct AttributeData {
    /// Layer name, unique within the store.
    pub name: String,
    /// The mesh element the values are attached to.
    pub domain: AttributeDomain,
    /// The stored values.
    pub values: AttributeValues,
}

impl AttributeData {
    /// Creates a new attribute layer.
    #[must_use]
    pub fn new(name: impl Into<String>, domain: AttributeDomain, values: AttributeValues) -> Self {
        Self {
            name: name.into(),
            domain,
            values,
        }
    }
}

/// Arena that owns all attribute layers of a mesh.
///
/// Layers are addressed by ID (generational indices) or looked up by name.
/// Iteration follows insertion order, matching how the host editor lists
/// attribute layers.
#[derive(Debug, Default)]
pub struct AttributeStore {
    layers: SlotMap<AttributeId, AttributeData>,
    order: Vec<AttributeId>,
}

impl AttributeStore {
    /// Creates a new, empty attribute store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attribute layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the store holds no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Inserts a layer and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer with the same name already exists.
    pub fn insert(&mut self, data: AttributeData) -> Result<AttributeId, MeshError> {
        if self.id_by_name(&data.name).is_some() {
            return Err(MeshError::DuplicateAttribute(data.name));
        }
        let id = self.layers.insert(data);
        self.order.push(id);
        Ok(id)
    }

    /// Replaces the values of the layer named `data.name`, or inserts a new
    /// layer if no such name exists. Returns the layer's ID.
    pub fn replace_or_insert(&mut self, data: AttributeData) -> AttributeId {
        if let Some(id) = self.id_by_name(&data.name) {
            self.layers[id] = data;
            return id;
        }
        let id = self.layers.insert(data);
        self.order.push(id);
        id
    }

    /// Removes a layer, returning its data.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not found in the store.
    pub fn remove(&mut self, id: AttributeId) -> Result<AttributeData, MeshError> {
        let data = self
            .layers
            .remove(id)
            .ok_or_else(|| MeshError::AttributeNotFound("attribute".into()))?;
        self.order.retain(|&other| other != id);
        Ok(data)
    }

    /// Returns a reference to the layer data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not found in the store.
    pub fn attribute(&self, id: AttributeId) -> Result<&AttributeData, MeshError> {
        self.layers
            .get(id)
            .ok_or_else(|| MeshError::AttributeNotFound("attribute".into()))
    }

    /// Returns a mutable reference to the layer data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not found in the store.
    pub fn attribute_mut(&mut self, id: AttributeId) -> Result<&mut AttributeData, MeshError> {
        self.layers
            .get_mut(id)
            .ok_or_else(|| MeshError::AttributeNotFound("attribute".into()))
    }

    /// Returns the ID of the layer with the given name, if any.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<AttributeId> {
        self.order
            .iter()
            .copied()
            .find(|&id| self.layers[id].name == name)
    }

    /// Returns a reference to the layer with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if no layer has that name.
    pub fn by_name(&self, name: &str) -> Result<&AttributeData, MeshError> {
        self.id_by_name(name)
            .map(|id| &self.layers[id])
            .ok_or_else(|| MeshError::AttributeNotFound(name.into()))
    }

    /// Iterates over all layers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, &AttributeData)> {
        self.order.iter().map(|&id| (id, &self.layers[id]))
    }
}
