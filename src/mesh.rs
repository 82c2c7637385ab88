use nalgebra::Point3;

use crate::{MeshIndex, Vertex};

/// An indexed triangle (or polygon) mesh with interleaved vertices.
///
/// # Characteristics
///
/// * Every element of [indices](Mesh::indices) is less than [vertex_count](Mesh::vertex_count).
/// * Indices are listed in the winding order of the faces they were built from.
/// * Immutable; there is no way to modify a mesh other than taking it apart with
///   [into_parts](Mesh::into_parts).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<Idx: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<Idx>,
}

impl<Idx: MeshIndex> Default for Mesh<Idx> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Idx: MeshIndex> Mesh<Idx> {
    /// Construct a mesh with no vertices.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[Idx] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get the vertex referenced by an index.
    #[inline]
    pub fn get(&self, index: Idx) -> Option<&Vertex> {
        self.vertices.get(index.as_())
    }

    /// Iterate through the vertex of every face corner, in order.
    pub fn resolved(&self) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        self.indices.iter().map(|i| &self.vertices[i.as_()])
    }

    /// The axis-aligned bounds `(min, max)` of this mesh's vertex positions.
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut positions = self.vertices.iter().map(Vertex::position);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }

    /// The vertex buffer contents, as [Vertex::STRIDE_FLOATS] floats per vertex.
    #[inline]
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The vertex buffer contents, as raw bytes.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index buffer contents, as raw bytes.
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Take this mesh apart into its vertex and index buffers.
    #[inline]
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Idx>) {
        (self.vertices, self.indices)
    }
}
