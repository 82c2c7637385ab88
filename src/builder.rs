use std::collections::{hash_map::Entry, HashMap};

use crate::{
    error::{Error, MalformedInput},
    Corner, Mesh, MeshIndex, RawAttributes, Vertex, WeldKey,
};

/// Working state of a single [Mesh::build] call.
///
/// `vertices` doubles as the insertion-ordered key list: the vertex at slot `i` is the one
/// created for the `i`th distinct [WeldKey] encountered.
struct Builder<'raw, Idx: MeshIndex> {
    raw: &'raw RawAttributes,
    slots: HashMap<WeldKey, Idx>,
    vertices: Vec<Vertex>,
    indices: Vec<Idx>,
}

impl<'raw, Idx: MeshIndex> Builder<'raw, Idx> {
    fn new(raw: &'raw RawAttributes) -> Self {
        let corners = raw.corner_count();
        Self {
            raw,
            slots: HashMap::with_capacity(corners),
            vertices: Vec::with_capacity(corners),
            indices: Vec::with_capacity(corners),
        }
    }

    /// Find or create the vertex for a corner, and append its index.
    fn weld(&mut self, face: usize, corner: usize, key: WeldKey) -> Result<(), Error> {
        let index = match self.slots.entry(key) {
            Entry::Occupied(slot) => *slot.get(),
            Entry::Vacant(slot) => {
                let index =
                    Idx::from_slot(self.vertices.len()).ok_or_else(|| Error::IndexOverflow {
                        vertices: self.vertices.len() + 1,
                        max: Idx::capacity(),
                    })?;
                let vertex = resolve(self.raw, face, corner, key)?;
                self.vertices.push(vertex);
                *slot.insert(index)
            }
        };
        self.indices.push(index);
        Ok(())
    }

    fn finish(self) -> Mesh<Idx> {
        Mesh {
            vertices: self.vertices,
            indices: self.indices,
        }
    }
}

/// Resolve a corner's attributes into a vertex.
fn resolve(
    raw: &RawAttributes,
    face: usize,
    corner: usize,
    key: Corner,
) -> Result<Vertex, MalformedInput> {
    let positions = raw.positions();
    let position = positions
        .get(key.position as usize)
        .ok_or(MalformedInput::PositionOutOfRange {
            face,
            corner,
            index: key.position,
            len: positions.len(),
        })?;
    let normal = match key.normal {
        None => Vertex::MISSING_NORMAL.into(),
        Some(n) => {
            let normals = raw.normals();
            *normals
                .get(n as usize)
                .ok_or(MalformedInput::NormalOutOfRange {
                    face,
                    corner,
                    index: n,
                    len: normals.len(),
                })?
        }
    };
    Ok(Vertex::new(*position, normal))
}

impl<Idx: MeshIndex> Mesh<Idx> {
    /// Build an indexed mesh from a face-vertex attribute stream.
    ///
    /// Faces, and the corners within each face, are visited in order. The first corner with a
    /// given `(position, normal)` index pair creates a vertex; every later corner with the same
    /// pair reuses it. Each corner contributes exactly one index, so the index buffer preserves
    /// both the corner count and the winding order of the input.
    ///
    /// A stream with no faces yields an empty mesh.
    ///
    /// # Errors
    ///
    /// * [MalformedInput::PositionOutOfRange] / [MalformedInput::NormalOutOfRange] if a corner
    ///   references an attribute which doesn't exist
    /// * [Error::IndexOverflow] if the mesh has more vertices than `Idx` can address
    ///
    /// No mesh is produced on error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            skip_all,
            fields(faces = raw.face_count(), corners = raw.corner_count())
        )
    )]
    pub fn build(raw: &RawAttributes) -> Result<Self, Error> {
        let mut builder = Builder::new(raw);
        for (face, corners) in raw.faces().enumerate() {
            for (corner, &key) in corners.iter().enumerate() {
                builder.weld(face, corner, key)?;
            }
        }
        let mesh = builder.finish();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            welded = mesh.index_count() - mesh.vertex_count(),
            "built indexed mesh"
        );
        Ok(mesh)
    }
}

impl<Idx: MeshIndex> TryFrom<&RawAttributes> for Mesh<Idx> {
    type Error = Error;
    #[inline]
    fn try_from(raw: &RawAttributes) -> Result<Self, Self::Error> {
        Self::build(raw)
    }
}

impl<Idx: MeshIndex> TryFrom<RawAttributes> for Mesh<Idx> {
    type Error = Error;
    #[inline]
    fn try_from(raw: RawAttributes) -> Result<Self, Self::Error> {
        Self::build(&raw)
    }
}
