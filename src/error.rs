//! Errors produced while constructing a [Mesh](crate::Mesh).

/// The attribute list a structural error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeKind::Position => f.write_str("position"),
            AttributeKind::Normal => f.write_str("normal"),
        }
    }
}

/// An attribute stream which cannot describe a valid mesh.
///
/// `face` and `corner` locate the offending face corner: `face` is the index of the face within
/// the stream, `corner` is the index of the corner within that face.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedInput {
    #[error("face {face}, corner {corner}: position index out of range: 0..{len} ∌ {index}")]
    PositionOutOfRange {
        face: usize,
        corner: usize,
        index: u32,
        len: usize,
    },
    #[error("face {face}, corner {corner}: normal index out of range: 0..{len} ∌ {index}")]
    NormalOutOfRange {
        face: usize,
        corner: usize,
        index: u32,
        len: usize,
    },
    #[error("{attribute} buffer holds {len} floats, which is not a multiple of 3")]
    RaggedAttribute { attribute: AttributeKind, len: usize },
    #[error("expected either 0 or {positions} normal indices, found {normals}")]
    NormalIndexCount { positions: usize, normals: usize },
    #[error("face arities describe {expected} corners, but {actual} corners were supplied")]
    FaceArity { expected: usize, actual: usize },
    #[error("{attribute} list would hold {len} entries, more than a u32 index can address")]
    TooManyAttributes { attribute: AttributeKind, len: usize },
}

/// Errors related to [Mesh::build](crate::Mesh::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    MalformedInput(#[from] MalformedInput),
    #[error("mesh requires {vertices} vertices, but its index type can only address {max}")]
    IndexOverflow { vertices: usize, max: usize },
}

impl Error {
    /// Whether this error was caused by the input stream itself, rather than by the requested
    /// output format.
    #[inline]
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}
