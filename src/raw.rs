//! Face-vertex attribute streams, as produced by mesh file parsers.

use std::{collections::HashMap, iter::FusedIterator};

use nalgebra::{Point3, Vector3};

use crate::error::{AttributeKind, MalformedInput};

/// The position of a vertex within an attribute stream.
pub type Position = Point3<f32>;
/// The normal of a vertex within an attribute stream.
pub type Normal = Vector3<f32>;

/// A single corner of a face, referring to its attributes by index.
///
/// `position` indexes into [RawAttributes::positions]; `normal`, if extant, indexes into
/// [RawAttributes::normals].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub normal: Option<u32>,
}

/// The key under which face corners are welded into a single vertex.
///
/// Corners are welded iff both of their indices are identical; this never compares attribute
/// values, so two corners which resolve to the same floats under different indices remain
/// distinct vertices.
pub type WeldKey = Corner;

impl Corner {
    #[inline]
    pub const fn new(position: u32, normal: Option<u32>) -> Self {
        Self { position, normal }
    }

    /// Construct a corner from a normal index in signed form, where any negative value means "no
    /// normal".
    #[inline]
    pub fn from_signed(position: u32, normal: i32) -> Self {
        Self {
            position,
            normal: u32::try_from(normal).ok(),
        }
    }
}

/// A set of vertex attributes and the faces referencing them.
///
/// Corners are stored contiguously, in face order; each face records only its arity (corner
/// count). A face may have any arity, including zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAttributes {
    positions: Vec<Position>,
    normals: Vec<Normal>,
    corners: Vec<Corner>,
    arities: Vec<usize>,
}

/// The most entries an attribute list may hold. One less than the number of `u32` values, so that
/// `u32::MAX` is never a valid attribute index.
const MAX_ATTRIBUTES: usize = u32::MAX as usize;

impl RawAttributes {
    /// Construct a stream with the given attributes and no faces.
    pub fn new(positions: Vec<Position>, normals: Vec<Normal>) -> Self {
        Self {
            positions,
            normals,
            corners: Vec::new(),
            arities: Vec::new(),
        }
    }

    /// Construct a stream from flat buffers, in the shape most parsers emit them.
    ///
    /// * `positions` and `normals` hold 3 floats per attribute.
    /// * `normal_indices` is either empty (no corner has a normal) or parallel to
    ///   `position_indices`.
    /// * `face_arities` is either empty (every face is a triangle) or sums to the number of
    ///   corners.
    ///
    /// Indices are *not* checked against the attribute lists here; that happens in
    /// [Mesh::build](crate::Mesh::build), where the offending face can be reported.
    ///
    /// # Errors
    ///
    /// * [MalformedInput::RaggedAttribute] if a float buffer's length isn't a multiple of 3
    /// * [MalformedInput::NormalIndexCount] if `normal_indices` isn't empty or parallel
    /// * [MalformedInput::FaceArity] if `face_arities` doesn't partition the corners
    pub fn from_flat(
        positions: &[f32],
        normals: &[f32],
        position_indices: &[u32],
        normal_indices: &[u32],
        face_arities: &[u32],
    ) -> Result<Self, MalformedInput> {
        let positions = triples(positions, AttributeKind::Position)?
            .map(|[x, y, z]| Position::new(x, y, z))
            .collect();
        let normals = triples(normals, AttributeKind::Normal)?
            .map(|[x, y, z]| Normal::new(x, y, z))
            .collect();

        let corners: Vec<Corner> = if normal_indices.is_empty() {
            position_indices
                .iter()
                .map(|&p| Corner::new(p, None))
                .collect()
        } else if normal_indices.len() == position_indices.len() {
            position_indices
                .iter()
                .zip(normal_indices)
                .map(|(&p, &n)| Corner::new(p, Some(n)))
                .collect()
        } else {
            return Err(MalformedInput::NormalIndexCount {
                positions: position_indices.len(),
                normals: normal_indices.len(),
            });
        };

        let arities = if face_arities.is_empty() {
            if corners.len() % 3 != 0 {
                return Err(MalformedInput::FaceArity {
                    expected: corners.len().next_multiple_of(3),
                    actual: corners.len(),
                });
            }
            vec![3; corners.len() / 3]
        } else {
            let arities: Vec<usize> = face_arities.iter().map(|&a| a as usize).collect();
            let expected = arities.iter().sum();
            if expected != corners.len() {
                return Err(MalformedInput::FaceArity {
                    expected,
                    actual: corners.len(),
                });
            }
            arities
        };

        Ok(Self {
            positions,
            normals,
            corners,
            arities,
        })
    }

    /// Append a face, given its corners in winding order.
    pub fn push_face<C: Into<Corner>>(&mut self, corners: impl IntoIterator<Item = C>) {
        let start = self.corners.len();
        self.corners.extend(corners.into_iter().map(Into::into));
        self.arities.push(self.corners.len() - start);
    }

    /// Append another stream to this one.
    ///
    /// The attributes of `other` are placed after those of `self`, and the indices of its corners
    /// are shifted to match, so each of its faces still refers to the same attribute values.
    /// Indices which were out of range in `other` stay out of range.
    ///
    /// # Errors
    ///
    /// [MalformedInput::TooManyAttributes] if either combined attribute list could no longer be
    /// indexed by a `u32`. `self` is left unchanged.
    pub fn append(&mut self, other: RawAttributes) -> Result<(), MalformedInput> {
        self.join(other, false)
    }

    /// Append another stream to this one, reusing attributes of `self` which are bitwise identical
    /// to those of `other`.
    ///
    /// Parsers which split a file into groups often re-index each group's attributes separately,
    /// so a vertex shared between groups arrives as one copy per group. Joining the groups this
    /// way gives such copies a single index again, and corners on either side of a group boundary
    /// weld into one vertex.
    ///
    /// Each attribute of `other` claims at most one attribute of `self`, in order, so entries
    /// which were distinct within `other` stay distinct.
    ///
    /// # Errors
    ///
    /// As [append](RawAttributes::append).
    pub fn append_shared(&mut self, other: RawAttributes) -> Result<(), MalformedInput> {
        self.join(other, true)
    }

    fn join(&mut self, other: RawAttributes, share: bool) -> Result<(), MalformedInput> {
        check_room(AttributeKind::Position, self.positions.len(), other.positions.len())?;
        check_room(AttributeKind::Normal, self.normals.len(), other.normals.len())?;

        let positions = extend(&mut self.positions, other.positions, point_bits, share);
        let normals = extend(&mut self.normals, other.normals, vector_bits, share);
        self.corners.extend(other.corners.into_iter().map(|c| Corner {
            position: positions.index(c.position),
            normal: c.normal.map(|n| normals.index(n)),
        }));
        self.arities.extend(other.arities);
        Ok(())
    }

    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[Normal] {
        &self.normals
    }

    /// Every corner of every face, in order.
    #[inline]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.arities.len()
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Whether this stream contains no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }

    /// Iterate through the corners of each face, in order.
    pub fn faces(&self) -> Faces<'_> {
        Faces {
            corners: &self.corners,
            arities: self.arities.iter(),
        }
    }
}

fn check_room(attribute: AttributeKind, len: usize, extra: usize) -> Result<(), MalformedInput> {
    let total = len.saturating_add(extra);
    if total > MAX_ATTRIBUTES {
        return Err(MalformedInput::TooManyAttributes {
            attribute,
            len: total,
        });
    }
    Ok(())
}

fn point_bits(p: &Position) -> [u32; 3] {
    p.coords.map(f32::to_bits).into()
}

fn vector_bits(v: &Normal) -> [u32; 3] {
    v.map(f32::to_bits).into()
}

/// Where the attributes of an appended list ended up.
struct Rebase {
    slots: Vec<u32>,
    len: u32,
}

impl Rebase {
    fn index(&self, index: u32) -> u32 {
        match self.slots.get(index as usize) {
            Some(&slot) => slot,
            // past the end of the appended list; keep it past the end of the combined one
            None => self.len.saturating_add(index - self.slots.len() as u32),
        }
    }
}

/// Move `items` onto the end of `list`. If `share` is set, an item reuses an entry of `list` with
/// identical `bits` instead, if one is left.
///
/// Both lengths must already have been checked with [check_room].
fn extend<T>(list: &mut Vec<T>, items: Vec<T>, bits: fn(&T) -> [u32; 3], share: bool) -> Rebase {
    // indices of reusable entries, per bit pattern; popped lowest first
    let mut reusable: HashMap<[u32; 3], Vec<u32>> = HashMap::new();
    if share {
        for (i, item) in list.iter().enumerate().rev() {
            reusable.entry(bits(item)).or_default().push(i as u32);
        }
    }

    let mut slots = Vec::with_capacity(items.len());
    for item in items {
        let reused = reusable.get_mut(&bits(&item)).and_then(Vec::pop);
        let slot = reused.unwrap_or_else(|| {
            list.push(item);
            (list.len() - 1) as u32
        });
        slots.push(slot);
    }
    Rebase {
        slots,
        len: list.len() as u32,
    }
}

/// Split a flat float buffer into 3-tuples.
fn triples(
    data: &[f32],
    attribute: AttributeKind,
) -> Result<impl Iterator<Item = [f32; 3]> + '_, MalformedInput> {
    if data.len() % 3 != 0 {
        return Err(MalformedInput::RaggedAttribute {
            attribute,
            len: data.len(),
        });
    }
    Ok(data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]))
}

/// Iterator over the faces of a [RawAttributes], yielding each face's corners.
#[derive(Debug, Clone)]
pub struct Faces<'raw> {
    corners: &'raw [Corner],
    arities: std::slice::Iter<'raw, usize>,
}

impl<'raw> Iterator for Faces<'raw> {
    type Item = &'raw [Corner];

    fn next(&mut self) -> Option<Self::Item> {
        let arity = *self.arities.next()?;
        let (face, rest) = self.corners.split_at(arity);
        self.corners = rest;
        Some(face)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.arities.size_hint()
    }
}

impl ExactSizeIterator for Faces<'_> {}

impl FusedIterator for Faces<'_> {}
