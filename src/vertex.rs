use std::mem::{offset_of, size_of};

use nalgebra::{Point3, Vector3};

/// An interleaved vertex record, ready to be copied into a vertex buffer.
///
/// # Layout
///
/// Six tightly packed `f32`s: position `(x, y, z)` followed by normal `(x, y, z)`. Renderers depend
/// on this layout; see [Vertex::STRIDE], [Vertex::POSITION_OFFSET], and [Vertex::NORMAL_OFFSET].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

// the buffer layout contract; a change here breaks every shader reading these buffers
static_assertions::const_assert_eq!(size_of::<Vertex>(), Vertex::STRIDE);
static_assertions::const_assert_eq!(offset_of!(Vertex, position), Vertex::POSITION_OFFSET);
static_assertions::const_assert_eq!(offset_of!(Vertex, normal), Vertex::NORMAL_OFFSET);

impl Vertex {
    /// The number of floats in one vertex record.
    pub const STRIDE_FLOATS: usize = 6;
    /// The offset of the position within a vertex record, in floats.
    pub const POSITION_OFFSET_FLOATS: usize = 0;
    /// The offset of the normal within a vertex record, in floats.
    pub const NORMAL_OFFSET_FLOATS: usize = 3;

    /// The size of one vertex record, in bytes.
    pub const STRIDE: usize = Self::STRIDE_FLOATS * size_of::<f32>();
    /// The offset of the position within a vertex record, in bytes.
    pub const POSITION_OFFSET: usize = Self::POSITION_OFFSET_FLOATS * size_of::<f32>();
    /// The offset of the normal within a vertex record, in bytes.
    pub const NORMAL_OFFSET: usize = Self::NORMAL_OFFSET_FLOATS * size_of::<f32>();

    /// The normal given to vertices whose corner specified none.
    pub const MISSING_NORMAL: [f32; 3] = [0.0, 0.0, 0.0];

    #[inline]
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }

    #[inline]
    pub fn position(&self) -> Point3<f32> {
        self.position.into()
    }

    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal.into()
    }

    /// View this record as its six floats.
    #[inline]
    pub fn as_floats(&self) -> &[f32; Self::STRIDE_FLOATS] {
        bytemuck::cast_ref(self)
    }
}
