use std::hash::Hash;

use num_traits::{AsPrimitive, NumCast, PrimInt};

// TODO :: convert to trait alias once https://github.com/rust-lang/rfcs/pull/1733 is stabilized
/// Trait alias for integer types which can index into a [Mesh](crate::Mesh)'s vertices.
pub trait MeshIndex:
    PrimInt
    + AsPrimitive<usize>
    + bytemuck::Pod
    + Hash
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    /// The number of vertices addressable by this index type.
    #[inline]
    fn capacity() -> usize {
        // +1 for zero; saturates for types as wide as usize
        AsPrimitive::<usize>::as_(Self::max_value()).saturating_add(1)
    }

    /// Convert a vertex slot into an index, if it fits.
    #[inline]
    fn from_slot(slot: usize) -> Option<Self> {
        <Self as NumCast>::from(slot)
    }
}

impl<P> MeshIndex for P where
    P: PrimInt
        + AsPrimitive<usize>
        + bytemuck::Pod
        + Hash
        + std::fmt::Debug
        + Send
        + Sync
        + 'static
{
}
