//! Indexed mesh construction from face-vertex attribute streams.
//!
//! Mesh files such as OBJ store each vertex attribute once per unique value and have every face
//! corner reference its attributes by index. GPUs want the opposite: one interleaved record per
//! vertex and a single index buffer. [Mesh::build] converts the former into the latter, welding
//! face corners that reference the same `(position, normal)` index pair into one shared vertex.
//!
//! ```
//! use weldmesh::{Corner, Mesh, RawAttributes};
//! use nalgebra::{point, vector};
//!
//! let mut raw = RawAttributes::new(
//!     vec![point![0.0, 0.0, 0.0], point![1.0, 0.0, 0.0], point![0.0, 1.0, 0.0], point![1.0, 1.0, 0.0]],
//!     vec![vector![0.0, 0.0, 1.0]],
//! );
//! raw.push_face([Corner::new(0, Some(0)), Corner::new(1, Some(0)), Corner::new(2, Some(0))]);
//! raw.push_face([Corner::new(0, Some(0)), Corner::new(2, Some(0)), Corner::new(3, Some(0))]);
//!
//! let mesh: Mesh = Mesh::build(&raw).unwrap();
//! assert_eq!(mesh.vertex_count(), 4);
//! assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
//! ```
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

mod builder;
pub mod error;
mod index;
mod mesh;
mod raw;
mod vertex;

#[cfg(feature = "deserialize")]
pub mod de;

#[cfg(feature = "wgpu")]
pub mod gpu;

pub use error::{Error, MalformedInput};
pub use index::*;
pub use mesh::*;
pub use raw::*;
pub use vertex::*;
