//! The interleaved buffer layout handed to renderers.

use nalgebra::{point, vector};
use weldmesh::{Corner, Mesh, RawAttributes, Vertex};

#[test]
fn vertex_layout_constants() {
    assert_eq!(Vertex::STRIDE, 24);
    assert_eq!(Vertex::POSITION_OFFSET, 0);
    assert_eq!(Vertex::NORMAL_OFFSET, 12);
    assert_eq!(std::mem::size_of::<Vertex>(), Vertex::STRIDE);
    assert_eq!(Vertex::STRIDE_FLOATS, 6);
    assert_eq!(Vertex::NORMAL_OFFSET_FLOATS, 3);
}

#[test]
fn vertex_floats() {
    let v = Vertex::new(point![1.0, 2.0, 3.0], vector![4.0, 5.0, 6.0]);
    assert_eq!(v.as_floats(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(v.position(), point![1.0, 2.0, 3.0]);
    assert_eq!(v.normal(), vector![4.0, 5.0, 6.0]);
}

#[test]
fn mesh_buffers() {
    let mut raw = RawAttributes::new(
        vec![
            point![0.0, 0.0, 0.0],
            point![1.0, 0.0, 0.0],
            point![0.0, 1.0, 0.0],
        ],
        vec![vector![0.0, 0.0, 1.0]],
    );
    raw.push_face([
        Corner::new(0, Some(0)),
        Corner::new(1, Some(0)),
        Corner::new(2, None),
    ]);
    let mesh: Mesh = Mesh::build(&raw).unwrap();

    let expected: [[f32; 6]; 3] = [
        [0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    ];
    assert_eq!(mesh.vertex_data(), expected.as_flattened());
    assert_eq!(mesh.vertex_bytes().len(), 3 * Vertex::STRIDE);
    // normal z of the first vertex
    assert_eq!(&mesh.vertex_bytes()[20..24], &1.0f32.to_ne_bytes());

    assert_eq!(mesh.index_bytes().len(), 3 * std::mem::size_of::<u32>());
    assert_eq!(&mesh.index_bytes()[4..8], &1u32.to_ne_bytes());

    let (vertices, indices) = mesh.into_parts();
    assert_eq!(vertices.len(), 3);
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn narrow_index_bytes() {
    let mut raw = RawAttributes::new(vec![point![0.0, 0.0, 0.0]], Vec::new());
    raw.push_face([Corner::new(0, None); 4]);
    let mesh = Mesh::<u16>::build(&raw).unwrap();

    assert_eq!(mesh.vertex_count(), 1);
    assert_eq!(mesh.index_bytes(), &[0u8; 8]);
}
