//! Construction of indexed meshes from small, hand-written attribute streams.

use nalgebra::{point, vector};
use weldmesh::{Corner, Error, MalformedInput, Mesh, RawAttributes, Vertex};

fn c(position: u32, normal: i32) -> Corner {
    Corner::from_signed(position, normal)
}

fn unit_triangle() -> RawAttributes {
    RawAttributes::new(
        vec![
            point![0.0, 0.0, 0.0],
            point![1.0, 0.0, 0.0],
            point![0.0, 1.0, 0.0],
        ],
        vec![vector![0.0, 0.0, 1.0]],
    )
}

#[test]
fn single_triangle() {
    let mut raw = unit_triangle();
    raw.push_face([c(0, 0), c(1, 0), c(2, 0)]);

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.indices(), &[0, 1, 2]);
    for (v, p) in mesh.vertices().iter().zip(raw.positions()) {
        assert_eq!(v.position(), *p);
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn quad_shares_edge() {
    let mut raw = RawAttributes::new(
        vec![
            point![0.0, 0.0, 0.0],
            point![1.0, 0.0, 0.0],
            point![1.0, 1.0, 0.0],
            point![0.0, 1.0, 0.0],
        ],
        vec![vector![0.0, 0.0, 1.0]],
    );
    raw.push_face([c(0, 0), c(1, 0), c(2, 0)]);
    raw.push_face([c(0, 0), c(2, 0), c(3, 0)]);

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
}

#[test]
fn missing_normal_is_welded_separately() {
    let mut raw = unit_triangle();
    raw.push_face([c(0, 0), c(1, -1), c(2, 0)]);
    // same position as the second corner above, but with a real normal
    raw.push_face([c(1, 0), c(2, 0), c(0, -1)]);

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert_eq!(mesh.indices(), &[0, 1, 2, 3, 2, 4]);
    assert_eq!(mesh.vertices()[1].normal, Vertex::MISSING_NORMAL);
    assert_eq!(mesh.vertices()[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices()[3].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.vertices()[3].position, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices()[4].normal, [0.0, 0.0, 0.0]);
}

#[test]
fn position_one_past_end() {
    let mut raw = unit_triangle();
    raw.push_face([c(0, 0), c(1, 0), c(2, 0)]);
    raw.push_face([c(0, 0), c(2, 0), c(3, 0)]);

    let err = Mesh::<u32>::build(&raw).unwrap_err();
    assert!(err.is_malformed_input());
    assert_eq!(
        err,
        Error::MalformedInput(MalformedInput::PositionOutOfRange {
            face: 1,
            corner: 2,
            index: 3,
            len: 3,
        })
    );
}

#[test]
fn normal_out_of_range() {
    let mut raw = unit_triangle();
    raw.push_face([c(0, 0), c(1, 1), c(2, 0)]);

    assert_eq!(
        Mesh::<u32>::build(&raw),
        Err(Error::MalformedInput(MalformedInput::NormalOutOfRange {
            face: 0,
            corner: 1,
            index: 1,
            len: 1,
        }))
    );
}

#[test]
fn normal_index_without_normals() {
    let mut raw = RawAttributes::new(vec![point![0.0, 0.0, 0.0]], Vec::new());
    raw.push_face([Corner::new(0, Some(0))]);

    assert!(matches!(
        Mesh::<u32>::build(&raw),
        Err(Error::MalformedInput(MalformedInput::NormalOutOfRange { len: 0, .. }))
    ));
}

#[test]
fn no_faces() {
    let raw = unit_triangle();
    assert!(raw.is_empty());

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert!(mesh.is_empty());
    assert!(mesh.vertices().is_empty());
    assert!(mesh.indices().is_empty());
    assert_eq!(mesh, Mesh::empty());
    assert_eq!(mesh.bounds(), None);
}

#[test]
fn empty_face_contributes_nothing() {
    let mut raw = unit_triangle();
    raw.push_face(std::iter::empty::<Corner>());
    raw.push_face([c(2, 0), c(1, 0), c(0, 0)]);

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert_eq!(raw.face_count(), 2);
    assert_eq!(mesh.indices(), &[0, 1, 2]);
    assert_eq!(mesh.vertices()[0].position, [0.0, 1.0, 0.0]);
}

#[test]
fn polygon_faces_keep_their_corners() {
    let mut raw = RawAttributes::new(
        (0..5).map(|i| point![i as f32, 0.0, 0.0]).collect(),
        Vec::new(),
    );
    raw.push_face((0..5).map(|i| Corner::new(i, None)));
    raw.push_face([4, 3, 2].map(|i| Corner::new(i, None)));

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 4, 3, 2]);
}

#[test]
fn index_overflow() {
    let positions = (0..300).map(|i| point![i as f32, 0.0, 0.0]).collect();
    let mut raw = RawAttributes::new(positions, Vec::new());
    raw.push_face((0..300).map(|i| Corner::new(i, None)));

    assert_eq!(
        Mesh::<u8>::build(&raw),
        Err(Error::IndexOverflow {
            vertices: 257,
            max: 256
        })
    );
    let mesh = Mesh::<u16>::build(&raw).unwrap();
    assert_eq!(mesh.vertex_count(), 300);
}

#[test]
fn narrow_index_fits_when_welded() {
    // 600 corners, but only 200 distinct keys
    let positions = (0..200).map(|i| point![i as f32, 0.0, 0.0]).collect();
    let mut raw = RawAttributes::new(positions, Vec::new());
    for _ in 0..3 {
        raw.push_face((0..200).map(|i| Corner::new(i, None)));
    }

    let mesh = Mesh::<u8>::build(&raw).unwrap();
    assert_eq!(mesh.vertex_count(), 200);
    assert_eq!(mesh.index_count(), 600);
}

#[test]
fn try_from_matches_build() {
    let mut raw = unit_triangle();
    raw.push_face([c(0, 0), c(1, 0), c(2, 0)]);

    let built: Mesh = Mesh::build(&raw).unwrap();
    let borrowed: Mesh = Mesh::try_from(&raw).unwrap();
    let owned: Mesh = Mesh::try_from(raw).unwrap();
    assert_eq!(built, borrowed);
    assert_eq!(built, owned);
}

#[test]
fn resolved_and_bounds() {
    let mut raw = RawAttributes::new(
        vec![
            point![-1.0, 2.0, 0.5],
            point![3.0, -4.0, 0.0],
            point![0.0, 0.0, -6.0],
        ],
        Vec::new(),
    );
    raw.push_face([c(2, -1), c(0, -1), c(1, -1)]);

    let mesh: Mesh = Mesh::build(&raw).unwrap();
    let resolved: Vec<_> = mesh.resolved().map(Vertex::position).collect();
    assert_eq!(
        resolved,
        vec![
            point![0.0, 0.0, -6.0],
            point![-1.0, 2.0, 0.5],
            point![3.0, -4.0, 0.0]
        ]
    );
    assert_eq!(
        mesh.bounds(),
        Some((point![-1.0, -4.0, -6.0], point![3.0, 2.0, 0.5]))
    );
    assert_eq!(mesh.get(2).map(Vertex::position), Some(point![3.0, -4.0, 0.0]));
    assert_eq!(mesh.get(3), None);
}
