mod support;

use mesh_normals::TriangleMesh;
use mesh_normals::mesh::normals::{NormalOps, SerialNormalOps};
use nalgebra::{Point3, Vector3};
use ndarray::array;
use support::{cube, is_unit, single_face, uv_sphere};

#[test]
fn single_face_normal() {
    let mut mesh = single_face(1.0);
    mesh.compute_normals();

    assert_eq!(mesh.face_normals().len(), mesh.num_faces());
    assert_eq!(mesh.vertex_normals().len(), mesh.num_vertices());
    assert_eq!(mesh.face_normals(), &[Vector3::new(0.0, 0.0, 1.0)]);
    assert_eq!(mesh.vertex_normals(), &[Vector3::new(0.0, 0.0, 1.0); 3]);
}

#[test]
fn single_face_normal_is_scale_invariant() {
    for scale in [10.0, 1e-3, 1e6] {
        let mut mesh = single_face(scale);
        mesh.compute_normals();
        assert_eq!(mesh.face_normals(), &[Vector3::z()], "scale {scale}");
        assert_eq!(mesh.vertex_normals(), &[Vector3::z(); 3], "scale {scale}");
    }
}

#[test]
fn single_face_from_arrays() {
    let vertices = array![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
    let faces = array![[0, 1, 2]];
    let mut mesh = TriangleMesh::from_arrays(&vertices, &faces).unwrap();
    mesh.compute_normals();

    assert_eq!(mesh.face_normals_array(), array![[0.0, 0.0, 1.0]]);
    assert_eq!(
        mesh.vertex_normals_array(),
        array![[0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]]
    );
}

#[test]
fn cube_normals_are_axis_aligned_and_outward() {
    let mut mesh = cube(2.0);
    mesh.compute_normals();

    let expected_faces = [
        -Vector3::z(),
        -Vector3::z(),
        Vector3::z(),
        Vector3::z(),
        -Vector3::y(),
        -Vector3::y(),
        Vector3::y(),
        Vector3::y(),
        -Vector3::x(),
        -Vector3::x(),
        Vector3::x(),
        Vector3::x(),
    ];
    assert_eq!(mesh.face_normals(), &expected_faces);

    for (vertex, normal) in mesh.vertices().iter().zip(mesh.vertex_normals()) {
        assert!(is_unit(normal, 1e-12));
        assert!(
            normal.dot(&vertex.coords) > 0.0,
            "vertex {vertex} has inward normal {normal}"
        );
    }

    // corner 0 touches two triangles of each of its three faces
    let corner = Vector3::new(-1.0, -1.0, -1.0).normalize();
    assert!((mesh.vertex_normals()[0] - corner).norm() < 1e-12);
}

#[test]
fn sphere_normals_are_unit_and_nearly_radial() {
    let mut mesh = uv_sphere(3.0, 32, 16);
    mesh.compute_normals();

    assert!(mesh.degenerate_faces().is_empty());
    assert!(mesh.isolated_vertices().is_empty());

    for normal in mesh.face_normals() {
        assert!(is_unit(normal, 1e-9));
    }
    for (vertex, normal) in mesh.vertices().iter().zip(mesh.vertex_normals()) {
        assert!(is_unit(normal, 1e-9));
        let radial = vertex.coords.normalize();
        assert!(normal.dot(&radial) > 0.98, "vertex {vertex}: {normal}");
    }
}

#[test]
fn degenerate_face_gets_zero_normal() {
    let mut mesh = TriangleMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 1, 3]],
    )
    .unwrap();
    mesh.compute_normals();

    assert_eq!(mesh.face_normals()[0], Vector3::z());
    assert_eq!(mesh.face_normals()[1], Vector3::zeros());
    assert_eq!(mesh.degenerate_faces(), vec![1]);

    // the collinear face adds nothing to its vertices
    assert_eq!(mesh.vertex_normals()[0], Vector3::z());
    assert_eq!(mesh.vertex_normals()[1], Vector3::z());
    assert_eq!(mesh.vertex_normals()[3], Vector3::zeros());
}

#[test]
fn unreferenced_vertex_has_zero_normal() {
    let mut mesh = TriangleMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(7.0, 7.0, 7.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    mesh.compute_normals();

    assert_eq!(mesh.isolated_vertices(), vec![3]);
    assert_eq!(mesh.vertex_normals()[3], Vector3::zeros());
    assert!(mesh.vertex_normals()[..3].iter().all(|n| *n == Vector3::z()));
}

#[test]
fn recomputation_replaces_previous_normals() {
    let mut mesh = single_face(1.0);
    mesh.compute_normals();
    mesh.compute_normals();
    assert_eq!(mesh.vertex_normals(), &[Vector3::z(); 3]);

    mesh.set_orientation(Vector3::new(1.0, 0.0, 0.0)).unwrap();
    // setting the orientation leaves the stored normals alone
    assert_eq!(mesh.face_normals(), &[Vector3::z()]);

    mesh.compute_normals();
    assert!((mesh.face_normals()[0] - Vector3::x()).norm() < 1e-12);
    for n in mesh.vertex_normals() {
        assert!((n - Vector3::x()).norm() < 1e-12);
    }
}

#[test]
fn explicit_engine_matches_default() {
    let mut mesh = uv_sphere(1.0, 24, 12);
    mesh.compute_normals();
    let default = mesh.vertex_normals().to_vec();

    let explicit = SerialNormalOps::new().compute(mesh.vertices(), mesh.faces());
    for (a, b) in default.iter().zip(&explicit.vertex_normals) {
        assert!((a - b).norm() < 1e-12);
    }

    mesh.compute_normals_with(&SerialNormalOps::new());
    assert_eq!(mesh.vertex_normals(), explicit.vertex_normals.as_slice());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_engine_matches_serial() {
    use mesh_normals::mesh::normals::ParallelNormalOps;

    let mesh = uv_sphere(2.0, 64, 32);
    let serial = SerialNormalOps::new().compute(mesh.vertices(), mesh.faces());
    let parallel = ParallelNormalOps::new().compute(mesh.vertices(), mesh.faces());

    assert_eq!(serial.face_normals, parallel.face_normals);
    for (s, p) in serial.vertex_normals.iter().zip(&parallel.vertex_normals) {
        assert!((s - p).norm() < 1e-12);
    }
}
