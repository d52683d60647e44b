//! `TriangleMesh` struct: a face-vertex triangle mesh and its derived normals

use crate::errors::{MeshError, MeshResult};
use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Unit, Vector3};
use ndarray::{Array2, ArrayBase, Data, Ix2};
use tracing::{debug, warn};

pub mod normals;
pub mod orientation;

use normals::{DefaultNormalOps, NormalOps, Normals};

/// Number of columns of every vertex, face and normal array.
const COLUMNS: usize = 3;

/// Triangular mesh following the face-vertex representation.
///
/// An object is described by
/// - `vertices`: 3D points, indexed `0..num_vertices`;
/// - `faces`: triples of vertex indices, each composing one triangle,
///   wound counter-clockwise when seen from the outside.
///
/// From those two, [`compute_normals`](Self::compute_normals) derives one
/// unit normal per face and one per vertex. Both are needed for shading.
///
/// The mesh owns copies of its inputs. Vertices and faces are fixed for the
/// lifetime of the mesh; the normals start zeroed and are recomputed as a
/// whole on every call to `compute_normals`.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    /// Points in the mesh's reference frame
    vertices: Vec<Point3<Real>>,

    /// Each triple holds row indices into `vertices`
    faces: Vec<[usize; 3]>,

    num_vertices: usize,
    num_faces: usize,

    /// Current rotation of the mesh, relative to the +Z reference axis
    orientation: Unit<Vector3<Real>>,

    /// One normal per face, `num_faces` long
    face_normals: Vec<Vector3<Real>>,

    /// One normal per vertex, `num_vertices` long
    vertex_normals: Vec<Vector3<Real>>,
}

impl TriangleMesh {
    /// Build a mesh from vertex positions and face index triples.
    ///
    /// # Errors
    ///
    /// Fails with [`MeshError::IndexOutOfRange`] if a face references a
    /// vertex that does not exist.
    pub fn new(vertices: Vec<Point3<Real>>, faces: Vec<[usize; 3]>) -> MeshResult<Self> {
        let num_vertices = vertices.len();
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= num_vertices) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index: i64::try_from(index).unwrap_or(i64::MAX),
                    num_vertices,
                });
            }
        }
        Ok(Self::from_validated(vertices, faces))
    }

    /// Build a mesh from an `(n, 3)` array of vertex coordinates and an
    /// `(m, 3)` array of vertex indices, both row-major.
    ///
    /// # Errors
    ///
    /// Fails with [`MeshError::InvalidDimension`] if either array does not
    /// have exactly three columns, and with [`MeshError::IndexOutOfRange`] if
    /// a face index is negative or not below the number of vertices.
    ///
    /// ```
    /// # use mesh_normals::mesh::TriangleMesh;
    /// # use ndarray::array;
    /// let vertices = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    /// let faces = array![[0, 1, 2]];
    /// let mut mesh = TriangleMesh::from_arrays(&vertices, &faces)?;
    /// mesh.compute_normals();
    /// assert_eq!(mesh.face_normals()[0], nalgebra::Vector3::z());
    /// # Ok::<(), mesh_normals::errors::MeshError>(())
    /// ```
    pub fn from_arrays<SV, SF, I>(
        vertices: &ArrayBase<SV, Ix2>,
        faces: &ArrayBase<SF, Ix2>,
    ) -> MeshResult<Self>
    where
        SV: Data<Elem = Real>,
        SF: Data<Elem = I>,
        I: Copy + Into<i64>,
    {
        check_columns("vertices", vertices.ncols())?;
        check_columns("faces", faces.ncols())?;

        let points: Vec<Point3<Real>> = vertices
            .rows()
            .into_iter()
            .map(|row| Point3::new(row[0], row[1], row[2]))
            .collect();

        let num_vertices = points.len();
        let triples = faces
            .rows()
            .into_iter()
            .enumerate()
            .map(|(face, row)| -> MeshResult<[usize; 3]> {
                let index = |column: usize| checked_index(face, row[column].into(), num_vertices);
                Ok([index(0)?, index(1)?, index(2)?])
            })
            .collect::<MeshResult<Vec<_>>>()?;

        Ok(Self::from_validated(points, triples))
    }

    fn from_validated(vertices: Vec<Point3<Real>>, faces: Vec<[usize; 3]>) -> Self {
        let num_vertices = vertices.len();
        let num_faces = faces.len();
        debug!(num_vertices, num_faces, "built triangle mesh");

        TriangleMesh {
            vertices,
            faces,
            num_vertices,
            num_faces,
            orientation: Vector3::z_axis(),
            face_normals: vec![Vector3::zeros(); num_faces],
            vertex_normals: vec![Vector3::zeros(); num_vertices],
        }
    }

    /// Vertex positions in the mesh's reference frame.
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    /// Face index triples.
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub const fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub const fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Normalized face normals; all zero until [`compute_normals`](Self::compute_normals) runs.
    pub fn face_normals(&self) -> &[Vector3<Real>] {
        &self.face_normals
    }

    /// Normalized vertex normals; all zero until [`compute_normals`](Self::compute_normals) runs.
    pub fn vertex_normals(&self) -> &[Vector3<Real>] {
        &self.vertex_normals
    }

    /// Vertex positions as a row-major `(num_vertices, 3)` array.
    pub fn vertices_array(&self) -> Array2<Real> {
        Array2::from_shape_fn((self.num_vertices, COLUMNS), |(i, j)| self.vertices[i][j])
    }

    /// Face indices as a row-major `(num_faces, 3)` array.
    pub fn faces_array(&self) -> Array2<i64> {
        Array2::from_shape_fn((self.num_faces, COLUMNS), |(i, j)| {
            i64::try_from(self.faces[i][j]).unwrap_or(i64::MAX)
        })
    }

    /// Face normals as a row-major `(num_faces, 3)` array, ready to be saved.
    pub fn face_normals_array(&self) -> Array2<Real> {
        vectors_to_array(&self.face_normals)
    }

    /// Vertex normals as a row-major `(num_vertices, 3)` array, ready to be saved.
    pub fn vertex_normals_array(&self) -> Array2<Real> {
        vectors_to_array(&self.vertex_normals)
    }

    /// Compute the normalized normal of every face and every vertex.
    ///
    /// A face normal is the cross product of two of its sides,
    ///
    /// ```text
    /// face_normal = normalize((v1 - v0) × (v2 - v1))
    /// ```
    ///
    /// and a vertex normal is the normalized sum of the *unnormalized* normals
    /// of the faces around it, so larger faces weigh more. Positions are taken
    /// in world space, i.e. after applying the current orientation.
    ///
    /// Collinear faces and vertices that no face references get a zero
    /// normal; see [`degenerate_faces`](Self::degenerate_faces) and
    /// [`isolated_vertices`](Self::isolated_vertices).
    ///
    /// Uses the rayon engine when the `parallel` feature is enabled.
    pub fn compute_normals(&mut self) {
        self.compute_normals_with(&DefaultNormalOps::new());
    }

    /// [`compute_normals`](Self::compute_normals) with an explicit engine.
    pub fn compute_normals_with<N: NormalOps>(&mut self, ops: &N) {
        let Normals {
            face_normals,
            vertex_normals,
        } = {
            let world = self.vertices_into_world();
            ops.compute(&world, &self.faces)
        };

        self.face_normals = face_normals;
        self.vertex_normals = vertex_normals;

        let degenerate = self.degenerate_faces().len();
        if degenerate > 0 {
            warn!(degenerate, "faces without a well-defined normal");
        }
        debug!(
            num_faces = self.num_faces,
            num_vertices = self.num_vertices,
            "computed normals"
        );
    }

    /// Faces whose current normal is not unit length.
    ///
    /// After [`compute_normals`](Self::compute_normals) these are the
    /// zero-area (collinear) faces. Before it, every face is listed.
    pub fn degenerate_faces(&self) -> Vec<usize> {
        self.face_normals
            .iter()
            .enumerate()
            .filter(|(_, n)| !is_unit(n))
            .map(|(i, _)| i)
            .collect()
    }

    /// Vertices that no face references. Their normal is the zero vector.
    pub fn isolated_vertices(&self) -> Vec<usize> {
        let mut referenced = vec![false; self.num_vertices];
        for &index in self.faces.iter().flatten() {
            referenced[index] = true;
        }
        referenced
            .iter()
            .enumerate()
            .filter(|&(_, &used)| !used)
            .map(|(i, _)| i)
            .collect()
    }
}

fn check_columns(array: &'static str, found: usize) -> MeshResult<()> {
    if found == COLUMNS {
        Ok(())
    } else {
        Err(MeshError::InvalidDimension {
            array,
            expected: COLUMNS,
            found,
        })
    }
}

fn checked_index(face: usize, index: i64, num_vertices: usize) -> MeshResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < num_vertices)
        .ok_or(MeshError::IndexOutOfRange {
            face,
            index,
            num_vertices,
        })
}

fn vectors_to_array(rows: &[Vector3<Real>]) -> Array2<Real> {
    Array2::from_shape_fn((rows.len(), COLUMNS), |(i, j)| rows[i][j])
}

fn is_unit(v: &Vector3<Real>) -> bool {
    (v.norm() - 1.0).abs() <= tolerance().max(1e3 * Real::EPSILON)
}
