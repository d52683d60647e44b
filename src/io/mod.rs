//! Array file I/O.
//!
//! Meshes travel to and from disk as NumPy `.npy` arrays: an `(n, 3)` float
//! array of vertex coordinates, an `(m, 3)` integer array of face indices, and
//! the `(m, 3)` / `(n, 3)` float arrays of computed normals.

mod npy;

pub use npy::{NpyElement, NpyHeader, read_array, read_header, write_array};

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::{Array2, ArrayBase, Data, Ix2};
use tracing::debug;

use crate::errors::MeshResult;

/// Load a 2-D array of `T` from an `.npy` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid `.npy` file,
/// is not two dimensional, or stores elements of a different type than `T`.
pub fn load_array<T: NpyElement, P: AsRef<Path>>(path: P) -> MeshResult<Array2<T>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let array = read_array::<T, _>(&mut BufReader::new(file)).inspect_err(|e| {
        debug!(path = %path.display(), error = %e, "failed to load array");
    })?;
    debug!(
        path = %path.display(),
        descr = T::DESCR,
        rows = array.nrows(),
        cols = array.ncols(),
        "loaded array"
    );
    Ok(array)
}

/// Load a float (`f8`) array, such as vertex coordinates.
///
/// # Errors
///
/// Fails with [`MeshError::DataTypeMismatch`](crate::errors::MeshError::DataTypeMismatch) if the file does not hold `f8`
/// elements, or with any error of [`load_array`].
///
/// # Example
///
/// ```no_run
/// use mesh_normals::io::load_float_array;
///
/// let vertices = load_float_array("data/bunny_vertices.npy").unwrap();
/// println!("{} vertices", vertices.nrows());
/// ```
pub fn load_float_array<P: AsRef<Path>>(path: P) -> MeshResult<Array2<f64>> {
    load_array(path)
}

/// Load an integer (`i4`) array, such as face indices.
///
/// # Errors
///
/// Fails with [`MeshError::DataTypeMismatch`](crate::errors::MeshError::DataTypeMismatch) if the file does not hold `i4`
/// elements, or with any error of [`load_array`].
pub fn load_int_array<P: AsRef<Path>>(path: P) -> MeshResult<Array2<i32>> {
    load_array(path)
}

/// Save a 2-D array as a row-major `.npy` file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_array<T, S, P>(path: P, array: &ArrayBase<S, Ix2>) -> MeshResult<()>
where
    T: NpyElement,
    S: Data<Elem = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)?;
    write_array(&mut BufWriter::new(file), array)?;
    debug!(
        path = %path.display(),
        descr = T::DESCR,
        rows = array.nrows(),
        cols = array.ncols(),
        "saved array"
    );
    Ok(())
}

/// Render an array in Octave/Matlab layout: `[a, b, c;\n d, e, f]`.
pub fn format_array<T, S>(array: &ArrayBase<S, Ix2>) -> String
where
    T: Display,
    S: Data<Elem = T>,
{
    let rows = array
        .rows()
        .into_iter()
        .map(|row| row.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))
        .collect::<Vec<_>>();
    format!("[{}]", rows.join(";\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn format_array_uses_octave_layout() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        assert_eq!(format_array(&a), "[1, 2, 3;\n4, 5, 6]");
    }

    #[test]
    fn format_empty_array() {
        let a = Array2::<f64>::zeros((0, 3));
        assert_eq!(format_array(&a), "[]");
    }
}
