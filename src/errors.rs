//! Mesh and array file errors

use thiserror::Error;

/// Result type used throughout the crate.
pub type MeshResult<T> = Result<T, MeshError>;

/// All the failures a mesh or an array file can report.
///
/// Every variant is raised synchronously where it is detected. None of them
/// are transient: they describe bad input, so callers report and stop.
#[derive(Debug, Error)]
pub enum MeshError {
    /// An input array does not have exactly three columns.
    #[error("(InvalidDimension) {array} array must have {expected} columns, found {found}")]
    InvalidDimension {
        /// Which array was rejected ("vertices" or "faces").
        array: &'static str,
        /// Required column count.
        expected: usize,
        /// Column count of the rejected array.
        found: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("(IndexOutOfRange) face {face} references vertex {index}, but the mesh has {num_vertices} vertices")]
    IndexOutOfRange {
        /// Row of the offending face.
        face: usize,
        /// The index as stored in the face array.
        index: i64,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A zero-length vector was about to be normalized.
    #[error("(DegenerateVector) cannot normalize a zero-length {0}")]
    DegenerateVector(&'static str),

    /// An array file holds a different element type than requested.
    #[error("(DataTypeMismatch) expected array elements of type '{expected}', file stores '{found}'")]
    DataTypeMismatch {
        /// Descriptor of the requested element type.
        expected: &'static str,
        /// Descriptor found in the file header.
        found: String,
    },

    /// An array file is not two dimensional.
    #[error("(InvalidShape) expected a 2-D array, file stores shape {shape:?}")]
    InvalidShape {
        /// Shape found in the file header.
        shape: Vec<usize>,
    },

    /// The array file header could not be parsed.
    #[error("(MalformedHeader) {0}")]
    MalformedHeader(String),

    /// The array file ended before all elements were read.
    #[error("(UnexpectedEof) expected {expected} bytes of array data, got {got}")]
    UnexpectedEof {
        /// Bytes the header promised.
        expected: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshError {
    /// Create a `MalformedHeader` error with the given message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedHeader(message.into())
    }
}
