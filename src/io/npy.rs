//! NumPy `.npy` array file codec.
//!
//! # Layout
//!
//! ```text
//! UINT8[6]   – Magic string "\x93NUMPY"
//! UINT8      – Major version (1, 2 or 3)
//! UINT8      – Minor version
//! UINT16     – Header length, little-endian (UINT32 for versions 2 and 3)
//! CHAR[len]  – Python dict literal, space padded, terminated by '\n':
//!              {'descr': '<f8', 'fortran_order': False, 'shape': (3, 3), }
//! ...        – Raw element bytes
//! ```
//!
//! Files are always written as version 1.0 (2.0 if the header would not fit),
//! little-endian and row-major. Reading accepts either byte order and
//! column-major (`fortran_order: True`) data, which is reordered so callers
//! only ever see row-major arrays.

use std::io::{ErrorKind, Read, Write};

use ndarray::{Array2, ArrayBase, Data, Ix2, ShapeBuilder};

use crate::errors::{MeshError, MeshResult};

/// Magic bytes at the start of every `.npy` file.
const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Header blocks are padded so array data starts on this boundary.
const HEADER_ALIGNMENT: usize = 64;

/// Largest header dict accepted when reading, matching numpy's own limit.
const MAX_HEADER_LEN: usize = 10_000;

/// Upper bound on the data buffer reserved up front from the header's shape.
const MAX_PREALLOC: usize = 1 << 20;

/// Magic, version bytes and a version 1 header length.
const PREAMBLE_V1: usize = MAGIC.len() + 2 + 2;

/// Magic, version bytes and a version 2 header length.
const PREAMBLE_V2: usize = MAGIC.len() + 2 + 4;

/// An element type that can be stored in an `.npy` file.
pub trait NpyElement: Copy + Send + Sync + 'static {
    /// Little-endian type descriptor, e.g. `<f8`.
    const DESCR: &'static str;

    /// Width of one element in bytes.
    const SIZE: usize;

    /// Decode one element from exactly `SIZE` bytes.
    fn decode(bytes: &[u8], big_endian: bool) -> Self;

    /// Append the little-endian encoding of `self` to `out`.
    fn encode(self, out: &mut Vec<u8>);
}

macro_rules! impl_npy_element {
    ($ty:ty, $descr:literal) => {
        impl NpyElement for $ty {
            const DESCR: &'static str = $descr;
            const SIZE: usize = std::mem::size_of::<$ty>();

            #[inline]
            fn decode(bytes: &[u8], big_endian: bool) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                if big_endian {
                    <$ty>::from_be_bytes(raw)
                } else {
                    <$ty>::from_le_bytes(raw)
                }
            }

            #[inline]
            fn encode(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_npy_element!(f64, "<f8");
impl_npy_element!(f32, "<f4");
impl_npy_element!(i32, "<i4");
impl_npy_element!(i64, "<i8");

/// Parsed header dictionary of an `.npy` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpyHeader {
    /// Type descriptor, e.g. `<f8`.
    pub descr: String,
    /// `true` when elements are stored column-major.
    pub fortran_order: bool,
    /// Array dimensions.
    pub shape: Vec<usize>,
}

impl NpyHeader {
    /// Header describing a row-major little-endian 2-D array of `T`.
    pub fn for_array<T: NpyElement>(rows: usize, cols: usize) -> Self {
        Self {
            descr: T::DESCR.to_string(),
            fortran_order: false,
            shape: vec![rows, cols],
        }
    }

    /// Render the header as the Python dict literal stored on disk (no padding).
    pub fn to_dict(&self) -> String {
        let shape = match self.shape.as_slice() {
            [single] => format!("({single},)"),
            dims => format!(
                "({})",
                dims.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            ),
        };
        let fortran = if self.fortran_order { "True" } else { "False" };
        format!(
            "{{'descr': '{}', 'fortran_order': {fortran}, 'shape': {shape}, }}",
            self.descr
        )
    }

    /// Parse the Python dict literal found in a file header.
    pub fn parse(text: &str) -> MeshResult<Self> {
        HeaderParser::new(text).parse()
    }

    /// Whether the stored bytes are big-endian.
    fn is_big_endian(&self) -> bool {
        match self.descr.as_bytes().first() {
            Some(b'>') => true,
            Some(b'=') => cfg!(target_endian = "big"),
            _ => false,
        }
    }

    /// Check the stored element type against `T`, ignoring byte order.
    fn check_element<T: NpyElement>(&self) -> MeshResult<()> {
        let stored = self
            .descr
            .strip_prefix(['<', '>', '|', '='])
            .unwrap_or(&self.descr);
        if stored == &T::DESCR[1..] {
            Ok(())
        } else {
            Err(MeshError::DataTypeMismatch {
                expected: T::DESCR,
                found: self.descr.clone(),
            })
        }
    }
}

/// Scanner over the header dict literal.
struct HeaderParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> HeaderParser<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn parse(mut self) -> MeshResult<NpyHeader> {
        let mut descr = None;
        let mut fortran_order = None;
        let mut shape = None;

        self.expect('{')?;
        loop {
            self.skip_whitespace();
            if self.eat('}') {
                break;
            }
            let key = self.quoted()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            match key {
                "descr" => descr = Some(self.quoted()?.to_string()),
                "fortran_order" => fortran_order = Some(self.boolean()?),
                "shape" => shape = Some(self.tuple()?),
                other => {
                    return Err(MeshError::malformed(format!(
                        "unknown header key '{other}'"
                    )));
                },
            }
            self.skip_whitespace();
            if !self.eat(',') {
                self.skip_whitespace();
                self.expect('}')?;
                break;
            }
        }

        Ok(NpyHeader {
            descr: descr.ok_or_else(|| MeshError::malformed("header has no 'descr'"))?,
            fortran_order: fortran_order
                .ok_or_else(|| MeshError::malformed("header has no 'fortran_order'"))?,
            shape: shape.ok_or_else(|| MeshError::malformed("header has no 'shape'"))?,
        })
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> MeshResult<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(MeshError::malformed(format!(
                "expected '{c}' at offset {} of header",
                self.pos
            )))
        }
    }

    fn quoted(&mut self) -> MeshResult<&'a str> {
        let quote = if self.eat('\'') {
            '\''
        } else if self.eat('"') {
            '"'
        } else {
            return Err(MeshError::malformed(format!(
                "expected a quoted string at offset {} of header",
                self.pos
            )));
        };
        let rest = self.rest();
        let end = rest
            .find(quote)
            .ok_or_else(|| MeshError::malformed("unterminated string in header"))?;
        self.pos += end + quote.len_utf8();
        Ok(&rest[..end])
    }

    fn boolean(&mut self) -> MeshResult<bool> {
        if self.rest().starts_with("True") {
            self.pos += 4;
            Ok(true)
        } else if self.rest().starts_with("False") {
            self.pos += 5;
            Ok(false)
        } else {
            Err(MeshError::malformed("'fortran_order' must be True or False"))
        }
    }

    fn tuple(&mut self) -> MeshResult<Vec<usize>> {
        self.expect('(')?;
        let rest = self.rest();
        let end = rest
            .find(')')
            .ok_or_else(|| MeshError::malformed("unterminated shape tuple in header"))?;
        self.pos += end + 1;
        rest[..end]
            .split(',')
            .map(str::trim)
            .filter(|dim| !dim.is_empty())
            // Python 2 era writers emit long literals such as `3L`
            .map(|dim| dim.trim_end_matches('L'))
            .map(|dim| {
                dim.parse::<usize>().map_err(|e| {
                    MeshError::malformed(format!("invalid shape dimension '{dim}': {e}"))
                })
            })
            .collect()
    }
}

/// Read a 2-D array of `T` from `reader`.
///
/// # Errors
///
/// Returns an error if the magic string or header is malformed, the array is
/// not two dimensional, the element type is not `T`, or the data is truncated.
pub fn read_array<T: NpyElement, R: Read>(reader: &mut R) -> MeshResult<Array2<T>> {
    let header = read_header(reader)?;

    let (rows, cols) = match header.shape.as_slice() {
        &[rows, cols] => (rows, cols),
        _ => {
            return Err(MeshError::InvalidShape {
                shape: header.shape.clone(),
            });
        },
    };
    header.check_element::<T>()?;

    let expected = rows
        .checked_mul(cols)
        .and_then(|count| count.checked_mul(T::SIZE))
        .ok_or_else(|| MeshError::malformed(format!("shape ({rows}, {cols}) is too large")))?;

    // the shape is untrusted until the bytes are actually there
    let mut bytes = Vec::with_capacity(expected.min(MAX_PREALLOC));
    reader.take(expected as u64).read_to_end(&mut bytes)?;
    if bytes.len() < expected {
        return Err(MeshError::UnexpectedEof {
            expected,
            got: bytes.len(),
        });
    }

    let big_endian = header.is_big_endian();
    let data: Vec<T> = bytes
        .chunks_exact(T::SIZE)
        .map(|chunk| T::decode(chunk, big_endian))
        .collect();

    if header.fortran_order {
        let column_major = Array2::from_shape_vec((rows, cols).f(), data)
            .map_err(|e| MeshError::malformed(e.to_string()))?;
        Ok(column_major.as_standard_layout().into_owned())
    } else {
        Array2::from_shape_vec((rows, cols), data).map_err(|e| MeshError::malformed(e.to_string()))
    }
}

/// Read the preamble and header dict, leaving `reader` at the first data byte.
pub fn read_header<R: Read>(reader: &mut R) -> MeshResult<NpyHeader> {
    let mut preamble = [0u8; MAGIC.len() + 2];
    read_exact_or_malformed(reader, &mut preamble, "file too small to be an npy array")?;

    if &preamble[..MAGIC.len()] != MAGIC {
        return Err(MeshError::malformed("missing npy magic string"));
    }

    let major = preamble[MAGIC.len()];
    let header_len = match major {
        1 => {
            let mut len = [0u8; 2];
            read_exact_or_malformed(reader, &mut len, "truncated header length")?;
            usize::from(u16::from_le_bytes(len))
        },
        2 | 3 => {
            let mut len = [0u8; 4];
            read_exact_or_malformed(reader, &mut len, "truncated header length")?;
            u32::from_le_bytes(len) as usize
        },
        other => {
            return Err(MeshError::malformed(format!(
                "unsupported npy format version {other}.{}",
                preamble[MAGIC.len() + 1]
            )));
        },
    };
    if header_len > MAX_HEADER_LEN {
        return Err(MeshError::malformed(format!(
            "header length {header_len} exceeds {MAX_HEADER_LEN} bytes"
        )));
    }

    let mut raw = vec![0u8; header_len];
    read_exact_or_malformed(reader, &mut raw, "truncated header")?;
    let text = String::from_utf8(raw)
        .map_err(|e| MeshError::malformed(format!("header is not valid text: {e}")))?;

    NpyHeader::parse(text.trim_end())
}

fn read_exact_or_malformed<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    message: &'static str,
) -> MeshResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            MeshError::malformed(message)
        } else {
            MeshError::Io(e)
        }
    })
}

/// Write a 2-D array to `writer` as a little-endian, row-major `.npy` stream.
///
/// The logical (row-major) element order is written whatever the memory
/// layout of `array` is.
pub fn write_array<T, S, W>(writer: &mut W, array: &ArrayBase<S, Ix2>) -> MeshResult<()>
where
    T: NpyElement,
    S: Data<Elem = T>,
    W: Write,
{
    let (rows, cols) = array.dim();
    let dict = NpyHeader::for_array::<T>(rows, cols).to_dict();

    writer.write_all(&encode_preamble(&dict))?;

    let mut bytes = Vec::with_capacity(rows * cols * T::SIZE);
    for &value in array.iter() {
        value.encode(&mut bytes);
    }
    writer.write_all(&bytes)?;
    writer.flush()?;

    Ok(())
}

/// Magic, version, length and the padded header dict.
fn encode_preamble(dict: &str) -> Vec<u8> {
    // dict + trailing newline, padded so the whole preamble is aligned
    let padded_len = |preamble: usize| {
        let unpadded = preamble + dict.len() + 1;
        unpadded.div_ceil(HEADER_ALIGNMENT) * HEADER_ALIGNMENT - preamble
    };

    let v1_len = padded_len(PREAMBLE_V1);
    let mut out = Vec::with_capacity(PREAMBLE_V2 + v1_len + HEADER_ALIGNMENT);
    out.extend_from_slice(MAGIC);

    let header_len = if let Ok(len) = u16::try_from(v1_len) {
        out.extend_from_slice(&[1, 0]);
        out.extend_from_slice(&len.to_le_bytes());
        v1_len
    } else {
        let v2_len = padded_len(PREAMBLE_V2);
        out.extend_from_slice(&[2, 0]);
        #[allow(clippy::cast_possible_truncation)]
        out.extend_from_slice(&(v2_len as u32).to_le_bytes());
        v2_len
    };

    out.extend_from_slice(dict.as_bytes());
    out.resize(out.len() + header_len - dict.len() - 1, b' ');
    out.push(b'\n');
    out
}
