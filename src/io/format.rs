//! Binary matrix format
//!
//! ```text
//! offset  size  field
//! 0       12    magic  b"NUMVALMATRIX"
//! 12      4     version (u32 LE)
//! 16      1     domain tag: B | I | R | C
//! 17      8     rows (u64 LE)
//! 25      8     cols (u64 LE)
//! 33      n     payload, column-major
//! 33 + n  4     CRC-32 of the payload (u32 LE)
//! ```
//!
//! Boolean columns are bit-packed least significant bit first and padded to
//! a whole byte. Integers are two's complement, reals IEEE-754 binary64,
//! complex values a real part followed by an imaginary part.

use crate::dtype::{Complex, DType, Element};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use std::io::{Read, Write};

/// File signature
pub const MAGIC: &[u8; 12] = b"NUMVALMATRIX";

/// Format revision written by this crate
pub const VERSION: u32 = 1;

/// Bytes before the payload
pub const HEADER_LEN: usize = 33;

/// Matrix domains with an on-disk encoding
pub trait Persist: Element {
    /// Domain tag byte
    const TAG: u8;

    /// Encoded size of one column of `rows` coefficients
    fn column_bytes(rows: usize) -> Option<usize>;

    /// Append one column
    fn encode_column(column: &[Self], out: &mut Vec<u8>);

    /// Decode one column of `rows` coefficients
    fn decode_column(bytes: &[u8], rows: usize, out: &mut Vec<Self>);
}

impl Persist for bool {
    const TAG: u8 = b'B';

    fn column_bytes(rows: usize) -> Option<usize> {
        Some(rows.div_ceil(8))
    }

    fn encode_column(column: &[Self], out: &mut Vec<u8>) {
        for chunk in column.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (bit, &v)| acc | (u8::from(v) << bit));
            out.push(byte);
        }
    }

    fn decode_column(bytes: &[u8], rows: usize, out: &mut Vec<Self>) {
        out.extend((0..rows).map(|i| bytes[i / 8] & (1 << (i % 8)) != 0));
    }
}

impl Persist for i64 {
    const TAG: u8 = b'I';

    fn column_bytes(rows: usize) -> Option<usize> {
        rows.checked_mul(8)
    }

    fn encode_column(column: &[Self], out: &mut Vec<u8>) {
        for v in column {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn decode_column(bytes: &[u8], _rows: usize, out: &mut Vec<Self>) {
        out.extend(bytes.chunks_exact(8).map(|c| i64::from_le_bytes(le8(c))));
    }
}

impl Persist for f64 {
    const TAG: u8 = b'R';

    fn column_bytes(rows: usize) -> Option<usize> {
        rows.checked_mul(8)
    }

    fn encode_column(column: &[Self], out: &mut Vec<u8>) {
        for v in column {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    fn decode_column(bytes: &[u8], _rows: usize, out: &mut Vec<Self>) {
        out.extend(bytes.chunks_exact(8).map(|c| f64::from_le_bytes(le8(c))));
    }
}

impl Persist for Complex {
    const TAG: u8 = b'C';

    fn column_bytes(rows: usize) -> Option<usize> {
        rows.checked_mul(16)
    }

    fn encode_column(column: &[Self], out: &mut Vec<u8>) {
        for v in column {
            out.extend_from_slice(&v.re.to_le_bytes());
            out.extend_from_slice(&v.im.to_le_bytes());
        }
    }

    fn decode_column(bytes: &[u8], _rows: usize, out: &mut Vec<Self>) {
        out.extend(bytes.chunks_exact(16).map(|c| {
            Complex::new(f64::from_le_bytes(le8(&c[..8])), f64::from_le_bytes(le8(&c[8..])))
        }));
    }
}

#[inline]
fn le8(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[..8]);
    out
}

/// Domain named by a tag byte
pub fn dtype_of_tag(tag: u8) -> Result<DType> {
    match tag {
        b'B' => Ok(DType::Boolean),
        b'I' => Ok(DType::Integer),
        b'R' => Ok(DType::Real),
        b'C' => Ok(DType::Complex),
        other => Err(Error::invalid_format(format!(
            "unknown domain tag 0x{other:02x}"
        ))),
    }
}

/// Decoded fixed-size header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Domain of the payload
    pub dtype: DType,
    /// Row count
    pub rows: usize,
    /// Column count
    pub cols: usize,
}

impl Header {
    fn encode(tag: u8, rows: usize, cols: usize) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..12].copy_from_slice(MAGIC);
        out[12..16].copy_from_slice(&VERSION.to_le_bytes());
        out[16] = tag;
        out[17..25].copy_from_slice(&(rows as u64).to_le_bytes());
        out[25..33].copy_from_slice(&(cols as u64).to_le_bytes());
        out
    }

    /// Read and validate a header
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_LEN];
        reader.read_exact(&mut buf)?;
        if &buf[..12] != MAGIC {
            return Err(Error::invalid_format("bad magic"));
        }
        let mut version = [0u8; 4];
        version.copy_from_slice(&buf[12..16]);
        let version = u32::from_le_bytes(version);
        if version != VERSION {
            return Err(Error::invalid_format(format!(
                "unsupported version {version}"
            )));
        }
        let dtype = dtype_of_tag(buf[16])?;
        let extent = |bytes: &[u8]| {
            usize::try_from(u64::from_le_bytes(le8(bytes)))
                .map_err(|_| Error::invalid_format("extent does not fit in memory"))
        };
        let rows = extent(&buf[17..25])?;
        let cols = extent(&buf[25..33])?;
        Ok(Self { dtype, rows, cols })
    }
}

/// Write `m` to `writer`
pub fn write_matrix<T: Persist, W: Write>(writer: &mut W, m: &Matrix<T>) -> Result<()> {
    let (rows, cols) = m.shape();
    let values = m.to_column_major_vec()?;
    let column_bytes = T::column_bytes(rows)
        .ok_or_else(|| Error::invalid_format("matrix too large to encode"))?;
    let mut payload = Vec::with_capacity(column_bytes.saturating_mul(cols));
    if rows > 0 {
        for column in values.chunks(rows) {
            T::encode_column(column, &mut payload);
        }
    }
    writer.write_all(&Header::encode(T::TAG, rows, cols))?;
    writer.write_all(&payload)?;
    writer.write_all(&crc32fast::hash(&payload).to_le_bytes())?;
    Ok(())
}

/// Read the payload and trailer following `header`
pub fn read_payload<T: Persist, R: Read>(reader: &mut R, header: Header) -> Result<Matrix<T>> {
    if header.dtype != T::DTYPE {
        return Err(Error::invalid_format(format!(
            "expected a {} matrix, found {}",
            T::DTYPE,
            header.dtype
        )));
    }
    let Header { rows, cols, .. } = header;
    let column_bytes =
        T::column_bytes(rows).ok_or_else(|| Error::invalid_format("payload length overflows"))?;
    let len = column_bytes
        .checked_mul(cols)
        .ok_or_else(|| Error::invalid_format("payload length overflows"))?;

    // Grow with the data actually present rather than trusting the header.
    let mut payload = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() < len {
        return Err(Error::UnexpectedEndOfFile);
    }

    let mut crc = [0u8; 4];
    reader.read_exact(&mut crc)?;
    let expected = u32::from_le_bytes(crc);
    let actual = crc32fast::hash(&payload);
    if expected != actual {
        return Err(Error::invalid_format(format!(
            "checksum mismatch: stored {expected:08x}, computed {actual:08x}"
        )));
    }

    let mut values = Vec::with_capacity(rows * cols);
    if column_bytes > 0 {
        for column in payload.chunks_exact(column_bytes) {
            T::decode_column(column, rows, &mut values);
        }
    }
    Matrix::from_column_major_vec(rows, cols, values)
}

/// Read a matrix of domain `T`
///
/// A file holding a different domain is an
/// [`InvalidFileFormat`](Error::InvalidFileFormat) error; no conversion is
/// attempted.
pub fn read_matrix<T: Persist, R: Read>(reader: &mut R) -> Result<Matrix<T>> {
    let header = Header::read(reader)?;
    read_payload(reader, header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
    use std::io::Cursor;

    fn encode<T: Persist>(m: &Matrix<T>) -> Vec<u8> {
        let mut buf = Vec::new();
        write_matrix(&mut buf, m).unwrap();
        buf
    }

    #[test]
    fn test_header_layout() {
        let m = MatrixInteger::from_rows(&[[1, 2, 3]]).unwrap();
        let buf = encode(&m);
        assert_eq!(&buf[..12], b"NUMVALMATRIX");
        assert_eq!(&buf[12..16], &[1, 0, 0, 0]);
        assert_eq!(buf[16], b'I');
        assert_eq!(&buf[17..25], &1u64.to_le_bytes());
        assert_eq!(&buf[25..33], &3u64.to_le_bytes());
        assert_eq!(buf.len(), HEADER_LEN + 3 * 8 + 4);
        assert_eq!(&buf[33..41], &1i64.to_le_bytes());
    }

    #[test]
    fn test_boolean_columns_are_bit_packed() {
        let rows: Vec<[bool; 2]> = (0..9).map(|i| [i % 2 == 0, i == 8]).collect();
        let m = MatrixBoolean::from_rows(&rows).unwrap();
        let buf = encode(&m);
        // 9 rows pack into 2 bytes per column
        assert_eq!(buf.len(), HEADER_LEN + 2 * 2 + 4);
        assert_eq!(&buf[33..37], &[0b0101_0101, 0b1, 0, 0b1]);
        let back: MatrixBoolean = read_matrix(&mut Cursor::new(buf)).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_complex_and_transposed_input() {
        let m = MatrixComplex::from_rows(&[[Complex::new(1.0, -2.0), Complex::I]]).unwrap();
        let t = m.transpose();
        let back: MatrixComplex = read_matrix(&mut Cursor::new(encode(&t))).unwrap();
        assert_eq!(back.shape(), (2, 1));
        assert_eq!(back, t);

        let scaled = MatrixReal::from_rows(&[[1.0, 2.0]]).unwrap().scale(3.0).unwrap();
        let back: MatrixReal = read_matrix(&mut Cursor::new(encode(&scaled))).unwrap();
        assert_eq!(back.at(1, 2).unwrap(), 6.0);
    }

    #[test]
    fn test_rejects_corruption() {
        let m = MatrixReal::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let buf = encode(&m);

        let mut flipped = buf.clone();
        flipped[40] ^= 0xff;
        let err = read_matrix::<f64, _>(&mut Cursor::new(flipped)).unwrap_err();
        assert!(matches!(err, Error::InvalidFileFormat { .. }));

        let err = read_matrix::<i64, _>(&mut Cursor::new(buf.clone())).unwrap_err();
        assert!(matches!(err, Error::InvalidFileFormat { .. }));

        let mut bad_tag = buf.clone();
        bad_tag[16] = b'X';
        assert!(matches!(
            read_matrix::<f64, _>(&mut Cursor::new(bad_tag)).unwrap_err(),
            Error::InvalidFileFormat { .. }
        ));

        for cut in [10, HEADER_LEN + 5, buf.len() - 1] {
            let err = read_matrix::<f64, _>(&mut Cursor::new(&buf[..cut])).unwrap_err();
            assert!(matches!(err, Error::UnexpectedEndOfFile), "cut at {cut}: {err}");
        }
    }

    #[test]
    fn test_empty_matrix() {
        let m = MatrixInteger::empty();
        let buf = encode(&m);
        assert_eq!(buf.len(), HEADER_LEN + 4);
        let back: MatrixInteger = read_matrix(&mut Cursor::new(buf)).unwrap();
        assert!(back.is_empty());
    }
}
