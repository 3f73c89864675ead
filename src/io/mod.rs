//! Persistence of matrices in a checksummed binary format
//!
//! See [`format`] for the byte layout. Streams may hold several matrices
//! back to back; files written by [`save`] hold exactly one.

pub mod format;

pub use format::{Persist, read_matrix, write_matrix};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::ops::dispatch::operand_dtype;
use crate::variant::{Variant, VariantElement};
use format::Header;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Read a matrix of whatever domain the stream holds
pub fn read_variant<R: Read>(reader: &mut R) -> Result<Variant> {
    let header = Header::read(reader)?;
    crate::dispatch_dtype!(header.dtype, T => {
        Ok(T::matrix_into_variant(format::read_payload::<T, _>(reader, header)?))
    })
}

/// Write a matrix or scalar variant; scalars are stored as `1 x 1`
pub fn write_variant<W: Write>(writer: &mut W, value: &Variant) -> Result<()> {
    let dtype = operand_dtype("write_variant", value)?;
    crate::dispatch_dtype!(dtype, T => {
        write_matrix(writer, &value.try_to_matrix::<T>()?)
    })
}

/// Write `m` to a new file at `path`, replacing any existing file
pub fn save<T: Persist>(path: impl AsRef<Path>, m: &Matrix<T>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(&mut writer, m)?;
    writer.flush()?;
    debug!(path = %path.display(), shape = ?m.shape(), dtype = %T::DTYPE, "saved matrix");
    Ok(())
}

/// Read a matrix of domain `T` from `path`
pub fn load<T: Persist>(path: impl AsRef<Path>) -> Result<Matrix<T>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let m = read_matrix(&mut reader)?;
    expect_end(&mut reader)?;
    debug!(path = %path.display(), shape = ?m.shape(), dtype = %T::DTYPE, "loaded matrix");
    Ok(m)
}

/// Read a matrix of any domain from `path`
pub fn load_variant(path: impl AsRef<Path>) -> Result<Variant> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let value = read_variant(&mut reader)?;
    expect_end(&mut reader)?;
    debug!(path = %path.display(), value_type = %value.value_type(), "loaded matrix");
    Ok(value)
}

fn expect_end<R: Read>(reader: &mut R) -> Result<()> {
    let mut extra = [0u8; 1];
    if reader.read(&mut extra)? != 0 {
        return Err(Error::invalid_format("trailing data after checksum"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex;
    use crate::matrix::{MatrixComplex, MatrixReal};
    use crate::variant::ValueType;
    use std::io::Cursor;

    #[test]
    fn test_variant_stream() {
        let a = MatrixReal::from_rows(&[[1.5, -2.0]]).unwrap();
        let mut buf = Vec::new();
        write_variant(&mut buf, &Variant::from(&a)).unwrap();
        write_variant(&mut buf, &Variant::Integer(7)).unwrap();

        let mut cursor = Cursor::new(buf);
        let first = read_variant(&mut cursor).unwrap();
        assert_eq!(first.value_type(), ValueType::MatrixReal);
        assert_eq!(first.to_matrix_real(), a);
        let second = read_variant(&mut cursor).unwrap();
        assert_eq!(second.value_type(), ValueType::MatrixInteger);
        assert_eq!(second.to_matrix_integer().at(1, 1).unwrap(), 7);

        assert!(write_variant(&mut Vec::new(), &Variant::None).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.bin");
        let m = MatrixComplex::from_rows(&[[Complex::new(0.5, 1.0)], [Complex::I]]).unwrap();
        save(&path, &m).unwrap();
        assert_eq!(load::<Complex>(&path).unwrap(), m);
        assert_eq!(load_variant(&path).unwrap().to_matrix_complex(), m);
        assert!(matches!(
            load::<f64>(&path).unwrap_err(),
            Error::InvalidFileFormat { .. }
        ));

        let mut bytes = std::fs::read(&path).unwrap();
        bytes.push(0);
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(
            load::<Complex>(&path).unwrap_err(),
            Error::InvalidFileFormat { .. }
        ));
    }
}
