//! histeq-io - Image I/O for the histeq workspace
//!
//! Reads and writes the two container formats the enhancement pipeline
//! consumes and produces:
//!
//! - PGM (`P5`): one 8-bit grayscale plane
//! - PPM (`P6`): interleaved 8-bit R, G, B samples
//!
//! # Example
//!
//! ```
//! use histeq_core::{Image, ImageKind};
//! use histeq_io::{read_image_mem, write_image_mem};
//!
//! let img = Image::new(8, 4, ImageKind::Rgb).unwrap();
//! let bytes = write_image_mem(&img).unwrap();
//! assert_eq!(read_image_mem(&bytes).unwrap(), img);
//! ```

mod error;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use pnm::{PnmHeader, read_header_pnm, read_pnm, write_pnm};

use histeq_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened and
/// [`IoError::InvalidData`] / [`IoError::UnsupportedFormat`] if its
/// contents are not a binary 8-bit PGM or PPM.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let file = File::open(path)?;
    read_pnm(BufReader::new(file))
}

/// Write an image to a file path, as P5 or P6 depending on its kind.
pub fn write_image<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<()> {
    let path = path.as_ref();
    log::debug!("writing {}", path.display());
    let file = File::create(path)?;
    write_pnm(image, BufWriter::new(file))
}

/// Decode an image from an in-memory PNM byte stream.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    read_pnm(Cursor::new(data))
}

/// Encode an image to an in-memory PNM byte stream.
pub fn write_image_mem(image: &Image) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(image.pixel_count() * image.planes().len() + 32);
    write_pnm(image, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let err = read_image("/nonexistent/histeq/in.pgm").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
