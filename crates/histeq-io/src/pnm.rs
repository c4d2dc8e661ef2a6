//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) images with
//! 8-bit samples. ASCII variants (P1/P2/P3), PBM (P4), PAM (P7) and
//! 16-bit samples are rejected.

use crate::{IoError, IoResult};
use histeq_core::{Image, ImageKind, PixelBuffer, color};
use std::io::{BufRead, ErrorKind, Read, Write};

/// Largest sample value this codec accepts.
const MAX_SAMPLE: u32 = 255;

/// Header fields of a binary PNM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    /// Gray for P5, Rgb for P6
    pub kind: ImageKind,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum sample value declared by the file
    pub maxval: u32,
}

impl PnmHeader {
    /// Number of raw bytes following the header.
    pub fn data_len(&self) -> usize {
        self.width as usize * self.height as usize * self.kind.planes()
    }
}

/// Read the PNM header, leaving `reader` positioned at the first sample.
pub fn read_header_pnm<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => IoError::InvalidData("file too short for PNM magic".into()),
        _ => IoError::Io(e),
    })?;

    let kind = match &magic {
        b"P5" => ImageKind::Gray,
        b"P6" => ImageKind::Rgb,
        b"P1" | b"P2" | b"P3" | b"P4" | b"P7" => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {} (only binary P5/P6 are supported)",
                String::from_utf8_lossy(&magic)
            )));
        }
        _ => return Err(IoError::InvalidData("not a PNM file".into())),
    };

    let width = read_header_value(reader, "width")?;
    let height = read_header_value(reader, "height")?;
    let maxval = read_header_value(reader, "maxval")?;

    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions: {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > MAX_SAMPLE {
        return Err(IoError::UnsupportedFormat(format!(
            "maxval {} (only 8-bit samples are supported)",
            maxval
        )));
    }

    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Parse one decimal header token, skipping whitespace and `#` comments.
///
/// Consumes the single whitespace byte that terminates the token.
fn read_header_value<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let mut byte = next_byte(reader, field)?;
    loop {
        match byte {
            b'#' => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {}
            _ => break,
        }
        byte = next_byte(reader, field)?;
    }

    let mut value: u32 = 0;
    loop {
        if !byte.is_ascii_digit() {
            return Err(IoError::InvalidData(format!(
                "invalid character {:?} in PNM {}",
                byte as char, field
            )));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(byte - b'0')))
            .ok_or_else(|| IoError::InvalidData(format!("PNM {} overflows", field)))?;
        byte = next_byte(reader, field)?;
        if byte.is_ascii_whitespace() {
            return Ok(value);
        }
    }
}

fn next_byte<R: Read>(reader: &mut R, field: &str) -> IoResult<u8> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => {
                return Err(IoError::InvalidData(format!(
                    "unexpected end of PNM header while reading {}",
                    field
                )));
            }
            Ok(_) => return Ok(byte[0]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(IoError::Io(e)),
        }
    }
}

/// Read a binary PGM or PPM image.
///
/// # Returns
/// A one-plane `Image` for P5, a three-plane `Image` for P6.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Image> {
    let header = read_header_pnm(&mut reader)?;
    log::info!(
        "{} image size: {} x {}",
        match header.kind {
            ImageKind::Gray => "PGM",
            ImageKind::Rgb => "PPM",
        },
        header.width,
        header.height
    );

    let mut raw = vec![0u8; header.data_len()];
    reader.read_exact(&mut raw).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => IoError::InvalidData(format!(
            "truncated pixel data: expected {} bytes",
            header.data_len()
        )),
        _ => IoError::Io(e),
    })?;

    let image = match header.kind {
        ImageKind::Gray => Image::from_gray(header.width, header.height, raw.into())?,
        ImageKind::Rgb => {
            let n = header.width as usize * header.height as usize;
            let mut planes = [
                Vec::with_capacity(n),
                Vec::with_capacity(n),
                Vec::with_capacity(n),
            ];
            for px in raw.chunks_exact(3) {
                planes[color::RED].push(px[0]);
                planes[color::GREEN].push(px[1]);
                planes[color::BLUE].push(px[2]);
            }
            let [r, g, b] = planes;
            Image::from_rgb(
                header.width,
                header.height,
                PixelBuffer::from(r),
                PixelBuffer::from(g),
                PixelBuffer::from(b),
            )?
        }
    };
    Ok(image)
}

/// Write an `Image` as binary PNM.
///
/// Chooses P5 for grayscale and P6 (interleaved R, G, B) for color.
pub fn write_pnm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let magic = match image.kind() {
        ImageKind::Gray => "P5",
        ImageKind::Rgb => "P6",
    };
    write!(
        writer,
        "{}\n{} {}\n{}\n",
        magic,
        image.width(),
        image.height(),
        MAX_SAMPLE
    )?;

    match image.kind() {
        ImageKind::Gray => writer.write_all(image.gray()?)?,
        ImageKind::Rgb => {
            let (r, g, b) = image.rgb()?;
            let mut raw = Vec::with_capacity(image.pixel_count() * 3);
            for ((&r, &g), &b) in r.iter().zip(g.iter()).zip(b.iter()) {
                raw.extend_from_slice(&[r, g, b]);
            }
            writer.write_all(&raw)?;
        }
    }
    writer.flush()?;
    Ok(())
}
