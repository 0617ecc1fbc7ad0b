//! PNM (Portable Any Map) format support
//!
//! Reads binary PGM (P5) and PPM (P6) with maxval up to 255, and writes
//! P6. Header comments (`#` to end of line) are skipped. Samples are
//! rescaled to 0..=255 when maxval is below 255.

use crate::{IoError, IoResult};
use rgbmorph_core::{Pix, color};
use std::io::{BufRead, Read, Write};

/// Read a PNM image (P5/P6) from a reader.
///
/// # Arguments
///
/// * `reader` - Buffered source positioned at the magic number
///
/// # Returns
///
/// An RGB image, or [`IoError::InvalidData`] if the header is malformed or
/// the raster is shorter than the header announces.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => 1,
        "P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {}",
            maxval
        )));
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| IoError::InvalidData(format!("PNM too large: {}x{}", width, height)))?;
    // sized by what the stream holds, not by the header
    let mut raster = Vec::new();
    reader
        .take(len as u64)
        .read_to_end(&mut raster)
        .map_err(IoError::Io)?;
    if raster.len() != len {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: expected {} bytes for {}x{}, got {}",
            len,
            width,
            height,
            raster.len()
        )));
    }

    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            ((v.min(maxval as u8) as u32 * 255 + maxval / 2) / maxval) as u8
        }
    };

    let data: Vec<u32> = if channels == 1 {
        raster
            .iter()
            .map(|&g| {
                let g = scale(g);
                color::compose_rgb(g, g, g)
            })
            .collect()
    } else {
        raster
            .chunks_exact(3)
            .map(|c| color::compose_rgb(scale(c[0]), scale(c[1]), scale(c[2])))
            .collect()
    };

    Ok(Pix::from_raw(width, height, data)?)
}

/// Write a `Pix` as binary PPM (P6) to a writer.
///
/// # Arguments
///
/// * `pix` - Image to encode
/// * `writer` - Destination; flushed before returning
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", pix.width(), pix.height()).map_err(IoError::Io)?;
    writer.write_all(&pix.to_rgb_bytes()).map_err(IoError::Io)?;
    writer.flush().map_err(IoError::Io)?;
    Ok(())
}

/// Read one whitespace-delimited header token, skipping comments.
///
/// Consumes exactly one whitespace byte after the token, so after the
/// maxval the reader is positioned at the raster.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte).map_err(IoError::Io)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            break;
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment).map_err(IoError::Io)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b),
        }
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pnm_roundtrip() {
        let pix = Pix::from_raw(
            3,
            2,
            vec![0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0x0012_3456, 0, 0x00ff_ffff],
        )
        .unwrap();
        let mut buffer = Vec::new();
        write_pnm(&pix, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(buffer.len(), 11 + 18);

        let pix2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_read_pgm_with_comments() {
        let mut data = b"P5\n# made by hand\n2 2\n# another\n255\n".to_vec();
        data.extend_from_slice(&[0, 64, 128, 255]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.dimensions(), (2, 2));
        assert_eq!(pix.get_rgb(1, 0), Some((64, 64, 64)));
        assert_eq!(pix.get_rgb(1, 1), Some((255, 255, 255)));
    }

    #[test]
    fn test_read_low_maxval_rescaled() {
        let mut data = b"P6 1 1 15\n".to_vec();
        data.extend_from_slice(&[15, 0, 5]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((255, 0, 85)));
    }

    #[test]
    fn test_raster_starting_with_whitespace_byte() {
        // first sample is 0x0a, which must not be eaten as header whitespace
        let mut data = b"P5\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[0x0a, 0x20]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((10, 10, 10)));
        assert_eq!(pix.get_rgb(1, 0), Some((32, 32, 32)));
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P3\n1 1\n255\n0 0 0\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n1 1\n65535\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\nwide 1\n255\n".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n2 2\n255\n\x00\x01".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n2".to_vec())),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_huge_header_dimensions_rejected() {
        let data = b"P5\n4294967295 4294967295\n255\n\x00".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
        let data = b"P6\n65536 65536\n255\n\x01\x02\x03".to_vec();
        assert!(matches!(
            read_pnm(Cursor::new(data)),
            Err(IoError::InvalidData(_))
        ));
    }
}
