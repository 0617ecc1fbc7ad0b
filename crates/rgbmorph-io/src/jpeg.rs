//! JPEG image format support
//!
//! Decoding uses `jpeg-decoder` and accepts 8-bit grayscale, 16-bit
//! grayscale (high byte kept) and 24-bit RGB. CMYK is rejected.
//! Encoding uses `jpeg-encoder` and always writes RGB.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use rgbmorph_core::{Pix, color};
use std::io::{Read, Write};

/// Quality used by [`write_jpeg`]
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
///
/// * `reader` - Source positioned at the SOI marker
///
/// # Returns
///
/// An RGB image. Grayscale input is replicated into all three channels;
/// CMYK input is rejected with [`IoError::UnsupportedFormat`].
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG info not available".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let data: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => pixels
            .iter()
            .map(|&g| color::compose_rgb(g, g, g))
            .collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|c| color::compose_rgb(c[0], c[0], c[0]))
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| color::compose_rgb(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };

    Ok(Pix::from_raw(width, height, data)?)
}

/// Write a JPEG image at [`DEFAULT_QUALITY`].
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(pix, writer, DEFAULT_QUALITY)
}

/// Write a JPEG image at the given quality (1..=100).
///
/// # Arguments
///
/// * `pix` - Image to encode
/// * `writer` - Destination for the encoded stream
/// * `quality` - Encoder quality, 1 (smallest) to 100 (best)
pub fn write_jpeg_with_quality<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width()).map_err(|_| {
        IoError::EncodeError(format!("JPEG width {} exceeds 65535", pix.width()))
    })?;
    let height = u16::try_from(pix.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} exceeds 65535", pix.height()))
    })?;

    let encoder = Encoder::new(writer, quality);
    encoder
        .encode(&pix.to_rgb_bytes(), width, height, ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_dimensions() {
        let pix = Pix::new_uniform(17, 9, color::compose_rgb(120, 60, 200)).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer).unwrap();
        assert_eq!(&buffer[..3], &[0xFF, 0xD8, 0xFF]);

        let pix2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.dimensions(), (17, 9));
        // lossy, but a flat color should come back close
        let (r, g, b) = pix2.get_rgb(8, 4).unwrap();
        assert!((r as i32 - 120).abs() <= 8);
        assert!((g as i32 - 60).abs() <= 8);
        assert!((b as i32 - 200).abs() <= 8);
    }

    #[test]
    fn test_read_grayscale_jpeg() {
        let mut buffer = Vec::new();
        Encoder::new(&mut buffer, 95)
            .encode(&[128u8; 64], 8, 8, ColorType::Luma)
            .unwrap();
        let pix = read_jpeg(Cursor::new(buffer)).unwrap();
        let (r, g, b) = pix.get_rgb(3, 3).unwrap();
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((r as i32 - 128).abs() <= 4);
    }

    #[test]
    fn test_write_too_large_rejected() {
        let pix = Pix::new(70_000, 1).unwrap();
        let result = write_jpeg(&pix, Vec::new());
        assert!(matches!(result, Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_read_garbage_fails() {
        let result = read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0x00, 0x01]));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
