//! PNG image format support
//!
//! Every color type and bit depth is decoded to 8-bit RGB: palettes and
//! low bit depths are expanded, 16-bit samples are stripped to their high
//! byte, gray is replicated into all three channels and alpha is dropped.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use rgbmorph_core::{Pix, PixMut, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// # Arguments
///
/// * `reader` - Buffered source positioned at the PNG signature
///
/// # Returns
///
/// An RGB image. 16-bit samples keep their high byte, gray is
/// replicated and alpha is dropped.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = PixMut::new(width, height)?;
    for (y, row) in data.chunks_exact(bytes_per_row).enumerate() {
        let out = pix_mut.row_data_mut(y as u32);
        for (dst, px) in out.iter_mut().zip(row.chunks_exact(samples)) {
            *dst = match samples {
                1 | 2 => color::compose_rgb(px[0], px[0], px[0]),
                _ => color::compose_rgb(px[0], px[1], px[2]),
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image as 8-bit RGB
///
/// # Arguments
///
/// * `pix` - Image to encode
/// * `writer` - Destination for the encoded stream
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&pix.to_rgb_bytes())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
