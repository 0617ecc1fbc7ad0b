//! rgbmorph-io - Image I/O for rgbmorph
//!
//! Loads images into a [`Pix`] and saves them back. Supported formats:
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG | any color type, expanded to RGB8 | RGB8 | `png-format` |
//! | JPEG | gray, RGB | RGB, quality 90 | `jpeg` |
//! | PNM | P5, P6 (maxval <= 255) | P6 | `pnm` |
//!
//! The reading functions detect the format from the leading bytes; the
//! writing functions take an explicit [`ImageFormat`].

mod error;
mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use rgbmorph_core::ImageFormat;

use log::debug;
use rgbmorph_core::Pix;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file, detecting the format from its contents
///
/// # Arguments
///
/// * `path` - File to read; its extension is ignored
///
/// # Returns
///
/// The decoded image with every pixel packed as `0x00RRGGBB`, or
/// [`IoError::UnsupportedFormat`] if the magic bytes match no supported
/// codec.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let pix = read_image_mem(&bytes)?;
    debug!(
        "read {}x{} image from {}",
        pix.width(),
        pix.height(),
        path.display()
    );
    Ok(pix)
}

/// Read an image from memory, detecting the format from its contents
///
/// # Arguments
///
/// * `data` - Complete encoded file contents
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        other => Err(unsupported(other)),
    }
}

/// Write an image to a file in the given format
///
/// [`ImageFormat::Unknown`] is written as PNG.
///
/// # Arguments
///
/// * `pix` - Image to encode
/// * `path` - Destination file, created or truncated
/// * `format` - Output codec; the extension of `path` is not consulted
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    debug!(
        "wrote {}x{} image to {}",
        pix.width(),
        pix.height(),
        path.display()
    );
    Ok(())
}

/// Encode an image into memory in the given format
///
/// [`ImageFormat::Unknown`] is encoded as PNG.
///
/// # Returns
///
/// The encoded bytes, ready to be passed back to [`read_image_mem`].
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png | ImageFormat::Unknown => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(unsupported(other))
        }
    }
}

fn unsupported(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!("{:?} support is not enabled", format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgbmorph_core::color;

    fn sample() -> Pix {
        let mut pm = Pix::new(4, 3).unwrap().to_mut();
        pm.set_rgb(0, 0, 1, 2, 3).unwrap();
        pm.set_rgb(3, 2, 250, 128, 7).unwrap();
        pm.into()
    }

    #[test]
    fn test_mem_roundtrip_lossless() {
        let pix = sample();
        for format in [ImageFormat::Png, ImageFormat::Pnm, ImageFormat::Unknown] {
            let bytes = write_image_mem(&pix, format).unwrap();
            let back = read_image_mem(&bytes).unwrap();
            assert!(back.equals(&pix), "{:?}", format);
        }
    }

    #[test]
    fn test_unknown_written_as_png() {
        let bytes = write_image_mem(&sample(), ImageFormat::Unknown).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_mem_jpeg_keeps_dimensions() {
        let pix = Pix::new_uniform(9, 7, color::WHITE).unwrap();
        let bytes = write_image_mem(&pix, ImageFormat::Jpeg).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Jpeg);
        assert_eq!(read_image_mem(&bytes).unwrap().dimensions(), (9, 7));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_image("/nonexistent/rgbmorph/input.png");
        assert!(matches!(result, Err(IoError::Io(_))));
    }

    #[test]
    fn test_read_unknown_bytes() {
        assert!(matches!(
            read_image_mem(b"GIF89a......"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
