//! PIX - The RGB image container
//!
//! `Pix` is the image type consumed and produced by the filter engine.
//!
//! # Pixel layout
//!
//! - One 32-bit word per pixel, packed as `0x00RRGGBB`
//! - Rows are stored contiguously, `width` words per row, no padding
//! - The top byte of every word is zero
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership). To modify pixel
//! data, convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;
mod compare;

use crate::color;
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// Binary PNM (P5/P6)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "pnm" | "ppm" | "pgm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }

    /// Guess the format from the extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Packed pixels, row-major
    data: Vec<u32>,
}

impl PixData {
    fn alloc(width: u32, height: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![fill & color::RGB_MASK; len],
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })
    }

    #[inline]
    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let start = y as usize * self.width as usize;
        start..start + self.width as usize
    }
}

/// PIX - RGB image container
///
/// # Examples
///
/// ```
/// use rgbmorph_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new all-black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut::new(width, height)?.into())
    }

    /// Create an image where every pixel has the given packed value.
    pub fn new_uniform(width: u32, height: u32, pixel: u32) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::alloc(width, height, pixel)?),
        })
    }

    /// Create an image from packed `0x00RRGGBB` words.
    ///
    /// Bits 24-31 of every word are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = PixData::checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        data.iter_mut().for_each(|p| *p &= color::RGB_MASK);
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from interleaved 8-bit RGB samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `bytes.len() != 3 * width * height`.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let mut pix = PixMut::new(width, height)?;
        let expected = pix.data().len() * 3;
        if bytes.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        for (dst, rgb) in pix.data_mut().iter_mut().zip(bytes.chunks_exact(3)) {
            *dst = color::compose_rgb(rgb[0], rgb[1], rgb[2]);
        }
        Ok(pix.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the packed pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.data[self.inner.row_range(y)]
    }

    /// Create a new all-black image with the same dimensions.
    pub fn create_template(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                data: vec![0; self.inner.data.len()],
            },
        }
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Convert to interleaved 8-bit RGB samples.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.data.len() * 3);
        for &p in &self.inner.data {
            out.extend_from_slice(&color::channels(p));
        }
        out
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        self.to_mut().into()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable PIX
///
/// Exclusively owned, writable image. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Allocate a new all-black writable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::alloc(width, height, color::BLACK)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the packed pixels.
    ///
    /// Bits 24-31 written through this slice are cleared when the image
    /// is converted back into a [`Pix`].
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let range = self.inner.row_range(y);
        &mut self.inner.data[range]
    }

    /// Set every pixel to the given packed value.
    pub fn fill(&mut self, pixel: u32) {
        self.inner.data.fill(pixel & color::RGB_MASK);
    }
}

impl From<PixMut> for Pix {
    fn from(mut pix_mut: PixMut) -> Self {
        pix_mut
            .inner
            .data
            .iter_mut()
            .for_each(|p| *p &= color::RGB_MASK);
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.data().len(), 20_000);
        assert!(pix.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(matches!(
            Pix::new(0, 100),
            Err(Error::InvalidDimension { width: 0, height: 100 })
        ));
        assert!(Pix::new(100, 0).is_err());
        assert!(PixMut::new(0, 0).is_err());
    }

    #[test]
    fn test_new_uniform_masks_top_byte() {
        let pix = Pix::new_uniform(3, 2, 0xff12_3456).unwrap();
        assert!(pix.data().iter().all(|&p| p == 0x0012_3456));
    }

    #[test]
    fn test_from_raw() {
        let pix = Pix::from_raw(2, 2, vec![1, 2, 3, 0xff00_0004]).unwrap();
        assert_eq!(pix.data(), &[1, 2, 3, 4]);
        assert_eq!(pix.row_data(1), &[3, 4]);

        assert!(matches!(
            Pix::from_raw(2, 2, vec![0; 3]),
            Err(Error::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_rgb_bytes() {
        let bytes = [10, 20, 30, 40, 50, 60];
        let pix = Pix::from_rgb_bytes(2, 1, &bytes).unwrap();
        assert_eq!(pix.data(), &[0x000a_141e, 0x0028_323c]);
        assert_eq!(pix.to_rgb_bytes(), bytes);
        assert!(Pix::from_rgb_bytes(2, 1, &bytes[..5]).is_err());
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(10, 10).unwrap();
        let pix2 = pix1.clone();

        assert_eq!(pix1.ref_count(), 2);
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(10, 10).unwrap();
        let pix2 = pix1.deep_clone();

        assert_eq!(pix1.ref_count(), 1);
        assert_eq!(pix2.ref_count(), 1);
        assert_ne!(pix1.data().as_ptr(), pix2.data().as_ptr());
    }

    #[test]
    fn test_try_into_mut() {
        let pix = Pix::new(4, 4).unwrap();
        let shared = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(shared);

        let mut pm = pix.try_into_mut().unwrap();
        pm.row_data_mut(3)[0] = 7;
        pm.fill(0xffff_ffff);
        let pix: Pix = pm.into();
        assert!(pix.data().iter().all(|&p| p == color::WHITE));
    }

    #[test]
    fn test_create_template() {
        let src = Pix::new_uniform(5, 7, color::WHITE).unwrap();
        let tmpl: Pix = src.create_template().into();
        assert!(tmpl.sizes_equal(&src));
        assert!(tmpl.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("a/b/out.PNG"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("x.jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("x.ppm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_path("noext"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_into_pix_clears_high_byte() {
        let mut pm = PixMut::new(2, 1).unwrap();
        pm.data_mut()[0] = 0xff12_3456;
        pm.data_mut()[1] = 0x0100_0000;
        let pix: Pix = pm.into();
        assert_eq!(pix.data(), &[0x0012_3456, 0]);
        let same = Pix::from_raw(2, 1, vec![0x0012_3456, 0]).unwrap();
        assert!(pix.equals(&same));
    }
}
