//! Pixel access functions
//!
//! Bounds-checked and unchecked getters/setters for individual pixels.

use super::{Pix, PixMut};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get the packed pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(self.get_pixel_unchecked(x, y))
        } else {
            None
        }
    }

    /// Get a pixel value without the `Option` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; `x >= width` reads into the next row
    /// or panics on the last row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[y as usize * self.width() as usize + x as usize]
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get the packed pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width() && y < self.height() {
            Some(self.data()[y as usize * self.width() as usize + x as usize])
        } else {
            None
        }
    }

    /// Set the packed pixel at (x, y). Bits 24-31 of `val` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without a bounds check on `x`.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = y as usize * self.width() as usize + x as usize;
        self.data_mut()[idx] = val & color::RGB_MASK;
    }

    /// Set an RGB pixel at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let mut pm = PixMut::new(3, 2).unwrap();
        pm.set_rgb(2, 1, 1, 2, 3).unwrap();
        assert_eq!(pm.get_pixel(2, 1), Some(0x0001_0203));

        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(2, 1), Some((1, 2, 3)));
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(pix.get_pixel(3, 0), None);
        assert_eq!(pix.get_pixel(0, 2), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut pm = PixMut::new(3, 2).unwrap();
        let err = pm.set_pixel(3, 0, 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { x: 3, y: 0, .. }));
        assert!(pm.set_rgb(0, 2, 0, 0, 0).is_err());
    }

    #[test]
    fn test_set_pixel_masks_top_byte() {
        let mut pm = PixMut::new(1, 1).unwrap();
        pm.set_pixel(0, 0, 0xabcd_ef01).unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(0x00cd_ef01));
    }
}
