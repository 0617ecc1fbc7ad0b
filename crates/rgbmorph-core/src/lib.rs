//! rgbmorph core - Basic data structures for RGB image processing
//!
//! This crate provides the image container shared by the rest of the
//! workspace:
//!
//! - [`Pix`] / [`PixMut`] - The RGB image container (immutable / mutable)
//! - [`ImageFormat`] - File container identifiers used by the I/O crate
//! - [`color`] - Packing helpers for 24-bit RGB pixels
//! - [`Error`] / [`Result`] - Core error type

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut};

/// Channel helpers for packed 24-bit RGB pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0x00RRGGBB`: red in bits 16-23, green in
/// bits 8-15, blue in bits 0-7. The top byte is always zero.
pub mod color {
    /// Red channel index
    pub const RED: usize = 0;
    /// Green channel index
    pub const GREEN: usize = 1;
    /// Blue channel index
    pub const BLUE: usize = 2;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 16;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 0;

    /// Bits that may be set in a packed pixel
    pub const RGB_MASK: u32 = 0x00ff_ffff;

    /// Packed white pixel
    pub const WHITE: u32 = RGB_MASK;
    /// Packed black pixel
    pub const BLACK: u32 = 0;

    /// Extract red component from a packed pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a packed pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a packed pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a packed RGB pixel.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT) | ((g as u32) << GREEN_SHIFT) | ((b as u32) << BLUE_SHIFT)
    }

    /// Extract RGB values from a packed pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract the channels as an array indexed by [`RED`], [`GREEN`], [`BLUE`].
    #[inline]
    pub fn channels(pixel: u32) -> [u8; 3] {
        [red(pixel), green(pixel), blue(pixel)]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_layout() {
            assert_eq!(compose_rgb(0x12, 0x34, 0x56), 0x0012_3456);
            assert_eq!(compose_rgb(255, 255, 255), WHITE);
            assert_eq!(compose_rgb(0, 0, 0), BLACK);
        }

        #[test]
        fn test_extract() {
            let p = compose_rgb(200, 100, 50);
            assert_eq!(red(p), 200);
            assert_eq!(green(p), 100);
            assert_eq!(blue(p), 50);
            assert_eq!(extract_rgb(p), (200, 100, 50));
            assert_eq!(channels(p)[GREEN], 100);
        }

        #[test]
        fn test_top_byte_ignored() {
            assert_eq!(extract_rgb(0xff00_ff00), (0, 255, 0));
        }
    }
}
