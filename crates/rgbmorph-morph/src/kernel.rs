//! Pixel reduction kernel
//!
//! Computes one output pixel as the channel-wise minimum (erosion) or
//! maximum (dilation) over the source pixels selected by a structuring
//! element anchored at that pixel.
//!
//! # Boundary policy
//!
//! Mask cells that land outside the image are skipped. There is no
//! padding, clamping or mirroring, so border pixels are reduced over a
//! smaller neighborhood. If no cell lands inside the image the identity
//! extreme of the operation is returned as is.

use crate::{MorphError, MorphResult, Sel};
use rgbmorph_core::{Pix, color};
use std::fmt;
use std::str::FromStr;

/// Morphological operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Channel-wise minimum over the neighborhood
    Erode,
    /// Channel-wise maximum over the neighborhood
    Dilate,
}

impl MorphOp {
    /// Starting value of the accumulator: any sample can only move it.
    #[inline]
    pub fn identity(self) -> u8 {
        match self {
            MorphOp::Erode => u8::MAX,
            MorphOp::Dilate => u8::MIN,
        }
    }

    /// Fold one channel sample into the accumulator.
    #[inline]
    pub fn fold(self, acc: u8, sample: u8) -> u8 {
        match self {
            MorphOp::Erode => acc.min(sample),
            MorphOp::Dilate => acc.max(sample),
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            MorphOp::Erode => "erode",
            MorphOp::Dilate => "dilate",
        }
    }
}

impl fmt::Display for MorphOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MorphOp {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "erode" | "erosion" | "e" => Ok(MorphOp::Erode),
            "dilate" | "dilation" | "d" => Ok(MorphOp::Dilate),
            other => Err(MorphError::InvalidConfiguration(format!(
                "unknown operation {other:?}"
            ))),
        }
    }
}

/// Reduce the neighborhood of `(x, y)` to a single RGB triple.
///
/// The result is a pure function of its arguments; it is safe to call
/// concurrently against the same source.
///
/// # Panics
///
/// Panics if `(x, y)` is outside `src`.
pub fn reduce_pixel(src: &Pix, sel: &Sel, op: MorphOp, x: u32, y: u32) -> (u8, u8, u8) {
    assert!(
        x < src.width() && y < src.height(),
        "pixel ({x}, {y}) outside {}x{} image",
        src.width(),
        src.height()
    );

    let width = src.width() as i64;
    let height = src.height() as i64;
    let mut acc = [op.identity(); 3];

    for (dx, dy) in sel.hit_offsets() {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if ny < 0 || ny >= height || nx < 0 || nx >= width {
            continue;
        }

        let sample = color::channels(src.get_pixel_unchecked(nx as u32, ny as u32));
        for (a, s) in acc.iter_mut().zip(sample) {
            *a = op.fold(*a, s);
        }
    }

    (acc[color::RED], acc[color::GREEN], acc[color::BLUE])
}

/// Apply the kernel across row `y` and write packed pixels into `out`.
///
/// # Panics
///
/// Panics if `out.len() != src.width()` or `y >= src.height()`.
pub fn reduce_row(src: &Pix, sel: &Sel, op: MorphOp, y: u32, out: &mut [u32]) {
    assert_eq!(out.len(), src.width() as usize, "output row length");
    for (x, dst) in out.iter_mut().enumerate() {
        let (r, g, b) = reduce_pixel(src, sel, op, x as u32, y);
        *dst = color::compose_rgb(r, g, b);
    }
}
