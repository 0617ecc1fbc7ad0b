//! Single-threaded filter
//!
//! Visits every pixel once in row-major order and writes the kernel result
//! into a freshly allocated image of the same size.

use crate::kernel::{MorphOp, reduce_row};
use crate::{MorphResult, Sel};
use rgbmorph_core::Pix;

/// Filter the whole image on the calling thread.
pub fn filter_sequential(src: &Pix, sel: &Sel, op: MorphOp) -> MorphResult<Pix> {
    let mut dst = src.create_template();
    for y in 0..src.height() {
        reduce_row(src, sel, op, y, dst.row_data_mut(y));
    }
    Ok(dst.into())
}
