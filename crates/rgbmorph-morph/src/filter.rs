//! Filter facade
//!
//! Single entry point used by front ends: pick the operation and the
//! execution strategy, get a new image back.

use crate::kernel::MorphOp;
use crate::parallel::{filter_parallel, validate_workers};
use crate::sequential::filter_sequential;
use crate::{MorphError, MorphResult, Sel};
use log::debug;
use rgbmorph_core::Pix;
use std::fmt;

/// How the filter is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// On the calling thread
    #[default]
    Sequential,
    /// On a pool of the given number of worker threads
    Parallel(usize),
}

impl ExecutionMode {
    /// Build a parallel mode from a caller-supplied signed thread count.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidConfiguration`] if `threads <= 0` or
    /// `threads` exceeds the largest pool rayon can build.
    pub fn from_thread_count(threads: i64) -> MorphResult<Self> {
        if threads <= 0 {
            return Err(MorphError::InvalidConfiguration(format!(
                "worker count must be at least 1, got {threads}"
            )));
        }
        let threads = usize::try_from(threads).map_err(|_| {
            MorphError::InvalidConfiguration(format!("worker count {threads} is too large"))
        })?;
        validate_workers(threads)?;
        Ok(ExecutionMode::Parallel(threads))
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => f.write_str("sequential"),
            ExecutionMode::Parallel(n) => write!(f, "parallel({n})"),
        }
    }
}

/// Apply `op` with `sel` to `src`.
///
/// # Example
///
/// ```
/// use rgbmorph_core::{Pix, color};
/// use rgbmorph_morph::{ExecutionMode, MorphOp, Sel, apply};
///
/// let pix = Pix::new_uniform(8, 8, color::WHITE).unwrap();
/// let out = apply(&pix, &Sel::cross(), MorphOp::Erode, ExecutionMode::Parallel(4)).unwrap();
/// assert!(out.equals(&pix));
/// ```
pub fn apply(src: &Pix, sel: &Sel, op: MorphOp, mode: ExecutionMode) -> MorphResult<Pix> {
    debug!(
        "{op} {}x{} with {}x{} sel {:?}, {mode}",
        src.width(),
        src.height(),
        sel.rows(),
        sel.cols(),
        sel.name().unwrap_or("custom")
    );
    match mode {
        ExecutionMode::Sequential => filter_sequential(src, sel, op),
        ExecutionMode::Parallel(workers) => filter_parallel(src, sel, op, workers),
    }
}

/// Erode `src` with `sel`.
pub fn erode(src: &Pix, sel: &Sel, mode: ExecutionMode) -> MorphResult<Pix> {
    apply(src, sel, MorphOp::Erode, mode)
}

/// Dilate `src` with `sel`.
pub fn dilate(src: &Pix, sel: &Sel, mode: ExecutionMode) -> MorphResult<Pix> {
    apply(src, sel, MorphOp::Dilate, mode)
}
