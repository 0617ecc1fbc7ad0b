//! rgbmorph - Binary-mask morphology for RGB images
//!
//! Erosion and dilation of packed RGB images with a binary structuring
//! element, computed either on the calling thread or on a fixed pool of
//! workers that each own a contiguous block of rows. Both strategies give
//! bit-identical output.
//!
//! # Example
//!
//! ```
//! use rgbmorph::morph::{ExecutionMode, MorphOp, SelKind, apply};
//! use rgbmorph::{Pix, color};
//!
//! let mut pm = Pix::new_uniform(5, 5, color::WHITE).unwrap().to_mut();
//! pm.set_pixel(2, 2, color::BLACK).unwrap();
//! let pix: Pix = pm.into();
//!
//! let sel = SelKind::Square3x3.sel();
//! let eroded = apply(&pix, &sel, MorphOp::Erode, ExecutionMode::Parallel(2)).unwrap();
//! assert_eq!(eroded.get_pixel(1, 1), Some(color::BLACK));
//! assert_eq!(eroded.get_pixel(0, 0), Some(color::WHITE));
//!
//! let restored = apply(&pix, &sel, MorphOp::Dilate, ExecutionMode::Sequential).unwrap();
//! assert!(restored.data().iter().all(|&p| p == color::WHITE));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rgbmorph_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rgbmorph_io as io;
pub use rgbmorph_morph as morph;
