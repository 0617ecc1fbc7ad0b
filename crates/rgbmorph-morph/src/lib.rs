//! rgbmorph-morph - Binary-mask morphology for RGB images
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) and the catalog of named shapes ([`SelKind`])
//! - The per-pixel reduction kernel shared by every strategy
//! - A single-threaded filter and a row-partitioned multi-threaded filter
//!   that produce identical output
//! - The [`apply`] facade selecting operation and execution mode

mod error;
pub mod filter;
pub mod kernel;
pub mod parallel;
pub mod sel;
pub mod sequential;

pub use error::{MorphError, MorphResult};
pub use filter::{ExecutionMode, apply, dilate, erode};
pub use kernel::{MorphOp, reduce_pixel, reduce_row};
pub use parallel::{RowBlock, filter_parallel, partition_rows, validate_workers};
pub use sel::{Sel, SelElement, SelKind};
pub use sequential::filter_sequential;
