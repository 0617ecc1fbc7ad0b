//! Multi-threaded filter with static row partitioning
//!
//! # Algorithm
//!
//! The image rows are split into one contiguous block per worker:
//! `block = height / workers`, worker `t` takes `[t * block, (t + 1) * block)`
//! and the last worker takes everything from `t * block` to `height`.
//! When there are more workers than rows every block but the last is empty.
//!
//! The output buffer is allocated once and cut into disjoint row slices with
//! `split_at_mut`, so each worker owns the only mutable reference to its
//! rows. The source image is shared read-only. A pool of exactly `workers`
//! threads is built for the call and dropped after the scope joins.

use crate::kernel::{MorphOp, reduce_row};
use crate::{MorphError, MorphResult, Sel};
use log::{debug, trace, warn};
use rgbmorph_core::Pix;
use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

/// Check that a pool of exactly `workers` threads can be built.
///
/// # Errors
///
/// Returns [`MorphError::InvalidConfiguration`] if `workers` is 0 or above
/// [`rayon::max_num_threads`], which rayon would silently clamp.
pub fn validate_workers(workers: usize) -> MorphResult<()> {
    if workers == 0 {
        return Err(MorphError::InvalidConfiguration(
            "worker count must be at least 1, got 0".into(),
        ));
    }
    let max = rayon::max_num_threads();
    if workers > max {
        return Err(MorphError::InvalidConfiguration(format!(
            "worker count {workers} exceeds the maximum of {max}"
        )));
    }
    Ok(())
}

/// Compute the row range of every worker.
///
/// # Errors
///
/// Returns [`MorphError::InvalidConfiguration`] if `workers` fails
/// [`validate_workers`]. Nothing is allocated in that case.
pub fn partition_rows(height: u32, workers: usize) -> MorphResult<Vec<Range<u32>>> {
    validate_workers(workers)?;

    let height = height as usize;
    let block = height / workers;
    Ok((0..workers)
        .map(|t| {
            let start = t * block;
            let end = if t == workers - 1 {
                height
            } else {
                (t + 1) * block
            };
            start as u32..end as u32
        })
        .collect())
}

/// Everything one worker needs, handed over by value.
#[derive(Debug)]
pub struct RowBlock<'a> {
    /// Worker index
    pub index: usize,
    /// Rows this worker computes
    pub rows: Range<u32>,
    /// Shared source image
    pub src: &'a Pix,
    /// Output pixels for `rows`, `rows.len() * width` words
    pub dst: &'a mut [u32],
    pub sel: &'a Sel,
    pub op: MorphOp,
}

impl RowBlock<'_> {
    /// Run the kernel over every row of the block.
    ///
    /// A panic inside the kernel is caught and returned as
    /// [`MorphError::WorkerFailure`].
    pub fn run(self) -> MorphResult<()> {
        self.run_with(&reduce_row)
    }

    fn run_with<F>(self, row_fn: &F) -> MorphResult<()>
    where
        F: Fn(&Pix, &Sel, MorphOp, u32, &mut [u32]),
    {
        let RowBlock {
            index,
            rows,
            src,
            dst,
            sel,
            op,
        } = self;
        let width = src.width() as usize;
        trace!("worker {index}: rows {}..{}", rows.start, rows.end);

        panic::catch_unwind(AssertUnwindSafe(|| {
            for (y, out) in rows.clone().zip(dst.chunks_exact_mut(width)) {
                row_fn(src, sel, op, y, out);
            }
        }))
        .map_err(|payload| MorphError::WorkerFailure {
            worker: index,
            message: panic_message(payload.as_ref()),
        })?;

        trace!("worker {index}: done");
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Filter the image with `workers` threads.
///
/// Blocks until every worker has finished. The result is identical to
/// [`filter_sequential`](crate::filter_sequential) for any `workers >= 1`.
///
/// # Errors
///
/// - [`MorphError::InvalidConfiguration`] if `workers` is 0 or larger than
///   [`rayon::max_num_threads`]; nothing is scheduled in that case.
/// - [`MorphError::WorkerFailure`] if the pool cannot be started or a worker
///   panics. Remaining workers still run to completion and no image is
///   returned.
pub fn filter_parallel(src: &Pix, sel: &Sel, op: MorphOp, workers: usize) -> MorphResult<Pix> {
    filter_parallel_with(src, sel, op, workers, &reduce_row)
}

fn filter_parallel_with<F>(
    src: &Pix,
    sel: &Sel,
    op: MorphOp,
    workers: usize,
    row_fn: &F,
) -> MorphResult<Pix>
where
    F: Fn(&Pix, &Sel, MorphOp, u32, &mut [u32]) + Sync,
{
    let ranges = partition_rows(src.height(), workers)?;
    if workers > src.height() as usize {
        warn!(
            "{workers} workers for {} rows: {} workers get no rows",
            src.height(),
            workers - 1
        );
    }
    debug!(
        "parallel {op}: {}x{} image, {workers} workers, block height {}",
        src.width(),
        src.height(),
        src.height() as usize / workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("rgbmorph-worker-{i}"))
        .build()
        .map_err(|e| MorphError::WorkerFailure {
            worker: 0,
            message: format!("failed to start worker pool: {e}"),
        })?;

    let width = src.width() as usize;
    let mut dst = src.create_template();
    let mut outcomes: Vec<MorphResult<()>> = (0..workers).map(|_| Ok(())).collect();

    {
        let mut rest: &mut [u32] = dst.data_mut();
        let mut blocks = Vec::with_capacity(workers);
        for (index, rows) in ranges.into_iter().enumerate() {
            let len = (rows.end - rows.start) as usize * width;
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            blocks.push(RowBlock {
                index,
                rows,
                src,
                dst: head,
                sel,
                op,
            });
        }

        pool.scope(|s| {
            for (block, outcome) in blocks.into_iter().zip(outcomes.iter_mut()) {
                s.spawn(move |_| *outcome = block.run_with(row_fn));
            }
        });
    }
    drop(pool);

    for outcome in outcomes {
        outcome?;
    }
    Ok(dst.into())
}
