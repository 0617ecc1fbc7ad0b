use argh::FromArgs;
use log::info;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use rgbmorph_core::ImageFormat;
use rgbmorph_morph::{ExecutionMode, MorphError, MorphOp, SelKind, apply};

#[derive(FromArgs)]
/// Erode or dilate an RGB image with a binary structuring element
struct Args {
    /// path to the input image (PNG, JPEG or PNM)
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image; the format follows the extension, PNG if unknown
    #[argh(positional)]
    output: PathBuf,

    /// operation: erode or dilate (default: erode)
    #[argh(option, short = 'o', default = "MorphOp::Erode")]
    op: MorphOp,

    /// execution mode: sequential or parallel (default: parallel)
    #[argh(option, short = 'm', default = "Mode::Parallel")]
    mode: Mode,

    /// number of worker threads in parallel mode (default: 4)
    #[argh(option, short = 't', default = "4")]
    threads: i64,

    /// structuring element: cross, square3x3, x, horizontal, vertical, identity (default: cross)
    #[argh(option, short = 's', default = "SelKind::Cross")]
    sel: SelKind,
}

/// Execution mode as named on the command line; the thread count is
/// attached separately from `-t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sequential,
    Parallel,
}

impl FromStr for Mode {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, MorphError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "seq" | "s" => Ok(Mode::Sequential),
            "parallel" | "par" | "p" => Ok(Mode::Parallel),
            other => Err(MorphError::InvalidConfiguration(format!(
                "unknown execution mode {other:?}"
            ))),
        }
    }
}

fn execution_mode(mode: Mode, threads: i64) -> Result<ExecutionMode, MorphError> {
    match mode {
        Mode::Sequential => Ok(ExecutionMode::Sequential),
        Mode::Parallel => ExecutionMode::from_thread_count(threads),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    let mode = execution_mode(args.mode, args.threads)?;
    let sel = args.sel.sel();

    let src = rgbmorph_io::read_image(&args.input)?;
    info!(
        "loaded {} ({}x{})",
        args.input.display(),
        src.width(),
        src.height()
    );

    let start = Instant::now();
    let dst = apply(&src, &sel, args.op, mode)?;
    let elapsed = start.elapsed();
    info!(
        "{} with {} ({}) took {:.3} ms",
        args.op,
        args.sel,
        mode,
        elapsed.as_secs_f64() * 1000.0
    );

    let format = match ImageFormat::from_path(&args.output) {
        ImageFormat::Unknown => ImageFormat::Png,
        format => format,
    };
    rgbmorph_io::write_image(&dst, &args.output, format)?;
    info!("saved {} as {:?}", args.output.display(), format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Parallel".parse::<Mode>().unwrap(), Mode::Parallel);
        assert_eq!(" seq ".parse::<Mode>().unwrap(), Mode::Sequential);
        assert!(matches!(
            "gpu".parse::<Mode>(),
            Err(MorphError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_execution_mode() {
        assert_eq!(
            execution_mode(Mode::Sequential, -5).unwrap(),
            ExecutionMode::Sequential
        );
        assert_eq!(
            execution_mode(Mode::Parallel, 6).unwrap(),
            ExecutionMode::Parallel(6)
        );
        assert!(execution_mode(Mode::Parallel, 0).is_err());
        assert!(execution_mode(Mode::Parallel, i64::MAX).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::from_args(
            &["rgbmorph"],
            &["in.png", "out.ppm", "-o", "dilate", "-t", "8", "-s", "x"],
        )
        .unwrap();
        assert_eq!(args.op, MorphOp::Dilate);
        assert_eq!(args.threads, 8);
        assert_eq!(args.sel, SelKind::X);
        assert_eq!(args.mode, Mode::Parallel);
        assert_eq!(ImageFormat::from_path(&args.output), ImageFormat::Pnm);
    }

    #[test]
    fn test_args_reject_unknown_sel() {
        assert!(Args::from_args(&["rgbmorph"], &["a.png", "b.png", "-s", "disk"]).is_err());
    }

    #[test]
    fn test_args_mode() {
        let args = Args::from_args(&["rgbmorph"], &["a.png", "b.png", "-m", "seq"]).unwrap();
        assert_eq!(args.mode, Mode::Sequential);
        assert!(Args::from_args(&["rgbmorph"], &["a.png", "b.png", "-m", "gpu"]).is_err());
    }
}
