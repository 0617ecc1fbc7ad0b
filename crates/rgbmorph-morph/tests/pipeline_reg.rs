//! Load, filter and save regression test
//!
//! Writes a source image, reads it back, filters it with every catalog
//! mask in parallel and saves the results. Saved output must decode to
//! the filtered image.
//!
//! Run with:
//! ```
//! cargo test -p rgbmorph-morph --test pipeline_reg
//! ```

use rgbmorph_core::{ImageFormat, color};
use rgbmorph_morph::{ExecutionMode, MorphOp, SelKind, apply};
use rgbmorph_test::{RegParams, regout_dir, synth};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let source = synth::checkerboard(48, 32, 3, color::compose_rgb(230, 180, 20), color::BLACK)
        .expect("checkerboard");
    let path = format!("{}/pipeline_source.png", regout_dir());
    rgbmorph_io::write_image(&source, &path, ImageFormat::Png).expect("write source");
    let pixs = rgbmorph_io::read_image(&path).expect("read source");
    rp.compare_pix(&source, &pixs);
    let _ = std::fs::remove_file(&path);

    for (index, kind) in SelKind::ALL.iter().enumerate() {
        eprintln!("  Testing {}", kind);
        rp.compare_values(
            1.0,
            if SelKind::from_index(index) == *kind { 1.0 } else { 0.0 },
            0.0,
        );
        for op in [MorphOp::Erode, MorphOp::Dilate] {
            let pixd = apply(&pixs, &kind.sel(), op, ExecutionMode::Parallel(4)).expect("apply");
            rp.compare_values(pixs.width() as f64, pixd.width() as f64, 0.0);
            rp.compare_values(pixs.height() as f64, pixd.height() as f64, 0.0);
            rp.write_pix(&pixd, ImageFormat::Png).expect("write png");
            rp.write_pix(&pixd, ImageFormat::Pnm).expect("write pnm");
        }
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}
