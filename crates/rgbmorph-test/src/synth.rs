//! Deterministic synthetic test images

use rgbmorph_core::{Pix, PixMut, Result, color};

/// Every pixel set to `pixel`
pub fn uniform(width: u32, height: u32, pixel: u32) -> Result<Pix> {
    Pix::new_uniform(width, height, pixel)
}

/// Red ramps along x, green along y, blue along the diagonal
pub fn gradient(width: u32, height: u32) -> Result<Pix> {
    let mut pm = PixMut::new(width, height)?;
    let wmax = width.saturating_sub(1).max(1);
    let hmax = height.saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / wmax) as u8;
            let g = (y * 255 / hmax) as u8;
            let b = ((x + y) * 255 / (wmax + hmax)) as u8;
            pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(pm.into())
}

/// Squares of `cell` pixels alternating between `a` and `b`, `a` at the origin
pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> Result<Pix> {
    let cell = cell.max(1);
    let mut pm = PixMut::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            pm.set_pixel_unchecked(x, y, v);
        }
    }
    Ok(pm.into())
}

/// Independent random channels, reproducible for a given `seed`
pub fn random(width: u32, height: u32, seed: u32) -> Result<Pix> {
    let mut rng = SimpleRng::new(seed);
    let mut pm = PixMut::new(width, height)?;
    for p in pm.data_mut() {
        *p = (rng.next() >> 40) as u32 & color::RGB_MASK;
    }
    Ok(pm.into())
}

/// Linear congruential generator for reproducible images
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    fn next(&mut self) -> u64 {
        // Knuth's MMIX constants
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_corners() {
        let pix = gradient(5, 3).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(4, 2), Some((255, 255, 255)));
        assert_eq!(pix.get_rgb(4, 0), Some((255, 0, 170)));
    }

    #[test]
    fn test_gradient_single_pixel() {
        let pix = gradient(1, 1).unwrap();
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_checkerboard() {
        let pix = checkerboard(4, 4, 2, color::WHITE, color::BLACK).unwrap();
        assert_eq!(pix.get_pixel(1, 1), Some(color::WHITE));
        assert_eq!(pix.get_pixel(2, 0), Some(color::BLACK));
        assert_eq!(pix.get_pixel(3, 3), Some(color::WHITE));
    }

    #[test]
    fn test_random_reproducible() {
        let a = random(16, 9, 42).unwrap();
        let b = random(16, 9, 42).unwrap();
        let c = random(16, 9, 43).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(a.data().iter().all(|&p| p & !color::RGB_MASK == 0));
    }
}
