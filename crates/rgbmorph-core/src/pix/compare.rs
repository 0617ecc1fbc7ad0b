//! Image comparison

use super::Pix;

impl Pix {
    /// Check whether two images have the same size and identical pixels.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Find the first differing pixel in row-major order.
    ///
    /// Returns `Some((x, y))` for the first mismatch, `None` if the images
    /// are equal or have different sizes.
    pub fn first_difference(&self, other: &Pix) -> Option<(u32, u32)> {
        if !self.sizes_equal(other) {
            return None;
        }
        let width = self.width() as usize;
        self.data()
            .iter()
            .zip(other.data())
            .position(|(a, b)| a != b)
            .map(|i| ((i % width) as u32, (i / width) as u32))
    }

    /// Count pixels that differ between two equally sized images.
    ///
    /// Returns `None` if the sizes differ.
    pub fn count_diff_pixels(&self, other: &Pix) -> Option<usize> {
        if !self.sizes_equal(other) {
            return None;
        }
        Some(
            self.data()
                .iter()
                .zip(other.data())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}
