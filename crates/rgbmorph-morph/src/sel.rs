//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element is a rectangular binary mask. Its center is
//! always `(rows / 2, cols / 2)`; for even sizes that puts the anchor on
//! the higher of the two middle cells.
//!
//! The fixed shapes used by the filter front end are listed by [`SelKind`].

use crate::{MorphError, MorphResult};
use std::fmt;
use std::str::FromStr;

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Not part of the neighborhood; never sampled
    #[default]
    DontCare = 0,
    /// Part of the neighborhood
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Equality compares the mask only; the name is ignored.
#[derive(Debug, Clone)]
pub struct Sel {
    rows: u32,
    cols: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Build a SEL from rows of 0/1 cells.
    ///
    /// # Arguments
    ///
    /// * `rows` - Mask rows, top to bottom; 1 is a hit, 0 is don't-care
    ///
    /// # Returns
    ///
    /// An unnamed SEL whose center is `(rows / 2, cols / 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidConfiguration`] if there are no rows, a
    /// row is empty, rows differ in length, or a cell is not 0 or 1.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> MorphResult<Self> {
        let first = rows.first().ok_or_else(|| {
            MorphError::InvalidConfiguration("structuring element has zero rows".into())
        })?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(MorphError::InvalidConfiguration(
                "structuring element has zero columns".into(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MorphError::InvalidConfiguration(format!(
                    "structuring element row {i} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            for (j, &cell) in row.iter().enumerate() {
                data.push(match cell {
                    0 => SelElement::DontCare,
                    1 => SelElement::Hit,
                    v => {
                        return Err(MorphError::InvalidConfiguration(format!(
                            "structuring element cell ({i}, {j}) is {v}, expected 0 or 1"
                        )));
                    }
                });
            }
        }

        Ok(Self {
            rows: rows.len() as u32,
            cols: cols as u32,
            data,
            name: None,
        })
    }

    /// Build a SEL from a text pattern.
    ///
    /// Rows are separated by newlines; `x` marks a hit and `.` a don't-care
    /// cell. Blank lines and surrounding whitespace are ignored.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Multi-line mask text
    ///
    /// ```
    /// use rgbmorph_morph::Sel;
    ///
    /// let sel = Sel::from_string(".x.\nxxx\n.x.").unwrap();
    /// assert_eq!(sel, Sel::cross());
    /// ```
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        'x' | 'X' => Ok(1u8),
                        '.' => Ok(0u8),
                        other => Err(MorphError::InvalidConfiguration(format!(
                            "invalid character {other:?} in structuring element pattern"
                        ))),
                    })
                    .collect::<MorphResult<Vec<u8>>>()
            })
            .collect::<MorphResult<Vec<_>>>()?;
        Self::from_rows(&rows)
    }

    fn fixed(rows: &[&[u8]], name: &str) -> Self {
        let data = rows
            .iter()
            .flat_map(|r| r.iter())
            .map(|&c| if c == 1 { SelElement::Hit } else { SelElement::DontCare })
            .collect();
        Self {
            rows: rows.len() as u32,
            cols: rows[0].len() as u32,
            data,
            name: Some(name.to_string()),
        }
    }

    /// 3x3 plus-shaped SEL
    ///
    /// # Returns
    ///
    /// A SEL named `"cross"` with hits at the center and its four direct
    /// neighbors.
    pub fn cross() -> Self {
        Self::fixed(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], "cross")
    }

    /// 3x3 SEL of all hits
    pub fn square3x3() -> Self {
        Self::fixed(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]], "square3x3")
    }

    /// 3x3 diagonal cross
    pub fn x() -> Self {
        Self::fixed(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]], "x")
    }

    /// 1x3 horizontal line
    pub fn horizontal() -> Self {
        Self::fixed(&[&[1, 1, 1]], "horizontal")
    }

    /// 3x1 vertical line
    pub fn vertical() -> Self {
        Self::fixed(&[&[1], &[1], &[1]], "vertical")
    }

    /// 1x1 single hit; filtering with it returns the input unchanged
    pub fn identity() -> Self {
        Self::fixed(&[&[1]], "identity")
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Center as `(row, col)`, using floor division.
    #[inline]
    pub fn center(&self) -> (u32, u32) {
        (self.rows / 2, self.cols / 2)
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the SEL with a name attached
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the element at (row, col)
    #[inline]
    pub fn get_element(&self, row: u32, col: u32) -> Option<SelElement> {
        if row < self.rows && col < self.cols {
            Some(self.data[(row * self.cols + col) as usize])
        } else {
            None
        }
    }

    /// Get raw element data, row-major
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to the center, as `(dx, dy)`.
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let (cy, cx) = self.center();
        let cols = self.cols;

        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &elem)| elem == SelElement::Hit)
            .map(move |(idx, _)| {
                let col = (idx as u32 % cols) as i64;
                let row = (idx as u32 / cols) as i64;
                (col - cx as i64, row - cy as i64)
            })
    }
}

impl PartialEq for Sel {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl Eq for Sel {}

impl fmt::Display for Sel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.data.chunks(self.cols as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &e in row {
                f.write_str(if e == SelElement::Hit { "x" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Named structuring elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelKind {
    Cross,
    Square3x3,
    X,
    Horizontal,
    Vertical,
    /// 1x1 fallback
    Identity,
}

impl SelKind {
    /// The selectable shapes, in menu order.
    pub const ALL: [SelKind; 5] = [
        SelKind::Cross,
        SelKind::Square3x3,
        SelKind::X,
        SelKind::Horizontal,
        SelKind::Vertical,
    ];

    /// Map a menu index to a shape. Indices past the menu give [`SelKind::Identity`].
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(SelKind::Identity)
    }

    /// Build the structuring element.
    pub fn sel(self) -> Sel {
        match self {
            SelKind::Cross => Sel::cross(),
            SelKind::Square3x3 => Sel::square3x3(),
            SelKind::X => Sel::x(),
            SelKind::Horizontal => Sel::horizontal(),
            SelKind::Vertical => Sel::vertical(),
            SelKind::Identity => Sel::identity(),
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            SelKind::Cross => "cross",
            SelKind::Square3x3 => "square3x3",
            SelKind::X => "x",
            SelKind::Horizontal => "horizontal",
            SelKind::Vertical => "vertical",
            SelKind::Identity => "identity",
        }
    }
}

impl fmt::Display for SelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelKind {
    type Err = MorphError;

    fn from_str(s: &str) -> MorphResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cross" | "plus" => Ok(SelKind::Cross),
            "square3x3" | "square" => Ok(SelKind::Square3x3),
            "x" => Ok(SelKind::X),
            "horizontal" => Ok(SelKind::Horizontal),
            "vertical" => Ok(SelKind::Vertical),
            "identity" => Ok(SelKind::Identity),
            other => Err(MorphError::InvalidConfiguration(format!(
                "unknown structuring element {other:?}"
            ))),
        }
    }
}

impl From<SelKind> for Sel {
    fn from(kind: SelKind) -> Self {
        kind.sel()
    }
}
