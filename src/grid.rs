//! Owned row-major grid over a single contiguous buffer.
//!
//! Sized once at construction. Accessors assert bounds in debug builds only;
//! callers establish their index ranges when the grid is sized.

use crate::error::{Result, try_zeroed};

/// Fixed-size `rows x cols` grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatGrid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> FlatGrid<T> {
    /// Grid filled with `T::default()`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![T::default(); rows * cols],
        }
    }

    /// Grid whose buffer is reserved fallibly on behalf of a run of length `n`.
    pub(crate) fn try_new(n: usize, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            rows,
            cols,
            cells: try_zeroed(n, rows * cols)?,
        })
    }
}

impl<T: Copy> FlatGrid<T> {
    /// Number of rows.
    #[must_use]
    #[inline(always)]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    #[inline(always)]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Cell `(row, col)`.
    #[must_use]
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols, "get: ({row}, {col}) out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Overwrite cell `(row, col)`.
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        debug_assert!(row < self.rows && col < self.cols, "set: ({row}, {col}) out of bounds");
        self.cells[row * self.cols + col] = value;
    }

    /// Row `row` as a slice of `cols` cells.
    #[must_use]
    #[inline(always)]
    pub fn row(&self, row: usize) -> &[T] {
        debug_assert!(row < self.rows, "row: {row} out of bounds");
        let start: usize = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Row `row` as a mutable slice.
    #[inline(always)]
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        debug_assert!(row < self.rows, "row_mut: {row} out of bounds");
        let start: usize = row * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Borrow row `src` shared and row `dst` mutably at the same time.
    ///
    /// # Panics
    /// Panics in debug mode unless `src < dst < rows`.
    #[inline]
    pub fn split_rows(&mut self, src: usize, dst: usize) -> (&[T], &mut [T]) {
        debug_assert!(src < dst && dst < self.rows, "split_rows: need src < dst < rows");

        let cols: usize = self.cols;
        let (head, tail) = self.cells.split_at_mut(dst * cols);

        (&head[src * cols..(src + 1) * cols], &mut tail[..cols])
    }
}
