//! A dense grid of `Direction`s using 2 bits per cell.
//!
//! Each byte holds a 2x2 block of cells: the byte for `(row, col)` is at
//! `(row/2, col/2)` in a `ceil(rows/2) x ceil(cols/2)` byte matrix, and the low
//! bits of `row` and `col` select one of its four 2-bit slots.
use crate::direction::Direction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracebackMatrix {
    rows: usize,
    cols: usize,
    byte_cols: usize,
    data: Vec<u8>,
}

impl TracebackMatrix {
    /// A `rows x cols` matrix with row 0 set to `row_direction`, column 0 set
    /// to `col_direction` and `(0, 0)` set to `Terminal`.
    /// All other cells start out `Terminal` and are written during the fill.
    pub fn new(
        rows: usize,
        cols: usize,
        row_direction: Direction,
        col_direction: Direction,
    ) -> Self {
        let byte_rows = rows.div_ceil(2);
        let byte_cols = cols.div_ceil(2);
        let mut m = Self {
            rows,
            cols,
            byte_cols,
            data: vec![0; byte_rows * byte_cols],
        };
        for col in 1..cols {
            m.set(0, col, row_direction);
        }
        for row in 1..rows {
            m.set(row, 0, col_direction);
        }
        // (0, 0) keeps code 0, `Terminal`.
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bytes of storage used by the cells.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> (usize, u32) {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        let idx = (row >> 1) * self.byte_cols + (col >> 1);
        let shift = ((((row & 1) << 1) | (col & 1)) * 2) as u32;
        (idx, shift)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Direction {
        let (idx, shift) = self.locate(row, col);
        Direction::from_code(self.data[idx] >> shift)
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, direction: Direction) {
        let (idx, shift) = self.locate(row, col);
        let byte = &mut self.data[idx];
        *byte = (*byte & !(0b11 << shift)) | (direction.code() << shift);
    }
}
