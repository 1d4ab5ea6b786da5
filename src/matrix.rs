//! Row-shifted partial-product matrix.
//!
//! `PartialProductArray` holds one row of tagged cells per Booth digit. A
//! row stores only the columns it occupies; an integer shift records the
//! absolute column of local index 0, so the structure stays rectangularly
//! dense while rows slide left with increasing digit weight.
//!
//! Addressing rules:
//! * Every public operation takes absolute column numbers; a row's local
//!   index is `col - shift`. Accessing a column below a row's shift is a
//!   caller bug.
//! * Reads and writes past the current row length auto-extend the row with
//!   constant-0 cells. Out-of-range never means undefined.
//! * `insert`/`insert_range` splice without padding and require the local
//!   index to be at most the current length.
//!
//! Assumptions:
//! * Rows are created at `shift = row * radix_shift`; only the sign
//!   extension pass may lower a shift, by exactly one column.
//! * Sign extension runs at most once per matrix, tracked by a one-shot
//!   guard flag.

use itertools::Itertools;
use num::{BigInt, One, Zero};

use crate::signal::{Bit, BitPool, Evaluation};
use crate::utils::errors::PartialProductError;

/// Marks a cell that carries sign information rather than a plain product
/// bit. `inverted` records that the stored bit is the complement of the
/// arithmetic sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignTag {
    pub inverted: bool,
}

/// One matrix entry: a signal plus an optional sign tag.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub bit: Bit,
    pub sign: Option<SignTag>,
}

impl Cell {
    pub const ZERO: Cell = Cell {
        bit: Bit::ZERO,
        sign: None,
    };
    pub const ONE: Cell = Cell {
        bit: Bit::ONE,
        sign: None,
    };

    pub fn plain(bit: Bit) -> Cell {
        Cell { bit, sign: None }
    }

    pub fn sign(bit: Bit, inverted: bool) -> Cell {
        Cell {
            bit,
            sign: Some(SignTag { inverted }),
        }
    }
}

/// Rows of cells with per-row column shifts and the one-shot extension
/// guard.
#[derive(Debug)]
pub struct PartialProductArray {
    rows: Vec<Vec<Cell>>,
    shifts: Vec<usize>,
    sign_extended: bool,
}

impl PartialProductArray {
    /// Wraps freshly built rows, assigning row `r` the pre-extension shift
    /// `r * radix_shift`.
    pub fn new(rows: Vec<Vec<Cell>>, radix_shift: usize) -> Self {
        let shifts = (0..rows.len()).map(|r| r * radix_shift).collect();
        PartialProductArray {
            rows,
            shifts,
            sign_extended: false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    pub fn row_cells(&self, row: usize) -> &[Cell] {
        &self.rows[row]
    }

    /// Absolute column of the row's local index 0.
    pub fn row_shift(&self, row: usize) -> usize {
        self.shifts[row]
    }

    /// Highest occupied column plus one, over all rows.
    pub fn max_width(&self) -> usize {
        self.rows
            .iter()
            .zip(&self.shifts)
            .map(|(cells, shift)| cells.len() + shift)
            .max()
            .unwrap_or(0)
    }

    pub fn is_sign_extended(&self) -> bool {
        self.sign_extended
    }

    pub(crate) fn mark_sign_extended(&mut self) -> Result<(), PartialProductError> {
        if self.sign_extended {
            return Err(PartialProductError::AlreadySignExtended);
        }
        self.sign_extended = true;
        Ok(())
    }

    pub(crate) fn decrement_shift(&mut self, row: usize) {
        debug_assert!(self.shifts[row] > 0);
        self.shifts[row] -= 1;
    }

    pub(crate) fn append(&mut self, row: usize, cell: Cell) {
        self.rows[row].push(cell);
    }

    fn local(&self, row: usize, col: usize) -> usize {
        debug_assert!(col >= self.shifts[row]);
        col - self.shifts[row]
    }

    fn extend_to(&mut self, row: usize, len: usize) {
        if self.rows[row].len() < len {
            self.rows[row].resize(len, Cell::ZERO);
        }
    }

    /// Reads the cell at an absolute column, durably padding the row with
    /// constant zeros if it ends before the column.
    pub fn get(&mut self, row: usize, col: usize) -> Cell {
        let local = self.local(row, col);
        self.extend_to(row, local + 1);
        self.rows[row][local]
    }

    /// Reads several absolute columns, padding once up to the furthest.
    pub fn get_many(&mut self, row: usize, cols: &[usize]) -> Vec<Cell> {
        if let Some(&far) = cols.iter().max() {
            let local = self.local(row, far);
            self.extend_to(row, local + 1);
        }
        cols.iter()
            .map(|&col| self.rows[row][self.local(row, col)])
            .collect()
    }

    /// Overwrites the cell at an absolute column, zero-padding up to it if
    /// needed.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let local = self.local(row, col);
        self.extend_to(row, local + 1);
        self.rows[row][local] = cell;
    }

    /// Like [`set`](Self::set), but the stored signal is
    /// `mux(cond, cell, existing)` with an absent cell reading as zero. The
    /// stored tag is the incoming cell's, falling back to the existing one.
    pub fn mux_set(&mut self, pool: &mut BitPool, row: usize, col: usize, cond: Bit, cell: Cell) {
        let existing = self.get(row, col);
        let bit = pool.mux(cond, cell.bit, existing.bit);
        let local = self.local(row, col);
        self.rows[row][local] = Cell {
            bit,
            sign: cell.sign.or(existing.sign),
        };
    }

    /// [`set`](Self::set) per cell at consecutive columns starting at `col`.
    pub fn set_range(&mut self, row: usize, col: usize, cells: &[Cell]) {
        for (i, &cell) in cells.iter().enumerate() {
            self.set(row, col + i, cell);
        }
    }

    /// [`mux_set`](Self::mux_set) per cell at consecutive columns.
    pub fn mux_set_range(
        &mut self,
        pool: &mut BitPool,
        row: usize,
        col: usize,
        cond: Bit,
        cells: &[Cell],
    ) {
        for (i, &cell) in cells.iter().enumerate() {
            self.mux_set(pool, row, col + i, cond, cell);
        }
    }

    /// Splices a cell in at an absolute column, sliding the rest of the row
    /// up one column. The local index must not pass the current row end.
    pub fn insert(&mut self, row: usize, col: usize, cell: Cell) {
        let local = self.local(row, col);
        debug_assert!(local <= self.rows[row].len());
        self.rows[row].insert(local, cell);
    }

    /// [`insert`](Self::insert) of a whole run, preserving order.
    pub fn insert_range(&mut self, row: usize, col: usize, cells: &[Cell]) {
        for (i, &cell) in cells.iter().enumerate() {
            self.insert(row, col + i, cell);
        }
    }

    /// Aligned dot diagram, MSB on the left, one character per cell: `0`/`1`
    /// for the interned constants, `s` for a sign tag, `~` for an inverted
    /// sign tag, `.` for any other signal.
    pub fn render(&self) -> String {
        let width = self.max_width();
        self.rows
            .iter()
            .zip(&self.shifts)
            .map(|(cells, shift)| {
                let mut line = vec![' '; width];
                for (i, cell) in cells.iter().enumerate() {
                    line[width - 1 - (shift + i)] = match cell.sign {
                        Some(SignTag { inverted: true }) => '~',
                        Some(SignTag { inverted: false }) => 's',
                        None if cell.bit == Bit::ZERO => '0',
                        None if cell.bit == Bit::ONE => '1',
                        None => '.',
                    };
                }
                line.into_iter().collect::<String>()
            })
            .join("\n")
    }

    /// Sums every cell at its absolute weight under `values` and reduces
    /// modulo `2^max_width()`, reading the residue as two's complement when
    /// `signed`. This is the reference summation a downstream compressor
    /// tree would compute.
    pub fn evaluate(&self, values: &Evaluation, signed: bool) -> BigInt {
        let mut sum = BigInt::zero();
        for (cells, shift) in self.rows.iter().zip(&self.shifts) {
            for (i, cell) in cells.iter().enumerate() {
                if values.bit(cell.bit) {
                    sum += BigInt::one() << (shift + i);
                }
            }
        }
        let modulus = BigInt::one() << self.max_width();
        let mut value = sum % &modulus;
        if signed && &value << 1 >= modulus {
            value -= modulus;
        }
        value
    }
}
