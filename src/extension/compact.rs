//! Compact rectangular sign extension.
//!
//! Rewrites the matrix in place so that every row's two's complement
//! corrections live inside the rectangle:
//!
//! * Each row's `+1` negation carry is absorbed by a prefix-AND propagate
//!   chain through the row's low bits; whatever the chain cannot absorb
//!   locally is spliced into the next row's column 0 as a one-bit
//!   remainder.
//! * Each row above the first trades full sign replication for a single
//!   complemented stop sign at its top, padded with constant-1 cells.
//! * The first row grows a short correction field (the Q field) at the
//!   product's top columns that accounts for its own sign together with
//!   the last row's leftover remainder.
//!
//! The result sums to the exact product modulo `2^max_width()` without any
//! extra correction row.
//!
//! Assumptions:
//! * The matrix is freshly built: row `r` still sits at shift `r * shift`
//!   and every row is `width` cells long.
//! * At least two rows exist; the row-count rule guarantees this for every
//!   operand width the generator accepts.
//! * The guard flag was already consumed by the caller.

use crate::matrix::{Cell, PartialProductArray};
use crate::signal::{Bit, BitPool};

/// Where row 0's correction field starts relative to the last row decides
/// which of three layouts the field takes: overlapping (`align > 0`),
/// touching (`insert_pos == shift`), or disjoint with the last remainder
/// spliced into a lower row.
#[tracing::instrument(skip_all, name = "compact::sign_extend")]
pub(crate) fn sign_extend(
    pool: &mut BitPool,
    array: &mut PartialProductArray,
    signs: &[Bit],
    width: usize,
    shift: usize,
    signed: bool,
) {
    let rows = array.row_count();
    let last = rows - 1;
    let q_start = width as i64 - i64::from(signed);
    let align = q_start - (shift * last) as i64;
    let q_len = shift + 1;
    let insert_pos = (-align).max(0) as usize;
    let layout = if insert_pos >= q_len {
        "disjoint"
    } else if insert_pos == q_len - 1 {
        "touching"
    } else {
        "overlapping"
    };
    tracing::debug!(
        "rows={}, width={}, align={}, insert_pos={}, {} correction field",
        rows,
        width,
        align,
        insert_pos,
        layout
    );

    // Per-row propagate chains: prefix-AND from the row's sign through its
    // low cells. The last row's chain keeps growing until it reaches the
    // correction field's column.
    let mut propagate: Vec<Vec<Bit>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let cells = array.row_cells(row);
        let mut chain = vec![signs[row]];
        for c in 0..2 * (shift - 1) {
            chain.push(cells[c].bit);
        }
        if row == last {
            let mut c = 2 * (shift - 1);
            while (chain.len() as i64) <= align {
                chain.push(cells[c].bit);
                c += 1;
            }
        }
        for k in 1..chain.len() {
            chain[k] = pool.and(chain[k], chain[k - 1]);
        }
        propagate.push(chain);
    }

    // Low bits corrected by the chain, and the one-bit remainder each row
    // hands to its neighbor.
    let mut corrected: Vec<Vec<Bit>> = Vec::with_capacity(rows);
    for row in 0..rows {
        let limit = if row == last { align } else { (shift - 1) as i64 };
        let cells = array.row_cells(row);
        corrected.push(
            (0..limit.max(0) as usize)
                .map(|k| pool.xor(cells[k].bit, propagate[row][k]))
                .collect(),
        );
    }
    let mut remainder: Vec<Bit> = (0..last).map(|r| propagate[r][shift - 1]).collect();
    remainder.push(propagate[last][align.max(0) as usize]);

    // Merge pass. Rows above the first take their corrected low bits, a
    // complemented stop sign at the top, the previous row's remainder
    // spliced at column 0, and constant-1 padding; their shift drops by
    // one to make room for the splice. Row 0 only takes its low bits.
    for row in 0..rows {
        let base = array.row_shift(row);
        let limit = if row == last { align } else { (shift - 1) as i64 };
        for k in 0..limit.max(0) as usize {
            array.set(row, base + k, Cell::plain(corrected[row][k]));
        }
        if row == 0 {
            continue;
        }
        if signed {
            let top = array.row_len(row) - 1;
            let bit = array.row_cells(row)[top].bit;
            let flipped = pool.not(bit);
            array.set(row, base + top, Cell::sign(flipped, true));
        } else {
            let flipped = pool.not(signs[row]);
            array.append(row, Cell::sign(flipped, true));
        }
        array.insert(row, base, Cell::plain(remainder[row - 1]));
        for _ in 0..shift - 1 {
            array.append(row, Cell::ONE);
        }
        array.decrement_shift(row);
    }

    // Q correction field, folding row 0's sign and the last row's
    // remainder into the top columns.
    let first_sign = if signed {
        array.row_cells(0)[width - 1].bit
    } else {
        signs[0]
    };
    let last_sign = remainder[last];
    let mut q: Vec<Cell> = vec![Cell::sign(first_sign, false); insert_pos.min(q_len)];
    if insert_pos < q_len {
        let mix = pool.xor(first_sign, last_sign);
        q.push(Cell::sign(mix, false));
        if insert_pos == q_len - 1 {
            let flipped = pool.not(mix);
            q[insert_pos] = Cell::sign(flipped, true);
            let closing = pool.or(first_sign, flipped);
            let closing = pool.not(closing);
            q.push(Cell::sign(closing, true));
        } else {
            let not_last = pool.not(last_sign);
            let rest = pool.and(first_sign, not_last);
            while q.len() < q_len - 1 {
                q.push(Cell::sign(rest, false));
            }
            let cap = pool.not(rest);
            q.push(Cell::sign(cap, true));
        }
    } else {
        let flipped = pool.not(first_sign);
        let end = q.len() - 1;
        q[end] = Cell::sign(flipped, true);
    }
    if signed {
        array.set(0, width - 1, q[0]);
    } else {
        array.append(0, q[0]);
    }
    for &cell in &q[1..] {
        array.append(0, cell);
    }

    // When the field sits fully below the last row's weight, its remainder
    // cannot ride along; splice it at that weight into whichever row ends
    // there.
    if insert_pos >= q_len {
        let numerator =
            (shift * last) as i64 - width as i64 - shift as i64 + i64::from(signed);
        debug_assert!(numerator > 0);
        let carry_row = (numerator / shift as i64) as usize;
        let target = shift * last;
        tracing::trace!("splicing last remainder into row {} at column {}", carry_row, target);
        while array.row_shift(carry_row) + array.row_len(carry_row) < target {
            array.append(carry_row, Cell::ZERO);
        }
        array.append(carry_row, Cell::plain(remainder[last]));
    }

    // Radix-2 rows lose their constant padding to the merge arithmetic;
    // the bottom row still owes one.
    if shift == 1 {
        array.append(last, Cell::ONE);
    }
}
