//! Precomputed positive multiples of the multiplicand and the per-column
//! mux that picks one per row.

use super::encoder::RadixEncoding;
use super::MultiplierConfig;
use crate::signal::vector::{ripple_add, BitVector};
use crate::signal::{Bit, BitPool};

/// Buses for `1*X ..= 2^(shift-1)*X`, each `multiplicand_width + shift - 1`
/// bits wide so the largest multiple fits without overflow. Even multiples
/// are shifts of smaller ones; odd multiples above 1 each cost one
/// ripple-carry adder.
pub struct MultiplicandSelector {
    width: usize,
    multiples: Vec<BitVector>,
}

impl MultiplicandSelector {
    pub fn new(pool: &mut BitPool, multiplicand: &BitVector, config: &MultiplierConfig) -> Self {
        let shift = config.radix.shift();
        let width = multiplicand.width() + shift - 1;
        let base = if config.signed {
            multiplicand.sign_extend(width)
        } else {
            multiplicand.zero_extend(width)
        };
        let mut multiples: Vec<BitVector> = Vec::with_capacity(config.radix.multiple_count());
        for m in 1..=config.radix.multiple_count() {
            let bus = if m == 1 {
                base.clone()
            } else if m % 2 == 0 {
                multiples[m / 2 - 1].shift_left(1)
            } else {
                ripple_add(pool, &multiples[m - 2], &base)
            };
            multiples.push(bus);
        }
        MultiplicandSelector { width, multiples }
    }

    /// Row width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// One uncorrected partial-product cell: the selected multiple's bit at
    /// `col`, complemented when the digit is negative. The matching `+1`
    /// of the two's complement negation is not added here.
    pub fn select(&self, pool: &mut BitPool, col: usize, encoding: &RadixEncoding) -> Bit {
        let mut picked: Option<Bit> = None;
        for (bus, &hot) in self.multiples.iter().zip(&encoding.multiples) {
            let masked = pool.and(hot, bus.bit(col));
            picked = Some(match picked {
                Some(acc) => pool.or(acc, masked),
                None => masked,
            });
        }
        pool.xor(picked.unwrap_or(Bit::ZERO), encoding.sign)
    }
}
