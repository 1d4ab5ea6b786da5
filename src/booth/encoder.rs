//! Per-row Booth encodings of the multiplier.
//!
//! Row `r` inspects the `shift + 1` overlapping multiplier bits
//! `y[r*shift - 1 ..= r*shift + shift - 1]` (the bit below index 0 reads as
//! 0, bits above the top read as the replicated sign for signed operands and
//! as 0 otherwise) and recodes them as a signed digit
//! `d = w[0] + sum_{i=1..shift} w[i] * 2^(i-1) - w[shift] * 2^shift`.
//!
//! The emitted encoding is hardware-shaped rather than numeric: a sign bit
//! (the window's top bit, so an all-ones window reads as negative zero) and
//! a one-hot over the digit magnitudes `1 ..= 2^(shift-1)`, with a zero
//! digit leaving the one-hot empty.

use super::MultiplierConfig;
use crate::signal::vector::BitVector;
use crate::signal::{Bit, BitPool};
use crate::utils::math::Math;

/// One row's recoded digit: `sign` selects subtraction, `multiples[m-1]`
/// selects magnitude `m`.
#[derive(Clone, Debug)]
pub struct RadixEncoding {
    pub sign: Bit,
    pub multiples: Vec<Bit>,
}

/// Slices the multiplier into per-row recoding windows.
pub struct MultiplierEncoder {
    shift: usize,
    windows: Vec<Vec<Bit>>,
}

impl MultiplierEncoder {
    pub fn new(multiplier: &BitVector, config: &MultiplierConfig, rows: usize) -> Self {
        let shift = config.radix.shift();
        let top = if config.signed {
            multiplier.msb()
        } else {
            Bit::ZERO
        };
        let windows = (0..rows)
            .map(|row| {
                (0..=shift)
                    .map(|i| {
                        let index = (row * shift + i) as isize - 1;
                        if index < 0 {
                            Bit::ZERO
                        } else if index as usize >= multiplier.width() {
                            top
                        } else {
                            multiplier.bit(index as usize)
                        }
                    })
                    .collect()
            })
            .collect();
        MultiplierEncoder { shift, windows }
    }

    pub fn rows(&self) -> usize {
        self.windows.len()
    }

    /// Builds the sign and magnitude one-hot for `row`. Each magnitude line
    /// is a sum of minterms over the window bits.
    pub fn encoding(&self, pool: &mut BitPool, row: usize) -> RadixEncoding {
        let window = &self.windows[row];
        let multiples = (1..=(self.shift - 1).pow2())
            .map(|magnitude| {
                let mut hot: Option<Bit> = None;
                for value in 0..(self.shift + 1).pow2() {
                    if digit_of(value, self.shift).unsigned_abs() as usize != magnitude {
                        continue;
                    }
                    let term = minterm(pool, window, value);
                    hot = Some(match hot {
                        Some(acc) => pool.or(acc, term),
                        None => term,
                    });
                }
                hot.unwrap_or(Bit::ZERO)
            })
            .collect();
        RadixEncoding {
            sign: window[self.shift],
            multiples,
        }
    }
}

/// The Booth digit encoded by a `shift + 1`-bit window value.
pub(crate) fn digit_of(window: usize, shift: usize) -> i64 {
    let mut digit = (window & 1) as i64;
    for i in 1..=shift {
        digit += (((window >> i) & 1) << (i - 1)) as i64;
    }
    digit - (((window >> shift) & 1) << shift) as i64
}

/// AND of one literal per window bit, true exactly when the window equals
/// `value`.
fn minterm(pool: &mut BitPool, window: &[Bit], value: usize) -> Bit {
    let mut term: Option<Bit> = None;
    for (i, &bit) in window.iter().enumerate() {
        let literal = if (value >> i) & 1 == 1 {
            bit
        } else {
            pool.not(bit)
        };
        term = Some(match term {
            Some(acc) => pool.and(acc, literal),
            None => literal,
        });
    }
    term.unwrap_or(Bit::ONE)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booth::Radix;
    use crate::signal::vector::bit_values;
    use strum::IntoEnumIterator;

    #[test]
    fn digit_table_radix_four() {
        let digits: Vec<i64> = (0..8).map(|w| digit_of(w, 2)).collect();
        assert_eq!(digits, [0, 1, 1, 2, -2, -1, -1, 0]);
    }

    #[test]
    fn digit_range() {
        for shift in 1..=4usize {
            for window in 0..(shift + 1).pow2() {
                let digit = digit_of(window, shift);
                assert!(digit.unsigned_abs() as usize <= (shift - 1).pow2());
            }
        }
    }

    /// Digits evaluated from the encodings must reassemble the multiplier:
    /// `sum d_r * 2^(r*shift)` equals the operand value.
    #[test]
    fn digits_reconstruct_multiplier() {
        for radix in Radix::iter() {
            for signed in [false, true] {
                let config = MultiplierConfig { radix, signed };
                let shift = radix.shift();
                let width = shift + 2;
                let rows = config.row_count(width);

                let mut pool = BitPool::new();
                let y = BitVector::inputs(&mut pool, width);
                let encoder = MultiplierEncoder::new(&y, &config, rows);
                let encodings: Vec<RadixEncoding> = (0..encoder.rows())
                    .map(|r| encoder.encoding(&mut pool, r))
                    .collect();

                for value in 0..width.pow2() as u64 {
                    let values = pool.evaluate(&bit_values(value, width));
                    let mut sum: i64 = 0;
                    for (r, encoding) in encodings.iter().enumerate() {
                        let hot: Vec<bool> = encoding
                            .multiples
                            .iter()
                            .map(|&m| values.bit(m))
                            .collect();
                        assert!(hot.iter().filter(|&&h| h).count() <= 1);
                        let magnitude =
                            hot.iter().position(|&h| h).map_or(0, |m| m + 1) as i64;
                        let digit = if values.bit(encoding.sign) {
                            -magnitude
                        } else {
                            magnitude
                        };
                        sum += digit << (r * shift);
                    }
                    let expected = if signed && value >> (width - 1) == 1 {
                        value as i64 - (1i64 << width)
                    } else {
                        value as i64
                    };
                    assert_eq!(sum, expected, "radix {radix:?} signed {signed} y {value}");
                }
            }
        }
    }
}
