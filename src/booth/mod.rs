//! Booth recoding of the multiplier and selection of multiplicand multiples.
//!
//! A radix-2^k recoding walks the multiplier in overlapping windows of k+1
//! bits and maps each window to a signed digit in [-2^(k-1), 2^(k-1)]. One
//! partial-product row is emitted per digit, so higher radices trade wider
//! rows for fewer of them.

pub mod encoder;
pub mod selector;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

use crate::utils::math::Math;

/// Supported recoding radices. The discriminant is the radix itself.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[repr(usize)]
pub enum Radix {
    Two = 2,
    #[default]
    Four = 4,
    Eight = 8,
    Sixteen = 16,
}

impl Radix {
    /// Bits of multiplier consumed per row, `log2(radix)`.
    pub fn shift(self) -> usize {
        (self as usize).log_2()
    }

    /// Number of positive multiples of the multiplicand a row can select,
    /// `1 * X` through `2^(shift - 1) * X`.
    pub fn multiple_count(self) -> usize {
        (self.shift() - 1).pow2()
    }
}

/// Operand interpretation and recoding radix for one generator run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierConfig {
    pub radix: Radix,
    /// Two's complement operands when set, pure binary otherwise.
    pub signed: bool,
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        MultiplierConfig {
            radix: Radix::Four,
            signed: true,
        }
    }
}

impl MultiplierConfig {
    /// Rows needed to cover a `multiplier_width`-bit operand. Unsigned
    /// operands carry an implicit 0 above the MSB and may need one extra
    /// digit for it.
    pub fn row_count(&self, multiplier_width: usize) -> usize {
        let effective = multiplier_width + usize::from(!self.signed);
        effective.div_ceil(self.radix.shift())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn shift_matches_radix() {
        for (radix, shift) in Radix::iter().zip([1, 2, 3, 4]) {
            assert_eq!(radix.shift(), shift);
            assert_eq!(radix as usize, 1 << shift);
        }
    }

    #[test]
    fn row_counts() {
        let signed = MultiplierConfig {
            radix: Radix::Four,
            signed: true,
        };
        let unsigned = MultiplierConfig {
            radix: Radix::Four,
            signed: false,
        };
        assert_eq!(signed.row_count(4), 2);
        assert_eq!(unsigned.row_count(4), 3);
        assert_eq!(signed.row_count(5), 3);
        assert_eq!(unsigned.row_count(5), 3);
    }
}
