//! Little-endian vectors of arena bits, plus the ripple-carry adder used to
//! derive odd multiples of the multiplicand.

use super::{Bit, BitPool, Evaluation};

/// A fixed-width little-endian bundle of [`Bit`]s. Index 0 is the LSB.
#[derive(Clone, Debug)]
pub struct BitVector {
    bits: Vec<Bit>,
}

impl BitVector {
    /// Allocates `width` fresh input nodes, LSB first.
    pub fn inputs(pool: &mut BitPool, width: usize) -> Self {
        BitVector {
            bits: (0..width).map(|_| pool.input()).collect(),
        }
    }

    pub fn from_bits(bits: Vec<Bit>) -> Self {
        BitVector { bits }
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    pub fn bit(&self, index: usize) -> Bit {
        self.bits[index]
    }

    pub fn msb(&self) -> Bit {
        self.bits[self.bits.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// Widens to `width` by appending constant zeros.
    pub fn zero_extend(&self, width: usize) -> Self {
        debug_assert!(width >= self.width());
        let mut bits = self.bits.clone();
        bits.resize(width, Bit::ZERO);
        BitVector { bits }
    }

    /// Widens to `width` by replicating the MSB.
    pub fn sign_extend(&self, width: usize) -> Self {
        debug_assert!(width >= self.width());
        let mut bits = self.bits.clone();
        bits.resize(width, self.msb());
        BitVector { bits }
    }

    /// Shifts left by `count` places at constant width. Low bits fill with
    /// zero and the top `count` bits fall off.
    pub fn shift_left(&self, count: usize) -> Self {
        let width = self.width();
        let mut bits = vec![Bit::ZERO; count.min(width)];
        bits.extend_from_slice(&self.bits[..width - bits.len()]);
        BitVector { bits }
    }

    /// Reads the vector back as an unsigned integer under `values`.
    pub fn decode(&self, values: &Evaluation) -> u64 {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | ((values.bit(bit) as u64) << i))
    }
}

/// Adds two equal-width vectors with a ripple carry, dropping the carry out.
pub fn ripple_add(pool: &mut BitPool, a: &BitVector, b: &BitVector) -> BitVector {
    assert_eq!(a.width(), b.width());
    let mut carry = Bit::ZERO;
    let mut bits = Vec::with_capacity(a.width());
    for (x, y) in a.iter().zip(b.iter()) {
        let partial = pool.xor(x, y);
        let sum = pool.xor(partial, carry);
        let gen = pool.and(x, y);
        let prop = pool.and(partial, carry);
        carry = pool.or(gen, prop);
        bits.push(sum);
    }
    BitVector { bits }
}

/// Little-endian bits of `value`, truncated to `width`.
pub fn bit_values(value: u64, width: usize) -> Vec<bool> {
    (0..width).map(|i| (value >> i) & 1 == 1).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_round_trips_inputs() {
        let mut pool = BitPool::new();
        let v = BitVector::inputs(&mut pool, 6);
        for value in 0..64u64 {
            let values = pool.evaluate(&bit_values(value, 6));
            assert_eq!(v.decode(&values), value);
        }
    }

    #[test]
    fn extensions_preserve_value() {
        let mut pool = BitPool::new();
        let v = BitVector::inputs(&mut pool, 3);
        let zext = v.zero_extend(5);
        let sext = v.sign_extend(5);
        for value in 0..8u64 {
            let values = pool.evaluate(&bit_values(value, 3));
            assert_eq!(zext.decode(&values), value);
            let expected = if value >= 4 { value | 0b11000 } else { value };
            assert_eq!(sext.decode(&values), expected);
        }
    }

    #[test]
    fn shift_left_keeps_width() {
        let mut pool = BitPool::new();
        let v = BitVector::inputs(&mut pool, 4);
        let shifted = v.shift_left(1);
        assert_eq!(shifted.width(), 4);
        for value in 0..16u64 {
            let values = pool.evaluate(&bit_values(value, 4));
            assert_eq!(shifted.decode(&values), (value << 1) & 0xF);
        }
    }

    #[test]
    fn ripple_add_wraps_at_width() {
        let mut pool = BitPool::new();
        let a = BitVector::inputs(&mut pool, 4);
        let b = BitVector::inputs(&mut pool, 4);
        let sum = ripple_add(&mut pool, &a, &b);
        assert_eq!(sum.width(), 4);
        for x in 0..16u64 {
            for y in 0..16u64 {
                let mut inputs = bit_values(x, 4);
                inputs.extend(bit_values(y, 4));
                let values = pool.evaluate(&inputs);
                assert_eq!(sum.decode(&values), (x + y) & 0xF);
            }
        }
    }
}
