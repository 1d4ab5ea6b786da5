//! Partial-product matrix construction.
//!
//! `PartialProductGenerator` wires the pieces together: it recodes the
//! multiplier into Booth digits, selects a multiple of the multiplicand per
//! digit, lays the selected rows out at their digit weights, and applies
//! the configured sign-extension strategy exactly once. The finished matrix
//! is what a downstream compressor tree would consume.

use num::BigInt;

use crate::booth::encoder::MultiplierEncoder;
use crate::booth::selector::MultiplicandSelector;
use crate::booth::MultiplierConfig;
use crate::extension::SignExtension;
use crate::matrix::{Cell, PartialProductArray};
use crate::signal::vector::BitVector;
use crate::signal::{Bit, BitPool, Evaluation};
use crate::utils::errors::PartialProductError;

/// A built partial-product matrix plus the per-row encoded sign bits and
/// the geometry a consumer needs to interpret it.
#[derive(Debug)]
pub struct PartialProductGenerator {
    array: PartialProductArray,
    signs: Vec<Bit>,
    config: MultiplierConfig,
    selector_width: usize,
}

impl PartialProductGenerator {
    /// Builds the matrix for `multiplicand * multiplier` and applies
    /// `strategy`. Operands are little-endian buses whose widths fix the
    /// matrix geometry: the multiplicand must cover at least one radix
    /// shift, the multiplier at least one recoding window.
    #[tracing::instrument(skip_all, name = "PartialProductGenerator::new")]
    pub fn new(
        pool: &mut BitPool,
        multiplicand: &BitVector,
        multiplier: &BitVector,
        config: MultiplierConfig,
        strategy: SignExtension,
    ) -> Result<Self, PartialProductError> {
        let shift = config.radix.shift();
        if multiplicand.width() < shift {
            return Err(PartialProductError::MultiplicandTooNarrow(
                multiplicand.width(),
                shift,
            ));
        }
        let min_multiplier = shift + usize::from(config.signed);
        if multiplier.width() < min_multiplier {
            return Err(PartialProductError::MultiplierTooNarrow(
                multiplier.width(),
                min_multiplier,
            ));
        }

        let rows = config.row_count(multiplier.width());
        let encoder = MultiplierEncoder::new(multiplier, &config, rows);
        let selector = MultiplicandSelector::new(pool, multiplicand, &config);
        let width = selector.width();
        tracing::debug!(
            "building {} rows of width {} (radix {:?}, signed {})",
            rows,
            width,
            config.radix,
            config.signed
        );

        let mut signs = Vec::with_capacity(rows);
        let mut cells = Vec::with_capacity(rows);
        for row in 0..rows {
            let encoding = encoder.encoding(pool, row);
            cells.push(
                (0..width)
                    .map(|col| Cell::plain(selector.select(pool, col, &encoding)))
                    .collect::<Vec<Cell>>(),
            );
            signs.push(encoding.sign);
        }

        let mut generator = PartialProductGenerator {
            array: PartialProductArray::new(cells, shift),
            signs,
            config,
            selector_width: width,
        };
        strategy.apply(pool, &mut generator)?;
        Ok(generator)
    }

    pub fn array(&self) -> &PartialProductArray {
        &self.array
    }

    pub(crate) fn array_mut(&mut self) -> &mut PartialProductArray {
        &mut self.array
    }

    /// Encoded sign bit of each row, the recoding window's top bit.
    pub fn signs(&self) -> &[Bit] {
        &self.signs
    }

    pub fn config(&self) -> &MultiplierConfig {
        &self.config
    }

    /// Width of every row as selected, before sign extension reshapes them.
    pub fn selector_width(&self) -> usize {
        self.selector_width
    }

    pub fn signed(&self) -> bool {
        self.config.signed
    }

    /// The matrix sum under one input assignment. See
    /// [`PartialProductArray::evaluate`].
    pub fn evaluate(&self, values: &Evaluation) -> BigInt {
        self.array.evaluate(values, self.config.signed)
    }
}
