//! Sign-extension strategies for a freshly built matrix.
//!
//! A Booth row carries a negation sign that still owes the matrix a `+1`
//! correction, and a signed row also needs its value extended up to the
//! final product width. The strategies here settle both debts, each exactly
//! once per matrix:
//!
//! * [`SignExtension::None`] leaves every row untouched; the corrections
//!   become the caller's problem (an external summer or compressor that
//!   handles signs itself).
//! * [`SignExtension::CompactRectangular`] folds all corrections into the
//!   existing rows, keeping the matrix rectangular with no extra rows.
//!
//! Applying any strategy, `None` included, consumes the matrix's one-shot
//! guard; a second application fails with
//! [`PartialProductError::AlreadySignExtended`].

mod compact;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, IntoStaticStr};

use crate::generator::PartialProductGenerator;
use crate::signal::BitPool;
use crate::utils::errors::PartialProductError;

/// How the generator settles sign handling after the rows are built.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum SignExtension {
    /// Emit the raw selected rows and let the consumer correct signs.
    None,
    /// Fold sign corrections into the rows themselves.
    #[default]
    CompactRectangular,
}

impl SignExtension {
    pub fn apply(
        self,
        pool: &mut BitPool,
        generator: &mut PartialProductGenerator,
    ) -> Result<(), PartialProductError> {
        let width = generator.selector_width();
        let shift = generator.config().radix.shift();
        let signed = generator.config().signed;
        let signs = generator.signs().to_vec();
        let array = generator.array_mut();
        array.mark_sign_extended()?;
        match self {
            SignExtension::None => Ok(()),
            SignExtension::CompactRectangular => {
                compact::sign_extend(pool, array, &signs, width, shift, signed);
                Ok(())
            }
        }
    }
}
