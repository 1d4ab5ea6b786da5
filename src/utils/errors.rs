use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartialProductError {
    #[error("Multiplicand width {0} is narrower than the radix shift {1}")]
    MultiplicandTooNarrow(usize, usize),
    #[error("Multiplier width {0} is narrower than the required {1} bits")]
    MultiplierTooNarrow(usize, usize),
    #[error("Partial product matrix is already sign-extended")]
    AlreadySignExtended,
}
