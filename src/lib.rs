//! Booth partial-product matrix generation with compact rectangular sign
//! extension.

#![allow(clippy::needless_range_loop)]
#![allow(clippy::len_without_is_empty)]

pub mod booth;
pub mod extension;
pub mod generator;
pub mod matrix;
pub mod signal;
pub mod utils;
