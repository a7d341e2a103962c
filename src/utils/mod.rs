//! Bit and byte utilities shared across the codec layers.

pub mod bits;
pub mod converter;
