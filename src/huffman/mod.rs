pub mod decoder;
pub mod tables;

pub use decoder::{Alphabet, CanonicalCode, DistanceCode};
