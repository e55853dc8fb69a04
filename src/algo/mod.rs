//! Algorithm implementations.
//!
//! - `myers`: Myers diff algorithm for efficient LCS

mod myers;

pub use myers::{Edit, LcsResult, LcsStats, MAX_EDIT_DISTANCE, diff_sequences, myers_lcs};
