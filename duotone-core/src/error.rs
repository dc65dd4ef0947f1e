use thiserror::Error;

/// Errors originating from the core gallery model.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("pair lists differ in length: {bw} b/w names vs {color} color names")]
    MismatchedPairLists { bw: usize, color: usize },

    #[error("photo index {index} out of range (set holds {count} pairs)")]
    IndexOutOfRange { index: usize, count: usize },
}
