//! Sparse one-hot encoding of player-question feature matrices
//!
//! The dataset pipeline emits integer id columns (`[player_id, question_id]`).
//! A linear skill model needs one weight per player and per question, which
//! means one indicator column per distinct id. With tens of thousands of
//! players the result is almost entirely zeros, so it is stored as a
//! [`CsrMatrix`].
//!
//! ```text
//! FeatureMatrix (n × 2)  ──fit──▶  OneHotEncoder
//!                        ──transform──▶  CsrMatrix (n × (players + questions)), 2 entries per row
//! ```

pub use self::{
    one_hot::{ColumnVocabulary, OneHotEncoder},
    sparse::CsrMatrix,
};

mod one_hot;
mod sparse;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum EncodeError {
    #[display("expected {expected} feature columns, got {found}")]
    ColumnMismatch { expected: usize, found: usize },
}
