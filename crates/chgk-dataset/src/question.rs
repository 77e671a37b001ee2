//! Question identifiers for the second feature column
//!
//! The training path needs one question id per decoded mask position. The id
//! scheme belongs to the caller, so the expanders take it as a
//! [`QuestionIds`] provider rather than a single number.

use crate::QuestionId;

/// Maps a decoded mask position to a question id
pub trait QuestionIds {
    fn question_id(&self, position: usize) -> QuestionId;
}

/// Consecutive ids starting at a per-tournament offset
///
/// Giving each tournament the offset `base + questions of all earlier
/// tournaments` makes every question of the dataset distinct.
///
/// Ids saturate at `u64::MAX`. [`TrainDatasetBuilder`] rejects offsets that
/// would get there, so ids it hands out are never clamped.
///
/// [`TrainDatasetBuilder`]: crate::dataset::TrainDatasetBuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOffset(pub QuestionId);

impl QuestionIds for QuestionOffset {
    fn question_id(&self, position: usize) -> QuestionId {
        self.0.saturating_add(position as QuestionId)
    }
}

/// The same id for every position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameQuestion(pub QuestionId);

impl QuestionIds for SameQuestion {
    fn question_id(&self, _position: usize) -> QuestionId {
        self.0
    }
}

impl<F> QuestionIds for F
where
    F: Fn(usize) -> QuestionId,
{
    fn question_id(&self, position: usize) -> QuestionId {
        self(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers() {
        assert_eq!(QuestionOffset(100).question_id(0), 100);
        assert_eq!(QuestionOffset(100).question_id(7), 107);
        assert_eq!(QuestionOffset(u64::MAX - 1).question_id(5), u64::MAX);
        assert_eq!(SameQuestion(3).question_id(0), 3);
        assert_eq!(SameQuestion(3).question_id(9), 3);
        let table: [QuestionId; 3] = [5, 6, 8];
        assert_eq!((|p: usize| table[p]).question_id(2), 8);
    }
}
