//! Expansion of team outcomes into per-player, per-question rows
//!
//! A team answers as one unit, so every player on the roster receives the
//! team's label for every question. A team of 6 with a 36-question mask
//! expands into 216 rows.
//!
//! Two paths exist:
//!
//! - **Train** ([`expand_train_tour`]): the whole tournament, with strict mask
//!   validation. An outcome whose decoded length differs from the question
//!   count is dropped entirely, since its labels cannot be aligned with the
//!   questions.
//! - **Test** ([`expand_test_outcome`]): one team at a time, restricted to
//!   players known from training.

use crate::{
    QuestionId,
    mask::DecodedMask,
    matrix::{MatrixBuilder, RowBatch},
    normalize::{TeamOutcome, TourData},
    question::QuestionIds,
    roster::TrainPlayerSet,
};

/// Expand every usable outcome of a tournament
///
/// `question_ids` supplies the question id of each mask position.
///
/// # Examples
///
/// ```
/// use chgk_dataset::{
///     expand::expand_train_tour,
///     normalize::{TeamOutcome, TourData},
///     question::QuestionOffset,
/// };
///
/// let tour = TourData {
///     tournament_id: 1,
///     total_questions: 3,
///     outcomes: vec![
///         TeamOutcome::new(vec![1, 2], Some("01X1".into())),
///         TeamOutcome::new(vec![3], Some("01".into())),
///     ],
/// };
/// let batch = expand_train_tour(&tour, tour.total_questions, &QuestionOffset(0));
/// assert_eq!(batch.features().shape(), (6, 2));
/// assert_eq!(batch.labels(), &[0, 1, 1, 0, 1, 1]);
/// ```
#[must_use]
pub fn expand_train_tour<Q>(tour: &TourData, total_questions: usize, question_ids: &Q) -> RowBatch
where
    Q: QuestionIds + ?Sized,
{
    // filled by the first team that passes the length check
    let mut ids: Option<Vec<QuestionId>> = None;
    let mut builder = MatrixBuilder::new();
    for outcome in &tour.outcomes {
        let Some(mask) = outcome.mask.as_deref() else {
            continue;
        };
        let decoded = DecodedMask::decode(mask);
        if decoded.len() != total_questions {
            log::debug!(
                "tournament {}: mask decodes to {} answers, expected {}; team dropped",
                tour.tournament_id,
                decoded.len(),
                total_questions
            );
            continue;
        }
        let ids = ids.get_or_insert_with(|| {
            (0..total_questions)
                .map(|position| question_ids.question_id(position))
                .collect()
        });
        for &player in &outcome.players {
            builder.push_player_rows(player, ids, decoded.answers());
        }
    }
    builder.finalize()
}

/// Expand one team for scoring
///
/// Every row gets `question_id`. Players outside `train_players` produce no
/// rows, and an absent or empty mask yields an empty batch. The mask length
/// is not checked against the question count.
#[must_use]
pub fn expand_test_outcome(
    outcome: &TeamOutcome,
    question_id: QuestionId,
    train_players: &TrainPlayerSet,
) -> RowBatch {
    let mut builder = MatrixBuilder::new();
    let Some(mask) = outcome.usable_mask() else {
        return builder.finalize();
    };
    let decoded = DecodedMask::decode(mask);
    let ids = vec![question_id; decoded.len()];
    for &player in &outcome.players {
        if train_players.contains(player) {
            builder.push_player_rows(player, &ids, decoded.answers());
        }
    }
    builder.finalize()
}

/// Expand every outcome of a tournament for scoring, one batch per team
///
/// Teams keep their source order, including teams that produced no rows, so
/// that `batches[i]` always belongs to `tour.outcomes[i]`.
#[must_use]
pub fn expand_test_tour(
    tour: &TourData,
    question_id: QuestionId,
    train_players: &TrainPlayerSet,
) -> Vec<RowBatch> {
    tour.outcomes
        .iter()
        .map(|outcome| expand_test_outcome(outcome, question_id, train_players))
        .collect()
}
