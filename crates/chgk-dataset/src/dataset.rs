//! Whole-dataset construction for training and scoring
//!
//! [`TrainDatasetBuilder`] drives the train path over many tournaments. It
//! hands out question ids, expands each tournament and stacks the batches.
//! Each tournament's questions get consecutive ids starting where the
//! previous tournament's ended:
//!
//! ```text
//! tournament 10 (36 questions) → ids base+0  .. base+35
//! tournament 11 (45 questions) → ids base+36 .. base+80
//! ```
//!
//! [`TestDataset`] does the same for the test path, one batch per team, so
//! that a scorer can rank the teams of each tournament.

use rayon::prelude::*;

use crate::{
    DatasetError, QuestionId, TournamentId,
    config::DatasetConfig,
    expand::{expand_test_tour, expand_train_tour},
    matrix::{BatchStacker, PLAYER_COLUMN, RowBatch},
    normalize::TourData,
    question::QuestionOffset,
    roster::TrainPlayerSet,
};

/// Stacked training rows with the vocabulary they define
#[derive(Debug, Clone)]
pub struct TrainDataset {
    /// All rows, in tournament order
    pub batch: RowBatch,
    /// Players with at least one training row
    pub players: TrainPlayerSet,
    /// First question id assigned to each tournament
    pub question_offsets: Vec<(TournamentId, QuestionId)>,
    /// One past the largest question id handed out
    pub next_question_id: QuestionId,
}

#[derive(Debug, Clone, Default)]
pub struct TrainDatasetBuilder {
    config: DatasetConfig,
}

impl TrainDatasetBuilder {
    #[must_use]
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// First question id of every tournament, in input order
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::QuestionIdOverflow`] naming the first
    /// tournament whose ids would run past `u64::MAX`.
    pub fn question_offsets(&self, tours: &[TourData]) -> Result<Vec<QuestionId>, DatasetError> {
        self.assign_question_ids(tours).map(|(offsets, _)| offsets)
    }

    /// Offsets plus the id one past the last question
    fn assign_question_ids(
        &self,
        tours: &[TourData],
    ) -> Result<(Vec<QuestionId>, QuestionId), DatasetError> {
        let mut next = self.config.question_id_base;
        let mut offsets = Vec::with_capacity(tours.len());
        for tour in tours {
            offsets.push(next);
            next = QuestionId::try_from(tour.total_questions)
                .ok()
                .and_then(|n| next.checked_add(n))
                .ok_or(DatasetError::QuestionIdOverflow {
                    tournament_id: tour.tournament_id,
                })?;
        }
        Ok((offsets, next))
    }

    /// Expand and stack the given tournaments
    ///
    /// The result does not depend on `parallel`: batches are merged in input
    /// order either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use chgk_dataset::{
    ///     config::DatasetConfig,
    ///     dataset::TrainDatasetBuilder,
    ///     normalize::{TeamOutcome, TourData},
    /// };
    ///
    /// let tours = vec![
    ///     TourData {
    ///         tournament_id: 1,
    ///         total_questions: 2,
    ///         outcomes: vec![TeamOutcome::new(vec![7, 8], Some("10".into()))],
    ///     },
    ///     TourData {
    ///         tournament_id: 2,
    ///         total_questions: 1,
    ///         outcomes: vec![TeamOutcome::new(vec![7], Some("1".into()))],
    ///     },
    /// ];
    /// let dataset = TrainDatasetBuilder::new(DatasetConfig::default()).build(&tours)?;
    /// assert_eq!(dataset.batch.features().shape(), (5, 2));
    /// assert_eq!(dataset.batch.features().row(4), &[7, 2]);
    /// assert_eq!(dataset.players.len(), 2);
    /// # Ok::<(), chgk_dataset::DatasetError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Fails with [`DatasetError::QuestionIdOverflow`] if the question ids
    /// starting at `question_id_base` do not fit in a `u64`.
    pub fn build(&self, tours: &[TourData]) -> Result<TrainDataset, DatasetError> {
        let (offsets, next_question_id) = self.assign_question_ids(tours)?;
        let expand = |(tour, &offset): (&TourData, &QuestionId)| {
            expand_train_tour(tour, tour.total_questions, &QuestionOffset(offset))
        };
        let batches: Vec<RowBatch> = if self.config.parallel {
            tours.par_iter().zip(offsets.par_iter()).map(expand).collect()
        } else {
            tours.iter().zip(offsets.iter()).map(expand).collect()
        };

        let mut stacker = BatchStacker::new();
        for batch in &batches {
            stacker.push(batch)?;
        }
        let batch = stacker.finalize();
        let players = TrainPlayerSet::from_player_ids(batch.features().column(PLAYER_COLUMN));

        log::info!(
            "train dataset: {} tournaments, {} rows, {} players, {} questions",
            tours.len(),
            batch.len(),
            players.len(),
            next_question_id - self.config.question_id_base
        );

        Ok(TrainDataset {
            batch,
            players,
            question_offsets: tours
                .iter()
                .map(|tour| tour.tournament_id)
                .zip(offsets)
                .collect(),
            next_question_id,
        })
    }
}

/// Test rows of one team
#[derive(Debug, Clone)]
pub struct TestTeamRows {
    pub tournament_id: TournamentId,
    /// Position of the team in the tournament's outcome list
    pub team_index: usize,
    pub batch: RowBatch,
}

/// Test rows grouped by team
#[derive(Debug, Clone, Default)]
pub struct TestDataset {
    pub teams: Vec<TestTeamRows>,
}

impl TestDataset {
    /// Expand every team of every tournament with the configured test
    /// question id
    ///
    /// Teams without rows (no mask, or no known players) are left out.
    #[must_use]
    pub fn build(
        tours: &[TourData],
        config: &DatasetConfig,
        train_players: &TrainPlayerSet,
    ) -> Self {
        let teams = tours
            .iter()
            .flat_map(|tour| {
                expand_test_tour(tour, config.test_question_id, train_players)
                    .into_iter()
                    .enumerate()
                    .filter(|(_, batch)| !batch.is_empty())
                    .map(|(team_index, batch)| TestTeamRows {
                        tournament_id: tour.tournament_id,
                        team_index,
                        batch,
                    })
            })
            .collect::<Vec<_>>();
        log::info!(
            "test dataset: {} tournaments, {} scorable teams",
            tours.len(),
            teams.len()
        );
        Self { teams }
    }

    /// All team batches stacked in order
    pub fn stacked(&self) -> Result<RowBatch, DatasetError> {
        let mut stacker = BatchStacker::new();
        for team in &self.teams {
            stacker.push(&team.batch)?;
        }
        Ok(stacker.finalize())
    }
}
