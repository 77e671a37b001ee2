//! Feature matrices, label vectors and their assembly
//!
//! Rows are accumulated column by column in a [`MatrixBuilder`] and turned
//! into a row-major [`FeatureMatrix`] once, by [`MatrixBuilder::finalize`].
//! Batches from many tournaments are then stacked by a caller-owned
//! [`BatchStacker`]:
//!
//! ```text
//! TourData ──expand──▶ MatrixBuilder ──finalize──▶ RowBatch ─┐
//! TourData ──expand──▶ MatrixBuilder ──finalize──▶ RowBatch ─┼─▶ BatchStacker ──finalize──▶ RowBatch
//! TourData ──expand──▶ MatrixBuilder ──finalize──▶ RowBatch ─┘
//! ```
//!
//! Feature values are plain integer ids: `[player_id, question_id]`. How they
//! are encoded for a model (one-hot, embeddings, hashing) is up to the
//! consumer.

use crate::{DatasetError, PlayerId, QuestionId};

/// Number of feature columns produced by the row expanders
pub const FEATURE_COLUMNS: usize = 2;
/// Column holding the player id
pub const PLAYER_COLUMN: usize = 0;
/// Column holding the question id
pub const QUESTION_COLUMN: usize = 1;

/// Dense row-major matrix of integer features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMatrix {
    n_cols: usize,
    data: Vec<u64>,
}

impl FeatureMatrix {
    /// A matrix with `n_cols` columns and no rows
    #[must_use]
    pub fn empty(n_cols: usize) -> Self {
        assert!(n_cols > 0, "feature matrix needs at least one column");
        Self {
            n_cols,
            data: vec![],
        }
    }

    /// Build a matrix from fixed-width rows
    ///
    /// # Examples
    ///
    /// ```
    /// use chgk_dataset::matrix::FeatureMatrix;
    ///
    /// let x = FeatureMatrix::from_rows(&[[1, 10], [2, 11], [3, 12]]);
    /// assert_eq!(x.shape(), (3, 2));
    /// assert_eq!(x.row(1), &[2, 11]);
    /// assert_eq!(x.column(0).collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_rows<const N: usize>(rows: &[[u64; N]]) -> Self {
        assert!(N > 0, "feature matrix needs at least one column");
        Self {
            n_cols: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Transpose equally long columns into a row-major matrix
    fn from_columns(columns: &[Vec<u64>]) -> Self {
        let n_cols = columns.len();
        let n_rows = columns.first().map_or(0, Vec::len);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            data.extend(columns.iter().map(|column| column[i]));
        }
        Self { n_cols, data }
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.data.len() / self.n_cols
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, columns)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u64]> + '_ {
        self.data.chunks_exact(self.n_cols)
    }

    pub fn column(&self, j: usize) -> impl Iterator<Item = u64> + '_ {
        assert!(j < self.n_cols, "column {j} out of range");
        self.data.iter().skip(j).step_by(self.n_cols).copied()
    }

    /// Row-major backing storage
    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }
}

/// Feature rows with their binary labels
///
/// Row `i` of `features` belongs to `labels[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBatch {
    features: FeatureMatrix,
    labels: Vec<u8>,
}

impl RowBatch {
    /// # Errors
    ///
    /// Returns [`DatasetError::LabelCountMismatch`] if the row and label counts
    /// differ.
    pub fn new(features: FeatureMatrix, labels: Vec<u8>) -> Result<Self, DatasetError> {
        if features.n_rows() != labels.len() {
            return Err(DatasetError::LabelCountMismatch {
                rows: features.n_rows(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    /// A `(0, 2)` batch with no labels
    #[must_use]
    pub fn empty() -> Self {
        Self {
            features: FeatureMatrix::empty(FEATURE_COLUMNS),
            labels: vec![],
        }
    }

    #[must_use]
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    #[must_use]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (FeatureMatrix, Vec<u8>) {
        (self.features, self.labels)
    }
}

impl Default for RowBatch {
    fn default() -> Self {
        Self::empty()
    }
}

/// Column-major accumulator for `[player_id, question_id]` rows
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    players: Vec<PlayerId>,
    questions: Vec<QuestionId>,
    labels: Vec<u8>,
}

impl MatrixBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row per question for `player`
    ///
    /// `question_ids` and `answers` are parallel: row `k` gets
    /// `question_ids[k]` and label `answers[k]`.
    pub fn push_player_rows(
        &mut self,
        player: PlayerId,
        question_ids: &[QuestionId],
        answers: &[u8],
    ) {
        assert_eq!(question_ids.len(), answers.len(), "one question id per answer");
        self.players.extend(std::iter::repeat_n(player, answers.len()));
        self.questions.extend_from_slice(question_ids);
        self.labels.extend_from_slice(answers);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Freeze the accumulated rows into a `(rows, 2)` batch
    #[must_use]
    pub fn finalize(self) -> RowBatch {
        RowBatch {
            features: FeatureMatrix::from_columns(&[self.players, self.questions]),
            labels: self.labels,
        }
    }
}

/// Caller-owned accumulator that stacks batches vertically
#[derive(Debug, Clone)]
pub struct BatchStacker {
    n_cols: usize,
    data: Vec<u64>,
    labels: Vec<u8>,
}

impl BatchStacker {
    /// A stacker for batches with [`FEATURE_COLUMNS`] columns
    #[must_use]
    pub fn new() -> Self {
        Self::with_columns(FEATURE_COLUMNS)
    }

    #[must_use]
    pub fn with_columns(n_cols: usize) -> Self {
        assert!(n_cols > 0, "feature matrix needs at least one column");
        Self {
            n_cols,
            data: vec![],
            labels: vec![],
        }
    }

    /// Append a batch below the rows stacked so far
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ShapeMismatch`] if the batch has a different
    /// column count; the stacker is left unchanged.
    pub fn push(&mut self, batch: &RowBatch) -> Result<(), DatasetError> {
        let found = batch.features.n_cols();
        if found != self.n_cols {
            return Err(DatasetError::ShapeMismatch {
                expected: self.n_cols,
                found,
            });
        }
        self.data.extend_from_slice(batch.features.as_slice());
        self.labels.extend_from_slice(&batch.labels);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn finalize(self) -> RowBatch {
        RowBatch {
            features: FeatureMatrix {
                n_cols: self.n_cols,
                data: self.data,
            },
            labels: self.labels,
        }
    }
}

impl Default for BatchStacker {
    fn default() -> Self {
        Self::new()
    }
}

/// Stack batches into one matrix and one label vector
///
/// Zero batches give a `(0, 2)` matrix and an empty label vector.
///
/// # Errors
///
/// Returns [`DatasetError::ShapeMismatch`] if any batch does not have
/// [`FEATURE_COLUMNS`] columns.
pub fn stack(batches: &[RowBatch]) -> Result<RowBatch, DatasetError> {
    let mut stacker = BatchStacker::new();
    for batch in batches {
        stacker.push(batch)?;
    }
    Ok(stacker.finalize())
}
