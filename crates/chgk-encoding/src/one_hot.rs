use serde::{Deserialize, Serialize};

use chgk_dataset::matrix::FeatureMatrix;

use crate::{EncodeError, sparse::CsrMatrix};

/// Sorted category values seen in one column during fitting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnVocabulary {
    categories: Vec<u64>,
}

impl ColumnVocabulary {
    fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut categories = values.into_iter().collect::<Vec<_>>();
        categories.sort_unstable();
        categories.dedup();
        Self { categories }
    }

    /// Position of `value` within the column's block
    #[must_use]
    pub fn index_of(&self, value: u64) -> Option<usize> {
        self.categories.binary_search(&value).ok()
    }

    #[must_use]
    pub fn categories(&self) -> &[u64] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One-hot encoder for integer id columns
///
/// Each input column becomes a block of indicator columns, one per category
/// seen during [`fit`](Self::fit). Blocks are laid out in input column order.
/// Categories unseen at fit time encode to an all-zero block, so test rows
/// for unknown ids still line up with the fitted weights.
///
/// # Examples
///
/// ```
/// use chgk_dataset::matrix::FeatureMatrix;
/// use chgk_encoding::OneHotEncoder;
///
/// let train = FeatureMatrix::from_rows(&[[10, 0], [11, 0], [10, 1]]);
/// let encoder = OneHotEncoder::fit(&train);
/// assert_eq!(encoder.n_features(), 4);
///
/// let x = encoder.transform(&FeatureMatrix::from_rows(&[[11, 1], [12, 0]]))?;
/// assert_eq!(x.row(0).0, &[1, 3]);
/// assert_eq!(x.row(1).0, &[2]);
/// # Ok::<(), chgk_encoding::EncodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OneHotEncoder {
    columns: Vec<ColumnVocabulary>,
}

impl OneHotEncoder {
    #[must_use]
    pub fn fit(features: &FeatureMatrix) -> Self {
        let columns = (0..features.n_cols())
            .map(|j| ColumnVocabulary::fit(features.column(j)))
            .collect::<Vec<_>>();
        log::debug!(
            "one-hot encoder fitted on {} rows: {:?} categories per column",
            features.n_rows(),
            columns.iter().map(ColumnVocabulary::len).collect::<Vec<_>>()
        );
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnVocabulary] {
        &self.columns
    }

    /// Total number of encoded columns
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.columns.iter().map(ColumnVocabulary::len).sum()
    }

    /// Start of each input column's block in the encoded space
    fn offsets(&self) -> Vec<usize> {
        self.columns
            .iter()
            .scan(0, |next, column| {
                let offset = *next;
                *next += column.len();
                Some(offset)
            })
            .collect()
    }

    /// Encode a feature matrix
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ColumnMismatch`] if `features` does not have
    /// the column count the encoder was fitted on.
    pub fn transform(&self, features: &FeatureMatrix) -> Result<CsrMatrix, EncodeError> {
        if features.n_cols() != self.columns.len() {
            return Err(EncodeError::ColumnMismatch {
                expected: self.columns.len(),
                found: features.n_cols(),
            });
        }
        let offsets = self.offsets();
        let mut matrix = CsrMatrix::with_capacity(
            self.n_features(),
            features.n_rows(),
            features.as_slice().len(),
        );
        for row in features.rows() {
            matrix.push_row(
                row.iter()
                    .zip(&self.columns)
                    .zip(&offsets)
                    .filter_map(|((&value, column), &offset)| {
                        column.index_of(value).map(|i| (offset + i, 1.0))
                    }),
            );
        }
        Ok(matrix)
    }

    /// Names of the encoded columns, `{prefix}_{category}`
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::ColumnMismatch`] unless there is one prefix per
    /// input column.
    pub fn feature_names(&self, prefixes: &[&str]) -> Result<Vec<String>, EncodeError> {
        if prefixes.len() != self.columns.len() {
            return Err(EncodeError::ColumnMismatch {
                expected: self.columns.len(),
                found: prefixes.len(),
            });
        }
        Ok(self
            .columns
            .iter()
            .zip(prefixes)
            .flat_map(|(column, prefix)| {
                column
                    .categories
                    .iter()
                    .map(move |category| format!("{prefix}_{category}"))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chgk_dataset::{
        config::DatasetConfig,
        dataset::TrainDatasetBuilder,
        normalize::{TeamOutcome, TourData},
    };

    use super::*;

    #[test]
    fn test_blocks_follow_column_order() {
        let x = FeatureMatrix::from_rows(&[[5, 100], [3, 101], [5, 102]]);
        let encoder = OneHotEncoder::fit(&x);
        assert_eq!(encoder.columns()[0].categories(), &[3, 5]);
        assert_eq!(encoder.n_features(), 5);

        let encoded = encoder.transform(&x).unwrap();
        assert_eq!(encoded.shape(), (3, 5));
        assert_eq!(encoded.nnz(), 6);
        assert_eq!(encoded.row(0), (&[1, 2][..], &[1.0, 1.0][..]));
        assert_eq!(encoded.row(1).0, &[0, 3]);
        assert_eq!(encoded.row(2).0, &[1, 4]);
    }

    #[test]
    fn test_unknown_categories_are_ignored() {
        let encoder = OneHotEncoder::fit(&FeatureMatrix::from_rows(&[[1, 7]]));
        let encoded = encoder
            .transform(&FeatureMatrix::from_rows(&[[2, 7], [1, 8], [2, 8]]))
            .unwrap();
        assert_eq!(encoded.row(0).0, &[1]);
        assert_eq!(encoded.row(1).0, &[0]);
        assert!(encoded.row(2).0.is_empty());
    }

    #[test]
    fn test_column_mismatch() {
        let encoder = OneHotEncoder::fit(&FeatureMatrix::from_rows(&[[1, 7]]));
        let err = encoder
            .transform(&FeatureMatrix::from_rows(&[[1, 7, 9]]))
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::ColumnMismatch {
                expected: 2,
                found: 3
            }
        ));
        assert!(encoder.feature_names(&["player"]).is_err());
    }

    #[test]
    fn test_feature_names() {
        let encoder = OneHotEncoder::fit(&FeatureMatrix::from_rows(&[[9, 0], [4, 1]]));
        assert_eq!(
            encoder.feature_names(&["player", "question"]).unwrap(),
            vec!["player_4", "player_9", "question_0", "question_1"]
        );
    }

    #[test]
    fn test_empty_matrix() {
        let empty = FeatureMatrix::empty(2);
        let encoder = OneHotEncoder::fit(&empty);
        assert_eq!(encoder.n_features(), 0);
        assert_eq!(encoder.transform(&empty).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_encodes_train_dataset() {
        let tours = vec![TourData {
            tournament_id: 1,
            total_questions: 2,
            outcomes: vec![TeamOutcome::new(vec![30, 20], Some("1?0".into()))],
        }];
        let train = TrainDatasetBuilder::new(DatasetConfig::default())
            .build(&tours)
            .unwrap();
        let encoder = OneHotEncoder::fit(train.batch.features());
        let x = encoder.transform(train.batch.features()).unwrap();
        assert_eq!(x.shape(), (4, 4));
        // players 20, 30 then questions 0, 1
        assert_eq!(x.row(0).0, &[1, 2]);
        assert_eq!(x.row(3).0, &[0, 3]);

        let scores = x.mul_vec(&[0.5, 1.0, 0.0, -1.0]);
        assert_eq!(scores, vec![1.0, 0.0, 0.5, -0.5]);
    }

    #[test]
    fn test_serde_keeps_vocabulary() {
        let encoder = OneHotEncoder::fit(&FeatureMatrix::from_rows(&[[3, 1], [2, 1]]));
        let json = serde_json::to_string(&encoder).unwrap();
        let restored: OneHotEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, encoder);
    }
}
