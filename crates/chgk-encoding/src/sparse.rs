/// Compressed sparse row matrix
///
/// Row `i` stores its column indices in `indices[indptr[i]..indptr[i + 1]]`
/// and the matching values at the same positions of `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f32>,
}

impl CsrMatrix {
    #[must_use]
    pub(crate) fn with_capacity(n_cols: usize, n_rows: usize, nnz: usize) -> Self {
        let mut indptr = Vec::with_capacity(n_rows + 1);
        indptr.push(0);
        Self {
            n_cols,
            indptr,
            indices: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
        }
    }

    /// Append a row; `entries` must be sorted by column
    pub(crate) fn push_row<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (usize, f32)>,
    {
        for (col, value) in entries {
            debug_assert!(col < self.n_cols);
            self.indices.push(col);
            self.values.push(value);
        }
        self.indptr.push(self.indices.len());
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    /// Number of stored entries
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Column indices and values of row `i`
    #[must_use]
    pub fn row(&self, i: usize) -> (&[usize], &[f32]) {
        let range = self.indptr[i]..self.indptr[i + 1];
        (&self.indices[range.clone()], &self.values[range])
    }

    #[must_use]
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Matrix-vector product `self · weights`
    ///
    /// This is the linear score of every row under a weight vector with one
    /// weight per encoded column.
    #[must_use]
    pub fn mul_vec(&self, weights: &[f32]) -> Vec<f32> {
        assert_eq!(weights.len(), self.n_cols, "one weight per column");
        (0..self.n_rows())
            .map(|i| {
                let (cols, values) = self.row(i);
                cols.iter().zip(values).map(|(&c, &v)| weights[c] * v).sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_and_product() {
        let mut m = CsrMatrix::with_capacity(4, 3, 4);
        m.push_row([(0, 1.0), (2, 1.0)]);
        m.push_row([]);
        m.push_row([(1, 2.0), (3, 1.0)]);

        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.indptr(), &[0, 2, 2, 4]);
        assert_eq!(m.row(1), (&[][..], &[][..]));
        assert_eq!(m.mul_vec(&[1.0, 10.0, 100.0, 1000.0]), vec![101.0, 0.0, 1020.0]);
    }
}
