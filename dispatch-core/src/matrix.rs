//! Travel-time matrix augmented with the synthetic terminal node.

use crate::InvalidInputError;

/// Square travel-time matrix with one extra terminal node.
///
/// The caller's `L x L` matrix is extended to `(L+1) x (L+1)` by appending a
/// zero column to every row and a zero row at the bottom. Node `L` is the
/// terminal every vehicle ends at, so no vehicle is forced back to its
/// start.
///
/// # Examples
/// ```
/// use dispatch_core::TimeMatrix;
///
/// let matrix = TimeMatrix::build(&[vec![0, 4], vec![6, 0]])?;
/// assert_eq!(matrix.size(), 3);
/// assert_eq!(matrix.cost(1, 0), Some(6));
/// assert_eq!(matrix.cost(1, 2), Some(0));
/// assert_eq!(matrix.cost(2, 0), Some(0));
/// # Ok::<(), dispatch_core::InvalidInputError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMatrix {
    rows: Vec<Vec<u64>>,
}

impl TimeMatrix {
    /// Validate `raw` and append the terminal node.
    ///
    /// # Errors
    /// [`InvalidInputError::EmptyMatrix`] when `raw` has no rows and
    /// [`InvalidInputError::NonSquareMatrix`] for the first row whose length
    /// differs from the row count.
    pub fn build(raw: &[Vec<u64>]) -> Result<Self, InvalidInputError> {
        let locations = raw.len();
        if locations == 0 {
            return Err(InvalidInputError::EmptyMatrix);
        }
        if let Some((row, cells)) = raw
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != locations)
        {
            return Err(InvalidInputError::NonSquareMatrix {
                row,
                len: cells.len(),
                expected: locations,
            });
        }

        let mut rows: Vec<Vec<u64>> = raw
            .iter()
            .map(|cells| {
                let mut row = Vec::with_capacity(locations + 1);
                row.extend_from_slice(cells);
                row.push(0);
                row
            })
            .collect();
        rows.push(vec![0; locations + 1]);
        Ok(Self { rows })
    }

    /// Number of nodes including the terminal node.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of real locations in the caller's matrix.
    #[must_use]
    pub const fn location_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Index of the synthetic terminal node.
    #[must_use]
    pub const fn terminal(&self) -> usize {
        self.location_count()
    }

    /// Travel time from node `from` to node `to`, `None` when out of range.
    #[must_use]
    pub fn cost(&self, from: usize, to: usize) -> Option<u64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }
}
