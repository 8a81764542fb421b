//! The labelled edge table produced by a fitted dataset.

/// One labelled node pair in a target edge table.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeRecord {
    /// Source endpoint.
    pub src: usize,
    /// Target endpoint.
    pub trg: usize,
    /// `true` for held-out positives, `false` for sampled negatives.
    pub is_positive: bool,
}

/// Labelled positives and negatives, positives first.
///
/// # Examples
/// ```
/// use linkprep_core::TargetEdgeTable;
///
/// let table = TargetEdgeTable::from_parts(&[(0, 1)], &[(0, 2), (1, 3)]);
/// assert_eq!(table.positive_count(), 1);
/// assert_eq!(table.negative_count(), 2);
/// assert!(table.records()[0].is_positive);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetEdgeTable {
    records: Vec<EdgeRecord>,
    positive_count: usize,
}

impl TargetEdgeTable {
    /// Builds a table from positive and negative pair lists, preserving the
    /// order of each.
    #[must_use]
    pub fn from_parts(positives: &[(usize, usize)], negatives: &[(usize, usize)]) -> Self {
        let mut records = Vec::with_capacity(positives.len() + negatives.len());
        records.extend(positives.iter().map(|&(src, trg)| EdgeRecord {
            src,
            trg,
            is_positive: true,
        }));
        records.extend(negatives.iter().map(|&(src, trg)| EdgeRecord {
            src,
            trg,
            is_positive: false,
        }));
        Self {
            records,
            positive_count: positives.len(),
        }
    }

    /// Returns the labelled records, positives before negatives.
    #[rustfmt::skip]
    #[must_use]
    pub fn records(&self) -> &[EdgeRecord] { &self.records }

    /// Returns the number of positive records.
    #[rustfmt::skip]
    #[must_use]
    pub fn positive_count(&self) -> usize { self.positive_count }

    /// Returns the number of negative records.
    #[rustfmt::skip]
    #[must_use]
    pub fn negative_count(&self) -> usize { self.records.len() - self.positive_count }

    /// Returns the total number of records.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.records.len() }

    /// Returns `true` when the table holds no records.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
