use std::ops::Range;

use crate::error::{GbdtError, Result};


/// Partition of the rows of a dataset into contiguous query groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryGroups {
    // `bounds[g]..bounds[g + 1]` are the rows of the `g`-th group.
    bounds: Vec<usize>,
}


impl QueryGroups {
    /// Construct the groups from their sizes.
    /// The sizes must sum to `n_rows`.
    /// A group of size `0` is allowed, zero groups are not.
    pub fn from_sizes(sizes: &[usize], n_rows: usize) -> Result<Self> {
        if sizes.is_empty() {
            return Err(GbdtError::dataset("no query groups are given"));
        }

        let mut bounds = Vec::with_capacity(sizes.len() + 1);
        bounds.push(0);
        let mut total = 0_usize;
        for &size in sizes {
            total += size;
            bounds.push(total);
        }

        if total != n_rows {
            return Err(GbdtError::dataset(format!(
                "query groups cover {total} rows, but the dataset has {n_rows}"
            )));
        }
        Ok(Self { bounds })
    }


    /// Number of groups.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }


    /// Always `false`, a `QueryGroups` holds at least one group.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Number of rows covered by the groups.
    pub fn n_rows(&self) -> usize {
        self.bounds[self.bounds.len() - 1]
    }


    /// The rows of every group, in order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.bounds.windows(2).map(|w| w[0]..w[1])
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_contiguous() {
        let groups = QueryGroups::from_sizes(&[2, 0, 3], 5).unwrap();
        let ranges = groups.iter().collect::<Vec<_>>();
        assert_eq!(ranges, vec![0..2, 2..2, 2..5]);
        assert_eq!(groups.len(), 3);
    }


    #[test]
    fn sizes_must_cover_the_rows() {
        assert!(QueryGroups::from_sizes(&[2, 2], 5).is_err());
        assert!(QueryGroups::from_sizes(&[], 0).is_err());
    }
}
