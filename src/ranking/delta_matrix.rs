/// Symmetric matrix with a zero diagonal,
/// stored as its packed strict upper triangle.
///
/// `delta[i, j]` is the NDCG change of swapping the results
/// at ranks `i` and `j` of one query group.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaMatrix {
    size: usize,
    values: Vec<f64>,
}


impl DeltaMatrix {
    /// A `size x size` matrix of zeros.
    pub fn zeros(size: usize) -> Self {
        let len = size * size.saturating_sub(1) / 2;
        Self { size, values: vec![0.0; len] }
    }


    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }


    // Position of `(i, j)`, `i < j`, in the packed storage.
    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.size);
        i * (2 * self.size - i - 1) / 2 + (j - i - 1)
    }


    /// Returns `delta[i, j]`.
    /// The diagonal is always `0`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.values[self.offset(i, j)],
            std::cmp::Ordering::Greater => self.values[self.offset(j, i)],
        }
    }


    /// Set `delta[i, j] = delta[j, i] = value` for `i != j`.
    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j {
            return;
        }
        let offset = self.offset(i, j);
        self.values[offset] = value;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_symmetric() {
        let mut delta = DeltaMatrix::zeros(4);
        delta.set(1, 3, 0.5);
        delta.set(2, 0, 0.25);
        assert_eq!(delta.at(3, 1), 0.5);
        assert_eq!(delta.at(1, 3), 0.5);
        assert_eq!(delta.at(0, 2), 0.25);
        assert_eq!(delta.at(2, 2), 0.0);
        assert_eq!(delta.at(0, 3), 0.0);
    }


    #[test]
    fn every_pair_has_its_own_slot() {
        let n = 5;
        let mut delta = DeltaMatrix::zeros(n);
        for i in 0..n {
            for j in (i + 1)..n {
                delta.set(i, j, (10 * i + j) as f64);
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                assert_eq!(delta.at(j, i), (10 * i + j) as f64);
            }
        }
    }
}
