//! Fixed-length, range-checked sequence.
//!
//! `FixedSeq` stores exactly `N` elements inline. Every read is checked
//! against `0..N`: [`FixedSeq::get`] reports a miss as `None`,
//! [`FixedSeq::at`] as a [`CaseError::BoundsViolation`], and indexing with
//! `seq[i]` panics. None of them ever fall back to a default value.

use crate::error::CaseError;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSeq<T, const N: usize> {
    items: [T; N],
}

impl<T, const N: usize> FixedSeq<T, N> {
    pub fn new(items: [T; N]) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        N
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Checked read that reports the attempted index and the length on a miss.
    pub fn at(&self, index: usize) -> Result<&T, CaseError> {
        self.items
            .get(index)
            .ok_or(CaseError::BoundsViolation { index, len: N })
    }
}

impl<T: Clone, const N: usize> TryFrom<&[T]> for FixedSeq<T, N> {
    type Error = CaseError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        let items: [T; N] = values
            .to_vec()
            .try_into()
            .map_err(|v: Vec<T>| CaseError::InvalidSequence {
                expected: N,
                actual: v.len(),
            })?;
        Ok(Self::new(items))
    }
}

impl<T, const N: usize> Index<usize> for FixedSeq<T, N> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(item) => item,
            Err(e) => panic!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case_seq() -> FixedSeq<i64, 3> {
        FixedSeq::new([1, 2, 3])
    }

    #[test]
    fn test_in_bounds_reads() {
        let seq = case_seq();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[0], 1);
        assert_eq!(seq[1], 2);
        assert_eq!(seq[2], 3);
        assert_eq!(seq.at(2).unwrap(), &3);
        assert_eq!(seq.get(1), Some(&2));
    }

    #[test]
    fn test_out_of_bounds_checked() {
        let seq = case_seq();
        assert_eq!(seq.get(5), None);
        assert_eq!(seq.get(3), None);

        let err = seq.at(5).unwrap_err();
        assert_eq!(err.bounds(), Some((5, 3)));
    }

    #[test]
    #[should_panic(expected = "index out of range [5] with length 3")]
    fn test_out_of_bounds_index_panics() {
        let seq = case_seq();
        let _ = seq[5];
    }

    #[test]
    #[should_panic(expected = "index out of range [3] with length 3")]
    fn test_first_position_past_end_panics() {
        let seq = case_seq();
        let _ = seq[3];
    }

    #[test]
    fn test_try_from_slice() {
        let seq: FixedSeq<i64, 3> = FixedSeq::try_from(&[4, 5, 6][..]).unwrap();
        assert_eq!(seq.as_slice(), &[4, 5, 6]);

        let err = FixedSeq::<i64, 3>::try_from(&[1, 2][..]).unwrap_err();
        assert!(matches!(
            err,
            CaseError::InvalidSequence {
                expected: 3,
                actual: 2
            }
        ));
    }
}
