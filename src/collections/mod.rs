//! Integer collections used as matrix indexers
//!
//! [`Set`], [`Tuple`] and [`Range`] hold one-based row or column numbers.
//! They are consumed read-only by [`Indexer`], which resolves any supported
//! index argument to an explicit list of one-based positions.

mod indexer;

pub use indexer::Indexer;

use crate::dtype::to_index;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Unordered collection of distinct integers
///
/// Iteration visits members in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Set {
    members: BTreeSet<i64>,
}

impl Set {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member; returns false if it was already present
    pub fn insert(&mut self, value: i64) -> bool {
        self.members.insert(value)
    }

    /// True if `value` is a member
    pub fn contains(&self, value: i64) -> bool {
        self.members.contains(&value)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the set has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.members.iter().copied()
    }

    /// Members as one-based indices
    pub fn indices(&self) -> Result<Vec<usize>> {
        self.iter().map(to_index).collect()
    }
}

impl FromIterator<i64> for Set {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[i64; N]> for Set {
    fn from(values: [i64; N]) -> Self {
        values.into_iter().collect()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '{', self.iter(), '}')
    }
}

/// Ordered sequence of integers; duplicates are kept
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple {
    values: Vec<i64>,
}

impl Tuple {
    /// Create an empty tuple
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value
    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the tuple has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    /// Values as one-based indices
    pub fn indices(&self) -> Result<Vec<usize>> {
        self.iter().map(to_index).collect()
    }
}

impl FromIterator<i64> for Tuple {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[i64; N]> for Tuple {
    fn from(values: [i64; N]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }
}

impl From<Vec<i64>> for Tuple {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, '(', self.iter(), ')')
    }
}

/// Inclusive arithmetic progression of one-based indices
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    /// First value
    pub first: i64,
    /// Last value (included when the step lands on it)
    pub last: i64,
    /// Increment between values; must be non-zero
    pub step: i64,
}

impl Range {
    /// `first..=last`, stepping by ±1 towards `last`
    pub fn new(first: i64, last: i64) -> Self {
        let step = if first <= last { 1 } else { -1 };
        Self { first, last, step }
    }

    /// `first..=last` with an explicit step
    pub fn with_step(first: i64, last: i64, step: i64) -> Self {
        Self { first, last, step }
    }

    /// Values of the progression
    pub fn values(&self) -> Result<Vec<i64>> {
        if self.step == 0 {
            return Err(Error::invalid_parameter("step", "range step must be non-zero"));
        }
        let mut out = Vec::new();
        let mut v = self.first;
        while (self.step > 0 && v <= self.last) || (self.step < 0 && v >= self.last) {
            out.push(v);
            match v.checked_add(self.step) {
                Some(next) => v = next,
                None => break,
            }
        }
        Ok(out)
    }

    /// Values as one-based indices
    pub fn indices(&self) -> Result<Vec<usize>> {
        self.values()?.into_iter().map(to_index).collect()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "{}:{}", self.first, self.last)
        } else {
            write!(f, "{}:{}:{}", self.first, self.step, self.last)
        }
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    open: char,
    values: impl Iterator<Item = i64>,
    close: char,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, v) in values.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    write!(f, "{close}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_set_is_ordered_and_distinct() {
        let s: Set = [3, 1, 3, 2].into_iter().collect();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(s.to_string(), "{1, 2, 3}");
    }

    #[test]
    fn test_tuple_keeps_order_and_duplicates() {
        let t = Tuple::from([2, 2, 1]);
        assert_eq!(t.indices().unwrap(), vec![2, 2, 1]);
        assert_eq!(t.to_string(), "(2, 2, 1)");
    }

    #[test]
    fn test_range_values() {
        assert_eq!(Range::new(1, 4).values().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(Range::new(3, 1).values().unwrap(), vec![3, 2, 1]);
        assert_eq!(Range::with_step(1, 6, 2).values().unwrap(), vec![1, 3, 5]);
        assert!(Range::with_step(1, 6, -1).values().unwrap().is_empty());
    }

    #[test]
    fn test_range_errors() {
        let err = Range::with_step(1, 3, 0).values().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameterValue);
        let err = Range::new(0, 2).indices().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
    }
}
