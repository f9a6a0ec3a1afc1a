use num_traits::{PrimInt, Unsigned, identities::zero};

use super::Overlapper;
use covqc_core::models::Interval;

/// A Binary Interval Search data structure for interval lookups on one
/// chromosome.
///
/// From the journal article: <https://academic.oup.com/bioinformatics/article/29/1/1/273289>
///
/// Intervals are kept sorted by `(start, end)`. A query binary searches for
/// the first interval that could reach the query (its start is no further
/// back than the longest interval) and scans forward until starts pass the
/// query end. The sort is stable, so intervals with identical coordinates
/// are reported in the order they were given.
///
/// # Examples
///
/// ```
/// use covqc_overlap::{Bits, Overlapper, Interval};
///
/// // inclusive target regions 1-10 and 5-20, stored end-exclusive
/// let targets = vec![
///     Interval { start: 1u32, end: 11, val: "exon1" },
///     Interval { start: 5, end: 21, val: "exon2" },
/// ];
///
/// let bits = Bits::build(targets);
///
/// let hits: Vec<&str> = bits.find_point_iter(7).map(|iv| iv.val).collect();
/// assert_eq!(hits, vec!["exon1", "exon2"]);
/// assert_eq!(bits.find_point_iter(21).count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// List of intervals, sorted by start then end
    pub intervals: Vec<Interval<I, T>>,
    /// The length of the longest interval
    max_len: I,
}

impl<I, T> Overlapper<I, T> for Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Create a new instance of Bits by passing in a vector of Intervals. This vector will
    /// immediately be sorted by start order.
    fn build(mut intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        intervals.sort();
        let max_len = intervals
            .iter()
            .map(|iv| iv.end.checked_sub(&iv.start).unwrap_or_else(zero::<I>))
            .max()
            .unwrap_or_else(zero::<I>);

        Bits { intervals, max_len }
    }

    /// Find all intervals that overlap start .. stop
    #[inline]
    fn find(&self, start: I, stop: I) -> Vec<Interval<I, T>> {
        self.iter_find(start, stop).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        stop: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        Box::new(self.iter_find(start, stop))
    }
}

impl<I, T> Bits<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Get the number of intervals in Bits
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if BITS is empty (i.e. has no intervals)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Return an iterator over the intervals in sorted order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<I, T>> {
        self.intervals.iter()
    }

    /// Concrete iterator behind [`Overlapper::find_iter`].
    #[inline]
    pub fn iter_find(&self, start: I, stop: I) -> IterFind<'_, I, T> {
        IterFind {
            inner: self,
            off: Self::lower_bound(
                start.checked_sub(&self.max_len).unwrap_or_else(zero::<I>),
                &self.intervals,
            ),
            start,
            stop,
        }
    }

    /// Determine the first index that we should start checking for overlaps for via a binary
    /// search.
    /// Assumes that the maximum interval length in `intervals` has been subtracted from
    /// `start`, otherwise the result is undefined
    #[inline]
    pub fn lower_bound(start: I, intervals: &[Interval<I, T>]) -> usize {
        let mut size = intervals.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let mid = low + half;
            let other_low = low + other_half;
            let v = &intervals[mid];
            size = half;
            low = if v.start < start { other_low } else { low }
        }
        low
    }
}

/// An iterator over intervals in a [`Bits`] structure that overlap a query range.
///
/// Created by [`Bits::iter_find`] and the [`Overlapper`] query methods.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    inner: &'a Bits<I, T>,
    off: usize,
    start: I,
    stop: I,
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    type Item = &'a Interval<I, T>;

    #[inline]
    // interval.start < stop && interval.end > start
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.overlap(self.start, self.stop) {
                return Some(interval);
            } else if interval.start >= self.stop {
                break;
            }
        }
        None
    }
}

impl<'a, I, T> IntoIterator for &'a Bits<I, T>
where
    T: Eq + Clone + Send + Sync + 'a,
    I: PrimInt + Unsigned + Send + Sync,
{
    type Item = &'a Interval<I, T>;
    type IntoIter = std::slice::Iter<'a, Interval<I, T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<I, T>> {
        self.intervals.iter()
    }
}
