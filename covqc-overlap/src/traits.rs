use num_traits::{PrimInt, Unsigned, identities::one};

pub use covqc_core::models::Interval;

/// A queryable collection of half-open intervals.
pub trait Overlapper<I, T>: Send + Sync
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized;

    /// All intervals overlapping `[start, end)`.
    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>>;

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a>;

    /// All intervals containing a single point.
    fn find_point_iter<'a>(&'a self, point: I) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        self.find_iter(point, point.saturating_add(one::<I>()))
    }
}
