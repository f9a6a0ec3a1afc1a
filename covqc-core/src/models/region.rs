use std::fmt::{self, Display};

use crate::models::Interval;

///
/// Region struct, a labeled genomic span of interest.
///
/// Both `start` and `end` are inclusive: a position `p` on `chr` belongs to the
/// region when `start <= p <= end`.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub label: String,
}

impl Region {
    pub fn new(chr: impl Into<String>, start: u32, end: u32, label: impl Into<String>) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
            label: label.into(),
        }
    }

    ///
    /// Label used when a region source has no label column
    ///
    pub fn default_label(chr: &str, start: u32, end: u32) -> String {
        format!("{}:{}-{}", chr, start, end)
    }

    ///
    /// Convert to a half-open [Interval] carrying `val`.
    ///
    /// Coordinates widen to `u64` so a region ending at `u32::MAX` keeps
    /// its last position.
    ///
    pub fn to_interval<T>(&self, val: T) -> Interval<u64, T>
    where
        T: Eq + Clone + Send + Sync,
    {
        Interval {
            start: u64::from(self.start),
            end: u64::from(self.end) + 1,
            val,
        }
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chr, self.start, self.end, self.label)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(1, 10, (1, 11))]
    #[case(7, 7, (7, 8))]
    #[case(5, u32::MAX, (5, u64::from(u32::MAX) + 1))]
    fn test_to_interval_is_end_exclusive(
        #[case] start: u32,
        #[case] end: u32,
        #[case] expected: (u64, u64),
    ) {
        let iv = Region::new("chr1", start, end, "regionA").to_interval(0usize);
        assert_eq!((iv.start, iv.end), expected);
    }

    #[rstest]
    fn test_as_string() {
        let region = Region::new("chr1", 1, 10, Region::default_label("chr1", 1, 10));
        assert_eq!(region.as_string(), "chr1\t1\t10\tchr1:1-10");
    }
}
