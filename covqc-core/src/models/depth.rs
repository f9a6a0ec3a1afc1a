use std::fmt::{self, Display};

///
/// One per-base depth record: the number of reads covering `position` on
/// `chromosome`. Positions are 1-based.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct DepthObservation {
    pub chromosome: String,
    pub position: u32,
    pub depth: u32,
}

impl DepthObservation {
    pub fn new(chromosome: impl Into<String>, position: u32, depth: u32) -> Self {
        DepthObservation {
            chromosome: chromosome.into(),
            position,
            depth,
        }
    }

    ///
    /// Get the record as a `samtools depth` style line
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}", self.chromosome, self.position, self.depth)
    }
}

impl Display for DepthObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
