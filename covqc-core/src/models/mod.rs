pub mod depth;
pub mod depth_table;
pub mod interval;
pub mod region;
pub mod region_set;

// re-export for cleaner imports
pub use self::depth::DepthObservation;
pub use self::depth_table::DepthTable;
pub use self::interval::Interval;
pub use self::region::Region;
pub use self::region_set::RegionSet;
pub use crate::parse::{HeaderMode, ReadOptions};
