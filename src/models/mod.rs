pub mod geometry;
pub mod score;
pub mod srid;
pub mod step;

pub use geometry::BoundingBox;
pub use score::{ScoreDelta, ScoreRecord};
pub use srid::{Hemisphere, Srid, UtmZone};
pub use step::Step;
