pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod runner;
pub mod traits;
pub mod utils;

pub use config::Config;
pub use error::{SridError, SridResult};
pub use geometry::get_srid;
pub use models::{BoundingBox, Srid};
