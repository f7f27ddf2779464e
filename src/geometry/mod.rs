pub mod extent;
pub mod utm;

pub use extent::get_bbox;
pub use utm::{check_latlng, check_width, compose_srid, get_srid, srid_for_extent, utm_zone};
