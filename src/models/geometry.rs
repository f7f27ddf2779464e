use crate::models::srid::Srid;
use serde::Serialize;

/// Axis-aligned extent of a dataset, in the order OGR reports envelopes:
/// `(min_x, max_x, min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Builds a box from two arbitrary corners, swapping values so that
    /// `min <= max` holds on both axes.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        BoundingBox {
            min_x: x1.min(x2),
            max_x: x1.max(x2),
            min_y: y1.min(y2),
            max_y: y1.max(y2),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Horizontal midpoint, used to pick the UTM zone.
    pub fn midpoint_longitude(&self) -> f64 {
        (self.max_x - self.min_x) / 2.0 + self.min_x
    }

    /// Vertical midpoint, used to pick the hemisphere.
    pub fn midpoint_latitude(&self) -> f64 {
        (self.max_y - self.min_y) / 2.0 + self.min_y
    }

    pub fn values(&self) -> [f64; 4] {
        [self.min_x, self.max_x, self.min_y, self.max_y]
    }

    /// Project the box corners from WGS84 into the given SRID with PROJ.
    pub fn project(&self, target: &Srid) -> anyhow::Result<Self> {
        let proj = proj::Proj::new_known_crs("EPSG:4326", &target.to_epsg(), None)?;
        let (x1, y1) = proj
            .convert((self.min_x, self.min_y))
            .map_err(anyhow::Error::from)?;
        let (x2, y2) = proj
            .convert((self.max_x, self.max_y))
            .map_err(anyhow::Error::from)?;
        Ok(BoundingBox::from_corners(x1, y1, x2, y2))
    }
}

impl From<(f64, f64, f64, f64)> for BoundingBox {
    fn from(extent: (f64, f64, f64, f64)) -> Self {
        BoundingBox::from_corners(extent.0, extent.2, extent.1, extent.3)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(extent: [f64; 4]) -> Self {
        BoundingBox::from((extent[0], extent[1], extent[2], extent[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::srid::{Hemisphere, UtmZone};
    use proj::Proj;

    #[test]
    fn test_from_tuple_normalizes_order() {
        let bbox = BoundingBox::from((-105.0, -105.5, 39.5, 39.0));
        assert_eq!(bbox.min_x, -105.5);
        assert_eq!(bbox.max_x, -105.0);
        assert_eq!(bbox.min_y, 39.0);
        assert_eq!(bbox.max_y, 39.5);
    }

    #[test]
    fn test_midpoints() {
        let bbox = BoundingBox::from([-105.5, -105.0, 39.0, 39.5]);
        assert!((bbox.midpoint_longitude() - -105.25).abs() < 1e-12);
        assert!((bbox.midpoint_latitude() - 39.25).abs() < 1e-12);
        assert!((bbox.width() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_project_matches_proj() {
        let bbox = BoundingBox::from([-105.5, -105.0, 39.0, 39.5]);
        let srid = Srid::new(UtmZone::new(13).unwrap(), Hemisphere::North);
        let projected = bbox.project(&srid).unwrap();

        let reference = Proj::new_known_crs("EPSG:4326", "EPSG:32613", None).unwrap();
        let (x1, y1): (f64, f64) = reference.convert((-105.5, 39.0)).unwrap();
        let (x2, y2): (f64, f64) = reference.convert((-105.0, 39.5)).unwrap();

        assert!((projected.min_x - x1.min(x2)).abs() < 1e-6);
        assert!((projected.max_y - y1.max(y2)).abs() < 1e-6);
        // Half a degree of longitude at 39°N is a little over 40 km.
        assert!(projected.width() > 40_000.0 && projected.width() < 46_000.0);
    }
}
