use crate::error::{SridError, SridResult};
use crate::geometry::extent::get_bbox;
use crate::models::{BoundingBox, Hemisphere, Srid, UtmZone};
use log::debug;
use std::path::Path;

/// Widest extent, in degrees of longitude, accepted for a single UTM zone.
pub const MAX_WIDTH_DEGREES: f64 = 4.0;

/// Fails if any extent value lies outside [-180, 180], which means the
/// coordinates are not longitude/latitude.
pub fn check_latlng(bbox: &BoundingBox) -> SridResult<()> {
    match bbox
        .values()
        .into_iter()
        .find(|v| !(-180.0..=180.0).contains(v))
    {
        Some(value) => Err(SridError::AlreadyProjected { value }),
        None => Ok(()),
    }
}

/// Fails if the extent spans more than [`MAX_WIDTH_DEGREES`] of longitude.
pub fn check_width(bbox: &BoundingBox) -> SridResult<()> {
    let width = bbox.width();
    if width > MAX_WIDTH_DEGREES {
        return Err(SridError::ExtentTooWide { width });
    }
    Ok(())
}

/// UTM zone containing a WGS84 longitude.
///
/// Zones are 6° wide and numbered from 1 at 180°W, so -180 < lon <= -174 is
/// zone 1 and 174 < lon <= 180 is zone 60. The ceiling formula gives 0 for
/// exactly -180; that meridian is the western edge of zone 1, so it is clamped.
pub fn utm_zone(longitude: f64) -> UtmZone {
    let zone = ((longitude + 180.0) / 6.0).ceil() as i64;
    UtmZone::clamped(zone)
}

/// SRID string for a zone and the extent's average latitude.
pub fn compose_srid(zone: UtmZone, avg_latitude: f64) -> Srid {
    Srid::new(zone, Hemisphere::from_latitude(avg_latitude))
}

/// Every inference step after the extent has been read.
pub fn srid_for_extent(bbox: &BoundingBox) -> SridResult<Srid> {
    check_latlng(bbox)?;
    check_width(bbox)?;

    let avg_longitude = bbox.midpoint_longitude();
    let zone = utm_zone(avg_longitude);
    let avg_latitude = bbox.midpoint_latitude();
    let srid = compose_srid(zone, avg_latitude);

    debug!(
        "extent {:?} -> lon {:.4} zone {} lat {:.4} -> SRID {}",
        bbox.values(),
        avg_longitude,
        zone,
        avg_latitude,
        srid
    );
    Ok(srid)
}

/// Infer the UTM SRID to reproject a vector dataset into.
pub fn get_srid<P: AsRef<Path>>(path: P) -> SridResult<Srid> {
    let bbox = get_bbox(path)?;
    srid_for_extent(&bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_random_longitudes_follow_ceiling_formula() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10_000 {
            let lon: f64 = rng.random_range(-180.0..180.0);
            let expected = ((lon + 180.0) / 6.0).ceil();
            let zone = utm_zone(lon).number();
            if lon == -180.0 {
                assert_eq!(zone, 1);
            } else {
                assert_eq!(zone as f64, expected, "lon={}", lon);
            }
            assert!((1..=60).contains(&zone));
        }
    }

    #[test]
    fn test_zone_edges() {
        assert_eq!(utm_zone(-180.0).number(), 1);
        assert_eq!(utm_zone(-179.9).number(), 1);
        assert_eq!(utm_zone(-174.0).number(), 1);
        assert_eq!(utm_zone(-173.9).number(), 2);
        assert_eq!(utm_zone(0.0).number(), 30);
        assert_eq!(utm_zone(0.1).number(), 31);
        assert_eq!(utm_zone(180.0).number(), 60);
    }

    #[test]
    fn test_valid_boxes_pass_validation() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let min_x: f64 = rng.random_range(-180.0..176.0);
            let width: f64 = rng.random_range(0.0..3.99);
            let min_y: f64 = rng.random_range(-90.0..80.0);
            let height: f64 = rng.random_range(0.0..10.0);
            let bbox = BoundingBox::from([min_x, min_x + width, min_y, min_y + height]);

            assert!(check_latlng(&bbox).is_ok(), "{:?}", bbox);
            assert!(check_width(&bbox).is_ok(), "{:?}", bbox);
        }
    }

    #[test]
    fn test_out_of_range_is_already_projected() {
        let bbox = BoundingBox::from([-181.0, 10.0, 0.0, 10.0]);
        match check_latlng(&bbox) {
            Err(SridError::AlreadyProjected { value }) => assert_eq!(value, -181.0),
            other => panic!("expected AlreadyProjected, got {:?}", other),
        }
    }

    #[test]
    fn test_metric_extent_is_already_projected() {
        let bbox = BoundingBox::from([456_000.0, 500_000.0, 4_317_000.0, 4_373_000.0]);
        assert!(matches!(
            srid_for_extent(&bbox),
            Err(SridError::AlreadyProjected { .. })
        ));
    }

    #[test]
    fn test_twenty_degrees_is_too_wide() {
        let bbox = BoundingBox::from([-10.0, 10.0, 0.0, 10.0]);
        assert!(check_latlng(&bbox).is_ok());
        match check_width(&bbox) {
            Err(SridError::ExtentTooWide { width }) => assert_eq!(width, 20.0),
            other => panic!("expected ExtentTooWide, got {:?}", other),
        }
    }

    #[test]
    fn test_width_limit_is_inclusive() {
        let exact = BoundingBox::from([-100.0, -96.0, 30.0, 31.0]);
        assert_eq!(exact.width(), MAX_WIDTH_DEGREES);
        assert!(check_width(&exact).is_ok());
        assert_eq!(srid_for_extent(&exact).unwrap().to_string(), "32614");

        let over = BoundingBox::from([-100.0, -95.9999999, 30.0, 31.0]);
        match check_width(&over) {
            Err(SridError::ExtentTooWide { width }) => assert!(width > MAX_WIDTH_DEGREES),
            other => panic!("expected ExtentTooWide, got {:?}", other),
        }
    }

    #[test]
    fn test_longitude_range_is_inclusive() {
        let west = BoundingBox::from([-180.0, -178.0, -90.0, 90.0]);
        let east = BoundingBox::from([178.0, 180.0, -90.0, 90.0]);
        assert!(check_latlng(&west).is_ok());
        assert!(check_latlng(&east).is_ok());
        assert_eq!(srid_for_extent(&east).unwrap().zone.number(), 60);

        let beyond = BoundingBox::from([178.0, 180.0000001, 0.0, 1.0]);
        match check_latlng(&beyond) {
            Err(SridError::AlreadyProjected { value }) => assert_eq!(value, 180.0000001),
            other => panic!("expected AlreadyProjected, got {:?}", other),
        }
        let below = BoundingBox::from([-180.0000001, -178.0, 0.0, 1.0]);
        assert!(matches!(
            check_latlng(&below),
            Err(SridError::AlreadyProjected { .. })
        ));
    }

    #[test]
    fn test_range_check_runs_before_width_check() {
        // Both wide and out of range: the range error wins.
        let bbox = BoundingBox::from([-200.0, 10.0, 0.0, 10.0]);
        assert!(matches!(
            srid_for_extent(&bbox),
            Err(SridError::AlreadyProjected { .. })
        ));
    }

    #[test]
    fn test_compose_srid_hemispheres() {
        let zone = UtmZone::new(14).unwrap();
        assert_eq!(compose_srid(zone, 40.0).to_string(), "32614");
        assert_eq!(compose_srid(zone, -5.0).to_string(), "32714");
    }

    #[test]
    fn test_colorado_extent() {
        let bbox = BoundingBox::from([-105.5, -105.0, 39.0, 39.5]);
        let srid = srid_for_extent(&bbox).unwrap();
        // ceil((-105.25 + 180) / 6) = ceil(12.458) = 13
        assert_eq!(srid.zone.number(), 13);
        assert_eq!(srid.hemisphere, Hemisphere::North);
        assert_eq!(srid.to_string(), "32613");
    }

    #[test]
    fn test_southern_extent() {
        // Around Valparaíso, Chile.
        let bbox = BoundingBox::from([-71.7, -71.5, -33.1, -33.0]);
        assert_eq!(srid_for_extent(&bbox).unwrap().to_string(), "32719");
    }

    #[test]
    fn test_valencia_extent() {
        let bbox = BoundingBox::from([-0.43, -0.27, 39.42, 39.51]);
        assert_eq!(srid_for_extent(&bbox).unwrap().to_string(), "32630");
    }
}
