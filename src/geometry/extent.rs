use crate::error::{SridError, SridResult};
use crate::models::BoundingBox;
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};
use gdal::vector::LayerAccess;
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use log::{debug, warn};
use std::path::Path;

const WGS84: u32 = 4326;

fn open_read_only(path: &Path) -> SridResult<Dataset> {
    let options = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_VECTOR | GdalOpenFlags::GDAL_OF_READONLY,
        ..Default::default()
    };
    Dataset::open_ex(path, options).map_err(|source| SridError::DatasetNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Extent of the first layer of a vector dataset, in WGS84 longitude/latitude.
///
/// Layers in any other reference system have their two envelope corners
/// reprojected individually. Whether a layer is "already WGS84" is decided by
/// comparing PROJ.4 strings, which misfires on equivalent definitions written
/// differently; the extra transform is harmless in that case.
pub fn get_bbox<P: AsRef<Path>>(path: P) -> SridResult<BoundingBox> {
    let path = path.as_ref();
    let dataset = open_read_only(path)?;
    let layer = dataset.layer(0)?;
    let envelope = layer.get_extent()?;
    let extent = BoundingBox::from((envelope.MinX, envelope.MaxX, envelope.MinY, envelope.MaxY));

    let Some(mut source) = layer.spatial_ref() else {
        warn!(
            "⚠️ {} has no spatial reference, assuming longitude/latitude",
            path.display()
        );
        return Ok(extent);
    };

    let mut target = SpatialRef::from_epsg(WGS84)?;
    // Keep x as longitude on both sides, whatever the authority axis order is.
    target.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    source.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);

    let source_proj4 = source.to_proj4()?;
    if source_proj4 == target.to_proj4()? {
        debug!("{} is already WGS84: {:?}", path.display(), extent.values());
        return Ok(extent);
    }

    debug!(
        "reprojecting extent of {} from '{}' to EPSG:{}",
        path.display(),
        source_proj4.trim(),
        WGS84
    );
    let transform = CoordTransform::new(&source, &target)?;
    let mut xs = [extent.min_x, extent.max_x];
    let mut ys = [extent.min_y, extent.max_y];
    let mut zs = [0.0, 0.0];
    transform.transform_coords(&mut xs, &mut ys, &mut zs)?;

    Ok(BoundingBox::from_corners(xs[0], ys[0], xs[1], ys[1]))
}
