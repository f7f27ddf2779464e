use gdal::errors::GdalError;
use std::path::PathBuf;
use thiserror::Error;

pub type SridResult<T> = Result<T, SridError>;

/// Failures while inferring the UTM SRID of a dataset. None of them has a
/// fallback projection; the caller is expected to abort the step.
#[derive(Error, Debug)]
pub enum SridError {
    #[error("could not open {}", path.display())]
    DatasetNotFound {
        path: PathBuf,
        #[source]
        source: GdalError,
    },

    #[error("this file is already projected: extent value {value} is outside [-180, 180]")]
    AlreadyProjected { value: f64 },

    #[error("this file is {width:.3} degrees wide, too wide for a single UTM zone")]
    ExtentTooWide { width: f64 },

    #[error(transparent)]
    Gdal(#[from] GdalError),
}
