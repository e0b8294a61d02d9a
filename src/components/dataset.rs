use std::{fmt::Debug, path::Path};

use gdal::raster::ColorInterpretation;
use serde::{Deserialize, Serialize};

use crate::{
    components::{transforms::GeoTransform, DataType, Metadata, SampleType},
    errors::BackendResult,
};

/// Declared semantic channel of a raster band.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    Undefined,
    Gray,
    Palette,
    Red,
    Green,
    Blue,
    Alpha,
    /// Any other role the backend knows about, by backend name.
    Other(String),
}

impl ColorRole {
    pub fn is_defined(&self) -> bool {
        !matches!(self, ColorRole::Undefined)
    }
}

impl From<ColorInterpretation> for ColorRole {
    fn from(value: ColorInterpretation) -> Self {
        match value {
            ColorInterpretation::Undefined => ColorRole::Undefined,
            ColorInterpretation::GrayIndex => ColorRole::Gray,
            ColorInterpretation::PaletteIndex => ColorRole::Palette,
            ColorInterpretation::RedBand => ColorRole::Red,
            ColorInterpretation::GreenBand => ColorRole::Green,
            ColorInterpretation::BlueBand => ColorRole::Blue,
            ColorInterpretation::AlphaBand => ColorRole::Alpha,
            other => ColorRole::Other(other.name()),
        }
    }
}

/// Opened raster source.
///
/// Band indexes are 1-based, as in GDAL.
pub trait RasterDataset: Debug {
    /// (width, height) shared by every band.
    fn raster_shape(&self) -> (usize, usize);
    fn band_count(&self) -> usize;
    fn band_type(&self, band: usize) -> BackendResult<SampleType>;
    fn color_role(&self, band: usize) -> BackendResult<ColorRole>;
    /// Read the whole band row-major into `slice` (width * height samples).
    fn read_band_into<T: DataType>(&self, band: usize, slice: &mut [T]) -> BackendResult<()>;
    /// Projection reference, `None` when the source has none.
    fn projection_ref(&self) -> Option<String>;
    /// Affine geotransform, `None` when the backend does not report one.
    fn geo_transform_coefficients(&self) -> Option<GeoTransform>;
    /// Key/value metadata of the default domain.
    fn metadata_entries(&self) -> Metadata;
}

/// Raster dataset that can be opened from a path.
pub trait OpenDataset: RasterDataset + Send + Sized {
    /// Make the backend drivers available. Called before every open, must be idempotent.
    fn register_drivers() {}
    fn open(path: &Path) -> BackendResult<Self>;
}
