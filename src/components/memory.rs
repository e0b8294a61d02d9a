use gdal::errors::GdalError;
use num::NumCast;

use crate::{
    components::{
        dataset::{ColorRole, RasterDataset},
        transforms::GeoTransform,
        DataType, Metadata, SampleType,
    },
    errors::BackendResult,
};

#[derive(Debug, Clone)]
pub struct MemoryBand {
    pub sample_type: SampleType,
    pub role: ColorRole,
    /// Row-major samples, width * height.
    pub samples: Vec<f64>,
}

/// Raster dataset held in memory.
///
/// Samples are stored as `f64` and cast to the requested type on read.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    width: usize,
    height: usize,
    bands: Vec<MemoryBand>,
    projection: Option<String>,
    geo_transform: Option<GeoTransform>,
    metadata: Metadata,
}

impl MemoryDataset {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_band(mut self, sample_type: SampleType, role: ColorRole, samples: Vec<f64>) -> Self {
        self.bands.push(MemoryBand {
            sample_type,
            role,
            samples,
        });
        self
    }

    /// Band where every sample is `value`.
    pub fn with_filled_band(self, sample_type: SampleType, role: ColorRole, value: f64) -> Self {
        let samples = vec![value; self.width * self.height];
        self.with_band(sample_type, role, samples)
    }

    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    pub fn with_geo_transform(mut self, transform: [f64; 6]) -> Self {
        self.geo_transform = Some(GeoTransform::from(transform));
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    fn band(&self, band: usize) -> BackendResult<&MemoryBand> {
        band.checked_sub(1)
            .and_then(|index| self.bands.get(index))
            .ok_or_else(|| GdalError::BadArgument(format!("band {band} out of range")))
    }
}

impl RasterDataset for MemoryDataset {
    fn raster_shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    fn band_count(&self) -> usize {
        self.bands.len()
    }
    fn band_type(&self, band: usize) -> BackendResult<SampleType> {
        Ok(self.band(band)?.sample_type.clone())
    }
    fn color_role(&self, band: usize) -> BackendResult<ColorRole> {
        Ok(self.band(band)?.role.clone())
    }
    fn read_band_into<T: DataType>(&self, band: usize, slice: &mut [T]) -> BackendResult<()> {
        let samples = &self.band(band)?.samples;
        if samples.len() != slice.len() {
            return Err(GdalError::BadArgument(format!(
                "band {band} holds {} samples, {} requested",
                samples.len(),
                slice.len()
            )));
        }
        for (target, sample) in slice.iter_mut().zip(samples) {
            *target = <T as NumCast>::from(*sample).ok_or_else(|| {
                GdalError::BadArgument(format!("{sample} does not fit {}", T::sample_type()))
            })?;
        }
        Ok(())
    }
    fn projection_ref(&self) -> Option<String> {
        self.projection.clone().filter(|projection| !projection.is_empty())
    }
    fn geo_transform_coefficients(&self) -> Option<GeoTransform> {
        self.geo_transform
    }
    fn metadata_entries(&self) -> Metadata {
        self.metadata.clone()
    }
}
