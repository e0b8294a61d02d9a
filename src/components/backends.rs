use std::path::Path;

use crate::{
    components::{
        dataset::{ColorRole, OpenDataset, RasterDataset},
        transforms::GeoTransform,
        DataType, Metadata, SampleType,
    },
    errors::BackendResult,
};

/// Implementations for gdal
pub mod gdal_backend {
    use super::*;
    use gdal::{
        Dataset as GdalDataset, DatasetOptions, DriverManager, GdalOpenFlags,
        Metadata as GdalMetadata, MetadataEntry as GdalMetadataEntry,
    };
    use log::debug;
    use std::sync::Once;

    static REGISTER_DRIVERS: Once = Once::new();

    /// Register every GDAL driver, once per process.
    ///
    /// Drivers stay registered until GDAL tears itself down at process exit.
    pub fn init_gdal() {
        REGISTER_DRIVERS.call_once(|| {
            DriverManager::register_all();
            debug!("registered {} gdal drivers", DriverManager::count());
        });
    }

    fn filter_metadata_gdal(metadata: &impl GdalMetadata) -> Metadata {
        GdalMetadata::metadata(metadata)
            .filter_map(|GdalMetadataEntry { domain, key, value }| {
                if domain.eq("") {
                    Some((key, value))
                } else {
                    None
                }
            })
            .collect()
    }

    impl RasterDataset for GdalDataset {
        fn raster_shape(&self) -> (usize, usize) {
            self.raster_size()
        }
        fn band_count(&self) -> usize {
            self.raster_count()
        }
        fn band_type(&self, band: usize) -> BackendResult<SampleType> {
            Ok(SampleType::from(self.rasterband(band)?.band_type()))
        }
        fn color_role(&self, band: usize) -> BackendResult<ColorRole> {
            Ok(ColorRole::from(self.rasterband(band)?.color_interpretation()))
        }
        fn read_band_into<T: DataType>(&self, band: usize, slice: &mut [T]) -> BackendResult<()> {
            let shape = self.raster_size();
            self.rasterband(band)?
                .read_into_slice::<T>((0, 0), shape, shape, slice, None)
        }
        fn projection_ref(&self) -> Option<String> {
            Some(self.projection()).filter(|projection| !projection.is_empty())
        }
        fn geo_transform_coefficients(&self) -> Option<GeoTransform> {
            self.geo_transform().ok().map(GeoTransform::from)
        }
        fn metadata_entries(&self) -> Metadata {
            filter_metadata_gdal(self)
        }
    }

    impl OpenDataset for GdalDataset {
        fn register_drivers() {
            init_gdal()
        }
        fn open(path: &Path) -> BackendResult<Self> {
            let options = DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_READONLY | GdalOpenFlags::GDAL_OF_RASTER,
                ..Default::default()
            };
            GdalDataset::open_ex(path, options)
        }
    }
}
