use log::debug;

use crate::{
    buffer::Buffer,
    components::{
        bands::ClassifiedBand,
        dataset::RasterDataset,
        image::{allocate_buffer, PixelData},
        planner::ComponentPlan,
        sample::with_sample_type,
        DataType, SampleType,
    },
    errors::{ReadError, Result},
};

/// Copy each classified band into the component matching its position in `bands`.
///
/// On a band read error the buffer is dropped and nothing is returned.
pub fn pack_bands<T: DataType, D: RasterDataset>(
    dataset: &D,
    bands: &[ClassifiedBand],
    plan: ComponentPlan,
) -> Result<Buffer<T, 3>> {
    let (width, height) = dataset.raster_shape();
    let mut buffer = allocate_buffer::<T>(width, height, plan.components)?;

    if plan.components == 1 {
        if let [ClassifiedBand { band, .. }] = bands {
            dataset
                .read_band_into(*band, buffer.as_mut())
                .map_err(|source| ReadError::BandCopyFailed {
                    band: *band,
                    source,
                })?;
            return Ok(buffer);
        }
    }

    let mut band_buff = vec![T::zero(); width * height];
    for (component, ClassifiedBand { band, role }) in bands.iter().enumerate() {
        debug!("packing band {band} ({role:?}) into component {component}");
        dataset
            .read_band_into(*band, &mut band_buff)
            .map_err(|source| ReadError::BandCopyFailed {
                band: *band,
                source,
            })?;
        buffer
            .as_mut()
            .chunks_exact_mut(plan.components)
            .zip(&band_buff)
            .for_each(|(pixel, sample)| pixel[component] = *sample);
    }
    Ok(buffer)
}

/// [pack_bands] for the dynamically known `sample_type`.
pub fn pack<D: RasterDataset>(
    dataset: &D,
    bands: &[ClassifiedBand],
    plan: ComponentPlan,
    sample_type: &SampleType,
) -> Result<PixelData> {
    with_sample_type!(sample_type,
        T => pack_bands::<T, D>(dataset, bands, plan).map(T::into_pixel_data),
        name => Err(ReadError::AllocationFailed(format!("unsupported data type {name}")))
    )
}
