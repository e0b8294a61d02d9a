use log::debug;

use crate::{
    components::{
        bands::{classify_bands, unify_sample_type},
        dataset::RasterDataset,
        image::Image,
        metadata::attach_metadata,
        packer::pack,
        planner::plan_components,
    },
    errors::Result,
    options::ReadOptions,
};

/// Pack the bands of an opened `dataset` into a single image.
///
/// `name` identifies the source in diagnostics.
pub fn pack_dataset<D: RasterDataset>(
    dataset: &D,
    name: &str,
    options: &ReadOptions,
) -> Result<Image> {
    let sample_type = unify_sample_type(dataset, name)?;
    let bands = classify_bands(dataset, name)?;
    let plan = plan_components(bands.len(), options.map_rgb_to_rgba_hint, name)?;

    let (width, height) = dataset.raster_shape();
    debug!(
        "{name}: packing {} bands into {width}x{height}x{} {sample_type}",
        bands.len(),
        plan.components
    );
    let mut image = Image::new(pack(dataset, &bands, plan, &sample_type)?);
    attach_metadata(dataset, &mut image);
    Ok(image)
}
