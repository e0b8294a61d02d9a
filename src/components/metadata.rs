use log::debug;

use crate::components::{
    dataset::RasterDataset,
    image::{Attachment, Image, GEO_TRANSFORM, PROJECTION_REF},
};

/// Attach dataset metadata, projection and geotransform to a packed image.
///
/// Each attachment is independent, a missing one leaves the others in place.
/// Metadata items never occupy the projection or geotransform keys.
pub fn attach_metadata<D: RasterDataset>(dataset: &D, image: &mut Image) {
    for (key, value) in dataset.metadata_entries() {
        if key == PROJECTION_REF || key == GEO_TRANSFORM {
            debug!("skipping metadata item {key}");
            continue;
        }
        image.set_attachment(key, Attachment::Text(value));
    }

    if let Some(projection) = dataset.projection_ref() {
        image.set_attachment(PROJECTION_REF, Attachment::Text(projection));
    } else {
        debug!("no projection reference to attach");
    }

    if let Some(transform) = dataset.geo_transform_coefficients() {
        image.set_attachment(GEO_TRANSFORM, Attachment::Numbers(transform.to_vec()));
    } else {
        debug!("no geotransform to attach");
    }
}
