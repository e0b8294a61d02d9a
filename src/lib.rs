//! Read raster datasets through GDAL into packed, interleaved images.
//!
//! All bands must share one data type. Bands with a color interpretation become
//! image components in band order, at most four of them, and three color bands
//! are widened to RGBA unless [ReadOptions::map_rgb_to_rgba_hint] is off.

mod buffer;
pub mod components;
mod errors;
pub mod features;
mod options;
pub mod pipeline;
mod reader;

pub use buffer::Buffer;
pub use components::{
    Attachment, ColorRole, DataType, GeoTransform, Image, MemoryDataset, OpenDataset, PixelData,
    RasterDataset, SampleType,
};
pub use errors::{BackendResult, NotApplicable, ReadError, Result};
pub use features::{FeatureMask, Features};
pub use options::ReadOptions;
pub use pipeline::pack_dataset;
pub use reader::{identify, locate, RasterReader, EXCLUDED_EXTENSIONS};
