pub mod backends;
pub mod bands;
pub mod cache;
pub mod dataset;
pub mod image;
pub mod memory;
pub mod metadata;
pub mod packer;
pub mod planner;
pub mod sample;
pub mod transforms;
pub mod vsimem;

pub use backends::gdal_backend::init_gdal;
pub use dataset::{ColorRole, OpenDataset, RasterDataset};
pub use image::{Attachment, Image, PixelData};
pub use memory::MemoryDataset;
pub use sample::{DataType, SampleType};
pub use transforms::GeoTransform;

use std::collections::HashMap;
pub type Metadata = HashMap<String, String>;
