use std::collections::BTreeMap;

use gdal::{DriverManager, Metadata as GdalMetadata};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{components::init_gdal, errors::BackendResult};

/// Ways a source with a given extension can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureMask(u32);

impl FeatureMask {
    pub const READ_FILENAME: FeatureMask = FeatureMask(1);

    pub fn contains(&self, other: FeatureMask) -> bool {
        self.0 & other.0 == other.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFeature {
    pub mask: FeatureMask,
    /// Short name of the driver claiming the extension.
    pub driver: String,
}

/// Extensions readable through the raster backend, keyed with a leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub extensions: BTreeMap<String, ExtensionFeature>,
}

impl Features {
    /// Record `extension` for `driver`. An extension keeps its first claimant.
    pub fn claim(&mut self, extension: &str, driver: &str, mask: FeatureMask) {
        match self.extensions.get(extension) {
            Some(claimed) => debug!(
                "{extension} already claimed by {}, ignoring {driver}",
                claimed.driver
            ),
            None => {
                self.extensions.insert(
                    extension.to_owned(),
                    ExtensionFeature {
                        mask,
                        driver: driver.to_owned(),
                    },
                );
            }
        }
    }

    pub fn supports(&self, extension: &str, mask: FeatureMask) -> bool {
        self.extensions
            .get(extension)
            .is_some_and(|feature| feature.mask.contains(mask))
    }
}

/// Split a driver extension list such as `"tif tiff"` or `"jpg/jpeg"` into
/// dot prefixed extensions.
pub fn parse_extensions(extensions: &str) -> Vec<String> {
    extensions
        .split([' ', '/'])
        .map(|extension| extension.trim_start_matches('.'))
        .filter(|extension| !extension.is_empty())
        .map(|extension| format!(".{extension}"))
        .collect()
}

/// Features of every raster driver, claimed in registry order.
pub fn gdal_features() -> BackendResult<Features> {
    init_gdal();
    let mut features = Features::default();
    for index in 0..DriverManager::count() {
        let driver = DriverManager::get_driver(index)?;
        let is_raster = driver.metadata_item("DCAP_RASTER", "").is_some();
        let Some(extensions) = driver.metadata_item("DMD_EXTENSIONS", "") else {
            continue;
        };
        if !is_raster {
            continue;
        }
        let name = driver.short_name();
        for extension in parse_extensions(&extensions) {
            features.claim(&extension, &name, FeatureMask::READ_FILENAME);
        }
    }
    Ok(features)
}
