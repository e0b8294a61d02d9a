use std::{
    io::Read,
    path::{Path, PathBuf},
};

use gdal::Dataset as GdalDataset;
use log::{debug, info};
use rayon::prelude::*;

use crate::{
    components::{
        cache::{lock_dataset, DatasetCache},
        dataset::OpenDataset,
        image::Image,
        vsimem::{is_vsimem, MemFile},
    },
    errors::{BackendResult, NotApplicable, ReadError, Result},
    features::{gdal_features, Features},
    options::ReadOptions,
    pipeline::pack_dataset,
};

/// Extensions never handed to the backend: scene graph native formats and
/// 3D tiles, which a greedy backend would otherwise try to probe.
pub const EXCLUDED_EXTENSIONS: [&str; 6] = [".vsgb", ".vsgt", ".osgb", ".osgt", ".osg", ".tile"];

/// Lower case extension of `path` with a leading dot.
pub fn lower_case_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|extension| format!(".{}", extension.to_string_lossy().to_lowercase()))
}

fn identify_extension(extension: &str) -> Result<()> {
    let extension = extension.to_lowercase();
    if EXCLUDED_EXTENSIONS.contains(&extension.as_str()) {
        debug!("refusing excluded extension {extension}");
        return Err(NotApplicable::ExcludedExtension(extension).into());
    }
    Ok(())
}

/// Reject paths this reader must never open.
pub fn identify(path: &Path) -> Result<()> {
    match lower_case_extension(path) {
        Some(extension) => identify_extension(&extension),
        None => Ok(()),
    }
}

/// Resolve `path` on disk, trying the option search paths for paths that do not exist as given.
/// In-memory paths are taken as they are, files on disk are canonicalized.
pub fn locate(path: &Path, options: &ReadOptions) -> Result<PathBuf> {
    if is_vsimem(path) {
        return Ok(path.to_path_buf());
    }
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    if path.is_relative() {
        if let Some(found) = options
            .paths
            .iter()
            .map(|directory| directory.join(path))
            .find(|candidate| candidate.exists())
        {
            return Ok(found.canonicalize()?);
        }
    }
    Err(NotApplicable::NotFound(path.to_path_buf()).into())
}

/// Reads raster sources into packed images.
///
/// Reads of the same path on one thread share an open dataset, concurrent reads on
/// other threads open their own.
#[derive(Debug)]
pub struct RasterReader<D = GdalDataset> {
    cache: DatasetCache<D>,
}

impl<D> Default for RasterReader<D> {
    fn default() -> Self {
        Self {
            cache: DatasetCache::default(),
        }
    }
}

impl RasterReader<GdalDataset> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extensions the registered raster drivers can read.
    pub fn features(&self) -> BackendResult<Features> {
        gdal_features()
    }
}

impl<D: OpenDataset> RasterReader<D> {
    /// Read the raster at `path`.
    pub fn read_path(&self, path: impl AsRef<Path>, options: &ReadOptions) -> Result<Image> {
        let path = path.as_ref();
        let name = path.display().to_string();

        identify(path)?;
        let located = locate(path, options)?;

        D::register_drivers();
        let shared = self
            .cache
            .get_or_open(&located, D::open)
            .map_err(|source| ReadError::OpenFailed {
                path: located.clone(),
                source,
            })?;
        let dataset = lock_dataset(&shared);
        pack_dataset(&*dataset, &name, options)
    }

    /// Read a raster held in `bytes`. The options must carry an extension hint.
    pub fn read_buffer(&self, bytes: &[u8], options: &ReadOptions) -> Result<Image> {
        let extension = options.extension().ok_or(ReadError::MissingExtensionHint)?;
        identify_extension(&extension)?;
        let file = MemFile::new(bytes, &extension)?;
        self.read_path(file.path(), options)
    }

    /// Read a raster from a byte stream. The options must carry an extension hint.
    pub fn read_stream<R: Read>(&self, mut stream: R, options: &ReadOptions) -> Result<Image> {
        let extension = options.extension().ok_or(ReadError::MissingExtensionHint)?;
        identify_extension(&extension)?;

        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes)?;
        self.read_buffer(&bytes, options)
    }

    /// Read `path`, logging why nothing was read.
    ///
    /// `None` covers both sources that are not this reader's and failed reads.
    pub fn read(&self, path: impl AsRef<Path>, options: &ReadOptions) -> Option<Image> {
        let path = path.as_ref();
        match self.read_path(path, options) {
            Ok(image) => Some(image),
            Err(err) if err.is_not_applicable() => {
                debug!("{}: {err}", path.display());
                None
            }
            Err(err) => {
                info!("{}: {err}", path.display());
                None
            }
        }
    }

    /// Read independent sources in parallel.
    pub fn read_many<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        options: &ReadOptions,
    ) -> Vec<Result<Image>> {
        paths
            .par_iter()
            .map(|path| self.read_path(path, options))
            .collect()
    }

    /// Number of datasets currently held open by reads.
    pub fn open_datasets(&self) -> usize {
        self.cache.open_count()
    }
}
