use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use gdal::vsi;
use log::{debug, warn};

use crate::errors::{ReadError, Result};

/// Root of GDAL's in-memory filesystem.
pub const VSIMEM_ROOT: &str = "/vsimem";

static NEXT_FILE_ID: AtomicUsize = AtomicUsize::new(0);

/// Whether `path` lives in GDAL's in-memory filesystem.
pub fn is_vsimem(path: &Path) -> bool {
    path.starts_with(VSIMEM_ROOT)
}

/// `extension` with exactly one leading dot.
pub fn normalize_extension(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.'))
}

/// Byte buffer registered in GDAL's in-memory filesystem.
///
/// The file is unlinked when the guard drops.
#[derive(Debug)]
pub struct MemFile {
    path: PathBuf,
}

impl MemFile {
    /// Register a copy of `bytes` under a fresh name ending in `extension`, so
    /// extension based driver selection works.
    pub fn new(bytes: &[u8], extension: &str) -> Result<Self> {
        let id = NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed);
        let path = PathBuf::from(format!(
            "{VSIMEM_ROOT}/rusterimg/{id}{}",
            normalize_extension(extension)
        ));
        vsi::create_mem_file(&path, bytes.to_vec()).map_err(ReadError::VirtualFile)?;
        debug!("registered {} bytes as {}", bytes.len(), path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for MemFile {
    fn drop(&mut self) {
        if let Err(err) = vsi::unlink_mem_file(&self.path) {
            warn!("could not unlink {}: {err}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("tif", ".tif")]
    #[case(".tif", ".tif")]
    #[case("..jp2", ".jp2")]
    fn extensions_get_one_dot(#[case] extension: &str, #[case] expected: &str) {
        assert_eq!(normalize_extension(extension), expected);
    }

    #[rstest]
    fn vsimem_paths() {
        assert!(is_vsimem(Path::new("/vsimem/temp.tif")));
        assert!(!is_vsimem(Path::new("/vsimemory/temp.tif")));
        assert!(!is_vsimem(Path::new("data/temp.tif")));
    }

    #[rstest]
    fn file_is_unlinked_on_drop() {
        let file = MemFile::new(b"not a raster", "tif").unwrap();
        let path = file.path().to_path_buf();
        assert!(path.to_string_lossy().ends_with(".tif"));
        assert!(is_vsimem(&path));
        drop(file);
        assert!(vsi::unlink_mem_file(&path).is_err());
    }

    #[rstest]
    fn names_are_unique() {
        let first = MemFile::new(b"a", ".png").unwrap();
        let second = MemFile::new(b"b", ".png").unwrap();
        assert_ne!(first.path(), second.path());
    }
}
