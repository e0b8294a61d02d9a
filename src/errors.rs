use std::path::PathBuf;

use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, ReadError>;

/// Result type of the raster backend.
pub type BackendResult<T> = std::result::Result<T, GdalError>;

/// Reasons a source is not this reader's to read.
#[derive(thiserror::Error, Debug)]
pub enum NotApplicable {
    #[error("extension {0} is never read through the raster backend")]
    ExcludedExtension(String),
    #[error("could not locate {0}")]
    NotFound(PathBuf),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    NotApplicable(#[from] NotApplicable),
    #[error("reading from a buffer requires an extension hint")]
    MissingExtensionHint,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("could not register in-memory file: {0}")]
    VirtualFile(#[source] GdalError),
    #[error("could not open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
    #[error("could not query raster band {band}: {source}")]
    BandQueryFailed {
        band: usize,
        #[source]
        source: GdalError,
    },
    #[error("dataset has no raster bands")]
    NoRasterData,
    #[error("multiple input data types not supported: {}", .0.join(", "))]
    UnsupportedMixedTypes(Vec<String>),
    #[error("no raster band has a defined color interpretation")]
    NoClassifiedBands,
    #[error("{0} classified raster bands, maximum of 4 can be merged into a single image")]
    TooManyComponents(usize),
    #[error("could not allocate image: {0}")]
    AllocationFailed(String),
    #[error("could not copy raster band {band}: {source}")]
    BandCopyFailed {
        band: usize,
        #[source]
        source: GdalError,
    },
}

impl ReadError {
    /// Whether the source was simply not this reader's, as opposed to a failed read.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, ReadError::NotApplicable(_))
    }
}
