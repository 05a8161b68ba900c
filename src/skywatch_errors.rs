use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkywatchError {
    #[error("No ephemeris data for body: {0}")]
    UnknownBody(String),

    #[error("Star catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Geodetic coordinate out of range: {0}")]
    InvalidGeodetic(String),

    #[error("NaN encountered in observer geometry: {0}")]
    NanGeodetic(#[from] ordered_float::FloatIsNan),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Location lookup failed: {0}")]
    LocationUnavailable(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] Box<ureq::Error>),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cache dir unavailable: {0}")]
    CacheDirUnavailable(String),
}

impl From<ureq::Error> for SkywatchError {
    fn from(err: ureq::Error) -> Self {
        SkywatchError::HttpError(Box::new(err))
    }
}

impl SkywatchError {
    /// Fold any provider-internal failure into a catalog-load failure.
    ///
    /// The star catalog boundary reports a single error condition to the
    /// engine, whatever went wrong underneath (HTTP, I/O, parse).
    pub(crate) fn into_catalog_unavailable(self) -> SkywatchError {
        match self {
            e @ SkywatchError::CatalogUnavailable(_) => e,
            other => SkywatchError::CatalogUnavailable(other.to_string()),
        }
    }
}
