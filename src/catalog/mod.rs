//! # Star catalog access
//!
//! A catalog provider hands the engine a fixed list of [`StarRecord`]s:
//! positions, apparent magnitudes and, when known, proper names. The catalog
//! does not depend on the observer or the instant, so providers are expected
//! to load once and serve a cached slice afterwards ([`StarCatalogProvider::load`]
//! borrows from the provider for exactly that reason).
//!
//! [`HipparcosCatalog`] is the built-in implementation.

pub mod hipparcos;

pub use hipparcos::HipparcosCatalog;

use crate::constants::{Degree, HipId, Hour, Radian, RADH};
use crate::skywatch_errors::SkywatchError;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    /// Hipparcos catalog number.
    pub hip: HipId,

    /// Right ascension in hours (ICRS).
    pub ra_hours: Hour,

    /// Declination in degrees (ICRS).
    pub dec_deg: Degree,

    /// Apparent visual magnitude (lower is brighter).
    pub magnitude: f64,

    /// IAU proper name, when one exists.
    pub proper: Option<String>,

    /// Three-letter constellation code, when known.
    pub constellation: Option<String>,
}

impl StarRecord {
    /// Catalog designation string, e.g. `"HIP 32349"`.
    pub fn designation(&self) -> String {
        format!("HIP {}", self.hip)
    }

    /// Right ascension in radians.
    pub fn ra_rad(&self) -> Radian {
        self.ra_hours * RADH
    }

    /// Declination in radians.
    pub fn dec_rad(&self) -> Radian {
        self.dec_deg.to_radians()
    }
}

/// Source of the fixed star catalog.
pub trait StarCatalogProvider {
    /// The full catalog, loaded on first use and cached afterwards.
    ///
    /// Errors
    /// ------
    /// * [`SkywatchError::CatalogUnavailable`] when the catalog cannot be
    ///   fetched or parsed.
    fn load(&self) -> Result<&[StarRecord], SkywatchError>;
}

impl<T: StarCatalogProvider + ?Sized> StarCatalogProvider for &T {
    fn load(&self) -> Result<&[StarRecord], SkywatchError> {
        (**self).load()
    }
}
