//! # Observer & site geometry
//!
//! A ground-based observing site is described by its **geodetic** latitude,
//! longitude and elevation. The constructor validates ranges, forbids NaN
//! through [`ordered_float::NotNan`], and precomputes the **geocentric
//! parallax coordinates** (ρ·cosφ′, ρ·sinφ′) that place the site on the
//! oblate Earth, so the topocentric pipeline can subtract the observer's
//! geocentric position without redoing trigonometry per body.
//!
//! ## Units
//!
//! - `latitude`, `longitude`: **degrees** (north and east positive).
//! - `elevation`: **kilometers** above the reference ellipsoid.
//! - ρ·cosφ′, ρ·sinφ′: **Earth equatorial radii** (dimensionless scaling).
//! - Body-fixed/geocentric positions: **AU**.

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::constants::{Degree, Kilometer, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU};
use crate::ref_system::rotmt;
use crate::skywatch_errors::SkywatchError;

/// Observing site with precomputed geocentric parallax coordinates.
///
/// See also
/// --------
/// * [`geodetic_to_parallax`] – geodetic latitude/elevation → (ρ·cosφ′, ρ·sinφ′).
/// * [`Observer::geocentric_position`] – site position on the true equator of date.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Observer {
    /// Geodetic latitude in **degrees**, north positive.
    pub latitude: NotNan<f64>,

    /// Geodetic longitude in **degrees**, east of Greenwich.
    pub longitude: NotNan<f64>,

    /// Elevation above the reference ellipsoid in **kilometers**.
    pub elevation: NotNan<f64>,

    /// Optional human-readable site name.
    pub name: Option<String>,

    /// ρ·cosφ′ (geocentric latitude φ′), in Earth radii.
    rho_cos_phi: NotNan<f64>,

    /// ρ·sinφ′ (geocentric latitude φ′), in Earth radii.
    rho_sin_phi: NotNan<f64>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: geodetic latitude in **degrees**, in −90..=90.
    /// * `longitude`: geodetic longitude in **degrees**, in −180..=180.
    /// * `elevation`: height above the ellipsoid in **kilometers**.
    /// * `name`: optional site name.
    ///
    /// Return
    /// ------
    /// * A constructed [`Observer`], or [`SkywatchError::InvalidGeodetic`] /
    ///   [`SkywatchError::NanGeodetic`] on out-of-range or NaN input.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        elevation: Kilometer,
        name: Option<String>,
    ) -> Result<Observer, SkywatchError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SkywatchError::InvalidGeodetic(format!(
                "latitude {latitude} not in -90..90"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SkywatchError::InvalidGeodetic(format!(
                "longitude {longitude} not in -180..180"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);

        Ok(Observer {
            latitude: NotNan::new(latitude)?,
            longitude: NotNan::new(longitude)?,
            elevation: NotNan::new(elevation)?,
            name,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
        })
    }

    /// Geodetic latitude in radians.
    pub fn latitude_rad(&self) -> Radian {
        self.latitude.into_inner().to_radians()
    }

    /// Geodetic longitude in radians, east positive.
    pub fn longitude_rad(&self) -> Radian {
        self.longitude.into_inner().to_radians()
    }

    /// Position of the site in the Earth-fixed frame, in **AU**.
    ///
    /// The X axis pierces the Greenwich meridian at the equator and the Z
    /// axis follows the rotation pole, so the components are built directly
    /// from (ρ·cosφ′, ρ·sinφ′) and the longitude.
    pub fn body_fixed_coord(&self) -> Vector3<f64> {
        let lon = self.longitude_rad();

        Vector3::new(
            ERAU * self.rho_cos_phi.into_inner() * lon.cos(),
            ERAU * self.rho_cos_phi.into_inner() * lon.sin(),
            ERAU * self.rho_sin_phi.into_inner(),
        )
    }

    /// Geocentric position of the site on the **true equator of date**, in AU.
    ///
    /// Arguments
    /// ---------
    /// * `gast`: Greenwich apparent sidereal time in radians.
    ///
    /// Return
    /// ------
    /// * The body-fixed vector carried through the diurnal rotation, ready to
    ///   be subtracted from a geocentric body position for topocentric
    ///   parallax.
    pub fn geocentric_position(&self, gast: Radian) -> Vector3<f64> {
        rotmt(gast, 2) * self.body_fixed_coord()
    }
}

/// Convert geodetic latitude and height into normalized parallax coordinates.
///
/// Accounts for Earth oblateness through the GRS1980/WGS84 ellipsoid. The
/// result is dimensionless, in units of the equatorial radius.
///
/// Arguments
/// ---------
/// * `lat`: geodetic latitude in **radians**.
/// * `height`: altitude above the ellipsoid in **kilometers**.
///
/// Returns
/// -------
/// * `(rho_cos_phi, rho_sin_phi)` — the site's projections on the equatorial
///   plane and rotation axis.
pub fn lat_alt_to_parallax(lat: Radian, height: Kilometer) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;
    let major_km = EARTH_MAJOR_AXIS / 1000.0;

    // Parametric latitude corrects for the Earth's oblateness.
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / major_km) * lat.sin();
    let rho_cos_phi = u.cos() + (height / major_km) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Degrees/kilometers convenience wrapper around [`lat_alt_to_parallax`].
pub fn geodetic_to_parallax(lat: Degree, height: Kilometer) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
