//! Topocentric coordinates: from equatorial ephemeris or catalog positions
//! to the local horizontal (altitude/azimuth) frame.
//!
//! The shared pipeline for every object is:
//!
//! ```text
//! equatorial J2000 --(precession + nutation)--> true equator of date
//!                  --(GAST, site vector)-->     topocentric direction
//!                  --(horizon basis)-->         altitude / azimuth
//! ```
//!
//! Solar-system bodies additionally get the geocentric parallax correction
//! (the observer's offset from the geocenter is subtracted from the body
//! vector); stars are treated as directions at infinity.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{Degree, Radian, DPI};
use crate::observers::Observer;
use crate::ref_system::equ_j2000_to_true_of_date;
use crate::time::gast;

/// Equatorial direction in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension, 0..2π.
    pub ra: Radian,
    /// Declination, −π/2..π/2.
    pub dec: Radian,
}

/// Horizontal coordinates as seen from a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    /// Angle above the local horizon, in degrees.
    pub altitude: Degree,
    /// Compass bearing from geographic north, in degrees, normalized to [0, 360).
    pub azimuth: Degree,
}

/// Unit vector of an equatorial direction.
pub fn unit_vector(ra: Radian, dec: Radian) -> Vector3<f64> {
    Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
}

/// Right ascension and declination of a position vector.
///
/// The right ascension is normalized to [0, 2π).
pub fn radec_from_vector(v: &Vector3<f64>) -> Equatorial {
    let ra = v.y.atan2(v.x).rem_euclid(DPI);
    let dec = (v.z / v.norm()).asin();
    Equatorial { ra, dec }
}

/// Altitude/azimuth of a topocentric direction expressed on the true equator
/// of date.
///
/// Arguments
/// ---------
/// * `observer`: the observing site (geodetic latitude and longitude).
/// * `gast_rad`: Greenwich apparent sidereal time in radians.
/// * `direction`: topocentric vector toward the object (any norm > 0).
///
/// Return
/// ------
/// * The [`Horizontal`] coordinates; azimuth measured from north through east.
///
/// The horizon basis (up, north, east) is built from the geodetic latitude
/// and the local sidereal angle, and the direction is projected onto it.
pub fn horizontal_from_of_date(
    observer: &Observer,
    gast_rad: Radian,
    direction: &Vector3<f64>,
) -> Horizontal {
    let phi = observer.latitude_rad();
    let lst = gast_rad + observer.longitude_rad();

    let up = Vector3::new(phi.cos() * lst.cos(), phi.cos() * lst.sin(), phi.sin());
    let north = Vector3::new(-phi.sin() * lst.cos(), -phi.sin() * lst.sin(), phi.cos());
    let east = Vector3::new(-lst.sin(), lst.cos(), 0.0);

    let u = direction.normalize();

    let altitude = u.dot(&up).clamp(-1.0, 1.0).asin().to_degrees();
    let azimuth = u.dot(&east).atan2(u.dot(&north)).rem_euclid(DPI).to_degrees();

    Horizontal { altitude, azimuth }
}

/// Apparent topocentric altitude/azimuth of a solar-system body.
///
/// Arguments
/// ---------
/// * `observer`: the observing site.
/// * `epoch`: instant of observation.
/// * `geocentric_j2000`: geocentric position of the body in AU, mean
///   equatorial J2000 frame.
///
/// Return
/// ------
/// * The [`Horizontal`] coordinates, with the site's geocentric offset
///   removed (dominant for the Moon, where it reaches about a degree).
pub fn body_horizontal(
    observer: &Observer,
    epoch: &Epoch,
    geocentric_j2000: &Vector3<f64>,
) -> Horizontal {
    let rot = equ_j2000_to_true_of_date(epoch.to_mjd_tt_days());
    let gast_rad = gast(epoch);

    let of_date = rot * geocentric_j2000;
    let topocentric = of_date - observer.geocentric_position(gast_rad);

    horizontal_from_of_date(observer, gast_rad, &topocentric)
}

/// Apparent topocentric altitude/azimuth of a catalog star.
///
/// Stars are directions at infinity: no parallax correction, only the frame
/// chain and the diurnal rotation.
pub fn star_horizontal(observer: &Observer, epoch: &Epoch, ra: Radian, dec: Radian) -> Horizontal {
    let rot = equ_j2000_to_true_of_date(epoch.to_mjd_tt_days());
    let gast_rad = gast(epoch);

    let of_date = rot * unit_vector(ra, dec);

    horizontal_from_of_date(observer, gast_rad, &of_date)
}

#[cfg(test)]
mod topocentric_test {
    use super::*;
    use approx::assert_relative_eq;

    fn site(lat: f64, lon: f64) -> Observer {
        Observer::new(lat, lon, 0.0, None).unwrap()
    }

    #[test]
    fn test_radec_round_trip() {
        let eq = radec_from_vector(&unit_vector(1.234, -0.567));
        assert_relative_eq!(eq.ra, 1.234, epsilon = 1e-12);
        assert_relative_eq!(eq.dec, -0.567, epsilon = 1e-12);
    }

    #[test]
    fn test_zenith() {
        // A direction along the site's own latitude at the local meridian
        // culminates at the zenith.
        let observer = site(50.0, 0.0);
        let dir = unit_vector(0.0, 50f64.to_radians());
        let hz = horizontal_from_of_date(&observer, 0.0, &dir);
        assert_relative_eq!(hz.altitude, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equator_star_on_meridian_is_due_south() {
        // From 50°N, a star with dec 0 on the meridian stands at altitude
        // 40° due south.
        let observer = site(50.0, 0.0);
        let dir = unit_vector(0.0, 0.0);
        let hz = horizontal_from_of_date(&observer, 0.0, &dir);
        assert_relative_eq!(hz.altitude, 40.0, epsilon = 1e-9);
        assert_relative_eq!(hz.azimuth, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rising_star_is_due_east() {
        // On the equator, a dec-0 star six sidereal hours before transit
        // sits on the horizon due east.
        let observer = site(0.0, 0.0);
        let dir = unit_vector(std::f64::consts::FRAC_PI_2, 0.0);
        let hz = horizontal_from_of_date(&observer, 0.0, &dir);
        assert_relative_eq!(hz.altitude, 0.0, epsilon = 1e-9);
        assert_relative_eq!(hz.azimuth, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_azimuth_normalized() {
        let observer = site(35.0, 12.0);
        for ra_step in 0..24 {
            let dir = unit_vector(ra_step as f64 * DPI / 24.0, 0.3);
            let hz = horizontal_from_of_date(&observer, 1.7, &dir);
            assert!((0.0..360.0).contains(&hz.azimuth));
            assert!((-90.0..=90.0).contains(&hz.altitude));
        }
    }

    #[test]
    fn test_longitude_shifts_local_sky() {
        // The same of-date direction seen from two longitudes differs only
        // through the local sidereal angle.
        // HA = GAST + λ − RA: shifting both by 90° leaves it unchanged.
        let epoch = hifitime::Epoch::from_mjd_utc(60000.0);
        let east = site(0.0, 90.0);
        let greenwich = site(0.0, 0.0);
        let hz_east = star_horizontal(&east, &epoch, std::f64::consts::FRAC_PI_2, 0.0);
        let hz_gw = star_horizontal(&greenwich, &epoch, 0.0, 0.0);
        assert_relative_eq!(hz_east.altitude, hz_gw.altitude, epsilon = 1e-6);
    }
}
