//! Reference-frame rotations.
//!
//! The visibility pipeline only ever travels two fixed paths:
//!
//! ```text
//! Ecliptic J2000  --(obliquity)-->  Equatorial J2000
//! Equatorial J2000  --(precession + nutation)-->  True equator of date
//! ```
//!
//! so instead of a general frame-to-frame router this module exposes the
//! composed matrices for exactly those paths, built from the elementary
//! axis rotation [`rotmt`]. All matrices are **active** rotations: the
//! returned `R` satisfies `x_target = R · x_source`.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::RADSEC;
use crate::earth_orientation::{nutn80, obleq, prec_angles};

/// Build a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `k`: axis index — `0` → X, `1` → Y, `2` → Z.
///
/// Return
/// ------
/// * The matrix `R` such that the rotated vector is `x' = R · x`.
///
/// Panics
/// ------
/// * If `k > 2`.
pub fn rotmt(alpha: f64, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from mean ecliptic J2000 to mean equatorial J2000.
///
/// A single rotation around X by the J2000 mean obliquity:
/// `x_equ = R · x_ecl`.
pub fn ecl_to_equ_j2000() -> Matrix3<f64> {
    rotmt(obleq(crate::constants::T2000), 0)
}

/// IAU 1976 precession matrix from J2000 to the mean equator of date.
///
/// Arguments
/// ---------
/// * `mjd_tt`: epoch of date as a Modified Julian Date (TT scale).
///
/// Return
/// ------
/// * `P` such that `x_mean_of_date = P · x_J2000`.
pub fn precession(mjd_tt: f64) -> Matrix3<f64> {
    let (zeta, z, theta) = prec_angles(mjd_tt);

    rotmt(z, 2) * rotmt(-theta, 1) * rotmt(zeta, 2)
}

/// IAU 1980 nutation matrix from the mean to the true equator of date.
///
/// Arguments
/// ---------
/// * `mjd_tt`: epoch of date as a Modified Julian Date (TT scale).
///
/// Return
/// ------
/// * `N` such that `x_true_of_date = N · x_mean_of_date`.
pub fn nutation_matrix(mjd_tt: f64) -> Matrix3<f64> {
    let epsm = obleq(mjd_tt);
    let (dpsi, deps) = nutn80(mjd_tt);

    let dpsi = dpsi * RADSEC;
    let epst = epsm + deps * RADSEC;

    rotmt(epst, 0) * rotmt(dpsi, 2) * rotmt(-epsm, 0)
}

/// Combined rotation from mean equatorial J2000 to the true equator and
/// equinox of date (precession then nutation).
///
/// This is the transformation applied to every catalog and ephemeris
/// position before the diurnal rotation: `x_app = N · P · x_J2000`.
pub fn equ_j2000_to_true_of_date(mjd_tt: f64) -> Matrix3<f64> {
    nutation_matrix(mjd_tt) * precession(mjd_tt)
}
