//! Earth orientation models: mean obliquity, nutation, precession, and the
//! equation of the equinoxes.
//!
//! All routines take a Modified Julian Date in the TT scale and return angles
//! in radians unless stated otherwise. The models are the classical IAU
//! 1976/1980 ones; the nutation series is truncated to its dominant terms,
//! which keeps the apparent place well under an arcsecond of the full series
//! over the supported epoch range.

use crate::constants::{Radian, RADEG, RADSEC, T2000};

/// Julian centuries elapsed since J2000.0 for a TT Modified Julian Date.
fn centuries_since_j2000(mjd_tt: f64) -> f64 {
    (mjd_tt - T2000) / 36525.0
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `mjd_tt`: Modified Julian Date (TT scale).
///
/// Returns
/// -------
/// * Mean obliquity of the ecliptic in radians.
///
/// The obliquity is a cubic polynomial in Julian centuries since J2000,
/// evaluated with Horner's method; coefficients are in arcseconds.
pub fn obleq(mjd_tt: f64) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = centuries_since_j2000(mjd_tt);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// One periodic term of the IAU 1980 nutation series.
///
/// `args` holds the integer multipliers of the five fundamental arguments
/// (l, l', F, D, Ω); the sine coefficients feed Δψ and the cosine
/// coefficients feed Δε, in units of 0.0001 arcsecond (with a secular part
/// per Julian century).
struct NutationTerm {
    args: [i8; 5],
    dpsi: f64,
    dpsi_t: f64,
    deps: f64,
    deps_t: f64,
}

/// Dominant terms of the IAU 1980 nutation series, largest amplitude first.
///
/// The truncation keeps every term with |Δψ| ≥ 0.01″; the tail left out sums
/// to a few hundredths of an arcsecond.
#[rustfmt::skip]
const NUTATION_TERMS: [NutationTerm; 15] = [
    NutationTerm { args: [ 0,  0,  0,  0,  1], dpsi: -171996.0, dpsi_t: -174.2, deps: 92025.0, deps_t:  8.9 },
    NutationTerm { args: [ 0,  0,  2, -2,  2], dpsi:  -13187.0, dpsi_t:   -1.6, deps:  5736.0, deps_t: -3.1 },
    NutationTerm { args: [ 0,  0,  2,  0,  2], dpsi:   -2274.0, dpsi_t:   -0.2, deps:   977.0, deps_t: -0.5 },
    NutationTerm { args: [ 0,  0,  0,  0,  2], dpsi:    2062.0, dpsi_t:    0.2, deps:  -895.0, deps_t:  0.5 },
    NutationTerm { args: [ 0,  1,  0,  0,  0], dpsi:    1426.0, dpsi_t:   -3.4, deps:    54.0, deps_t: -0.1 },
    NutationTerm { args: [ 1,  0,  0,  0,  0], dpsi:     712.0, dpsi_t:    0.1, deps:    -7.0, deps_t:  0.0 },
    NutationTerm { args: [ 0,  1,  2, -2,  2], dpsi:    -517.0, dpsi_t:    1.2, deps:   224.0, deps_t: -0.6 },
    NutationTerm { args: [ 0,  0,  2,  0,  1], dpsi:    -386.0, dpsi_t:   -0.4, deps:   200.0, deps_t:  0.0 },
    NutationTerm { args: [ 1,  0,  2,  0,  2], dpsi:    -301.0, dpsi_t:    0.0, deps:   129.0, deps_t: -0.1 },
    NutationTerm { args: [ 0, -1,  2, -2,  2], dpsi:     217.0, dpsi_t:   -0.5, deps:   -95.0, deps_t:  0.3 },
    NutationTerm { args: [ 1,  0,  0, -2,  0], dpsi:    -158.0, dpsi_t:    0.0, deps:    -1.0, deps_t:  0.0 },
    NutationTerm { args: [ 0,  0,  2, -2,  1], dpsi:     129.0, dpsi_t:    0.1, deps:   -70.0, deps_t:  0.0 },
    NutationTerm { args: [-1,  0,  2,  0,  2], dpsi:     123.0, dpsi_t:    0.0, deps:   -53.0, deps_t:  0.0 },
    NutationTerm { args: [ 1,  0,  0,  0,  1], dpsi:      63.0, dpsi_t:    0.1, deps:   -33.0, deps_t:  0.0 },
    NutationTerm { args: [ 0,  0,  0,  2,  0], dpsi:      63.0, dpsi_t:    0.0, deps:    -2.0, deps_t:  0.0 },
];

/// Compute the nutation angles in longitude and obliquity (IAU 1980, truncated).
///
/// Arguments
/// ---------
/// * `mjd_tt`: Modified Julian Date (TT scale).
///
/// Returns
/// -------
/// * `(Δψ, Δε)` in **arcseconds**: nutation in longitude and in obliquity.
///
/// The five fundamental arguments (mean anomalies of Moon and Sun, argument
/// of latitude, mean elongation, longitude of the ascending node) are cubic
/// polynomials in Julian centuries since J2000; each series term is a
/// sinusoid of an integer combination of them.
pub fn nutn80(mjd_tt: f64) -> (f64, f64) {
    let t = centuries_since_j2000(mjd_tt);
    let t2 = t * t;
    let t3 = t2 * t;

    // Fundamental arguments in radians (coefficients in arcseconds).
    let fund = [
        (485866.733 + 1717915922.633 * t + 31.310 * t2 + 0.064 * t3) * RADSEC,
        (1287099.804 + 129596581.224 * t - 0.577 * t2 - 0.012 * t3) * RADSEC,
        (335778.877 + 1739527263.137 * t - 13.257 * t2 + 0.011 * t3) * RADSEC,
        (1072261.307 + 1602961601.328 * t - 6.891 * t2 + 0.019 * t3) * RADSEC,
        (450160.280 - 6962890.539 * t + 7.455 * t2 + 0.008 * t3) * RADSEC,
    ];

    let mut dpsi = 0.0;
    let mut deps = 0.0;
    for term in &NUTATION_TERMS {
        let mut arg = 0.0;
        for (mult, value) in term.args.iter().zip(fund.iter()) {
            arg += f64::from(*mult) * value;
        }
        let (sin_arg, cos_arg) = arg.sin_cos();
        dpsi += (term.dpsi + term.dpsi_t * t) * sin_arg;
        deps += (term.deps + term.deps_t * t) * cos_arg;
    }

    // Series coefficients are in units of 0.0001 arcsecond.
    (dpsi * 1e-4, deps * 1e-4)
}

/// Compute the equation of the equinoxes in radians.
///
/// This is the small offset between apparent and mean sidereal time caused
/// by nutation: `Δψ · cos ε`, with Δψ from [`nutn80`] converted from
/// arcseconds.
///
/// # See also
/// * [`obleq`] – mean obliquity of the ecliptic.
/// * [`crate::time::gmst`] – mean sidereal time this correction applies to.
pub fn equequ(mjd_tt: f64) -> Radian {
    let oblm = obleq(mjd_tt);
    let (dpsi, _deps) = nutn80(mjd_tt);

    RADSEC * dpsi * oblm.cos()
}

/// IAU 1976 precession angles ζ, z, θ from J2000 to the epoch of date.
///
/// Arguments
/// ---------
/// * `mjd_tt`: Modified Julian Date (TT scale).
///
/// Returns
/// -------
/// * `(ζ, z, θ)` in radians; [`crate::ref_system::precession`] composes them
///   into the rotation matrix `x_of_date = R · x_J2000`.
pub fn prec_angles(mjd_tt: f64) -> (Radian, Radian, Radian) {
    let t = centuries_since_j2000(mjd_tt);

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    (zeta, z, theta)
}
