//! Geocentric lunar position from a truncated perturbation series.
//!
//! Mean orbital elements plus the dozen largest perturbation terms
//! (evection, variation, yearly equation and friends) give the Moon to a few
//! arcminutes, which is plenty for an above-the-horizon decision. The
//! returned vector is referred to the **ecliptic and equinox of date**.

use nalgebra::Vector3;

use crate::constants::ERAU;

use super::keplerian::solve_kepler;

/// One sinusoidal perturbation term; the multipliers apply to the Moon's
/// mean anomaly M, the mean elongation D, the argument of latitude F and the
/// Sun's mean anomaly Ms. Amplitudes in degrees (longitude/latitude) or
/// Earth radii (distance).
struct LunarTerm {
    m: i8,
    d: i8,
    f: i8,
    ms: i8,
    amplitude: f64,
}

const LONGITUDE_TERMS: [LunarTerm; 12] = [
    LunarTerm { m: 1, d: -2, f: 0, ms: 0, amplitude: -1.274 }, // evection
    LunarTerm { m: 0, d: 2, f: 0, ms: 0, amplitude: 0.658 },   // variation
    LunarTerm { m: 0, d: 0, f: 0, ms: 1, amplitude: -0.186 },  // yearly equation
    LunarTerm { m: 2, d: -2, f: 0, ms: 0, amplitude: -0.059 },
    LunarTerm { m: 1, d: -2, f: 0, ms: 1, amplitude: -0.057 },
    LunarTerm { m: 1, d: 2, f: 0, ms: 0, amplitude: 0.053 },
    LunarTerm { m: 0, d: 2, f: 0, ms: -1, amplitude: 0.046 },
    LunarTerm { m: 1, d: 0, f: 0, ms: -1, amplitude: 0.041 },
    LunarTerm { m: 0, d: 1, f: 0, ms: 0, amplitude: -0.035 }, // parallactic equation
    LunarTerm { m: 1, d: 0, f: 0, ms: 1, amplitude: -0.031 },
    LunarTerm { m: 0, d: -2, f: 2, ms: 0, amplitude: -0.015 },
    LunarTerm { m: 1, d: -4, f: 0, ms: 0, amplitude: 0.011 },
];

const LATITUDE_TERMS: [LunarTerm; 5] = [
    LunarTerm { m: 0, d: -2, f: 1, ms: 0, amplitude: -0.173 },
    LunarTerm { m: 1, d: -2, f: -1, ms: 0, amplitude: -0.055 },
    LunarTerm { m: 1, d: -2, f: 1, ms: 0, amplitude: -0.046 },
    LunarTerm { m: 0, d: 2, f: 1, ms: 0, amplitude: 0.033 },
    LunarTerm { m: 2, d: 0, f: 1, ms: 0, amplitude: 0.017 },
];

const DISTANCE_TERMS: [LunarTerm; 2] = [
    LunarTerm { m: 1, d: -2, f: 0, ms: 0, amplitude: -0.58 },
    LunarTerm { m: 0, d: 2, f: 0, ms: 0, amplitude: -0.46 },
];

fn series(terms: &[LunarTerm], m: f64, d: f64, f: f64, ms: f64, use_cos: bool) -> f64 {
    terms
        .iter()
        .map(|term| {
            let arg = f64::from(term.m) * m
                + f64::from(term.d) * d
                + f64::from(term.f) * f
                + f64::from(term.ms) * ms;
            term.amplitude * if use_cos { arg.cos() } else { arg.sin() }
        })
        .sum()
}

/// Geocentric position of the Moon in AU, ecliptic and equinox of date.
///
/// Arguments
/// ---------
/// * `mjd_tt`: epoch as a Modified Julian Date (TT scale).
pub fn geocentric_ecliptic_of_date(mjd_tt: f64) -> Vector3<f64> {
    // Days since 1999-12-31 00:00, the epoch the element polynomials use.
    let d_days = mjd_tt - 51543.0;

    // Sun mean anomaly and longitude of perihelion (for the solar arguments).
    let sun_mean_anom = (356.0470 + 0.9856002585 * d_days).to_radians();
    let sun_peri = (282.9404 + 4.70935e-5 * d_days).to_radians();

    // Lunar mean elements.
    let node = (125.1228 - 0.0529538083 * d_days).to_radians();
    let incl = 5.1454_f64.to_radians();
    let peri = (318.0634 + 0.1643573223 * d_days).to_radians();
    let a = 60.2666; // Earth radii
    let e = 0.054900;
    let mean_anom = (115.3654 + 13.0649929509 * d_days).to_radians();

    // Unperturbed position in the orbital plane.
    let ecc_anom = solve_kepler(mean_anom, e);
    let x = a * (ecc_anom.cos() - e);
    let y = a * (1.0 - e * e).sqrt() * ecc_anom.sin();
    let r0 = x.hypot(y);
    let true_anom = y.atan2(x);

    // Rotate through argument of perigee, inclination and node.
    let u = true_anom + peri;
    let xec = r0 * (node.cos() * u.cos() - node.sin() * u.sin() * incl.cos());
    let yec = r0 * (node.sin() * u.cos() + node.cos() * u.sin() * incl.cos());
    let zec = r0 * (u.sin() * incl.sin());

    let mut lon = yec.atan2(xec);
    let mut lat = (zec / r0).asin();

    // Perturbation arguments.
    let moon_mean_lon = mean_anom + peri + node;
    let sun_mean_lon = sun_mean_anom + sun_peri;
    let elongation = moon_mean_lon - sun_mean_lon;
    let arg_latitude = moon_mean_lon - node;

    lon += series(
        &LONGITUDE_TERMS,
        mean_anom,
        elongation,
        arg_latitude,
        sun_mean_anom,
        false,
    )
    .to_radians();
    lat += series(
        &LATITUDE_TERMS,
        mean_anom,
        elongation,
        arg_latitude,
        sun_mean_anom,
        false,
    )
    .to_radians();
    let r = r0
        + series(
            &DISTANCE_TERMS,
            mean_anom,
            elongation,
            arg_latitude,
            sun_mean_anom,
            true,
        );

    Vector3::new(
        r * ERAU * lat.cos() * lon.cos(),
        r * ERAU * lat.cos() * lon.sin(),
        r * ERAU * lat.sin(),
    )
}
