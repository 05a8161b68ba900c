//! Built-in analytic ephemeris from mean Keplerian elements.
//!
//! Planetary heliocentric positions come from the JPL approximate mean
//! elements (J2000 values plus centennial rates, fit to the 1800–2050
//! interval); the Earth is derived from the Earth–Moon barycenter with the
//! lunar offset removed, the Moon from the truncated series in
//! [`super::moon`], and the Sun is the negated heliocentric Earth vector.
//!
//! Accuracy is of the order of arcminutes over the fit interval — orders of
//! magnitude below what a strict above-the-horizon filter can notice.
//! Light-time, annual aberration and atmospheric refraction are deliberately
//! not modeled.

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{T2000, RADEG};
use crate::observers::Observer;
use crate::ref_system::{ecl_to_equ_j2000, precession, rotmt};
use crate::earth_orientation::obleq;
use crate::skywatch_errors::SkywatchError;
use crate::topocentric::{body_horizontal, Horizontal};

use super::{moon, EphemerisProvider};

/// Ratio m_Moon / (m_Earth + m_Moon): offset of the Earth from the
/// Earth–Moon barycenter, as a fraction of the geocentric lunar vector.
const EMB_MOON_FACTOR: f64 = 0.0123000371 / 1.0123000371;

/// Mean Keplerian elements at J2000 with per-Julian-century rates.
///
/// Angles in degrees, semi-major axis in AU. `mean_lon` is the mean
/// longitude L, `peri_lon` the longitude of perihelion ϖ, `node_lon` the
/// longitude of the ascending node Ω.
struct MeanElements {
    key: &'static str,
    a: f64,
    a_dot: f64,
    e: f64,
    e_dot: f64,
    incl: f64,
    incl_dot: f64,
    mean_lon: f64,
    mean_lon_dot: f64,
    peri_lon: f64,
    peri_lon_dot: f64,
    node_lon: f64,
    node_lon_dot: f64,
}

/// JPL approximate planetary elements (Standish), valid 1800–2050.
///
/// The `"earth"` row is the Earth–Moon barycenter.
#[rustfmt::skip]
const PLANET_ELEMENTS: [MeanElements; 9] = [
    MeanElements { key: "mercury",            a: 0.38709927,  a_dot: 0.00000037,  e: 0.20563593, e_dot: 0.00001906,  incl: 7.00497902,  incl_dot: -0.00594749, mean_lon: 252.25032350, mean_lon_dot: 149472.67411175, peri_lon: 77.45779628,  peri_lon_dot: 0.16047689,  node_lon: 48.33076593,  node_lon_dot: -0.12534081 },
    MeanElements { key: "venus",              a: 0.72333566,  a_dot: 0.00000390,  e: 0.00677672, e_dot: -0.00004107, incl: 3.39467605,  incl_dot: -0.00078890, mean_lon: 181.97909950, mean_lon_dot: 58517.81538729,  peri_lon: 131.60246718, peri_lon_dot: 0.00268329,  node_lon: 76.67984255,  node_lon_dot: -0.27769418 },
    MeanElements { key: "earth",              a: 1.00000261,  a_dot: 0.00000562,  e: 0.01671123, e_dot: -0.00004392, incl: -0.00001531, incl_dot: -0.01294668, mean_lon: 100.46457166, mean_lon_dot: 35999.37244981,  peri_lon: 102.93768193, peri_lon_dot: 0.32327364,  node_lon: 0.0,          node_lon_dot: 0.0 },
    MeanElements { key: "mars",               a: 1.52371034,  a_dot: 0.00001847,  e: 0.09339410, e_dot: 0.00007882,  incl: 1.84969142,  incl_dot: -0.00813131, mean_lon: -4.55343205,  mean_lon_dot: 19140.30268499,  peri_lon: -23.94362959, peri_lon_dot: 0.44441088,  node_lon: 49.55953891,  node_lon_dot: -0.29257343 },
    MeanElements { key: "jupiter barycenter", a: 5.20288700,  a_dot: -0.00011607, e: 0.04838624, e_dot: -0.00013253, incl: 1.30439695,  incl_dot: -0.00183714, mean_lon: 34.39644051,  mean_lon_dot: 3034.74612775,   peri_lon: 14.72847983,  peri_lon_dot: 0.21252668,  node_lon: 100.47390909, node_lon_dot: 0.20469106 },
    MeanElements { key: "saturn barycenter",  a: 9.53667594,  a_dot: -0.00125060, e: 0.05386179, e_dot: -0.00050991, incl: 2.48599187,  incl_dot: 0.00193609,  mean_lon: 49.95424423,  mean_lon_dot: 1222.49362201,   peri_lon: 92.59887831,  peri_lon_dot: -0.41897216, node_lon: 113.66242448, node_lon_dot: -0.28867794 },
    MeanElements { key: "uranus barycenter",  a: 19.18916464, a_dot: -0.00196176, e: 0.04725744, e_dot: -0.00004397, incl: 0.77263783,  incl_dot: -0.00242939, mean_lon: 313.23810451, mean_lon_dot: 428.48202785,    peri_lon: 170.95427630, peri_lon_dot: 0.40805281,  node_lon: 74.01692503,  node_lon_dot: 0.04240589 },
    MeanElements { key: "neptune barycenter", a: 30.06992276, a_dot: 0.00026291,  e: 0.00859048, e_dot: 0.00005105,  incl: 1.77004347,  incl_dot: 0.00035372,  mean_lon: -55.12002969, mean_lon_dot: 218.45945325,    peri_lon: 44.96476227,  peri_lon_dot: -0.32241464, node_lon: 131.78422574, node_lon_dot: -0.00508664 },
    MeanElements { key: "pluto barycenter",   a: 39.48211675, a_dot: -0.00031596, e: 0.24882730, e_dot: 0.00005170,  incl: 17.14001206, incl_dot: 0.00004818,  mean_lon: 238.92903833, mean_lon_dot: 145.20780515,    peri_lon: 224.06891629, peri_lon_dot: -0.04062942, node_lon: 110.30393684, node_lon_dot: -0.01183482 },
];

/// Solve the elliptic Kepler equation `E − e·sin E = M` by Newton iteration.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: M in radians (any branch).
/// * `eccentricity`: orbital eccentricity, `0 <= e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly E in radians.
///
/// Convergence is quadratic from the `M + e·sin M` seed; a dozen iterations
/// cover even Pluto's eccentricity to machine precision.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    const MAX_ITER: usize = 20;
    const TOL: f64 = 1e-13;

    let mut ecc_anom = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..MAX_ITER {
        let delta = (mean_anomaly - (ecc_anom - eccentricity * ecc_anom.sin()))
            / (1.0 - eccentricity * ecc_anom.cos());
        ecc_anom += delta;
        if delta.abs() < TOL {
            break;
        }
    }
    ecc_anom
}

/// Heliocentric position in AU, mean ecliptic and equinox of J2000.
fn heliocentric_ecliptic(elements: &MeanElements, centuries: f64) -> Vector3<f64> {
    let t = centuries;

    let a = elements.a + elements.a_dot * t;
    let e = elements.e + elements.e_dot * t;
    let incl = (elements.incl + elements.incl_dot * t) * RADEG;
    let mean_lon = (elements.mean_lon + elements.mean_lon_dot * t) * RADEG;
    let peri_lon = (elements.peri_lon + elements.peri_lon_dot * t) * RADEG;
    let node_lon = (elements.node_lon + elements.node_lon_dot * t) * RADEG;

    let arg_peri = peri_lon - node_lon;
    let mean_anom = mean_lon - peri_lon;

    let ecc_anom = solve_kepler(mean_anom, e);

    // Position in the orbital plane, perihelion along +x.
    let xp = a * (ecc_anom.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anom.sin();

    let (sin_w, cos_w) = arg_peri.sin_cos();
    let (sin_node, cos_node) = node_lon.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    Vector3::new(
        (cos_w * cos_node - sin_w * sin_node * cos_i) * xp
            + (-sin_w * cos_node - cos_w * sin_node * cos_i) * yp,
        (cos_w * sin_node + sin_w * cos_node * cos_i) * xp
            + (-sin_w * sin_node + cos_w * cos_node * cos_i) * yp,
        sin_w * sin_i * xp + cos_w * sin_i * yp,
    )
}

/// Offline ephemeris provider over the de421-style key set.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianEphemeris;

impl KeplerianEphemeris {
    pub fn new() -> Self {
        KeplerianEphemeris
    }

    /// Geocentric Moon in AU, mean equatorial J2000.
    ///
    /// The lunar series works on the ecliptic of date; the vector is carried
    /// to the J2000 equator through the obliquity of date and the transposed
    /// precession matrix.
    fn moon_equatorial_j2000(mjd_tt: f64) -> Vector3<f64> {
        let ecl_of_date = moon::geocentric_ecliptic_of_date(mjd_tt);
        let equ_of_date = rotmt(obleq(mjd_tt), 0) * ecl_of_date;
        precession(mjd_tt).transpose() * equ_of_date
    }

    /// Heliocentric Earth in AU, mean equatorial J2000: the EM-barycenter
    /// elements with the barycentric lunar offset removed.
    fn earth_equatorial_j2000(mjd_tt: f64) -> Vector3<f64> {
        let centuries = (mjd_tt - T2000) / 36525.0;
        let emb = elements_for("earth").expect("EMB elements present");
        let emb_eq = ecl_to_equ_j2000() * heliocentric_ecliptic(emb, centuries);
        emb_eq - Self::moon_equatorial_j2000(mjd_tt) * EMB_MOON_FACTOR
    }

    /// Geocentric position of `body` in AU, mean equatorial J2000.
    pub fn geocentric_equatorial_j2000(
        body: &str,
        epoch: &Epoch,
    ) -> Result<Vector3<f64>, SkywatchError> {
        let mjd_tt = epoch.to_mjd_tt_days();
        let centuries = (mjd_tt - T2000) / 36525.0;

        match body {
            "moon" => Ok(Self::moon_equatorial_j2000(mjd_tt)),
            "sun" => Ok(-Self::earth_equatorial_j2000(mjd_tt)),
            "earth" => Err(SkywatchError::UnknownBody(
                "no topocentric direction for the observer's own body".into(),
            )),
            key => {
                let elements =
                    elements_for(key).ok_or_else(|| SkywatchError::UnknownBody(key.to_string()))?;
                let helio_eq = ecl_to_equ_j2000() * heliocentric_ecliptic(elements, centuries);
                Ok(helio_eq - Self::earth_equatorial_j2000(mjd_tt))
            }
        }
    }
}

fn elements_for(key: &str) -> Option<&'static MeanElements> {
    PLANET_ELEMENTS.iter().find(|e| e.key == key)
}

impl EphemerisProvider for KeplerianEphemeris {
    fn bodies(&self) -> Vec<String> {
        let mut keys = vec!["sun".to_string(), "moon".to_string(), "earth".to_string()];
        keys.extend(
            PLANET_ELEMENTS
                .iter()
                .filter(|e| e.key != "earth")
                .map(|e| e.key.to_string()),
        );
        keys
    }

    fn observe(
        &self,
        body: &str,
        observer: &Observer,
        epoch: &Epoch,
    ) -> Result<Horizontal, SkywatchError> {
        let geocentric = Self::geocentric_equatorial_j2000(body, epoch)?;
        Ok(body_horizontal(observer, epoch, &geocentric))
    }
}
