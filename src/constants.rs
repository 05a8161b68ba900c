//! # Constants and type definitions for skywatch
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `skywatch` library.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, hours ↔ radians)
//! - Core type aliases used across the crate
//! - The fixed planet-name set and default catalog brightness limit
//!
//! These definitions are used by the frame transformations, the built-in ephemeris, and the
//! visibility engine.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Hours of right ascension → radians
pub const RADH: f64 = DPI / 24.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth equatorial radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Right ascension in hours
pub type Hour = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Hipparcos catalog identifier
pub type HipId = u32;

// -------------------------------------------------------------------------------------------------
// Visibility configuration
// -------------------------------------------------------------------------------------------------

/// Apparent magnitude threshold below which a catalog star is considered bright.
///
/// Stars with magnitude strictly less than this value pass the default
/// catalog filter. Lower magnitude means brighter, so 2.0 keeps roughly the
/// fifty brightest stars of the sky.
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 2.0;

/// Display names classified as planets when deriving an object kind.
///
/// "Earth" is listed for completeness even though the engine never queries
/// the observer's own body; Pluto keeps its historical slot because the
/// de421-style key set carries a `pluto barycenter` entry.
pub const PLANET_NAMES: [&str; 9] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
];
