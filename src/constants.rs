//! # Constants and type definitions for planetary_parade
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **common type aliases** used throughout the crate, plus the default values of the
//! run configuration (observer site, twilight offset, treeline angle).
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, AU ↔ km)
//! - Core type aliases used across the crate
//! - Horizon depressions used for rise/set detection
//! - Defaults of [`ParadeConfig`](crate::config::ParadeConfig)

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Horizons used by the rise/set searches
// -------------------------------------------------------------------------------------------------

/// Altitude of the Sun's center at sunrise/sunset: 34' refraction + 16' semi-diameter.
pub const SUN_HORIZON: Degree = -50.0 / 60.0;

/// Altitude of the Moon's center at moonrise/moonset (refraction + mean semi-diameter).
pub const MOON_HORIZON: Degree = -50.0 / 60.0;

/// Altitude of a point-like planet at rise/set (refraction only).
pub const PLANET_HORIZON: Degree = -34.0 / 60.0;

// -------------------------------------------------------------------------------------------------
// Run defaults
// -------------------------------------------------------------------------------------------------

pub const DEFAULT_START_YEAR: i32 = 1800;
pub const DEFAULT_END_YEAR: i32 = 2199;
pub const DEFAULT_DUSK_MINUTES: i64 = 30;
pub const DEFAULT_LATITUDE: Degree = 32.27;
pub const DEFAULT_LONGITUDE: Degree = -79.94;
pub const DEFAULT_ELEVATION: Meter = 100.0;
pub const DEFAULT_TREELINE: Degree = 10.0;
pub const DEFAULT_TIMEZONE: &str = "US/Eastern";

/// Days added on each side of the requested range before searching for sun events.
pub const DEFAULT_PAD_DAYS: u32 = 1;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Julian centuries elapsed since J2000.0 (TT)
pub type JulianCenturies = f64;
