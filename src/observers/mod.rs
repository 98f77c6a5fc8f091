//! # Observer & site geometry
//!
//! This module holds the single fixed observer of a run and the geometry needed to
//! turn a geocentric direction into a local altitude:
//!
//! - [`Observer`] stores the geodetic site (latitude, longitude, elevation) together with
//!   its precomputed **geocentric parallax coordinates** (ρ·cosφ', ρ·sinφ').
//! - [`Observer::geocentric_position`] rotates the site with the local sidereal time to
//!   give its position in the **mean equator of date** frame, in AU.
//! - [`Observer::altitude_of`] measures the altitude of a topocentric vector above the
//!   **geodetic** horizon plane.
//!
//! ```text
//! geodetic (φ, λ, h) --(ellipsoid)--> (ρ·cosφ', ρ·sinφ') --(LST)--> geocentric equatorial of date
//! ```
//!
//! ## Units
//!
//! - Latitude / longitude: **degrees** (north / east positive).
//! - Elevation: **meters** above the reference ellipsoid.
//! - Parallax coordinates: **Earth radii**.
//! - Positions: **AU**.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Meter, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU};
use crate::parade_errors::ParadeError;

/// Fixed observing site.
///
/// See also
/// ------------
/// * [`geodetic_to_parallax`] – Converts geodetic latitude/elevation to (ρ·cosφ', ρ·sinφ').
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude in **degrees**, north positive.
    pub latitude: Degree,

    /// Geodetic longitude in **degrees**, east positive.
    pub longitude: Degree,

    /// Height above the reference ellipsoid in **meters**.
    pub elevation: Meter,

    /// Optional human-readable site name.
    pub name: Option<String>,

    rho_cos_phi: f64,
    rho_sin_phi: f64,
}

impl Observer {
    /// Create an observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Geodetic latitude in **degrees**, within `[-90, 90]`.
    /// * `longitude`: Geodetic longitude in **degrees**, within `[-180, 360]`.
    /// * `elevation`: Height above the ellipsoid in **meters**.
    /// * `name`: Optional site name.
    ///
    /// Errors
    /// ----------
    /// * [`ParadeError::InvalidConfiguration`] for non-finite or out-of-range inputs.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, ParadeError> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(ParadeError::InvalidConfiguration(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=360.0).contains(&longitude) {
            return Err(ParadeError::InvalidConfiguration(format!(
                "longitude {longitude} is outside [-180, 360]"
            )));
        }
        if !elevation.is_finite() {
            return Err(ParadeError::InvalidConfiguration(format!(
                "elevation {elevation} is not finite"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);
        Ok(Observer {
            latitude,
            longitude,
            elevation,
            name,
            rho_cos_phi,
            rho_sin_phi,
        })
    }

    pub fn rho_cos_phi(&self) -> f64 {
        self.rho_cos_phi
    }

    pub fn rho_sin_phi(&self) -> f64 {
        self.rho_sin_phi
    }

    /// Local mean sidereal time from the Greenwich mean sidereal time, in `[0, 2π)`.
    pub fn local_sidereal_time(&self, gmst: Radian) -> Radian {
        (gmst + self.longitude.to_radians()).rem_euclid(std::f64::consts::TAU)
    }

    /// Geocentric position of the site in the mean equator of date frame, in **AU**.
    pub fn geocentric_position(&self, lst: Radian) -> Vector3<f64> {
        Vector3::new(
            ERAU * self.rho_cos_phi * lst.cos(),
            ERAU * self.rho_cos_phi * lst.sin(),
            ERAU * self.rho_sin_phi,
        )
    }

    /// Altitude in **degrees** of a topocentric vector (equator of date) above the
    /// geodetic horizon, for the local sidereal time `lst`.
    pub fn altitude_of(&self, topocentric: &Vector3<f64>, lst: Radian) -> Degree {
        let lat = self.latitude.to_radians();
        let zenith = Vector3::new(lat.cos() * lst.cos(), lat.cos() * lst.sin(), lat.sin());
        let sin_alt = zenith.dot(topocentric) / topocentric.norm();
        sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
    }
}

/// Convert geodetic latitude (radians) and height (meters) into normalized
/// parallax coordinates `(ρ·cosφ', ρ·sinφ')`, accounting for Earth oblateness.
pub fn lat_alt_to_parallax(lat: Radian, height: Meter) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // Parametric (reduced) latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Degree-based wrapper around [`lat_alt_to_parallax`].
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
