//! # Analytic ephemeris
//!
//! [`AnalyticEphemeris`] is a self-contained [`EphemerisOracle`]: no ephemeris file is
//! downloaded or read, every position is evaluated from closed-form series.
//!
//! ## Pipeline for one query
//!
//! ```text
//! UTC instant ──hifitime──▶ T (Julian centuries, TT)
//!   planets : Kepler elements ─▶ heliocentric ecliptic J2000 ─▶ geocentric (light-time)
//!             ─▶ equatorial J2000 ─▶ precession ─▶ equator of date
//!   Sun     : −(Earth-Moon barycenter)  then as planets
//!   Moon    : lunar series ─▶ ecliptic of date ─▶ equator of date
//! UTC instant ─▶ GMST ─▶ LST ─▶ observer position ─▶ topocentric vector ─▶ altitude
//! ```
//!
//! Altitudes are geometric (no refraction). Rise and set searches use the usual
//! depressed horizons instead: see [`SUN_HORIZON`], [`MOON_HORIZON`] and
//! [`PLANET_HORIZON`].
//!
//! ## Accuracy
//!
//! A few arcminutes for the Sun and the Moon, up to ~10′ for the outer planets over
//! 1800–2200, i.e. rise/set instants good to a minute or so. This is well below the
//! resolution needed to count bodies above a horizon at fixed checkpoints.

use chrono::{DateTime, Duration, Utc};
use nalgebra::Vector3;

use super::kepler::{heliocentric_ecliptic, Planet};
use super::moon::geocentric_ecliptic_of_date;
use super::search::find_crossings;
use super::{EphemerisOracle, SunEvent, TimeRange};
use crate::bodies::Body;
use crate::constants::{
    Degree, JulianCenturies, DAYS_PER_CENTURY, MOON_HORIZON, PLANET_HORIZON, SUN_HORIZON,
    VLIGHT_AU,
};
use crate::earth_orientation::{ecliptic_to_equatorial, obleq, precession_matrix};
use crate::observers::Observer;
use crate::parade_errors::ParadeError;
use crate::time::{gmst, julian_centuries_tt, mjd_ut};

/// Default grid step of the rise/set scan.
const DEFAULT_SCAN_STEP_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Sun,
    Body(Body),
}

impl Target {
    fn horizon(&self) -> Degree {
        match self {
            Target::Sun => SUN_HORIZON,
            Target::Body(Body::Moon) => MOON_HORIZON,
            Target::Body(_) => PLANET_HORIZON,
        }
    }
}

fn planet_of(body: Body) -> Option<Planet> {
    match body {
        Body::Mercury => Some(Planet::Mercury),
        Body::Venus => Some(Planet::Venus),
        Body::Mars => Some(Planet::Mars),
        Body::Jupiter => Some(Planet::Jupiter),
        Body::Saturn => Some(Planet::Saturn),
        Body::Uranus => Some(Planet::Uranus),
        Body::Neptune => Some(Planet::Neptune),
        Body::Moon => None,
    }
}

/// Low-precision analytic ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticEphemeris {
    scan_step: Duration,
}

impl Default for AnalyticEphemeris {
    fn default() -> Self {
        AnalyticEphemeris {
            scan_step: Duration::minutes(DEFAULT_SCAN_STEP_MINUTES),
        }
    }
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the grid step of the rise/set scan.
    ///
    /// The step must stay below the shortest interval between a rise and the following
    /// set; steps longer than a few hours can miss short appearances near the poles.
    pub fn with_scan_step(mut self, step: Duration) -> Self {
        self.scan_step = step;
        self
    }

    pub fn scan_step(&self) -> Duration {
        self.scan_step
    }

    /// Geocentric position of the target, mean equator and equinox of date, in AU.
    fn geocentric_of_date(
        &self,
        target: Target,
        t: JulianCenturies,
    ) -> Result<Vector3<f64>, ParadeError> {
        let planet = match target {
            Target::Body(Body::Moon) => {
                let ecl = geocentric_ecliptic_of_date(t);
                return Ok(ecliptic_to_equatorial(&ecl, obleq(t)));
            }
            Target::Sun => None,
            Target::Body(body) => planet_of(body),
        };

        let earth = heliocentric_ecliptic(Planet::EarthMoonBary, t)?;
        let ecl_j2000 = match planet {
            None => -earth,
            Some(planet) => {
                // One light-time iteration is enough at these accuracies
                let geometric = heliocentric_ecliptic(planet, t)? - earth;
                let tau = geometric.norm() / VLIGHT_AU / DAYS_PER_CENTURY;
                heliocentric_ecliptic(planet, t - tau)? - earth
            }
        };

        let eq_j2000 = ecliptic_to_equatorial(&ecl_j2000, obleq(0.0));
        Ok(precession_matrix(t) * eq_j2000)
    }

    fn altitude(
        &self,
        target: Target,
        instant: &DateTime<Utc>,
        observer: &Observer,
    ) -> Result<Degree, ParadeError> {
        let t = julian_centuries_tt(instant);
        let geocentric = self.geocentric_of_date(target, t)?;

        let lst = observer.local_sidereal_time(gmst(mjd_ut(instant)));
        let topocentric = geocentric - observer.geocentric_position(lst);
        Ok(observer.altitude_of(&topocentric, lst))
    }

    fn crossings(
        &self,
        target: Target,
        range: &TimeRange,
        observer: &Observer,
    ) -> Result<Vec<(DateTime<Utc>, bool)>, ParadeError> {
        let horizon = target.horizon();
        let crossings = find_crossings(range, self.scan_step, |instant| {
            Ok(self.altitude(target, instant, observer)? - horizon)
        })
        .map_err(unavailable)?;
        Ok(crossings
            .into_iter()
            .map(|c| (c.instant, c.rising))
            .collect())
    }
}

/// A root search that did not converge means the oracle could not answer.
fn unavailable(err: ParadeError) -> ParadeError {
    match err {
        ParadeError::RootFindingError(e) => {
            ParadeError::OracleUnavailable(format!("crossing search failed: {e}"))
        }
        other => other,
    }
}

impl EphemerisOracle for AnalyticEphemeris {
    fn find_sunrise_sunset(
        &self,
        range: &TimeRange,
        observer: &Observer,
    ) -> Result<Vec<SunEvent>, ParadeError> {
        Ok(self
            .crossings(Target::Sun, range, observer)?
            .into_iter()
            .map(|(instant, is_rise)| SunEvent { instant, is_rise })
            .collect())
    }

    fn find_risings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
        Ok(self
            .crossings(Target::Body(body), range, observer)?
            .into_iter()
            .filter_map(|(instant, rising)| rising.then_some(instant))
            .collect())
    }

    fn find_settings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<Vec<DateTime<Utc>>, ParadeError> {
        Ok(self
            .crossings(Target::Body(body), range, observer)?
            .into_iter()
            .filter_map(|(instant, rising)| (!rising).then_some(instant))
            .collect())
    }

    fn find_risings_and_settings(
        &self,
        range: &TimeRange,
        body: Body,
        observer: &Observer,
    ) -> Result<(Vec<DateTime<Utc>>, Vec<DateTime<Utc>>), ParadeError> {
        let (rises, sets): (Vec<_>, Vec<_>) = self
            .crossings(Target::Body(body), range, observer)?
            .into_iter()
            .partition(|(_, rising)| *rising);
        Ok((
            rises.into_iter().map(|(instant, _)| instant).collect(),
            sets.into_iter().map(|(instant, _)| instant).collect(),
        ))
    }

    fn apparent_altitude(
        &self,
        instant: &DateTime<Utc>,
        observer: &Observer,
        body: Body,
    ) -> Result<Degree, ParadeError> {
        self.altitude(Target::Body(body), instant, observer)
    }
}
