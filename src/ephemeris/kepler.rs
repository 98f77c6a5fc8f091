//! Heliocentric planet positions from mean Keplerian elements.
//!
//! Elements and rates are those of the JPL "approximate positions of the planets"
//! fit valid from 3000 BC to 3000 AD (mean ecliptic and equinox of J2000), including
//! the additional mean-anomaly terms `b·T² + c·cos(f·T) + s·sin(f·T)` for the outer
//! planets.

use nalgebra::Vector3;
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::{JulianCenturies, RADEG};
use crate::parade_errors::ParadeError;

/// Bodies for which a Keplerian element set is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Planet {
    Mercury,
    Venus,
    EarthMoonBary,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Value at J2000 and rate per Julian century.
type Rated = (f64, f64);

/// Units: `a` in AU, `e` unitless, angles in degrees.
struct ElementSet {
    semi_major_axis: Rated,
    eccentricity: Rated,
    inclination: Rated,
    mean_longitude: Rated,
    perihelion_longitude: Rated,
    node_longitude: Rated,
    /// `(b, c, s, f)` corrections to the mean anomaly, in degrees.
    extra: Option<(f64, f64, f64, f64)>,
}

impl Planet {
    fn elements(&self) -> ElementSet {
        match self {
            Planet::Mercury => ElementSet {
                semi_major_axis: (0.38709843, 0.0),
                eccentricity: (0.20563661, 0.00002123),
                inclination: (7.00559432, -0.00590158),
                mean_longitude: (252.25166724, 149472.67486623),
                perihelion_longitude: (77.45771895, 0.15940013),
                node_longitude: (48.33961819, -0.12214182),
                extra: None,
            },
            Planet::Venus => ElementSet {
                semi_major_axis: (0.72332102, -0.00000026),
                eccentricity: (0.00676399, -0.00005107),
                inclination: (3.39777545, 0.00043494),
                mean_longitude: (181.97970850, 58517.81560260),
                perihelion_longitude: (131.76755713, 0.05679648),
                node_longitude: (76.67261496, -0.27274174),
                extra: None,
            },
            Planet::EarthMoonBary => ElementSet {
                semi_major_axis: (1.00000018, -0.00000003),
                eccentricity: (0.01673163, -0.00003661),
                inclination: (-0.00054346, -0.01337178),
                mean_longitude: (100.46691572, 35999.37306329),
                perihelion_longitude: (102.93005885, 0.31795260),
                node_longitude: (-5.11260389, -0.24123856),
                extra: None,
            },
            Planet::Mars => ElementSet {
                semi_major_axis: (1.52371243, 0.00000097),
                eccentricity: (0.09336511, 0.00009149),
                inclination: (1.85181869, -0.00724757),
                mean_longitude: (-4.56813164, 19140.29934243),
                perihelion_longitude: (-23.91744784, 0.45223625),
                node_longitude: (49.71320984, -0.26852431),
                extra: None,
            },
            Planet::Jupiter => ElementSet {
                semi_major_axis: (5.20248019, -0.00002864),
                eccentricity: (0.04853590, 0.00018026),
                inclination: (1.29861416, -0.00322699),
                mean_longitude: (34.33479152, 3034.90371757),
                perihelion_longitude: (14.27495244, 0.18199196),
                node_longitude: (100.29282654, 0.13024619),
                extra: Some((-0.00012452, 0.06064060, -0.35635438, 38.35125000)),
            },
            Planet::Saturn => ElementSet {
                semi_major_axis: (9.54149883, -0.00003065),
                eccentricity: (0.05550825, -0.00032044),
                inclination: (2.49424102, 0.00451969),
                mean_longitude: (50.07571329, 1222.11494724),
                perihelion_longitude: (92.86136063, 0.54179478),
                node_longitude: (113.63998702, -0.25015002),
                extra: Some((0.00025899, -0.13434469, 0.87320147, 38.35125000)),
            },
            Planet::Uranus => ElementSet {
                semi_major_axis: (19.18797948, -0.00020455),
                eccentricity: (0.04685740, -0.00001550),
                inclination: (0.77298127, -0.00180155),
                mean_longitude: (314.20276625, 428.49512595),
                perihelion_longitude: (172.43404441, 0.09266985),
                node_longitude: (73.96250215, 0.05739699),
                extra: Some((0.00058331, -0.97731848, 0.17689245, 7.67025000)),
            },
            Planet::Neptune => ElementSet {
                semi_major_axis: (30.06952752, 0.00006447),
                eccentricity: (0.00895439, 0.00000818),
                inclination: (1.77005520, 0.00022400),
                mean_longitude: (304.22289287, 218.46515314),
                perihelion_longitude: (46.68158724, 0.01009938),
                node_longitude: (131.78635853, -0.00606302),
                extra: Some((-0.00041348, 0.68346318, -0.10162547, 7.67025000)),
            },
        }
    }
}

fn at(rated: Rated, t: JulianCenturies) -> f64 {
    rated.0 + rated.1 * t
}

/// Solve Kepler's equation `E − e·sin E = M` (radians) with Newton-Raphson.
pub(crate) fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, ParadeError> {
    let f = |ecc_anomaly: f64| ecc_anomaly - eccentricity * ecc_anomaly.sin() - mean_anomaly;
    let df = |ecc_anomaly: f64| 1.0 - eccentricity * ecc_anomaly.cos();

    let x0 = mean_anomaly + eccentricity * mean_anomaly.sin();
    let mut tol = SimpleConvergency {
        eps: 1e-12,
        max_iter: 50,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Heliocentric position in **AU**, mean ecliptic and equinox of J2000.
pub(crate) fn heliocentric_ecliptic(
    planet: Planet,
    t: JulianCenturies,
) -> Result<Vector3<f64>, ParadeError> {
    let el = planet.elements();

    let a = at(el.semi_major_axis, t);
    let e = at(el.eccentricity, t);
    let incl = at(el.inclination, t) * RADEG;
    let mean_lon = at(el.mean_longitude, t);
    let peri_lon = at(el.perihelion_longitude, t);
    let node = at(el.node_longitude, t);

    let mut mean_anomaly = mean_lon - peri_lon;
    if let Some((b, c, s, f)) = el.extra {
        let ft = (f * t) * RADEG;
        mean_anomaly += b * t * t + c * ft.cos() + s * ft.sin();
    }
    // Reduce to [-180, 180] before solving
    let mean_anomaly = ((mean_anomaly + 180.0).rem_euclid(360.0) - 180.0) * RADEG;

    let ecc_anomaly = solve_kepler(mean_anomaly, e)?;

    // Position in the orbital plane, x towards perihelion
    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let omega = (peri_lon - node) * RADEG;
    let node = node * RADEG;
    let (so, co) = omega.sin_cos();
    let (sn, cn) = node.sin_cos();
    let (si, ci) = incl.sin_cos();

    Ok(Vector3::new(
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        (so * si) * xp + (co * si) * yp,
    ))
}
