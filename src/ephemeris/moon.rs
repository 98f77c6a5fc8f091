//! Low-precision geocentric Moon.
//!
//! Truncated trigonometric series in the fundamental lunar arguments, accurate to a
//! few arcminutes in longitude and latitude and a few hundred kilometers in distance.
//! Output is referred to the mean ecliptic and equinox **of date**.

use nalgebra::Vector3;

use crate::constants::{JulianCenturies, AU, DPI, RADSEC};

/// Geocentric Moon position in **AU**, mean ecliptic of date.
pub(crate) fn geocentric_ecliptic_of_date(t: JulianCenturies) -> Vector3<f64> {
    let frac = |x: f64| x - x.floor();

    // Mean longitude (revolutions) and fundamental arguments (radians)
    let l0 = frac(0.606433 + 1336.855225 * t);
    let l = DPI * frac(0.374897 + 1325.552410 * t);
    let ls = DPI * frac(0.993133 + 99.997361 * t);
    let d = DPI * frac(0.827361 + 1236.853086 * t);
    let f = DPI * frac(0.259086 + 1342.227825 * t);

    // Perturbations in longitude, arcseconds
    let dl = 22640.0 * l.sin() - 4586.0 * (l - 2.0 * d).sin() + 2370.0 * (2.0 * d).sin()
        + 769.0 * (2.0 * l).sin()
        - 668.0 * ls.sin()
        - 412.0 * (2.0 * f).sin()
        - 212.0 * (2.0 * l - 2.0 * d).sin()
        - 206.0 * (l + ls - 2.0 * d).sin()
        + 192.0 * (l + 2.0 * d).sin()
        - 165.0 * (ls - 2.0 * d).sin()
        - 125.0 * d.sin()
        - 110.0 * (l + ls).sin()
        + 148.0 * (l - ls).sin()
        - 55.0 * (2.0 * f - 2.0 * d).sin();

    // Latitude
    let s = f + (dl + 412.0 * (2.0 * f).sin() + 541.0 * ls.sin()) * RADSEC;
    let h = f - 2.0 * d;
    let n = -526.0 * h.sin() + 44.0 * (l + h).sin() - 31.0 * (-l + h).sin()
        - 23.0 * (ls + h).sin()
        + 11.0 * (-ls + h).sin()
        - 25.0 * (-2.0 * l + f).sin()
        + 21.0 * (-l + f).sin();

    let longitude = DPI * frac(l0 + dl / 1_296_000.0);
    let latitude = (18520.0 * s.sin() + n) * RADSEC;

    // Distance, kilometers
    let distance = 385_000.56 - 20_905.36 * l.cos() - 3_699.11 * (2.0 * d - l).cos()
        - 2_955.97 * (2.0 * d).cos()
        - 569.93 * (2.0 * l).cos()
        + 246.16 * (2.0 * l - 2.0 * d).cos()
        - 204.59 * (ls - 2.0 * d).cos()
        - 170.73 * (l + 2.0 * d).cos()
        - 152.14 * (l + ls - 2.0 * d).cos();

    let r = distance / AU;
    let (sb, cb) = latitude.sin_cos();
    let (sl, cl) = longitude.sin_cos();
    Vector3::new(r * cb * cl, r * cb * sl, r * sb)
}
