use nalgebra::{Matrix3, Vector3};

use crate::constants::{JulianCenturies, Radian, RADEG, RADSEC};

/// Mean obliquity of the ecliptic (IAU 1976), in radians.
///
/// Arguments
/// ---------
/// * `t`: Julian centuries since J2000.0 (TT).
///
/// Formula
/// -------
/// ```text
/// ε(t) = 84381.448″ − 46.8150″·T − 0.00059″·T² + 0.001813″·T³
/// ```
pub fn obleq(t: JulianCenturies) -> Radian {
    const OB0: f64 = 84381.448;
    const OB1: f64 = -46.8150;
    const OB2: f64 = -0.00059;
    const OB3: f64 = 0.001813;

    (((OB3 * t + OB2) * t + OB1) * t + OB0) * RADSEC
}

/// Rotate an ecliptic vector into the equatorial frame sharing the same equinox.
pub fn ecliptic_to_equatorial(v: &Vector3<f64>, obliquity: Radian) -> Vector3<f64> {
    let (s, c) = obliquity.sin_cos();
    Vector3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// IAU 1976 precession matrix from the mean equator and equinox of J2000 to the
/// mean equator and equinox of date.
///
/// The three Lieske angles ζ, z and θ are cubic polynomials in Julian centuries;
/// the matrix is `R3(−z) · R2(θ) · R3(−ζ)` written out explicitly.
pub fn precession_matrix(t: JulianCenturies) -> Matrix3<f64> {
    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    let (sz, cz) = zeta.sin_cos();
    let (sz2, cz2) = z.sin_cos();
    let (st, ct) = theta.sin_cos();

    Matrix3::new(
        cz * cz2 * ct - sz * sz2,
        -sz * cz2 * ct - cz * sz2,
        -cz2 * st,
        cz * sz2 * ct + sz * cz2,
        -sz * sz2 * ct + cz * cz2,
        -sz2 * st,
        cz * st,
        -sz * st,
        ct,
    )
}
