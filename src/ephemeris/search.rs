//! Discrete crossing search.
//!
//! A scalar function of time is sampled on a regular grid over a [`TimeRange`]; every
//! pair of consecutive samples whose sign differs brackets a crossing, which is then
//! refined with Brent's method. The step must be shorter than the shortest interval
//! between two crossings (one hour is safe for rise/set of the Sun, Moon and planets).

use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use roots::{find_root_brent, SimpleConvergency};

use super::TimeRange;
use crate::parade_errors::ParadeError;

/// Direction of a zero crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Crossing {
    pub instant: DateTime<Utc>,
    /// `true` when the function goes from negative to non-negative.
    pub rising: bool,
}

fn offset(seconds: f64) -> Duration {
    Duration::milliseconds((seconds * 1000.0).round() as i64)
}

/// Find every zero crossing of `f` inside `range`, in time order.
pub(crate) fn find_crossings<F>(
    range: &TimeRange,
    step: Duration,
    f: F,
) -> Result<Vec<Crossing>, ParadeError>
where
    F: Fn(&DateTime<Utc>) -> Result<f64, ParadeError>,
{
    if step <= Duration::zero() {
        return Err(ParadeError::InvalidConfiguration(
            "search step must be positive".into(),
        ));
    }

    let mut grid = Vec::new();
    let mut t = range.start;
    while t < range.end {
        grid.push((t, f(&t)?));
        t += step;
    }
    grid.push((range.end, f(&range.end)?));

    let mut crossings = Vec::new();
    for ((ta, fa), (tb, fb)) in grid.into_iter().tuple_windows() {
        let rising = fa < 0.0 && fb >= 0.0;
        let setting = fa >= 0.0 && fb < 0.0;
        if !(rising || setting) {
            continue;
        }

        let width = (tb - ta).num_milliseconds() as f64 / 1000.0;
        let mut failure: Option<ParadeError> = None;
        let mut g = |s: f64| match f(&(ta + offset(s))) {
            Ok(v) => v,
            Err(e) => {
                failure.get_or_insert(e);
                0.0
            }
        };
        let mut tol = SimpleConvergency {
            eps: 1e-4,
            max_iter: 100,
        };
        let root = find_root_brent(0.0, width, &mut g, &mut tol)?;
        if let Some(e) = failure {
            return Err(e);
        }

        let instant = ta + offset(root);
        if range.contains(&instant) {
            crossings.push(Crossing { instant, rising });
        }
    }

    Ok(crossings)
}
