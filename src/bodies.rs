//! # Tracked bodies, body groups and daily checkpoints
//!
//! The pipeline addresses every altitude by a `(day, body, checkpoint)` triple. This
//! module defines the two closed vocabularies used in those triples, [`Body`] and
//! [`Checkpoint`], plus the [`BodyGroup`] partition used when counting.
//!
//! ```text
//! visible     = Mercury, Venus, Mars, Jupiter, Saturn
//! telescopic  = Uranus, Neptune
//! moon        = Moon
//! all         = visible ∪ telescopic ∪ moon
//! ```
//!
//! The groups `visible`, `telescopic` and `moon` are disjoint and cover [`Body::ALL`],
//! so per-group counts always add up to the `all` count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parade_errors::ParadeError;

/// A solar-system body whose altitude is sampled at each checkpoint.
///
/// Jupiter, Saturn, Uranus and Neptune stand for their system barycenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Moon,
}

impl Body {
    /// Every tracked body, in reporting order.
    pub const ALL: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Moon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Moon => "Moon",
        }
    }

    /// The disjoint group (never [`BodyGroup::All`]) this body belongs to.
    pub fn group(&self) -> BodyGroup {
        match self {
            Body::Mercury | Body::Venus | Body::Mars | Body::Jupiter | Body::Saturn => {
                BodyGroup::Visible
            }
            Body::Uranus | Body::Neptune => BodyGroup::Telescopic,
            Body::Moon => BodyGroup::Moon,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = ParadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(" Barycenter");
        Body::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParadeError::InvalidConfiguration(format!("unknown body '{s}'")))
    }
}

/// Named partition of the tracked bodies used for aggregate counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyGroup {
    Visible,
    Telescopic,
    Moon,
    All,
}

impl BodyGroup {
    pub const ALL: [BodyGroup; 4] = [
        BodyGroup::Visible,
        BodyGroup::Telescopic,
        BodyGroup::Moon,
        BodyGroup::All,
    ];

    pub fn members(&self) -> &'static [Body] {
        match self {
            BodyGroup::Visible => &Body::ALL[0..5],
            BodyGroup::Telescopic => &Body::ALL[5..7],
            BodyGroup::Moon => &Body::ALL[7..8],
            BodyGroup::All => &Body::ALL,
        }
    }

    pub fn contains(&self, body: Body) -> bool {
        matches!(self, BodyGroup::All) || body.group() == *self
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyGroup::Visible => "visible",
            BodyGroup::Telescopic => "telescopic",
            BodyGroup::Moon => "moon",
            BodyGroup::All => "all",
        }
    }
}

impl fmt::Display for BodyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the four daily instants at which altitudes are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Checkpoint {
    /// Sunrise minus the twilight offset.
    Morning,
    /// Sunset plus the twilight offset.
    Evening,
    Sunrise,
    Sunset,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 4] = [
        Checkpoint::Morning,
        Checkpoint::Evening,
        Checkpoint::Sunrise,
        Checkpoint::Sunset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Checkpoint::Morning => "morning",
            Checkpoint::Evening => "evening",
            Checkpoint::Sunrise => "sunrise",
            Checkpoint::Sunset => "sunset",
        }
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod bodies_test {
    use super::*;

    #[test]
    fn test_groups_partition_all_bodies() {
        let mut seen: Vec<Body> = [BodyGroup::Visible, BodyGroup::Telescopic, BodyGroup::Moon]
            .iter()
            .flat_map(|g| g.members().iter().copied())
            .collect();
        seen.sort();
        assert_eq!(seen, Body::ALL.to_vec());
        assert_eq!(BodyGroup::All.members().len(), 8);
    }

    #[test]
    fn test_group_membership() {
        assert_eq!(BodyGroup::Visible.members().len(), 5);
        assert!(BodyGroup::Telescopic.contains(Body::Neptune));
        assert!(!BodyGroup::Telescopic.contains(Body::Saturn));
        assert!(BodyGroup::All.contains(Body::Moon));
        for body in Body::ALL {
            assert!(body.group().members().contains(&body));
        }
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("jupiter".parse::<Body>().unwrap(), Body::Jupiter);
        assert_eq!("Saturn Barycenter".parse::<Body>().unwrap(), Body::Saturn);
        assert!("Pluto".parse::<Body>().is_err());
    }
}
