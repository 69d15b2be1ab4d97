//! Core domain types for the Wayly washroom-finding system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Facilities (washroom point-of-interest records)
//! - Movement profiles and speeds
//! - Route options and kinds
//! - Filter tags and session views

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Facility Types
// ============================================================================

/// WGS84 position of a facility
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

/// A washroom location record with descriptive and accessibility attributes
///
/// The `base_distance` and `accessibility_score` fields are supplied by the
/// catalog source (a real provider would compute them from geospatial data);
/// the scoring engine consumes them as-is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Facility {
    /// Stable identifier, unique within a catalog
    pub id: u32,
    pub name: String,
    pub location: Location,
    pub women: bool,
    pub men: bool,
    pub unisex: bool,
    pub wheelchair: bool,
    pub diaper_change: bool,
    pub source: String,
    /// Free-text community notes (surfaced in advisories)
    pub notes: String,
    pub address: String,
    /// Display-only; not consumed by core logic
    pub image_url: String,
    /// Straight-line distance from the user in meters, when known
    pub base_distance: Option<f64>,
    /// Accessibility score in [0, 100], when scored
    pub accessibility_score: Option<f64>,
}

impl Facility {
    /// Base distance normalized for scoring: a missing distance sorts as 0
    /// and a negative one is clamped so durations stay well-defined.
    pub fn distance_or_zero(&self) -> f64 {
        self.base_distance.unwrap_or(0.0).max(0.0)
    }

    /// Accessibility score normalized for scoring: missing scores as 0
    pub fn score_or_zero(&self) -> f64 {
        self.accessibility_score.unwrap_or(0.0)
    }
}

// ============================================================================
// Movement Profile Types
// ============================================================================

/// Functional movement needs used to bias routing
///
/// Field order is stable because the serialized form participates in the
/// advisory cache key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MovementNeeds {
    /// Wheelchair, scooter, or stroller
    pub uses_wheels: bool,
    pub avoid_stairs: bool,
    pub prefer_ramps: bool,
    /// Meters before rest is needed; `None` means unlimited
    pub max_walking_distance: Option<f64>,
}

impl Default for MovementNeeds {
    fn default() -> Self {
        Self {
            uses_wheels: false,
            avoid_stairs: false,
            prefer_ramps: false,
            max_walking_distance: Some(1000.0),
        }
    }
}

/// Movement pace selected by the user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    Slow,
    Comfortable,
    Fast,
}

impl Speed {
    /// Scaling factor applied to the 60 m/min walking baseline
    pub fn factor(&self) -> f64 {
        match self {
            Speed::Slow => 0.6,
            Speed::Comfortable => 1.0,
            Speed::Fast => 1.4,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Speed::Slow => "slow",
            Speed::Comfortable => "comfortable",
            Speed::Fast => "fast",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "comfortable" => Ok(Speed::Comfortable),
            "fast" => Ok(Speed::Fast),
            other => Err(format!(
                "unknown speed '{}' (expected slow, comfortable, or fast)",
                other
            )),
        }
    }
}

/// Gender preference for facility selection
///
/// Part of profile identity but not consumed by the scoring engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    Any,
    Men,
    Women,
    Universal,
}

/// The user's full profile: movement needs plus preferences
///
/// Treated as an immutable snapshot; settings edits replace it wholesale.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub movement: MovementNeeds,
    pub speed: Speed,
    pub needs_changing_table: bool,
    pub gender_preference: GenderPreference,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            movement: MovementNeeds::default(),
            speed: Speed::Comfortable,
            needs_changing_table: false,
            gender_preference: GenderPreference::Any,
        }
    }
}

impl UserProfile {
    /// Defensive normalization for profile edits.
    ///
    /// The settings surface is trusted input, so malformed values are
    /// repaired rather than rejected: a non-positive or non-finite max
    /// walking distance becomes unlimited.
    pub fn normalized(mut self) -> Self {
        if let Some(d) = self.movement.max_walking_distance {
            if !d.is_finite() || d <= 0.0 {
                tracing::warn!("Ignoring malformed max walking distance: {}", d);
                self.movement.max_walking_distance = None;
            }
        }
        self
    }
}

// ============================================================================
// Filter Types
// ============================================================================

/// A facility-attribute toggle the user can activate while browsing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FilterTag {
    Women,
    Men,
    Universal,
    Baby,
    Accessible,
}

impl FromStr for FilterTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "women" => Ok(FilterTag::Women),
            "men" => Ok(FilterTag::Men),
            "universal" => Ok(FilterTag::Universal),
            "baby" => Ok(FilterTag::Baby),
            "accessible" => Ok(FilterTag::Accessible),
            other => Err(format!(
                "unknown filter '{}' (expected women, men, universal, baby, or accessible)",
                other
            )),
        }
    }
}

// ============================================================================
// Route Types
// ============================================================================

/// Which of the two route options this is
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    Fastest,
    Accessible,
}

/// A computed route candidate to a facility
///
/// Holds a shared borrow of its destination; the engine never mutates
/// facility state.
#[derive(Clone, Debug, Serialize)]
pub struct RouteOption<'a> {
    pub kind: RouteKind,
    /// Estimated travel time, floored at one minute
    pub duration_minutes: u32,
    /// Estimated path length in meters
    pub distance_m: f64,
    pub description: &'static str,
    /// Display color (cosmetic)
    pub color: &'static str,
    pub target: &'a Facility,
}

/// The pair of route options produced by every scoring pass
#[derive(Clone, Debug, Serialize)]
pub struct RoutePair<'a> {
    pub fastest: RouteOption<'a>,
    pub accessible: RouteOption<'a>,
}

// ============================================================================
// Session Types
// ============================================================================

/// Which surface of the app the session is currently on
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    Browsing,
    Routing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_session_start() {
        let profile = UserProfile::default();
        assert!(!profile.movement.uses_wheels);
        assert!(!profile.movement.avoid_stairs);
        assert!(!profile.movement.prefer_ramps);
        assert_eq!(profile.movement.max_walking_distance, Some(1000.0));
        assert_eq!(profile.speed, Speed::Comfortable);
        assert_eq!(profile.gender_preference, GenderPreference::Any);
    }

    #[test]
    fn test_normalized_clamps_bad_distance() {
        let mut profile = UserProfile::default();
        profile.movement.max_walking_distance = Some(-50.0);
        assert_eq!(profile.normalized().movement.max_walking_distance, None);

        let mut profile = UserProfile::default();
        profile.movement.max_walking_distance = Some(f64::NAN);
        assert_eq!(profile.normalized().movement.max_walking_distance, None);
    }

    #[test]
    fn test_normalized_keeps_valid_distance() {
        let profile = UserProfile::default().normalized();
        assert_eq!(profile.movement.max_walking_distance, Some(1000.0));
    }

    #[test]
    fn test_speed_parsing() {
        assert_eq!("slow".parse::<Speed>().unwrap(), Speed::Slow);
        assert_eq!("FAST".parse::<Speed>().unwrap(), Speed::Fast);
        assert!("jogging".parse::<Speed>().is_err());
    }

    #[test]
    fn test_filter_tag_parsing() {
        assert_eq!("accessible".parse::<FilterTag>().unwrap(), FilterTag::Accessible);
        assert!("sauna".parse::<FilterTag>().is_err());
    }

    #[test]
    fn test_distance_or_zero_normalizes() {
        let mut facility = Facility {
            id: 1,
            name: "Test".into(),
            location: Location { lon: 0.0, lat: 0.0 },
            women: true,
            men: true,
            unisex: false,
            wheelchair: false,
            diaper_change: false,
            source: "Manual".into(),
            notes: String::new(),
            address: String::new(),
            image_url: String::new(),
            base_distance: None,
            accessibility_score: None,
        };
        assert_eq!(facility.distance_or_zero(), 0.0);

        facility.base_distance = Some(-10.0);
        assert_eq!(facility.distance_or_zero(), 0.0);

        facility.base_distance = Some(320.0);
        assert_eq!(facility.distance_or_zero(), 320.0);
    }
}
