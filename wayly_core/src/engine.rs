//! Route scoring engine for selecting the fastest and most accessible
//! destinations.
//!
//! This module implements the route derivation logic:
//! - Duration estimates from a 60 m/min walking baseline, scaled by the
//!   profile's speed and movement factors
//! - Fastest route: minimum base distance, first-in-catalog tie break
//! - Accessible route: wheelchair facilities first when stairs are
//!   avoided, then descending accessibility score, with inflated
//!   distance/duration to model the longer barrier-avoiding path
//!
//! Routes are derived analytically from straight-line distance and the
//! speed model; there is no road-network pathfinding.

use crate::{Error, Facility, Result, RouteKind, RouteOption, RoutePair, UserProfile};
use std::cmp::Ordering;

const WALKING_BASELINE_M_PER_MIN: f64 = 60.0;

/// Extra path length of the accessible route relative to the direct one
const ACCESSIBLE_DISTANCE_FACTOR: f64 = 1.1;

/// Duration inflation when step-free access forces a longer detour
const AVOID_STAIRS_DURATION_FACTOR: f64 = 1.2;

/// Estimate travel time in whole minutes for a distance in meters.
///
/// `max(1, round(d / (60 × speedFactor × movementMultiplier)))` - the
/// floor of one minute keeps very short hops from rounding to zero.
/// Wheeled movement is modeled as faster across flat terrain.
pub fn estimate_duration_minutes(distance_m: f64, profile: &UserProfile) -> u32 {
    let speed_factor = profile.speed.factor();
    let movement_multiplier = if profile.movement.uses_wheels { 0.75 } else { 1.0 };

    let distance = distance_m.max(0.0);
    let minutes = distance / (WALKING_BASELINE_M_PER_MIN * speed_factor * movement_multiplier);
    minutes.round().max(1.0) as u32
}

/// Ordering for the accessible-route candidate: `Less` ranks `a` ahead.
///
/// When stairs are avoided, wheelchair-accessible facilities sort strictly
/// before non-accessible ones; within that partition (or always otherwise)
/// higher accessibility scores win.
fn accessible_rank(a: &Facility, b: &Facility, avoid_stairs: bool) -> Ordering {
    if avoid_stairs && a.wheelchair != b.wheelchair {
        return if a.wheelchair { Ordering::Less } else { Ordering::Greater };
    }
    b.score_or_zero().total_cmp(&a.score_or_zero())
}

/// Compute the fastest and most accessible route options for a profile.
///
/// Every call rebuilds both options from scratch; there is no incremental
/// update, and facilities are borrowed, never mutated. Fails with
/// [`Error::EmptyCatalog`] when there is nothing to score - callers that
/// treat "no routes" as a valid state must check before invoking.
pub fn compute_routes<'a>(
    facilities: &[&'a Facility],
    profile: &UserProfile,
) -> Result<RoutePair<'a>> {
    if facilities.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let fastest_dest = facilities
        .iter()
        .copied()
        .min_by(|a, b| a.distance_or_zero().total_cmp(&b.distance_or_zero()))
        .ok_or(Error::EmptyCatalog)?;

    let avoid_stairs = profile.movement.avoid_stairs;
    let accessible_dest = facilities
        .iter()
        .copied()
        .min_by(|a, b| accessible_rank(a, b, avoid_stairs))
        .unwrap_or(fastest_dest);

    tracing::debug!(
        "Scored routes: fastest -> {} ({}m), accessible -> {} ({}m)",
        fastest_dest.name,
        fastest_dest.distance_or_zero(),
        accessible_dest.name,
        accessible_dest.distance_or_zero(),
    );

    let accessible_base = accessible_dest.distance_or_zero();
    let duration_inflation = if avoid_stairs {
        AVOID_STAIRS_DURATION_FACTOR
    } else {
        ACCESSIBLE_DISTANCE_FACTOR
    };

    Ok(RoutePair {
        fastest: RouteOption {
            kind: RouteKind::Fastest,
            duration_minutes: estimate_duration_minutes(fastest_dest.distance_or_zero(), profile),
            distance_m: fastest_dest.distance_or_zero(),
            description: "Direct path",
            color: "#2563eb",
            target: fastest_dest,
        },
        accessible: RouteOption {
            kind: RouteKind::Accessible,
            duration_minutes: estimate_duration_minutes(
                accessible_base * duration_inflation,
                profile,
            ),
            distance_m: (accessible_base * ACCESSIBLE_DISTANCE_FACTOR).round(),
            description: "Optimized access",
            color: "#16a34a",
            target: accessible_dest,
        },
    })
}
