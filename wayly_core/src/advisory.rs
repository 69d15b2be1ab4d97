//! Advisory generation: the cache in front of the external advisory
//! text generator, plus the prompt and fallback policy around it.
//!
//! The generator itself is an external, fallible, rate-limited
//! capability behind the [`AdvisoryGenerator`] trait. The cache is
//! keyed by destination identity plus a profile snapshot, so repeated
//! identical queries never re-trigger the expensive call. Failures
//! always degrade to a user-facing fallback string and are never
//! cached, so the next identical query retries.

use crate::types::{Facility, RoutePair, UserProfile};
use async_trait::async_trait;
use std::collections::HashMap;

/// Fallback shown when the generator reports rate limiting
pub const RATE_LIMITED_FALLBACK: &str = "AI insights are temporarily limited due to high demand. \
     Please refer to local knowledge notes for accessibility details.";

/// Fallback shown for any other generator failure
pub const GENERIC_FALLBACK: &str =
    "Wayly recommends the most accessible path based on your functional movement needs.";

/// Failure modes of the external advisory generator
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    /// Quota exhausted or request throttled
    #[error("advisory generator is rate limited")]
    RateLimited,

    /// Backend unreachable or down
    #[error("advisory generator is unavailable")]
    Unavailable,

    /// Anything else the backend reported
    #[error("advisory generation failed: {0}")]
    Unknown(String),
}

/// External advisory-text capability: profile + target + routes -> text.
#[async_trait]
pub trait AdvisoryGenerator {
    async fn generate(
        &self,
        profile: &UserProfile,
        target: &Facility,
        routes: &RoutePair<'_>,
    ) -> Result<String, AdvisoryError>;
}

/// Build the instruction text a model-backed generator would receive.
///
/// Renders the movement profile, the destination's name and community
/// notes, and the duration of both route options.
pub fn advisory_prompt(profile: &UserProfile, target: &Facility, routes: &RoutePair<'_>) -> String {
    let max_distance = profile
        .movement
        .max_walking_distance
        .map_or_else(|| "Unlimited".to_string(), |d| format!("{}m", d));

    format!(
        "System: You are Wayly, a helper for accessibility mapping. Your job is to \
         translate functional movement needs into route preferences and explain \
         accessibility tradeoffs in plain language.\n\
         \n\
         User Movement Profile:\n\
         - Uses wheels: {}\n\
         - Avoids stairs: {}\n\
         - Prefers ramps: {}\n\
         - Max walking distance: {}\n\
         - Speed: {}\n\
         \n\
         Destination: \"{}\".\n\
         Destination Notes: \"{}\".\n\
         \n\
         Context:\n\
         - The Fastest route takes {} min but might have accessibility barriers.\n\
         - The Most Accessible route takes {} min and is optimized for functional movement needs.\n\
         \n\
         Task: Explain the tradeoff between speed and accessibility for this specific \
         user. Reference the destination's specific notes (like stairs, potholes, or \
         distance) if relevant to their functional needs. Be concise (max 2 sentences), \
         friendly, and avoid identity-based labels.",
        profile.movement.uses_wheels,
        profile.movement.avoid_stairs,
        profile.movement.prefer_ramps,
        max_distance,
        profile.speed,
        target.name,
        target.notes,
        routes.fastest.duration_minutes,
        routes.accessible.duration_minutes,
    )
}

/// Deterministic composite key: target identity + movement-needs snapshot
/// + speed. Structurally equal profiles produce equal keys regardless of
/// object identity.
pub fn advisory_cache_key(target: &Facility, profile: &UserProfile) -> String {
    let distance = profile
        .movement
        .max_walking_distance
        .map_or_else(|| "none".to_string(), |d| d.to_string());

    format!(
        "{}-w{}s{}r{}d{}-{}",
        target.id,
        profile.movement.uses_wheels,
        profile.movement.avoid_stairs,
        profile.movement.prefer_ramps,
        distance,
        profile.speed,
    )
}

/// Session-lifetime memo of advisory strings, keyed by target + profile.
///
/// Entries never expire or get evicted. Concurrent fetches for the same
/// key are not de-duplicated here; callers debounce at the trigger layer.
#[derive(Debug, Default)]
pub struct AdvisoryCache {
    entries: HashMap<String, String>,
}

impl AdvisoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Peek at a cached advisory without triggering a fetch
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return the advisory for `target` + `profile`, consulting the cache
    /// first and invoking `generator` at most once on a miss.
    ///
    /// A successful result is stored under the key. A failure resolves to
    /// a fallback string - distinguishable for rate limiting - and is not
    /// stored, so the next call with the same key retries. This method
    /// never surfaces the failure to the caller.
    pub async fn get_advisory(
        &mut self,
        target: &Facility,
        profile: &UserProfile,
        routes: &RoutePair<'_>,
        generator: &(dyn AdvisoryGenerator + Sync),
    ) -> String {
        let key = advisory_cache_key(target, profile);

        if let Some(text) = self.entries.get(&key) {
            tracing::debug!("Advisory cache hit for {}", key);
            return text.clone();
        }

        tracing::debug!("Advisory cache miss for {}, invoking generator", key);
        match generator.generate(profile, target, routes).await {
            Ok(text) => {
                self.entries.insert(key, text.clone());
                text
            }
            Err(AdvisoryError::RateLimited) => {
                tracing::warn!("Advisory generator rate limited for {}", key);
                RATE_LIMITED_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Advisory generation failed for {}: {}", key, e);
                GENERIC_FALLBACK.to_string()
            }
        }
    }
}

/// Offline generator that derives an advisory from the facility's
/// community notes and the computed route tradeoff, with no external
/// calls. Used by the CLI and as a test double.
#[derive(Debug, Default)]
pub struct NotesAdvisor;

#[async_trait]
impl AdvisoryGenerator for NotesAdvisor {
    async fn generate(
        &self,
        profile: &UserProfile,
        target: &Facility,
        routes: &RoutePair<'_>,
    ) -> Result<String, AdvisoryError> {
        let mut text = format!(
            "The fastest route to {} takes {} min; the accessible option takes {} min",
            target.name, routes.fastest.duration_minutes, routes.accessible.duration_minutes,
        );

        if profile.movement.uses_wheels || profile.movement.avoid_stairs {
            text.push_str(" and avoids barriers along the way");
        }
        text.push('.');

        if !target.notes.is_empty() {
            text.push_str(&format!(" Local notes: {}", target.notes));
        }

        Ok(text)
    }
}
