//! Session state: the reducer coordinating filters, routing, the
//! profile, and the advisory cache.
//!
//! The session is an explicit value driven by [`Intent`]s pushed in by
//! the display layer, so the core logic stays independent of any UI
//! lifecycle. Filtering and route scoring are synchronous and pure; the
//! advisory fetch is the only suspending operation, surfaced through
//! `advisory_loading` while outstanding.

use crate::advisory::{AdvisoryCache, AdvisoryGenerator};
use crate::catalog::Catalog;
use crate::engine::compute_routes;
use crate::filter::filter_facilities;
use crate::types::{Facility, FilterTag, RoutePair, UserProfile, View};
use std::collections::HashSet;

/// A user intention pushed in by the display layer
#[derive(Clone, Debug)]
pub enum Intent {
    /// Search intent: home -> browsing, clears nothing else
    OpenSearch,
    /// Select a specific facility: browsing -> routing, sets the target
    SelectFacility(u32),
    /// Dismiss the active route: routing -> browsing, clears the target
    DismissRoute,
    /// Back to home: resets filters and the explicit target
    GoHome,
    /// Flip a facility-attribute filter
    ToggleFilter(FilterTag),
    /// Replace the profile wholesale (allowed in any state)
    EditProfile(UserProfile),
}

/// Current session: view, filters, target, profile, and advisory cache.
#[derive(Debug, Default)]
pub struct SessionState {
    pub view: View,
    pub active_filters: HashSet<FilterTag>,
    selected_target: Option<u32>,
    pub profile: UserProfile,
    pub cache: AdvisoryCache,
    /// True while an advisory fetch is outstanding
    pub advisory_loading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The explicitly selected facility id, if any
    pub fn selected_target(&self) -> Option<u32> {
        self.selected_target
    }

    /// Apply a user intent.
    ///
    /// Returns `true` when the route options must be recomputed: any
    /// transition into or out of routing, and filter or profile changes
    /// while routing is active.
    pub fn apply(&mut self, intent: Intent) -> bool {
        let was_routing = self.view == View::Routing;

        match intent {
            Intent::OpenSearch => {
                self.view = View::Browsing;
                was_routing
            }
            Intent::SelectFacility(id) => {
                tracing::debug!("Selecting facility {}", id);
                self.selected_target = Some(id);
                self.view = View::Routing;
                true
            }
            Intent::DismissRoute => {
                self.selected_target = None;
                self.view = View::Browsing;
                was_routing
            }
            Intent::GoHome => {
                self.active_filters.clear();
                self.selected_target = None;
                self.view = View::Home;
                was_routing
            }
            Intent::ToggleFilter(tag) => {
                if !self.active_filters.remove(&tag) {
                    self.active_filters.insert(tag);
                }
                was_routing
            }
            Intent::EditProfile(profile) => {
                self.profile = profile.normalized();
                was_routing
            }
        }
    }

    /// The facilities matching the active filters, in catalog order.
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Facility> {
        filter_facilities(&catalog.facilities, &self.active_filters)
    }

    /// Both route options for the current profile over the visible set.
    ///
    /// `None` unless the session is in the routing view, or when no
    /// facility survives the active filters (routing disabled, not an
    /// error).
    pub fn routes<'a>(&self, catalog: &'a Catalog) -> Option<RoutePair<'a>> {
        if self.view != View::Routing {
            return None;
        }

        let visible = self.visible(catalog);
        if visible.is_empty() {
            tracing::debug!("Routing disabled: no facilities match the active filters");
            return None;
        }

        compute_routes(&visible, &self.profile).ok()
    }

    /// The facility advisories are generated for: the explicit selection
    /// when present, else the top (fastest) route target.
    pub fn active_target<'a>(&self, catalog: &'a Catalog) -> Option<&'a Facility> {
        if let Some(id) = self.selected_target {
            if let Some(facility) = catalog.facilities.iter().find(|f| f.id == id) {
                return Some(facility);
            }
            tracing::warn!("Selected facility {} is not in the catalog", id);
        }

        self.routes(catalog).map(|routes| routes.fastest.target)
    }

    /// Resolve the advisory for the current target through the cache.
    ///
    /// `None` when the session is not routing or has no target. The
    /// loading flag is raised for the duration of the (possibly
    /// suspending) cache-or-fetch operation.
    pub async fn fetch_advisory(
        &mut self,
        catalog: &Catalog,
        generator: &(dyn AdvisoryGenerator + Sync),
    ) -> Option<String> {
        let routes = self.routes(catalog)?;
        let target = self.active_target(catalog)?;

        self.advisory_loading = true;
        let text = self
            .cache
            .get_advisory(target, &self.profile, &routes, generator)
            .await;
        self.advisory_loading = false;

        Some(text)
    }
}
