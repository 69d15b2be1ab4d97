//! Filter engine: reduces the catalog to facilities matching the active
//! attribute toggles.
//!
//! Pure function of its inputs; recomputed whenever the catalog or the
//! active tag set changes. The catalog is assumed small, so no caching.

use crate::types::{Facility, FilterTag};
use std::collections::HashSet;

fn tag_passes(tag: FilterTag, facility: &Facility) -> bool {
    match tag {
        FilterTag::Women => facility.women,
        FilterTag::Men => facility.men,
        FilterTag::Universal => facility.unisex,
        FilterTag::Baby => facility.diaper_change,
        FilterTag::Accessible => facility.wheelchair,
    }
}

/// Return the facilities satisfying **every** active tag, in catalog order.
///
/// An empty tag set passes everything.
pub fn filter_facilities<'a>(
    facilities: &'a [Facility],
    active: &HashSet<FilterTag>,
) -> Vec<&'a Facility> {
    facilities
        .iter()
        .filter(|f| active.iter().all(|tag| tag_passes(*tag, f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::types::Location;

    fn tags(list: &[FilterTag]) -> HashSet<FilterTag> {
        list.iter().copied().collect()
    }

    fn bare_facility(id: u32, diaper_change: bool) -> Facility {
        Facility {
            id,
            name: format!("facility-{}", id),
            location: Location { lon: 0.0, lat: 0.0 },
            women: true,
            men: true,
            unisex: true,
            wheelchair: false,
            diaper_change,
            source: String::new(),
            notes: String::new(),
            address: String::new(),
            image_url: String::new(),
            base_distance: None,
            accessibility_score: None,
        }
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let catalog = build_default_catalog();
        let visible = filter_facilities(&catalog.facilities, &HashSet::new());
        assert_eq!(visible.len(), catalog.facilities.len());
    }

    #[test]
    fn test_single_tag() {
        let catalog = build_default_catalog();
        let visible = filter_facilities(&catalog.facilities, &tags(&[FilterTag::Accessible]));
        let ids: Vec<u32> = visible.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_tags_combine_with_and() {
        let catalog = build_default_catalog();
        // Women AND universal: Rexall fails women, Ghareeb Nawaz fails unisex
        let visible = filter_facilities(
            &catalog.facilities,
            &tags(&[FilterTag::Women, FilterTag::Universal]),
        );
        let ids: Vec<u32> = visible.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_output_preserves_input_order() {
        // Non-monotonic ids so positional order is actually observable
        let facilities = vec![
            bare_facility(9, true),
            bare_facility(2, false),
            bare_facility(7, true),
            bare_facility(1, true),
        ];
        let visible = filter_facilities(&facilities, &tags(&[FilterTag::Baby]));
        let ids: Vec<u32> = visible.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![9, 7, 1]);
    }

    #[test]
    fn test_every_result_satisfies_all_predicates() {
        let catalog = build_default_catalog();
        let active = tags(&[FilterTag::Men, FilterTag::Baby]);
        for facility in filter_facilities(&catalog.facilities, &active) {
            assert!(facility.men);
            assert!(facility.diaper_change);
        }
    }

    #[test]
    fn test_all_tags_at_once() {
        let catalog = build_default_catalog();
        let active = tags(&[
            FilterTag::Women,
            FilterTag::Men,
            FilterTag::Universal,
            FilterTag::Baby,
            FilterTag::Accessible,
        ]);
        let ids: Vec<u32> = filter_facilities(&catalog.facilities, &active)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
