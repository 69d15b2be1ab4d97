//! Default catalog of washroom facilities.
//!
//! This module provides the built-in facility records for the system.
//! The records carry pre-computed base distances and accessibility
//! scores; a real deployment would substitute a geospatial provider
//! that fills these fields before handing the catalog to the engine.

use crate::types::*;
use once_cell::sync::Lazy;

/// Where the simulated user stands (lat, lon)
pub const USER_LOCATION: (f64, f64) = (43.7360, -79.2485);

/// Initial map center (lat, lon)
pub const INITIAL_LOCATION: (f64, f64) = (43.7368, -79.2480);

/// The complete, order-preserving collection of facility records
#[derive(Clone, Debug)]
pub struct Catalog {
    pub facilities: Vec<Facility>,
}

impl Catalog {
    /// Validate catalog invariants, returning a list of problems found.
    ///
    /// Checks: unique ids, non-negative base distances, accessibility
    /// scores within [0, 100].
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for facility in &self.facilities {
            if !seen.insert(facility.id) {
                errors.push(format!("Duplicate facility id: {}", facility.id));
            }

            if let Some(d) = facility.base_distance {
                if !d.is_finite() || d < 0.0 {
                    errors.push(format!(
                        "Facility {} has invalid base distance: {}",
                        facility.id, d
                    ));
                }
            }

            if let Some(s) = facility.accessibility_score {
                if !s.is_finite() || !(0.0..=100.0).contains(&s) {
                    errors.push(format!(
                        "Facility {} has accessibility score outside [0, 100]: {}",
                        facility.id, s
                    ));
                }
            }
        }

        errors
    }
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in facility records
///
/// **Note**: For production use, prefer `get_default_catalog()` which
/// returns a cached reference. This function is retained for testing and
/// custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn build_default_catalog_internal() -> Catalog {
    let facilities = vec![
        Facility {
            id: 1,
            name: "Mary Brown".into(),
            location: Location {
                lon: -79.248_740_412_064_02,
                lat: 43.736_886_340_577_55,
            },
            women: true,
            men: true,
            unisex: true,
            wheelchair: false,
            diaper_change: true,
            source: "Manual".into(),
            notes: "Washrooms are clean, easily accessible, no stairs, frequent potholes in area."
                .into(),
            address: "2694 Eglinton Ave E, Scarborough, ON M1K 2S3".into(),
            image_url: "https://lh3.googleusercontent.com/gps-cs-s/AHVAweoLa7_RFWyYPMPotNeutyrmP5tpSswJ_8BC1gKCtz4-3hqKomXE42-I0wLXG8VA6Ck9MzMHySG_Rj-8xEboJg8lFLIVAeLHRWugIrf8b6UKke6DH-AgRSgdgHrZSeHDEGILEiToVA=w408-h273-k-no".into(),
            base_distance: Some(320.0),
            accessibility_score: Some(65.0),
        },
        Facility {
            id: 2,
            name: "Rexall".into(),
            location: Location {
                lon: -79.249_489_125_594_35,
                lat: 43.737_408_171_219_9,
            },
            women: false,
            men: false,
            unisex: true,
            wheelchair: false,
            diaper_change: true,
            source: "Manual".into(),
            notes: "Frequently OUT OF ORDER, employee only washroom, store entrance at an incline."
                .into(),
            address: "2682 Eglinton Ave E, Scarborough, ON M1K 2S3".into(),
            image_url: "https://lh3.googleusercontent.com/gps-cs-s/AHVAwepmTfL8moUIFt5OAs_a22K_9GNpVgwATDZMaO7zFkTaML6hMdfeuA1KBWJLJBDm9IdyUvdzhAW3N1GX1bS3fm7zux6bR7vwlwdY6XgQkJkZnd5PHXhZ14pY3FAUsOmiHiZMjm2ugA=w408-h544-k-no".into(),
            base_distance: Some(280.0),
            accessibility_score: Some(30.0),
        },
        Facility {
            id: 3,
            name: "No Frills".into(),
            location: Location {
                lon: -79.246_528_303_906_2,
                lat: 43.737_861_936_995_86,
            },
            women: true,
            men: true,
            unisex: true,
            wheelchair: true,
            diaper_change: true,
            source: "Manual".into(),
            notes: "On the main floor, no stairs, frequently clean, moving vehicles present."
                .into(),
            address: "2742 Eglinton Ave E, Scarborough, ON M1J 2C6".into(),
            image_url: "https://lh3.googleusercontent.com/gps-cs-s/AHVAweoFNNOLwcSZiVExadhEgb96prcujzYzuQ9BsucOA2vSl1bFKL5M-VFe-hGajsZq0ipx156P36iQrM4R6aopEZtYMxTwzHdlipm8rwVBeh7CXeiFi5EQirrKZn70moyTjbJQpEV3RNaJzH4F=w408-h306-k-no".into(),
            base_distance: Some(410.0),
            accessibility_score: Some(95.0),
        },
        Facility {
            id: 4,
            name: "Shoppers".into(),
            location: Location {
                lon: -79.247_587_090_716_79,
                lat: 43.736_515_765_193_84,
            },
            women: true,
            men: true,
            unisex: true,
            wheelchair: true,
            diaper_change: true,
            source: "Manual".into(),
            notes: "At the back of the store, no stairs, moving vehicles present.".into(),
            address: "2751 Eglinton Ave E, Scarborough, ON M1J 2C7".into(),
            image_url: "https://lh3.googleusercontent.com/gps-cs-s/AHVAweoHezN1x4Gu_xpT0Q8wTp_FsMCF4vwItO2nLXYI3XQAKZlUu4GiW78yxokrelxTBq5dqs3lvns6bKFoZEpEJgs1F2kGVEJrBG_YxQDriwsgFvkxv34e2sQ9CDtVt9dw4Z-SbYl_1t7NyHO4=w507-h240-k-no".into(),
            base_distance: Some(150.0),
            accessibility_score: Some(90.0),
        },
        Facility {
            id: 5,
            name: "Ghareeb Nawaz Restaruant".into(),
            location: Location {
                lon: -79.246_748_976_694_38,
                lat: 43.735_333_356_572_43,
            },
            women: true,
            men: true,
            unisex: false,
            wheelchair: false,
            diaper_change: false,
            source: "Manual".into(),
            notes: "Not Accessible, has a flight of stairs to washroom".into(),
            address: "1071 Danforth Rd, Scarborough, ON M1J 2C7".into(),
            image_url: "https://lh3.googleusercontent.com/p/AF1QipOirX-6wmVnnn9ntl_JhxVI3R8XZbman15AGkco=w408-h408-k-no".into(),
            base_distance: Some(550.0),
            accessibility_score: Some(10.0),
        },
    ];

    Catalog { facilities }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.facilities.len(), 5);
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let catalog = build_default_catalog();
        let ids: Vec<u32> = catalog.facilities.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = get_default_catalog();
        let errors = catalog.validate();
        assert!(errors.is_empty(), "Validation errors: {:?}", errors);
    }

    #[test]
    fn test_validate_flags_duplicate_ids() {
        let mut catalog = build_default_catalog();
        catalog.facilities[1].id = 1;
        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate facility id")));
    }

    #[test]
    fn test_validate_flags_bad_score() {
        let mut catalog = build_default_catalog();
        catalog.facilities[0].accessibility_score = Some(130.0);
        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("outside [0, 100]"));
    }

    #[test]
    fn test_validate_flags_negative_distance() {
        let mut catalog = build_default_catalog();
        catalog.facilities[0].base_distance = Some(-5.0);
        assert_eq!(catalog.validate().len(), 1);
    }

    #[test]
    fn test_wheelchair_accessible_facilities() {
        let catalog = get_default_catalog();
        let accessible: Vec<u32> = catalog
            .facilities
            .iter()
            .filter(|f| f.wheelchair)
            .map(|f| f.id)
            .collect();
        assert_eq!(accessible, vec![3, 4]);
    }
}
