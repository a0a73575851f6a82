//! Normalization of raw provider features into [`RecyclingCenter`] records.

use crate::model::{MaterialType, RawFeature, RecyclingCenter};

/// Tag value that marks a material as accepted.
const AFFIRMATIVE: &str = "yes";

/// Amenity tag value identifying a general recycling point.
const RECYCLING_AMENITY: &str = "recycling";

/// Display name used when a feature carries no `name` tag.
pub const FALLBACK_NAME: &str = "Recycling Center";

/// Opening hours text used when a feature carries no `opening_hours` tag.
pub const FALLBACK_HOURS: &str = "Hours not specified";

/// Per-material tags checked when collecting accepted items.
///
/// Declaration order here is the output order of `accepted_items`,
/// regardless of tag order in the raw feature.
pub const ACCEPTED_MATERIAL_TAGS: [(&str, &str); 12] = [
    ("recycling:glass", "Glass"),
    ("recycling:paper", "Paper"),
    ("recycling:plastic", "Plastic"),
    ("recycling:clothes", "Clothes"),
    ("recycling:metal", "Metal"),
    ("recycling:electronics", "Electronics"),
    ("recycling:batteries", "Batteries"),
    ("recycling:cardboard", "Cardboard"),
    ("recycling:aluminium", "Aluminium"),
    ("recycling:tin", "Tin"),
    ("recycling:green_waste", "Green Waste"),
    ("recycling:organic", "Organic Waste"),
];

/// Broad-capability catalog assumed for recycling points whose tags do not
/// enumerate specific materials.
pub const DEFAULT_ACCEPTED_ITEMS: [&str; 10] = [
    "Glass Bottles & Jars",
    "Paper & Cardboard",
    "Plastic Bottles",
    "Metal Cans",
    "Aluminium Foil",
    "Newspapers & Magazines",
    "Cardboard Boxes",
    "Plastic Containers",
    "Metal Containers",
    "Mixed Paper",
];

/// Convert one raw feature into a recycling center.
///
/// Never fails: missing or malformed tags degrade to defaults instead of
/// rejecting the record. `city` is the caller's last resolved location
/// context and backs the city-level address fallback.
#[must_use]
pub fn normalize(feature: &RawFeature, city: &str) -> RecyclingCenter {
    let tags = &feature.tags;

    let name = tags
        .get("name")
        .cloned()
        .unwrap_or_else(|| FALLBACK_NAME.to_owned());

    let address = match tags.get("addr:street") {
        Some(street) => match tags.get("addr:housenumber") {
            Some(number) => format!("{street} {number}, {city}"),
            None => format!("{street}, {city}"),
        },
        None => city.to_owned(),
    };

    let opening_hours = tags
        .get("opening_hours")
        .cloned()
        .unwrap_or_else(|| FALLBACK_HOURS.to_owned());

    RecyclingCenter {
        id: feature.id.clone(),
        name,
        location: feature.location,
        address,
        material_type: material_type(feature),
        accepted_items: accepted_items(feature),
        opening_hours,
    }
}

/// Classify a feature's primary material. First match wins, in the declared
/// priority order: general amenity flag, then glass, paper, plastic.
fn material_type(feature: &RawFeature) -> MaterialType {
    let tag_is = |key: &str, value: &str| feature.tags.get(key).is_some_and(|tag| tag == value);

    if tag_is("amenity", RECYCLING_AMENITY) {
        MaterialType::General
    } else if tag_is("recycling:glass", AFFIRMATIVE) {
        MaterialType::Glass
    } else if tag_is("recycling:paper", AFFIRMATIVE) {
        MaterialType::Paper
    } else if tag_is("recycling:plastic", AFFIRMATIVE) {
        MaterialType::Plastic
    } else {
        MaterialType::Other
    }
}

/// Collect the accepted-material labels for a feature.
///
/// Falls back to [`DEFAULT_ACCEPTED_ITEMS`] when no per-material tag
/// matched, so every normalized center lists at least one material.
fn accepted_items(feature: &RawFeature) -> Vec<String> {
    let items: Vec<String> = ACCEPTED_MATERIAL_TAGS
        .iter()
        .filter(|(key, _)| feature.tags.get(*key).is_some_and(|value| value == AFFIRMATIVE))
        .map(|(_, label)| (*label).to_owned())
        .collect();

    if items.is_empty() {
        DEFAULT_ACCEPTED_ITEMS.iter().map(|item| (*item).to_owned()).collect()
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::Coordinate;

    fn feature(id: &str, tags: &[(&str, &str)]) -> RawFeature {
        RawFeature {
            id: id.to_owned(),
            location: Coordinate {
                latitude: 1.0,
                longitude: 2.0,
            },
            tags: tags
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn untagged_general_point_gets_default_catalog() {
        let center = normalize(&feature("42", &[("amenity", "recycling")]), "Zurich");

        assert_eq!(center.id, "42");
        assert_eq!(center.name, FALLBACK_NAME);
        assert_eq!(center.material_type, MaterialType::General);
        assert_eq!(center.opening_hours, FALLBACK_HOURS);
        assert_eq!(center.address, "Zurich");
        assert_eq!(center.accepted_items, DEFAULT_ACCEPTED_ITEMS);
    }

    #[test]
    fn specific_tags_keep_declared_order_and_priority() {
        let center = normalize(
            &feature(
                "7",
                &[("recycling:paper", "yes"), ("recycling:glass", "yes")],
            ),
            "Bern",
        );

        assert_eq!(center.accepted_items, vec!["Glass", "Paper"]);
        assert_eq!(center.material_type, MaterialType::Glass);
    }

    #[test]
    fn accepted_items_is_never_empty() {
        let bare = normalize(&feature("1", &[("recycling_type", "centre")]), "Basel");
        assert!(!bare.accepted_items.is_empty());
        assert_eq!(bare.material_type, MaterialType::Other);

        let negative = normalize(&feature("2", &[("recycling:glass", "no")]), "Basel");
        assert!(!negative.accepted_items.is_empty());
    }

    #[test]
    fn street_address_includes_optional_house_number() {
        let with_number = normalize(
            &feature(
                "3",
                &[("addr:street", "Bahnhofstrasse"), ("addr:housenumber", "12")],
            ),
            "Zurich",
        );
        assert_eq!(with_number.address, "Bahnhofstrasse 12, Zurich");

        let without_number = normalize(&feature("4", &[("addr:street", "Bahnhofstrasse")]), "Zurich");
        assert_eq!(without_number.address, "Bahnhofstrasse, Zurich");
    }

    #[test]
    fn named_center_keeps_its_tags() {
        let center = normalize(
            &feature(
                "5",
                &[
                    ("name", "Recyclinghof West"),
                    ("opening_hours", "Mo-Fr 08:00-18:00"),
                    ("recycling:batteries", "yes"),
                ],
            ),
            "Zurich",
        );

        assert_eq!(center.name, "Recyclinghof West");
        assert_eq!(center.opening_hours, "Mo-Fr 08:00-18:00");
        assert_eq!(center.accepted_items, vec!["Batteries"]);
        assert_eq!(center.material_type, MaterialType::Other);
    }
}
