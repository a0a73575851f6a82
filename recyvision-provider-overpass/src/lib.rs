//! Recycling-center discovery backed by the Overpass API.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use recyvision_core::{
    model::{BoundingBox, Coordinate, RawFeature},
    ports::{FeaturePort, QueryError},
};

const BASE_URL: &str = "https://overpass-api.de/api/interpreter";

/// Server-side evaluation timeout requested with every query.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Tag predicates selecting recycling-related nodes, one union branch each.
/// `None` matches any value for the key.
const NODE_SELECTORS: [(&str, Option<&str>); 9] = [
    ("amenity", Some("recycling")),
    ("recycling:glass", Some("yes")),
    ("recycling:paper", Some("yes")),
    ("recycling:plastic", Some("yes")),
    ("recycling_type", None),
    ("recycling:clothes", Some("yes")),
    ("recycling:metal", Some("yes")),
    ("recycling:electronics", Some("yes")),
    ("recycling:batteries", Some("yes")),
];

/// Top-level Overpass response envelope.
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

/// Single element from the response. Skeleton elements may come without
/// coordinates or tags; both degrade to defaults instead of rejecting.
#[derive(Debug, Deserialize)]
struct Element {
    id: i64,

    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,

    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Build the Overpass QL query selecting recycling nodes inside `bounds`.
///
/// Building never fails; the selector set is fixed configuration.
#[must_use]
pub fn build_query(bounds: BoundingBox) -> String {
    let bbox = format!(
        "{},{},{},{}",
        bounds.min_lat, bounds.min_lon, bounds.max_lat, bounds.max_lon
    );

    let selectors = NODE_SELECTORS
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("  node[\"{key}\"=\"{value}\"]({bbox});"),
            None => format!("  node[\"{key}\"]({bbox});"),
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n{selectors}\n);\nout body;\n>;\nout skel qt;\n"
    )
}

/// Decode an Overpass JSON body into raw features, preserving response order.
fn parse_features(body: &str) -> Result<Vec<RawFeature>, serde_json::Error> {
    let response: OverpassResponse = serde_json::from_str(body)?;

    Ok(response
        .elements
        .into_iter()
        .map(|element| RawFeature {
            id: element.id.to_string(),
            location: Coordinate {
                latitude: element.lat,
                longitude: element.lon,
            },
            tags: element.tags,
        })
        .collect())
}

/// Feature source implementation over the public Overpass endpoint.
pub struct OverpassFeaturePort {
    client: Client,
    base_url: String,
}

impl OverpassFeaturePort {
    /// Create a port against the default public endpoint.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    /// Create a port against a custom endpoint, e.g. a self-hosted mirror.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FeaturePort for OverpassFeaturePort {
    fn source(&self) -> &str {
        "overpass"
    }

    async fn features_within(&self, bounds: BoundingBox) -> Result<Vec<RawFeature>, QueryError> {
        let query = build_query(bounds);

        let body = self
            .client
            .post(&self.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(QueryError::from)?
            .error_for_status()
            .map_err(QueryError::from)?
            .text()
            .await
            .map_err(QueryError::from)?;

        let features = parse_features(&body).map_err(QueryError::from)?;
        log::debug!("overpass returned {} elements", features.len());

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> BoundingBox {
        BoundingBox::around(
            Coordinate {
                latitude: 47.37,
                longitude: 8.54,
            },
            0.1,
        )
    }

    #[test]
    fn query_carries_every_selector_and_the_bbox() {
        let query = build_query(bounds());

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.ends_with("out body;\n>;\nout skel qt;\n"));

        for (key, value) in NODE_SELECTORS {
            let selector = match value {
                Some(value) => format!("node[\"{key}\"=\"{value}\"]"),
                None => format!("node[\"{key}\"]"),
            };
            assert!(query.contains(&selector), "missing selector for {key}");
        }

        let bbox = format!(
            "({},{},{},{})",
            47.37 - 0.1,
            8.54 - 0.1,
            47.37 + 0.1,
            8.54 + 0.1
        );
        assert_eq!(query.matches(&bbox).count(), NODE_SELECTORS.len());
    }

    #[test]
    fn elements_decode_into_raw_features_in_order() {
        let body = r#"{
            "elements": [
                {"id": 42, "lat": 1.0, "lon": 2.0, "tags": {"amenity": "recycling"}},
                {"id": 7, "lat": 1.5, "lon": 2.5, "tags": {"recycling:glass": "yes"}}
            ]
        }"#;

        let features = parse_features(body).expect("decode elements");

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, "42");
        assert_eq!(features[0].tags.get("amenity").map(String::as_str), Some("recycling"));
        assert!((features[0].location.latitude - 1.0).abs() < f64::EPSILON);
        assert_eq!(features[1].id, "7");
    }

    #[test]
    fn skeleton_elements_degrade_to_defaults() {
        let body = r#"{"elements": [{"id": 9}]}"#;

        let features = parse_features(body).expect("decode skeleton");

        assert_eq!(features.len(), 1);
        assert!(features[0].tags.is_empty());
        assert!((features[0].location.latitude).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_and_malformed_bodies_are_distinguished() {
        assert!(parse_features(r#"{"elements": []}"#).expect("decode empty").is_empty());
        assert!(parse_features(r#"{}"#).expect("decode missing list").is_empty());
        assert!(parse_features("<html>rate limited</html>").is_err());
    }
}
