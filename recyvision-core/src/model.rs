//! Domain data structures for coordinates, recycling centers, and scan history.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Geographic point in decimal degrees.
pub struct Coordinate {
    /// Latitude, positive north.
    pub latitude: f64,
    /// Longitude, positive east.
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Axis-aligned latitude/longitude rectangle used to scope spatial queries.
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Expand a center coordinate by `radius` degrees in every direction.
    ///
    /// The radius is in degrees, not meters. 0.1° is roughly 10 km at
    /// moderate latitudes and stretches near the poles.
    #[must_use]
    pub fn around(center: Coordinate, radius: f64) -> Self {
        Self {
            min_lat: center.latitude - radius,
            min_lon: center.longitude - radius,
            max_lat: center.latitude + radius,
            max_lon: center.longitude + radius,
        }
    }

    /// Check whether a point lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}

#[derive(Debug, Clone)]
/// Raw tagged feature as returned by the geospatial data provider.
///
/// Transient: consumed once by normalization and discarded.
pub struct RawFeature {
    /// Provider-assigned feature identifier.
    pub id: String,
    /// Feature position.
    pub location: Coordinate,
    /// String key/value annotations describing the feature.
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Primary material category of a recycling center.
pub enum MaterialType {
    /// General recycling point accepting mixed materials.
    General,
    /// Glass collection.
    Glass,
    /// Paper and cardboard.
    Paper,
    /// Plastics.
    Plastic,
    /// Anything that did not match a known category.
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Normalized recycling center shown on the map and in listings.
pub struct RecyclingCenter {
    /// Stable identifier derived from the provider's feature id.
    pub id: String,
    /// Display name, with a generic fallback when untagged.
    pub name: String,
    /// Center position.
    pub location: Coordinate,
    /// Street-level address, or a city-level fallback.
    pub address: String,
    /// Primary material category, first match wins.
    pub material_type: MaterialType,
    /// Materials accepted here. Never empty after normalization.
    pub accepted_items: Vec<String>,
    /// Opening hours text, with a fallback when untagged.
    pub opening_hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One recorded photo capture, used to render the scan history calendar.
pub struct ScanEvent {
    /// Time-derived identifier.
    pub id: String,
    /// Capture time, persisted as RFC 3339.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result from one classification backend.
pub struct Classification {
    /// Predicted waste category.
    pub label: String,
    /// Prediction confidence in `[0, 1]`.
    pub confidence: f64,
    /// Optional model-provided explanation of the prediction.
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Secondary backend result, which may be synthesized from the primary
/// when the secondary backend is unreachable.
pub enum SecondaryClassification {
    /// The secondary backend answered.
    Reported(Classification),
    /// The secondary backend was unavailable; this mirrors the primary
    /// result with a fixed explanatory note.
    Degraded(Classification),
}

impl SecondaryClassification {
    /// The classification to present, regardless of how it was obtained.
    #[must_use]
    pub fn result(&self) -> &Classification {
        match self {
            Self::Reported(classification) | Self::Degraded(classification) => classification,
        }
    }

    /// Whether this entry was synthesized from the primary result.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Combined result of one scan: the mandatory primary classification plus
/// the secondary one, degraded when that backend failed.
pub struct ScanOutcome {
    /// Result from the primary model. Mandatory.
    pub primary: Classification,
    /// Result from the secondary, explainable model.
    pub secondary: SecondaryClassification,
}

#[derive(Debug, Clone)]
/// Captured image bytes ready for upload to the classification backends.
pub struct ScanImage {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// File name sent with the multipart upload.
    pub file_name: String,
    /// MIME type sent with the multipart upload.
    pub mime_type: String,
}

impl ScanImage {
    /// Read an image from disk, guessing the MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub async fn read_from(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let file_name = path
            .file_name()
            .map_or_else(|| String::from("scan.jpg"), |name| name.to_string_lossy().into_owned());

        let mime_type = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
            Some(ext) if ext.eq_ignore_ascii_case("webp") => "image/webp",
            _ => "image/jpeg",
        };

        Ok(Self {
            bytes,
            file_name,
            mime_type: mime_type.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_contains_its_center() {
        let center = Coordinate {
            latitude: 47.37,
            longitude: 8.54,
        };

        for radius in [0.01, 0.1, 0.5, 2.0] {
            let bounds = BoundingBox::around(center, radius);
            assert!(bounds.contains(center), "radius {radius} must contain the center");
            assert!(bounds.min_lat <= bounds.max_lat);
            assert!(bounds.min_lon <= bounds.max_lon);
            assert!(bounds.min_lat <= center.latitude && center.latitude <= bounds.max_lat);
            assert!(bounds.min_lon <= center.longitude && center.longitude <= bounds.max_lon);
        }
    }

    #[test]
    fn bounding_box_spans_radius_in_each_direction() {
        let center = Coordinate {
            latitude: 1.0,
            longitude: 2.0,
        };
        let bounds = BoundingBox::around(center, 0.1);

        assert!((bounds.min_lat - 0.9).abs() < f64::EPSILON);
        assert!((bounds.min_lon - 1.9).abs() < f64::EPSILON);
        assert!((bounds.max_lat - 1.1).abs() < f64::EPSILON);
        assert!((bounds.max_lon - 2.1).abs() < f64::EPSILON);
    }

    #[test]
    fn scan_event_round_trips_with_rfc3339_timestamp() {
        let json = r#"{"id":"1700000000000-0","timestamp":"2024-05-01T12:30:00Z"}"#;
        let event: ScanEvent = serde_json::from_str(json).expect("decode event");

        assert_eq!(event.id, "1700000000000-0");
        assert_eq!(event.timestamp.to_rfc3339(), "2024-05-01T12:30:00+00:00");
    }

    #[test]
    fn degraded_secondary_exposes_its_classification() {
        let classification = Classification {
            label: String::from("plastic"),
            confidence: 0.9,
            explanation: None,
        };

        let secondary = SecondaryClassification::Degraded(classification.clone());
        assert!(secondary.is_degraded());
        assert_eq!(secondary.result(), &classification);

        let secondary = SecondaryClassification::Reported(classification.clone());
        assert!(!secondary.is_degraded());
        assert_eq!(secondary.result(), &classification);
    }
}
