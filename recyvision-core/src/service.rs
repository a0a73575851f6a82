//! High-level service facade tying discovery, classification, and history together.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::{CenterCatalog, RefreshPolicy};
use crate::dispatch::ClassificationDispatcher;
use crate::events::ScanEventLog;
use crate::model::{BoundingBox, Coordinate, RecyclingCenter, ScanEvent, ScanImage, ScanOutcome};
use crate::normalize::normalize;
use crate::ports::{ClassifyError, FeaturePort, QueryError, StoreError};

/// Default search radius in degrees. Roughly 10 km at moderate latitudes.
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.1;

/// Public entry point for the recycling-center catalog, image
/// classification, and the scan history.
pub struct RecyVisionService {
    features: Arc<dyn FeaturePort>,
    dispatcher: ClassificationDispatcher,
    scan_log: ScanEventLog,
    catalog: CenterCatalog,
    search_radius: f64,
}

impl RecyVisionService {
    /// Create a service over the given ports with the default search radius.
    #[must_use]
    pub fn new(
        features: Arc<dyn FeaturePort>,
        dispatcher: ClassificationDispatcher,
        scan_log: ScanEventLog,
        refresh_policy: RefreshPolicy,
    ) -> Self {
        Self {
            features,
            dispatcher,
            scan_log,
            catalog: CenterCatalog::new(refresh_policy),
            search_radius: DEFAULT_SEARCH_RADIUS_DEG,
        }
    }

    /// Override the search radius, in degrees.
    #[must_use]
    pub fn with_search_radius(mut self, radius: f64) -> Self {
        self.search_radius = radius;
        self
    }

    /// Fetch, normalize, and install the centers around `center`.
    ///
    /// `city` is the reverse-geocoded name of the caller's location and
    /// backs the city-level address fallback. Normalization preserves the
    /// provider's response order. Returns the catalog snapshot after the
    /// refresh resolved; a superseded refresh returns the newer snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when the provider call fails or, under
    /// [`RefreshPolicy::Reject`], when another refresh is still in flight.
    pub async fn refresh_centers(
        &self,
        center: Coordinate,
        city: &str,
    ) -> Result<Arc<Vec<RecyclingCenter>>, QueryError> {
        let ticket = self
            .catalog
            .begin_refresh()
            .ok_or(QueryError::RefreshInFlight)?;

        let bounds = BoundingBox::around(center, self.search_radius);

        let raw = match self.features.features_within(bounds).await {
            Ok(raw) => raw,
            Err(err) => {
                self.catalog.abandon(ticket);
                return Err(err);
            }
        };

        log::debug!(
            "normalizing {} features from '{}'",
            raw.len(),
            self.features.source()
        );

        let centers: Vec<RecyclingCenter> =
            raw.iter().map(|feature| normalize(feature, city)).collect();
        self.catalog.install(ticket, centers);

        Ok(self.catalog.current())
    }

    /// The current catalog snapshot, without refreshing.
    #[must_use]
    pub fn centers(&self) -> Arc<Vec<RecyclingCenter>> {
        self.catalog.current()
    }

    /// Record that a photo was captured.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the history could not be persisted.
    /// Scanning proceeds regardless; the caller decides how to surface it.
    pub async fn record_scan(&self) -> Result<ScanEvent, StoreError> {
        self.scan_log.record().await
    }

    /// Classify a captured image with both backends.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] when the primary backend fails.
    pub async fn classify(&self, image: &ScanImage) -> Result<ScanOutcome, ClassifyError> {
        self.dispatcher.classify(image).await
    }

    /// Full scan history, oldest first. Fails closed to an empty sequence.
    pub async fn scan_history(&self) -> Vec<ScanEvent> {
        self.scan_log.list().await
    }

    /// Scans captured on the given UTC calendar day.
    pub async fn scans_on(&self, date: NaiveDate) -> Vec<ScanEvent> {
        self.scan_log.on_date(date).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::events::JsonFileEventStore;
    use crate::model::{Classification, MaterialType, RawFeature};
    use crate::normalize::DEFAULT_ACCEPTED_ITEMS;
    use crate::ports::ClassifierPort;

    struct StubFeatures {
        replies: Mutex<Vec<Result<Vec<RawFeature>, QueryError>>>,
    }

    impl StubFeatures {
        fn returning(features: Vec<RawFeature>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(vec![Ok(features)]),
            })
        }
    }

    #[async_trait]
    impl FeaturePort for StubFeatures {
        fn source(&self) -> &str {
            "stub"
        }

        async fn features_within(
            &self,
            _bounds: BoundingBox,
        ) -> Result<Vec<RawFeature>, QueryError> {
            self.replies
                .lock()
                .expect("stub lock")
                .pop()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    struct StubClassifier;

    #[async_trait]
    impl ClassifierPort for StubClassifier {
        fn model(&self) -> &str {
            "stub"
        }

        async fn classify(&self, _image: &ScanImage) -> Result<Classification, ClassifyError> {
            Ok(Classification {
                label: String::from("plastic"),
                confidence: 0.5,
                explanation: None,
            })
        }
    }

    fn service(features: Arc<dyn FeaturePort>, dir: &tempfile::TempDir) -> RecyVisionService {
        RecyVisionService::new(
            features,
            ClassificationDispatcher::new(Arc::new(StubClassifier), Arc::new(StubClassifier)),
            ScanEventLog::new(Arc::new(JsonFileEventStore::new(
                dir.path().join("scan-events.json"),
            ))),
            RefreshPolicy::Supersede,
        )
    }

    #[tokio::test]
    async fn refresh_normalizes_a_general_recycling_node() {
        let feature = RawFeature {
            id: String::from("42"),
            location: Coordinate {
                latitude: 1.0,
                longitude: 2.0,
            },
            tags: HashMap::from([(String::from("amenity"), String::from("recycling"))]),
        };

        let dir = tempfile::tempdir().expect("temp dir");
        let service = service(StubFeatures::returning(vec![feature]), &dir);

        let here = Coordinate {
            latitude: 1.0,
            longitude: 2.0,
        };
        let centers = service.refresh_centers(here, "Zurich").await.expect("refresh");

        assert_eq!(centers.len(), 1);
        let center = &centers[0];
        assert_eq!(center.id, "42");
        assert_eq!(center.name, "Recycling Center");
        assert_eq!(center.material_type, MaterialType::General);
        assert_eq!(center.accepted_items, DEFAULT_ACCEPTED_ITEMS);
        assert_eq!(center.opening_hours, "Hours not specified");
        assert!((center.location.latitude - 1.0).abs() < f64::EPSILON);

        // The installed snapshot is visible without another refresh.
        assert_eq!(service.centers().len(), 1);
    }

    #[tokio::test]
    async fn scan_history_is_queryable_by_date() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = service(StubFeatures::returning(Vec::new()), &dir);

        let event = service.record_scan().await.expect("record");
        assert_eq!(service.scan_history().await.len(), 1);
        assert_eq!(service.scans_on(event.timestamp.date_naive()).await.len(), 1);
    }

    #[tokio::test]
    async fn classify_returns_both_results() {
        let dir = tempfile::tempdir().expect("temp dir");
        let service = service(StubFeatures::returning(Vec::new()), &dir);

        let image = ScanImage {
            bytes: vec![1, 2, 3],
            file_name: String::from("scan.jpg"),
            mime_type: String::from("image/jpeg"),
        };

        let outcome = service.classify(&image).await.expect("classify");
        assert_eq!(outcome.primary.label, "plastic");
        assert_eq!(outcome.secondary.result().label, "plastic");
    }
}
