//! Traits describing provider capabilities and the errors they surface.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;
use serde_json::Error as JsonError;

use crate::model::{BoundingBox, Classification, RawFeature, ScanEvent, ScanImage};

#[derive(thiserror::Error, Debug)]
/// Errors fetching recycling-center features from the geospatial provider.
pub enum QueryError {
    /// Network layer failed or the endpoint returned a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Provider response could not be decoded.
    #[error("Malformed provider response: {0}")]
    Decode(#[from] JsonError),
    /// A refresh was rejected because another one is still in flight.
    #[error("A catalog refresh is already in flight")]
    RefreshInFlight,
}

#[derive(thiserror::Error, Debug)]
/// Errors talking to a classification backend.
pub enum ClassifyError {
    /// Network layer failed or the endpoint returned a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Backend response could not be decoded.
    #[error("Malformed classifier response: {0}")]
    Decode(#[from] JsonError),
}

#[derive(thiserror::Error, Debug)]
/// Errors reading or writing the persisted scan history.
pub enum StoreError {
    /// Reading the stored blob failed.
    #[error("Failed to read scan history: {0}")]
    Read(#[source] std::io::Error),
    /// Writing the stored blob failed.
    #[error("Failed to write scan history: {0}")]
    Write(#[source] std::io::Error),
    /// Encoding events for storage failed.
    #[error("Failed to encode scan history: {0}")]
    Encode(#[source] JsonError),
    /// The stored blob could not be decoded.
    #[error("Failed to decode scan history: {0}")]
    Decode(#[source] JsonError),
}

#[async_trait]
/// Source of raw tagged features within a bounding box.
pub trait FeaturePort: Send + Sync {
    /// Short name of the data source, used in log lines.
    fn source(&self) -> &str;

    /// Fetch all matching features inside `bounds`, possibly none.
    ///
    /// Output order follows the provider's response order. No retry, no
    /// caching of prior results.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] when the provider request or decoding fails.
    async fn features_within(&self, bounds: BoundingBox) -> Result<Vec<RawFeature>, QueryError>;
}

#[async_trait]
/// One image-classification backend.
pub trait ClassifierPort: Send + Sync {
    /// Short name of the backing model, used in log lines and captions.
    fn model(&self) -> &str;

    /// Classify a captured image.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] when the backend request or decoding fails.
    async fn classify(&self, image: &ScanImage) -> Result<Classification, ClassifyError>;
}

#[async_trait]
/// Blob-level persistence behind the scan-event log.
///
/// The whole event sequence is read and written as one unit, mirroring a
/// single key in key-value storage.
pub trait EventStore: Send + Sync {
    /// Load every persisted event. An absent blob yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the blob exists but cannot be read
    /// or decoded.
    async fn load(&self) -> Result<Vec<ScanEvent>, StoreError>;

    /// Persist the full event sequence, replacing the previous blob.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when encoding or writing fails.
    async fn save(&self, events: &[ScanEvent]) -> Result<(), StoreError>;
}
