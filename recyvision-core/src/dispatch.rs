//! Two-backend classification with graceful secondary degradation.

use std::sync::Arc;

use crate::model::{Classification, ScanImage, ScanOutcome, SecondaryClassification};
use crate::ports::{ClassifierPort, ClassifyError};

/// Explanation attached to a synthesized secondary result.
pub const SECONDARY_UNAVAILABLE_NOTE: &str =
    "Secondary model unavailable; mirroring primary result";

/// Sends a captured image to both classification backends and assembles a
/// combined result, tolerating the secondary backend's failure.
pub struct ClassificationDispatcher {
    primary: Arc<dyn ClassifierPort>,
    secondary: Arc<dyn ClassifierPort>,
}

impl ClassificationDispatcher {
    /// Create a dispatcher over the two backends.
    #[must_use]
    pub fn new(primary: Arc<dyn ClassifierPort>, secondary: Arc<dyn ClassifierPort>) -> Self {
        Self { primary, secondary }
    }

    /// Classify an image with both backends.
    ///
    /// The primary result is mandatory. A secondary failure is absorbed by
    /// substituting the primary's label and confidence plus a fixed note,
    /// so the caller always receives two presentable results.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError`] only when the primary backend fails.
    pub async fn classify(&self, image: &ScanImage) -> Result<ScanOutcome, ClassifyError> {
        let primary = self.primary.classify(image).await?;

        let secondary = match self.secondary.classify(image).await {
            Ok(classification) => SecondaryClassification::Reported(classification),
            Err(err) => {
                log::warn!(
                    "secondary classifier '{}' failed, degrading: {err}",
                    self.secondary.model()
                );
                SecondaryClassification::Degraded(Classification {
                    label: primary.label.clone(),
                    confidence: primary.confidence,
                    explanation: Some(SECONDARY_UNAVAILABLE_NOTE.to_owned()),
                })
            }
        };

        Ok(ScanOutcome { primary, secondary })
    }
}
