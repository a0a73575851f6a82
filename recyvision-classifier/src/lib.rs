//! HTTP ports for the two waste-classification backends.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use recyvision_core::{
    model::{Classification, ScanImage},
    ports::{ClassifierPort, ClassifyError},
};

/// Route of the primary custom-model backend.
const PRIMARY_PATH: &str = "/predict";

/// Route of the secondary explainable backend.
const SECONDARY_PATH: &str = "/predict-gemini";

/// Multipart field name carrying the image bytes.
const IMAGE_FIELD: &str = "image";

/// Prediction payload shared by both backends. The secondary backend adds
/// an explanation; the primary never sends one.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    prediction: String,
    confidence: f64,

    #[serde(default)]
    explanation: Option<String>,
}

/// Map a backend payload into the domain result, clamping confidence into
/// the documented `[0, 1]` range.
fn to_classification(response: PredictionResponse) -> Classification {
    Classification {
        label: response.prediction,
        confidence: response.confidence.clamp(0.0, 1.0),
        explanation: response.explanation,
    }
}

/// Classifier port uploading the image to one HTTP backend.
pub struct HttpClassifierPort {
    client: Client,
    url: String,
    model: String,
}

impl HttpClassifierPort {
    /// Create a port for an arbitrary endpoint and model name.
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            model: model.into(),
        }
    }

    /// Port for the primary custom model at `base_url`.
    #[must_use]
    pub fn primary(client: Client, base_url: &str) -> Self {
        Self::new(client, format!("{base_url}{PRIMARY_PATH}"), "custom")
    }

    /// Port for the secondary explainable model at `base_url`.
    #[must_use]
    pub fn secondary(client: Client, base_url: &str) -> Self {
        Self::new(client, format!("{base_url}{SECONDARY_PATH}"), "gemini")
    }
}

#[async_trait]
impl ClassifierPort for HttpClassifierPort {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, image: &ScanImage) -> Result<Classification, ClassifyError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(ClassifyError::from)?;

        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(ClassifyError::from)?
            .error_for_status()
            .map_err(ClassifyError::from)?
            .json::<PredictionResponse>()
            .await
            .map_err(ClassifyError::from)?;

        log::debug!(
            "model '{}' predicted '{}' at {:.3}",
            self.model,
            response.prediction,
            response.confidence
        );

        Ok(to_classification(response))
    }
}
