//! Inference service client implementation using reqwest.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use argus_core::ServiceHealth;
use argus_ml::{
    ClipTextualOptions, ClipVisualOptions, Embedding, FacialRecognitionOptions,
    FacialRecognitionResponse, MachineLearningProvider, MachineLearningRequest,
    MachineLearningService, TextInput, VisionInput,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::MlClientConfig;
use crate::error::{Error, Result};

/// Tracing target for inference client operations.
pub const TRACING_TARGET: &str = "argus_reqwest::client";

/// Payload accompanying the request entries in a predict call.
enum PredictPayload {
    Image { bytes: Vec<u8>, mime: &'static str },
    Text(String),
}

/// Inner client that holds the HTTP client and configuration.
struct MlClientInner {
    http: Client,
    config: MlClientConfig,
}

impl fmt::Debug for MlClientInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the remote machine-learning inference service.
///
/// This client implements the [`MachineLearningProvider`] trait. Each
/// operation posts a multipart form to `{endpoint}/predict` with an
/// `entries` part carrying the serialized request union, plus the image
/// bytes or text to run inference on.
///
/// Cloning is cheap; clones share the underlying connection pool, and
/// concurrent calls run fully parallel over it.
///
/// # Examples
///
/// ```rust,ignore
/// use argus_ml::{ClipVisualOptions, VisionInput};
/// use argus_reqwest::{MlClient, MlClientConfig};
/// use url::Url;
///
/// let client = MlClient::with_defaults()?;
/// let endpoint = Url::parse("http://ml.local:3003")?;
///
/// let embedding = client
///     .encode_image(
///         &endpoint,
///         &VisionInput::new("/photos/beach.jpg"),
///         &ClipVisualOptions::new("ViT-B-32__openai"),
///     )
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct MlClient {
    inner: Arc<MlClientInner>,
}

impl MlClient {
    /// Creates a new inference client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: MlClientConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = config.effective_timeout().as_millis(),
            max_retries = config.max_retries,
            "Creating inference client"
        );

        let http = Client::builder()
            .timeout(config.effective_timeout())
            .user_agent(config.effective_user_agent())
            .build()?;

        let inner = MlClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new inference client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(MlClientConfig::default())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &MlClientConfig {
        &self.inner.config
    }

    /// Converts this client into a [`MachineLearningService`] for use with
    /// dependency injection.
    pub fn into_service(self) -> MachineLearningService {
        MachineLearningService::new(self)
    }

    /// Resolves a route below the endpoint, preserving any path prefix.
    fn route(endpoint: &Url, path: &str) -> Result<Url> {
        let mut url = endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("endpoint '{endpoint}' cannot be a base")))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    /// Reads an image from disk and determines its MIME type.
    async fn read_image(&self, path: &Path) -> Result<(Vec<u8>, &'static str)> {
        let mime = Self::mime_type(path)?;
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read image '{}': {}", path.display(), e),
            ))
        })?;
        Ok((bytes, mime))
    }

    /// Determines the MIME type from the file extension.
    fn mime_type(path: &Path) -> Result<&'static str> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::unsupported_media("image file has no extension"))?;

        match extension.to_lowercase().as_str() {
            "png" => Ok("image/png"),
            "jpg" | "jpeg" => Ok("image/jpeg"),
            "tiff" | "tif" => Ok("image/tiff"),
            "bmp" => Ok("image/bmp"),
            "gif" => Ok("image/gif"),
            "webp" => Ok("image/webp"),
            ext => Err(Error::unsupported_media(format!(
                "unsupported image extension: {ext}"
            ))),
        }
    }

    /// Sends a predict request, retrying retryable failures.
    async fn predict<T: DeserializeOwned>(
        &self,
        endpoint: &Url,
        request: &MachineLearningRequest,
        payload: PredictPayload,
    ) -> Result<T> {
        let url = Self::route(endpoint, "predict")?;
        let entries = serde_json::to_string(request)?;

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            model = %request.model_name(),
            model_task = %request.model_task(),
            model_type = %request.model_type(),
            "Sending predict request"
        );

        let mut attempt = 0;
        let max_retries = self.inner.config.max_retries;

        loop {
            // Multipart forms are consumed on send, so rebuild per attempt.
            let mut form = Form::new().text("entries", entries.clone());
            form = match &payload {
                PredictPayload::Image { bytes, mime } => form.part(
                    "image",
                    Part::bytes(bytes.clone()).file_name("image").mime_str(mime)?,
                ),
                PredictPayload::Text(text) => form.text("text", text.clone()),
            };

            let result = async {
                let response = self
                    .inner
                    .http
                    .post(url.clone())
                    .multipart(form)
                    .send()
                    .await?;

                self.handle_response(response).await
            }
            .await;

            match result {
                Ok(decoded) => {
                    if attempt > 0 {
                        tracing::info!(
                            target: TRACING_TARGET,
                            attempt = attempt + 1,
                            "Predict request succeeded after retry"
                        );
                    }
                    return Ok(decoded);
                }
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    attempt += 1;
                    let backoff = self.inner.config.retry_backoff * attempt;

                    tracing::warn!(
                        target: TRACING_TARGET,
                        attempt = attempt,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis(),
                        error = %e,
                        "Predict request failed, retrying"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    tracing::error!(
                        target: TRACING_TARGET,
                        attempt = attempt + 1,
                        error = %e,
                        "Predict request failed permanently"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Handles an HTTP response, decoding the contract type on success.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        tracing::debug!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            "Received response from inference service"
        );

        if status.is_success() {
            let bytes = response.bytes().await?;
            serde_json::from_slice(&bytes).map_err(|e| {
                Error::invalid_response(format!("response did not match contract: {e}"))
            })
        } else {
            let message = match response.text().await {
                Ok(body) if !body.is_empty() => body.chars().take(1024).collect(),
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            let message = match status {
                StatusCode::NOT_FOUND => format!("model unknown to the service: {message}"),
                _ => message,
            };
            Err(Error::api(status.as_u16(), message))
        }
    }
}

#[async_trait::async_trait]
impl MachineLearningProvider for MlClient {
    async fn encode_image(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &ClipVisualOptions,
    ) -> argus_ml::Result<Embedding> {
        let (bytes, mime) = self.read_image(&input.image_path).await?;
        let request = MachineLearningRequest::ClipVisual(options.clone());
        let embedding = self
            .predict(endpoint, &request, PredictPayload::Image { bytes, mime })
            .await?;
        Ok(embedding)
    }

    async fn encode_text(
        &self,
        endpoint: &Url,
        input: &TextInput,
        options: &ClipTextualOptions,
    ) -> argus_ml::Result<Embedding> {
        let request = MachineLearningRequest::ClipTextual(options.clone());
        let embedding = self
            .predict(
                endpoint,
                &request,
                PredictPayload::Text(input.text.clone()),
            )
            .await?;
        Ok(embedding)
    }

    async fn detect_faces(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &FacialRecognitionOptions,
    ) -> argus_ml::Result<FacialRecognitionResponse> {
        let (bytes, mime) = self.read_image(&input.image_path).await?;
        let request = MachineLearningRequest::FacialRecognition(options.clone());
        let response = self
            .predict(endpoint, &request, PredictPayload::Image { bytes, mime })
            .await?;
        Ok(response)
    }

    async fn health_check(&self, endpoint: &Url) -> argus_ml::Result<ServiceHealth> {
        let url = Self::route(endpoint, "ping")?;
        let started_at = Instant::now();

        tracing::debug!(target: TRACING_TARGET, url = %url, "Performing health check");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(Error::Reqwest)?;
        let elapsed = started_at.elapsed();

        if response.status().is_success() {
            Ok(ServiceHealth::healthy().with_response_time(elapsed))
        } else {
            Ok(ServiceHealth::unhealthy(format!(
                "ping failed with status {}",
                response.status()
            ))
            .with_response_time(elapsed))
        }
    }
}
