use pulse_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::sidecar::SidecarClient;

const EMBED_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// `Embedder` backed by the sidecar's `/embed` endpoint. One request per
/// call, no retries here; callers decide whether a retryable failure is
/// worth retrying.
#[derive(Debug, Clone)]
pub struct SidecarEmbedder {
    client: SidecarClient,
}

impl SidecarEmbedder {
    pub fn new(client: SidecarClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f64>,
}

impl Embedder for SidecarEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f64>, AppError> {
        let url = format!("{}/embed", self.client.base_url());
        let req = EmbedRequest { text };
        let resp = ureq::post(&url)
            .timeout(EMBED_TIMEOUT)
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("AI_EMBED_PROTOCOL", "Failed to encode embed request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: EmbedResponse = r.into_json().map_err(|e| {
                    AppError::new("AI_EMBED_PROTOCOL", "Failed to decode embed response")
                        .with_details(e.to_string())
                })?;
                if v.embedding.is_empty() {
                    return Err(AppError::new(
                        "AI_EMBED_PROTOCOL",
                        "Embed response was empty",
                    ));
                }
                Ok(v.embedding)
            }
            Ok(r) => Err(
                AppError::new("AI_EMBED_UNAVAILABLE", "Embed request failed")
                    .with_details(format!("status={}", r.status()))
                    .with_retryable(true),
            ),
            // Transport errors and blown timeouts land here.
            Err(e) => Err(
                AppError::new("AI_EMBED_UNAVAILABLE", "Failed to call embed endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
