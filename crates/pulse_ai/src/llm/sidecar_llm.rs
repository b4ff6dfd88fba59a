use pulse_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::CompletionModel;
use crate::sidecar::SidecarClient;

// Completions are slow on CPU-bound sidecars; this bounds one answer.
const COMPLETE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(45);

/// `CompletionModel` backed by the sidecar's `/query` endpoint.
#[derive(Debug, Clone)]
pub struct SidecarCompletion {
    client: SidecarClient,
}

impl SidecarCompletion {
    pub fn new(client: SidecarClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Clone, Serialize)]
struct QueryRequest<'a> {
    system: &'a str,
    user: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct QueryResponse {
    answer: String,
}

impl CompletionModel for SidecarCompletion {
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, AppError> {
        let url = format!("{}/query", self.client.base_url());
        let req = QueryRequest {
            system,
            user,
            max_tokens,
        };

        let resp = ureq::post(&url)
            .timeout(COMPLETE_TIMEOUT)
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("AI_LLM_PROTOCOL", "Failed to encode completion request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: QueryResponse = r.into_json().map_err(|e| {
                    AppError::new("AI_LLM_PROTOCOL", "Failed to decode completion response")
                        .with_details(e.to_string())
                })?;
                if v.answer.trim().is_empty() {
                    return Err(AppError::new("AI_LLM_PROTOCOL", "Completion was empty"));
                }
                Ok(v.answer.trim().to_string())
            }
            Ok(r) => Err(
                AppError::new("AI_LLM_UNAVAILABLE", "Completion request failed")
                    .with_details(format!("status={}", r.status()))
                    .with_retryable(true),
            ),
            Err(e) => Err(
                AppError::new("AI_LLM_UNAVAILABLE", "Failed to call completion endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
