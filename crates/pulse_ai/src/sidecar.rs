use pulse_core::error::AppError;

/// Handle to the model sidecar, which serves both `/embed` and `/query`.
///
/// Constructed explicitly with its base URL and passed to the components
/// that need it; there is no process-wide default client.
#[derive(Debug, Clone)]
pub struct SidecarClient {
    base_url: String,
}

impl SidecarClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::new(
                "AI_SIDECAR_BAD_URL",
                "Sidecar base URL must be http(s)",
            )
            .with_details(format!("base_url={base_url}")));
        }

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
