use pulse_core::error::AppError;

/// Opaque text-in/text-out completion boundary. Best-effort: every caller
/// in this crate treats a failure here as a reason to degrade, not to fail.
pub trait CompletionModel {
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, AppError>;
}

pub mod sidecar_llm;
