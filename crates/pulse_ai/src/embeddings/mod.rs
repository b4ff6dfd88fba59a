use pulse_core::error::AppError;

/// Text-to-vector boundary. Vectors are opaque similarity keys; only
/// vectors produced by the same model are comparable.
pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Vec<f64>, AppError>;
}

pub mod sidecar_embed;
