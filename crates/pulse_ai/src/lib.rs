pub mod embeddings;
pub mod ingest;
pub mod llm;
pub mod query;
pub mod sidecar;
