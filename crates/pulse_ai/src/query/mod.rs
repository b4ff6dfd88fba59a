use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pulse_core::error::AppError;
use pulse_core::store::embeddings::search_embeddings;

use crate::embeddings::Embedder;
use crate::llm::CompletionModel;

pub mod prompts;

/// How many ranked sources back an answer.
const TOP_K: i64 = 5;

const MAX_ANSWER_TOKENS: u32 = 256;

/// Answer text used when retrieval worked but generation did not.
pub const DEGRADED_ANSWER: &str =
    "Language model unavailable; showing similar records only.";

/// One retrieval hit, in ranking order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedSource {
    pub snapshot_ts: String,
    pub location: String,
    pub summary: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<RankedSource>,
}

/// Answer a natural-language question about a location from stored snapshot
/// summaries.
///
/// Hard failures: an empty question, an unreachable embedding service, or a
/// storage read error — with no sources there is nothing to answer with.
/// Soft failure: the completion model missing or failing, which degrades to
/// [`DEGRADED_ANSWER`] with the ranked sources still attached. Sources
/// always preserve the similarity ranking.
pub fn answer(
    conn: &Connection,
    embedder: &dyn Embedder,
    llm: Option<&dyn CompletionModel>,
    question: &str,
    location: &str,
) -> Result<QueryAnswer, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::new("AI_QUERY_EMPTY", "Question must not be empty"));
    }

    let query_vec = embedder.embed(question)?;
    let hits = search_embeddings(conn, location, &query_vec, TOP_K)?;

    let sources: Vec<RankedSource> = hits
        .iter()
        .map(|h| RankedSource {
            snapshot_ts: h.embedding.snapshot_ts.clone(),
            location: h.embedding.location.clone(),
            summary: h.embedding.summary.clone(),
            score: h.score,
        })
        .collect();

    let answer = match llm {
        None => DEGRADED_ANSWER.to_string(),
        Some(model) => {
            let user = prompts::answer_prompt(question, location, &hits);
            match model.complete(prompts::SYSTEM_PROMPT, &user, MAX_ANSWER_TOKENS) {
                Ok(text) => text,
                Err(e) => {
                    // Retrieval succeeded; a generation failure degrades the
                    // answer instead of failing the request.
                    warn!(code = %e.code, "completion failed; returning degraded answer");
                    DEGRADED_ANSWER.to_string()
                }
            }
        }
    };

    Ok(QueryAnswer { answer, sources })
}
