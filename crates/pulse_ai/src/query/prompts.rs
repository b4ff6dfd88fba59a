use pulse_core::store::embeddings::ScoredEmbedding;

pub const SYSTEM_PROMPT: &str = "You are an analyst summarizing local conditions \
using the provided snapshots only. Be concise, avoid speculation, and mention \
timestamps and metrics when relevant. If the snapshots are insufficient to \
answer, say so briefly.";

/// Render the retrieval context as a bounded user prompt: the question, the
/// location, and one enumerated line per ranked source.
pub fn answer_prompt(question: &str, location: &str, sources: &[ScoredEmbedding]) -> String {
    let mut out = String::new();
    out.push_str("Question: ");
    out.push_str(question);
    out.push_str("\nLocation: ");
    out.push_str(location);
    out.push_str("\nTop snapshots:\n");
    for (i, s) in sources.iter().enumerate() {
        out.push_str(&format!(
            "{}) [{}] {} (score {:.3})\n",
            i + 1,
            s.embedding.snapshot_ts,
            s.embedding.summary,
            s.score
        ));
    }
    out.push_str("Provide a concise answer (<=3 sentences). If the context is insufficient, say so briefly.");
    out
}
