use rusqlite::Connection;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use pulse_core::domain::Snapshot;
use pulse_core::store::embeddings::insert_embedding;
use pulse_core::summary::generate_summary;

use crate::embeddings::Embedder;

/// Best-effort semantic indexing of a freshly ingested snapshot: summarize,
/// embed, persist. Returns the new embedding row id, or `None` when any
/// step failed — the failure is logged and must never abort the caller's
/// ingestion cycle.
pub fn index_snapshot(
    conn: &Connection,
    embedder: &dyn Embedder,
    snap: &Snapshot,
) -> Option<i64> {
    let summary = generate_summary(snap);

    let vector = match embedder.embed(&summary) {
        Ok(v) => v,
        Err(e) => {
            warn!(code = %e.code, snapshot_ts = %snap.ts, "skipping embedding: embed failed");
            return None;
        }
    };

    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new());

    match insert_embedding(conn, &snap.ts, &snap.location, &summary, &vector, &created_at) {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(code = %e.code, snapshot_ts = %snap.ts, "skipping embedding: insert failed");
            None
        }
    }
}
