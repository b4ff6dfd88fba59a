use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One persisted (summary, vector) pair. Append-only; rows are never
/// mutated and only disappear with the whole database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredEmbedding {
    pub id: i64,
    pub snapshot_ts: String,
    pub location: String,
    pub summary: String,
    pub embedding: Vec<f64>,
    pub created_at: String,
}

/// A stored embedding with its cosine similarity against a query vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredEmbedding {
    pub embedding: StoredEmbedding,
    pub score: f64,
}

/// Append one embedding row and return its id. `created_at` is RFC3339 UTC.
pub fn insert_embedding(
    conn: &Connection,
    snapshot_ts: &str,
    location: &str,
    summary: &str,
    embedding: &[f64],
    created_at: &str,
) -> Result<i64, AppError> {
    let blob = serde_json::to_string(embedding).map_err(|e| {
        AppError::new("DB_INSERT_FAILED", "Failed to encode embedding vector")
            .with_details(e.to_string())
    })?;

    conn.execute(
        "INSERT INTO snapshot_embeddings (snapshot_ts, location, summary, embedding, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![snapshot_ts, location, summary, blob, created_at],
    )
    .map_err(|e| {
        AppError::new("DB_INSERT_FAILED", "Failed to insert embedding")
            .with_details(e.to_string())
    })?;

    Ok(conn.last_insert_rowid())
}

/// Embeddings for a location, newest first (id breaks created_at ties).
/// `limit <= 0` returns everything.
pub fn embeddings_by_location(
    conn: &Connection,
    location: &str,
    limit: i64,
) -> Result<Vec<StoredEmbedding>, AppError> {
    let mut sql = String::from(
        "SELECT id, snapshot_ts, location, summary, embedding, created_at \
         FROM snapshot_embeddings WHERE location = ?1 \
         ORDER BY created_at DESC, id DESC",
    );
    if limit > 0 {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    let mut stmt = conn.prepare(&sql).map_err(|e| {
        AppError::new("DB_QUERY_FAILED", "Failed to prepare embeddings query")
            .with_details(e.to_string())
    })?;

    let rows = stmt
        .query_map([location], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(|e| {
            AppError::new("DB_QUERY_FAILED", "Failed to query embeddings")
                .with_details(e.to_string())
        })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, snapshot_ts, location, summary, blob, created_at) = r.map_err(|e| {
            AppError::new("DB_DECODE_FAILED", "Failed to decode embedding row")
                .with_details(e.to_string())
        })?;
        let embedding: Vec<f64> = serde_json::from_str(&blob).map_err(|e| {
            AppError::new("DB_DECODE_FAILED", "Failed to decode embedding vector")
                .with_details(format!("id={id}; err={e}"))
        })?;
        out.push(StoredEmbedding {
            id,
            snapshot_ts,
            location,
            summary,
            embedding,
            created_at,
        });
    }
    Ok(out)
}

/// Brute-force cosine similarity search over a location's embeddings.
///
/// The whole per-location corpus is loaded and scored in memory, which is
/// fine at the expected scale (one row per ingestion cycle). Past a few tens
/// of thousands of rows this is the function to put an ANN index behind;
/// the contract stays the same.
///
/// Rows whose vector length differs from the query's are skipped — vectors
/// from different embedding models must never be compared. Ranking is
/// descending by score; the stable sort preserves newest-first order on
/// ties. `top_k <= 0` returns the full ranked list. An empty corpus yields
/// an empty Vec, not an error.
pub fn search_embeddings(
    conn: &Connection,
    location: &str,
    query_vec: &[f64],
    top_k: i64,
) -> Result<Vec<ScoredEmbedding>, AppError> {
    let rows = embeddings_by_location(conn, location, 0)?;

    let mut scored: Vec<ScoredEmbedding> = rows
        .into_iter()
        .filter(|r| !r.embedding.is_empty() && r.embedding.len() == query_vec.len())
        .map(|r| {
            let score = cosine(query_vec, &r.embedding);
            ScoredEmbedding {
                embedding: r,
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if top_k > 0 && scored.len() > top_k as usize {
        scored.truncate(top_k as usize);
    }
    Ok(scored)
}

/// Cosine similarity in [-1, 1]. Defined as 0.0 when either vector has zero
/// norm (never NaN, never an error).
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}
