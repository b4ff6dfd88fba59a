use std::cell::{Cell, RefCell};

use pretty_assertions::assert_eq;
use rusqlite::Connection;

use pulse_ai::embeddings::Embedder;
use pulse_ai::llm::CompletionModel;
use pulse_ai::query::{answer, DEGRADED_ANSWER};
use pulse_core::db;
use pulse_core::error::AppError;
use pulse_core::store::embeddings::insert_embedding;

struct FixedEmbedder {
    vector: Vec<f64>,
    calls: Cell<u32>,
}

impl FixedEmbedder {
    fn new(vector: Vec<f64>) -> Self {
        Self {
            vector,
            calls: Cell::new(0),
        }
    }
}

impl Embedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f64>, AppError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.vector.clone())
    }
}

struct DownEmbedder;

impl Embedder for DownEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f64>, AppError> {
        Err(
            AppError::new("AI_EMBED_UNAVAILABLE", "Embed request failed")
                .with_details("status=500")
                .with_retryable(true),
        )
    }
}

struct RecordingLlm {
    reply: &'static str,
    last_user_prompt: RefCell<Option<String>>,
}

impl RecordingLlm {
    fn new(reply: &'static str) -> Self {
        Self {
            reply,
            last_user_prompt: RefCell::new(None),
        }
    }
}

impl CompletionModel for RecordingLlm {
    fn complete(&self, _system: &str, user: &str, _max_tokens: u32) -> Result<String, AppError> {
        *self.last_user_prompt.borrow_mut() = Some(user.to_string());
        Ok(self.reply.to_string())
    }
}

struct DownLlm;

impl CompletionModel for DownLlm {
    fn complete(&self, _system: &str, _user: &str, _max_tokens: u32) -> Result<String, AppError> {
        Err(
            AppError::new("AI_LLM_UNAVAILABLE", "Failed to call completion endpoint")
                .with_retryable(true),
        )
    }
}

fn seeded_conn() -> Connection {
    let mut conn = db::open_in_memory().expect("open");
    db::migrate(&mut conn).expect("migrate");
    for (ts, vec) in [
        ("2026-03-01T00:00:00Z", vec![1.0, 0.0]),
        ("2026-03-01T01:00:00Z", vec![0.0, 1.0]),
        ("2026-03-01T02:00:00Z", vec![0.99, 0.01]),
    ] {
        insert_embedding(&conn, ts, "X", &format!("summary for {ts}"), &vec, ts)
            .expect("insert");
    }
    conn
}

#[test]
fn empty_question_fails_before_any_embed_call() {
    // Deliberately unmigrated: if the store were touched, the test would
    // surface a DB error code instead.
    let conn = db::open_in_memory().expect("open");
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);

    let err = answer(&conn, &embedder, None, "   ", "X").expect_err("must reject");
    assert_eq!(err.code, "AI_QUERY_EMPTY");
    assert_eq!(embedder.calls.get(), 0);
}

#[test]
fn embed_failure_surfaces_unchanged_without_touching_the_store() {
    let conn = db::open_in_memory().expect("open");

    let err = answer(&conn, &DownEmbedder, None, "how is the air?", "X")
        .expect_err("must fail hard");
    assert_eq!(err.code, "AI_EMBED_UNAVAILABLE");
    assert!(err.retryable);
}

#[test]
fn missing_llm_degrades_with_ranked_sources() {
    let conn = seeded_conn();
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);

    let res = answer(&conn, &embedder, None, "how is the air?", "X").expect("answer");
    assert_eq!(res.answer, DEGRADED_ANSWER);
    assert!(res.answer.contains("showing similar records only"));

    // Ranking order from the search is preserved; the orthogonal vector
    // ranks last.
    assert_eq!(res.sources.len(), 3);
    assert_eq!(res.sources[0].snapshot_ts, "2026-03-01T00:00:00Z");
    assert_eq!(res.sources[1].snapshot_ts, "2026-03-01T02:00:00Z");
    assert_eq!(res.sources[2].snapshot_ts, "2026-03-01T01:00:00Z");
    assert!((res.sources[0].score - 1.0).abs() < 1e-12);
}

#[test]
fn llm_failure_degrades_instead_of_failing() {
    let conn = seeded_conn();
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);

    let res = answer(&conn, &embedder, Some(&DownLlm), "how is the air?", "X")
        .expect("answer despite llm outage");
    assert_eq!(res.answer, DEGRADED_ANSWER);
    assert_eq!(res.sources.len(), 3);
}

#[test]
fn llm_reply_is_returned_and_prompt_enumerates_sources() {
    let conn = seeded_conn();
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);
    let llm = RecordingLlm::new("Air quality was moderate all morning.");

    let res = answer(&conn, &embedder, Some(&llm), "how is the air?", "X").expect("answer");
    assert_eq!(res.answer, "Air quality was moderate all morning.");

    let prompt = llm.last_user_prompt.borrow().clone().expect("prompt sent");
    assert!(prompt.contains("Question: how is the air?"));
    assert!(prompt.contains("Location: X"));
    assert!(prompt.contains("1) [2026-03-01T00:00:00Z] summary for 2026-03-01T00:00:00Z (score 1.000)"));
    assert!(prompt.contains("2) [2026-03-01T02:00:00Z]"));
}

#[test]
fn answers_work_on_an_empty_corpus() {
    let mut conn = db::open_in_memory().expect("open");
    db::migrate(&mut conn).expect("migrate");
    let embedder = FixedEmbedder::new(vec![1.0, 0.0]);

    let res = answer(&conn, &embedder, None, "anything at all?", "X").expect("answer");
    assert_eq!(res.answer, DEGRADED_ANSWER);
    assert!(res.sources.is_empty());
}
