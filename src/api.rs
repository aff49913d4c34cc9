use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::engine::{anon_hash, TextEngine};
use crate::error::{ApiError, ResultExt};
use crate::model::{AnalysisResult, AnalyzeOptions, Document, DocumentComparison, NewDocument};
use crate::storage::{MemStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TextEngine>,
    pub storage: Arc<dyn Storage>,
    pub config: Arc<AnalyzerConfig>,
}

impl AppState {
    /// Default engine plus in-memory storage, seeded per config.
    pub fn new(config: AnalyzerConfig) -> Self {
        let storage = if config.server.seed_samples {
            MemStorage::with_samples(config.server.default_user_id)
        } else {
            MemStorage::new()
        };
        Self {
            engine: Arc::new(TextEngine::default()),
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }

    /// Load `AnalyzerConfig` from file/env and build the state.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(AnalyzerConfig::load()?))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/documents", get(list_documents))
        .route("/api/documents/{id}", get(get_document))
        .route("/api/documents/{id}/analysis", get(get_analysis))
        .route("/api/analyze", post(analyze))
        .route("/api/compare", post(compare))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    options: AnalyzeOptions,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareReq {
    document_ids: Vec<i64>,
    #[serde(default)]
    texts: Option<Vec<String>>,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::invalid_id())
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rej| ApiError::invalid_request(vec![rej.body_text()]))
}

async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let docs = state
        .storage
        .all_documents()
        .await
        .or_internal("Failed to fetch documents")?;
    Ok(Json(docs))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let id = parse_id(&id)?;
    state
        .storage
        .get_document(id)
        .await
        .or_internal("Failed to fetch document")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Document not found".into()))
}

async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResult>, ApiError> {
    const CTX: &str = "Failed to fetch analysis result";
    let id = parse_id(&id)?;

    if let Some(found) = state.storage.get_analysis(id).await.or_internal(CTX)? {
        return Ok(Json(found));
    }

    let doc = state
        .storage
        .get_document(id)
        .await
        .or_internal(CTX)?
        .ok_or_else(|| ApiError::NotFound("Document not found".into()))?;

    // First request for this document: analyse with every section enabled.
    let mut result = state
        .engine
        .analyze_text(&doc.content, AnalyzeOptions::default());
    result.document_id = doc.id;
    metrics::counter!("analyses_total").increment(1);
    info!(target: "api", doc_id = doc.id, label = ?result.sentiment.label, "lazy analysis");

    let saved = state.storage.save_analysis(result).await.or_internal(CTX)?;
    Ok(Json(saved))
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    const CTX: &str = "Failed to analyze text";
    let req = json_body(payload)?;

    let min = state.config.server.min_text_len;
    if req.text.chars().count() < min {
        return Err(ApiError::invalid_request(vec![format!(
            "text: must contain at least {min} character(s)"
        )]));
    }

    let mut result = state.engine.analyze_text(&req.text, req.options);

    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("Document {}", Utc::now().timestamp_millis()));
    let doc = state
        .storage
        .create_document(NewDocument {
            title,
            content: req.text,
            word_count: result.word_count,
            user_id: Some(state.config.server.default_user_id),
        })
        .await
        .or_internal(CTX)?;

    result.document_id = doc.id;
    metrics::counter!("analyses_total").increment(1);
    info!(
        target: "api",
        id = %anon_hash(&doc.content),
        doc_id = doc.id,
        words = result.word_count,
        label = ?result.sentiment.label,
        "analyzed document"
    );

    let saved = state.storage.save_analysis(result).await.or_internal(CTX)?;
    Ok(Json(saved))
}

async fn compare(
    State(state): State<AppState>,
    payload: Result<Json<CompareReq>, JsonRejection>,
) -> Result<Json<DocumentComparison>, ApiError> {
    const CTX: &str = "Failed to compare documents";
    let req = json_body(payload)?;

    let mut problems = Vec::new();
    if req.document_ids.len() != 2 {
        problems.push("documentIds: expected exactly 2 items".to_string());
    }
    if req.texts.as_ref().is_some_and(|t| t.len() != 2) {
        problems.push("texts: expected exactly 2 items".to_string());
    }
    if !problems.is_empty() {
        return Err(ApiError::invalid_request(problems));
    }

    let (doc1, doc2) = match req.texts {
        Some(mut texts) => {
            let second = texts.pop().unwrap_or_default();
            let first = texts.pop().unwrap_or_default();
            (first, second)
        }
        None => {
            let first = state
                .storage
                .get_document(req.document_ids[0])
                .await
                .or_internal(CTX)?;
            let second = state
                .storage
                .get_document(req.document_ids[1])
                .await
                .or_internal(CTX)?;
            match (first, second) {
                (Some(a), Some(b)) => (a.content, b.content),
                _ => {
                    return Err(ApiError::NotFound(
                        "One or both documents not found".into(),
                    ))
                }
            }
        }
    };

    let comparison = state.engine.compare_documents(&doc1, &doc2);
    metrics::counter!("comparisons_total").increment(1);
    info!(
        target: "api",
        left = %anon_hash(&doc1),
        right = %anon_hash(&doc2),
        similarity = comparison.similarity_score,
        "compared documents"
    );
    Ok(Json(comparison))
}
