//! HTTP routes exposing the enrichment pipeline.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use lustre_core::{Article, Enhancer, PageFetcher, ensure_row_content};
use serde_json::{Value, json};

pub struct AppState<F> {
    pub enhancer: Arc<Enhancer<F>>,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self { enhancer: Arc::clone(&self.enhancer) }
    }
}

pub fn router<F>(enhancer: Enhancer<F>) -> Router
where
    F: PageFetcher + Send + Sync + 'static,
{
    let state = AppState { enhancer: Arc::new(enhancer) };

    Router::new()
        .route("/health", get(health))
        .route("/v1/articles/enrich", post(enrich::<F>))
        .route("/v1/articles/enrich/batch", post(enrich_batch::<F>))
        .route("/v1/render", post(render))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn enrich<F>(State(state): State<AppState<F>>, Json(body): Json<Value>) -> Result<Json<Value>, StatusCode>
where
    F: PageFetcher + Send + Sync + 'static,
{
    if !body.is_object() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    Ok(Json(enrich_one(&state.enhancer, 0, body).await))
}

/// Articles are processed one after another, in request order.
async fn enrich_batch<F>(State(state): State<AppState<F>>, Json(items): Json<Vec<Value>>) -> Json<Vec<Value>>
where
    F: PageFetcher + Send + Sync + 'static,
{
    let mut enriched = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        enriched.push(enrich_one(&state.enhancer, index, item).await);
    }

    tracing::info!(count = enriched.len(), "Enriched batch");
    Json(enriched)
}

async fn render(Json(row): Json<Value>) -> Json<Value> {
    Json(ensure_row_content(row))
}

/// An item that does not read as an article is returned as-is, with only the content safety net applied.
async fn enrich_one<F: PageFetcher>(enhancer: &Enhancer<F>, index: usize, item: Value) -> Value {
    let article = match serde_json::from_value::<Article>(item.clone()) {
        Ok(article) => article,
        Err(e) => {
            tracing::warn!(index, error = %e, "Passing through unreadable article");
            return ensure_row_content(item);
        }
    };

    let mut article = enhancer.process_article(article).await;
    article.ensure_content();

    match serde_json::to_value(&article) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(index, error = %e, "Failed to serialize enriched article");
            ensure_row_content(item)
        }
    }
}
