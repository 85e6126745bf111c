use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use polyglot_core::{
    handlers as actions,
    language::{self, Language},
    ActionOutcome,
};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    #[serde(default)]
    pub text: String,
    pub source: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    #[serde(default)]
    pub text: String,
}

/// Success and warnings render inline (200); extraction failures are 422.
fn outcome_response(outcome: ActionOutcome) -> Response {
    let status = match outcome {
        ActionOutcome::Failure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Json(outcome)).into_response()
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn list_languages() -> Json<&'static [Language]> {
    Json(language::languages())
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let healthy = match state.services.provider().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!("Inference service health check failed: {}", e);
            false
        }
    };
    Json(json!({
        "status": "ok",
        "inference_service": healthy
    }))
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TranslateBody>,
) -> ApiResult<Response> {
    let defaults = state.services.translation_config();
    let source = body.source.as_deref().unwrap_or(defaults.default_source.as_str());
    let target = body.target.as_deref().unwrap_or(defaults.default_target.as_str());

    let outcome = actions::on_translate_click(&state.services, &body.text, source, target).await?;
    Ok(outcome_response(outcome))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummarizeBody>,
) -> ApiResult<Response> {
    let outcome = actions::on_summarize_click(&state.services, &body.text).await?;
    Ok(outcome_response(outcome))
}

pub async fn summarize_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut document: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() == Some("file") {
            debug!("Receiving upload {:?}", field.file_name());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            document = Some(data);
            break;
        }
    }

    let Some(document) = document.filter(|d| !d.is_empty()) else {
        return Ok(outcome_response(ActionOutcome::warning(
            "Please upload a PDF file to summarize.",
        )));
    };

    let outcome = actions::on_summarize_document_click(&state.services, &document).await?;
    Ok(outcome_response(outcome))
}
