//! Client for the inference service that hosts the pretrained models.
//!
//! The service owns the weights and tokenizers; this side only describes what
//! to encode, how to decode and how to post-process.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{GenerationRequest, ModelHandle, ModelKind, ModelLoader, ModelSpec, Seq2SeqModel};
use crate::config::ModelsConfig;
use crate::{Error, Result};

#[derive(Serialize)]
struct LoadRequest<'a> {
    model_id: &'a str,
    task: ModelKind,
}

#[derive(Deserialize)]
struct LoadResponse {
    model_id: String,
    loaded: bool,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model_id: &'a str,
    inputs: &'a str,
    tokenizer: TokenizerOptions<'a>,
    generation: GenerationOptions<'a>,
}

#[derive(Serialize)]
struct TokenizerOptions<'a> {
    truncation: bool,
    max_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    src_lang: Option<&'a str>,
}

#[derive(Serialize)]
struct GenerationOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    forced_bos_lang: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_beams: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    early_stopping: Option<bool>,
    skip_special_tokens: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

fn build_generate_request<'a>(model_id: &'a str, request: &'a GenerationRequest) -> GenerateRequest<'a> {
    let params = &request.params;
    GenerateRequest {
        model_id,
        inputs: &request.text,
        tokenizer: TokenizerOptions {
            truncation: true,
            max_length: request.max_input_tokens,
            src_lang: request.source_language.as_deref(),
        },
        generation: GenerationOptions {
            forced_bos_lang: request.forced_target_language.as_deref(),
            num_beams: params.num_beams,
            length_penalty: params.length_penalty,
            min_length: params.min_length,
            max_length: params.max_length,
            early_stopping: params.early_stopping,
            skip_special_tokens: true,
        },
    }
}

/// HTTP connection shared by every model loaded from the same service.
#[derive(Debug, Clone)]
struct ServiceClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl ServiceClient {
    fn new(config: &ModelsConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder.build()?;

        // Url::join drops the last segment unless the base ends with a slash.
        let mut endpoint = config.endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&endpoint)?,
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn health(&self) -> Result<bool> {
        let response = self.authorize(self.client.get(self.url("health")?)).send().await?;
        Ok(response.status().is_success())
    }
}

/// A model hosted by the inference service.
#[derive(Debug)]
pub struct InferenceModel {
    service: ServiceClient,
    model_id: String,
}

#[async_trait::async_trait]
impl Seq2SeqModel for InferenceModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = build_generate_request(&self.model_id, request);
        let url = self.service.url("generate")?;

        debug!(
            "Generating with {} ({} chars, max {} input tokens)",
            self.model_id,
            request.text.chars().count(),
            request.max_input_tokens
        );

        let response = self
            .service
            .authorize(self.service.client.post(url).json(&body))
            .send()
            .await
            .map_err(|e| Error::ModelInference(format!("{} request failed: {}", self.model_id, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::ModelInference(format!(
                "{} returned {}: {}",
                self.model_id,
                status,
                detail.trim()
            )));
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            Error::ModelInference(format!("Failed to parse {} response: {}", self.model_id, e))
        })?;

        Ok(generated.generated_text.trim().to_string())
    }
}

/// Loads models by asking the inference service to bring them into memory.
#[derive(Debug, Clone)]
pub struct RemoteModelLoader {
    service: ServiceClient,
}

impl RemoteModelLoader {
    pub fn new(config: &ModelsConfig) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(config)?,
        })
    }
}

#[async_trait::async_trait]
impl ModelLoader for RemoteModelLoader {
    async fn load(&self, spec: &ModelSpec) -> Result<ModelHandle> {
        let url = self.service.url("models/load")?;
        let body = LoadRequest {
            model_id: &spec.model_id,
            task: spec.kind,
        };

        let response = self
            .service
            .authorize(self.service.client.post(url).json(&body))
            .send()
            .await
            .map_err(|e| Error::ModelLoad(format!("{}: {}", spec.model_id, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::ModelLoad(format!(
                "{} returned {}: {}",
                spec.model_id,
                status,
                detail.trim()
            )));
        }

        let loaded: LoadResponse = response
            .json()
            .await
            .map_err(|e| Error::ModelLoad(format!("Failed to parse load response: {}", e)))?;

        if !loaded.loaded {
            return Err(Error::ModelLoad(format!(
                "inference service could not load {}",
                loaded.model_id
            )));
        }

        Ok(Arc::new(InferenceModel {
            service: self.service.clone(),
            model_id: spec.model_id.clone(),
        }))
    }

    async fn health_check(&self) -> Result<bool> {
        self.service.health().await
    }
}
