use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;

/// Maximum characters sent per text to the embedding API.
/// Small sentence-embedding models cap out around 512 tokens; long section
/// bodies are cut rather than rejected by the server.
const MAX_EMBED_CHARS: usize = 3_000;

/// Truncate `text` to at most `MAX_EMBED_CHARS`, splitting on a UTF-8 char boundary.
fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Ollama,
    OpenAi,
}

/// Blocking client for Ollama or OpenAI-compatible embedding endpoints.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: Client,
    provider: Provider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    batch_size: usize,
}

impl HttpEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let base = config.base_url.trim_end_matches('/');
        let (provider, endpoint) = match config.provider.as_str() {
            "ollama" => (Provider::Ollama, format!("{base}/api/embed")),
            "openai" => (Provider::OpenAi, format!("{base}/v1/embeddings")),
            other => return Err(EmbeddingError::UnknownProvider(other.to_string())),
        };

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            provider,
            endpoint,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            batch_size: config.batch_size.max(1),
        })
    }

    fn embed_chunk(&self, chunk: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = match self.provider {
            Provider::Ollama => self.client.post(&self.endpoint).json(&OllamaEmbedRequest {
                model: &self.model,
                input: chunk,
                truncate: true,
            }),
            Provider::OpenAi => {
                let key = self.api_key.as_deref().unwrap_or_default();
                self.client
                    .post(&self.endpoint)
                    .bearer_auth(key)
                    .json(&OpenAiEmbedRequest {
                        model: &self.model,
                        input: chunk,
                    })
            }
        };

        let resp = request.send()?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            return Err(EmbeddingError::Api { status, body });
        }

        let embeddings = match self.provider {
            Provider::Ollama => resp.json::<OllamaEmbedResponse>()?.embeddings,
            Provider::OpenAi => {
                let mut body: OpenAiEmbedResponse = resp.json()?;
                body.data.sort_by_key(|d| d.index);
                body.data.into_iter().map(|d| d.embedding).collect()
            }
        };

        if embeddings.len() != chunk.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: chunk.len(),
                got: embeddings.len(),
            });
        }
        Ok(embeddings)
    }
}

impl Embedder for HttpEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let truncated: Vec<String> = texts
            .iter()
            .map(|t| truncate_for_embedding(t).to_string())
            .collect();

        let mut all = Vec::with_capacity(texts.len());
        for chunk in truncated.chunks(self.batch_size) {
            all.extend(self.embed_chunk(chunk)?);
        }

        tracing::debug!(
            inputs = texts.len(),
            model = %self.model,
            "embedded batch"
        );
        Ok(all)
    }
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    /// Ask Ollama to truncate over-long inputs instead of returning 400.
    truncate: bool,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}
