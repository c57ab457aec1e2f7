//! Reachability check for the configured backend.
//!
//! For Ollama this lists the models the server has pulled (`GET /api/tags`)
//! and reports whether the configured one is among them. Hosted models have
//! nothing local to check.

use crate::config::{BackendConfig, BackendKind, OLLAMA_API_BASE_VAR};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ProbeReport {
    Gemini {
        model: String,
    },
    Ollama {
        api_base: String,
        model: String,
        available: bool,
        installed: Vec<String>,
    },
}

/// Reads the model list of an Ollama server.
///
/// Connection failures and timeouts are retried with a linear backoff; once
/// the attempts run out the server is reported as unreachable.
#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    attempts: u32,
    retry_delay: Duration,
}

impl OllamaClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;

        Ok(Self {
            http,
            attempts: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    pub fn with_attempts(mut self, attempts: u32, retry_delay: Duration) -> Self {
        self.attempts = attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Names of the models pulled on the server at `api_base`.
    pub async fn list_models(&self, api_base: &str) -> Result<Vec<String>> {
        let url = format!("{api_base}/api/tags");

        let mut attempt = 1;
        let resp = loop {
            match self.http.get(&url).send().await {
                Ok(resp) => break resp,
                Err(e) if e.is_connect() || e.is_timeout() => {
                    if attempt >= self.attempts {
                        return Err(Error::unreachable(api_base, e.to_string()));
                    }
                    let delay = self.retry_delay * attempt;
                    warn!(
                        api_base,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Ollama not reachable, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(Error::http(e.to_string())),
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::api_with_status(api_base, body, status.as_u16()));
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("model list from {url}: {e}")))?;
        debug!(api_base, count = tags.models.len(), "model list received");
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// Ollama reports untagged models as `<name>:latest`.
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted || (!wanted.contains(':') && installed == format!("{wanted}:latest"))
}

pub async fn probe_backend(config: &BackendConfig, client: &OllamaClient) -> Result<ProbeReport> {
    match config.kind() {
        BackendKind::Gemini => Ok(ProbeReport::Gemini {
            model: config.gemini_model_name().to_string(),
        }),
        BackendKind::Ollama => {
            let api_base = config.ollama_api_base().trim_end_matches('/');
            if api_base.is_empty() {
                return Err(Error::config(format!(
                    "{OLLAMA_API_BASE_VAR} is empty; nothing to probe"
                )));
            }

            let installed = client.list_models(api_base).await?;

            let model = config.ollama_model_name();
            let available = installed.iter().any(|name| model_matches(name, model));
            if available {
                info!(model, api_base, "model available");
            } else {
                warn!(model, api_base, installed = installed.len(), "model not pulled");
            }

            Ok(ProbeReport::Ollama {
                api_base: api_base.to_string(),
                model: model.to_string(),
                available,
                installed,
            })
        }
    }
}
