use crate::config::{BackendConfig, BackendKind};
use serde::Serialize;
use tracing::debug;

/// Namespace LiteLLM uses for Ollama completion models.
pub const OLLAMA_PREFIX: &str = "ollama";
/// Namespace LiteLLM uses for Ollama chat models.
pub const OLLAMA_CHAT_PREFIX: &str = "ollama_chat";

/// Resolved backend, one variant per serving mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Hosted {
        model: String,
    },
    Local {
        model: String,
        api_base: Option<String>,
        stream: bool,
    },
}

impl Backend {
    pub fn from_config(config: &BackendConfig) -> Self {
        match config.kind() {
            BackendKind::Gemini => Self::Hosted {
                model: config.gemini_model_name().to_string(),
            },
            BackendKind::Ollama => Self::Local {
                model: config.ollama_model_name().to_string(),
                api_base: Some(config.ollama_api_base())
                    .filter(|base| !base.is_empty())
                    .map(str::to_string),
                stream: config.stream(),
            },
        }
    }

    /// Model identifier as the agent framework expects it.
    pub fn model_string(&self) -> String {
        match self {
            Self::Hosted { model } => model.clone(),
            Self::Local { model, .. } => format!("{OLLAMA_PREFIX}/{model}"),
        }
    }

    /// Endpoint URL. Only local backends have one.
    pub fn api_base(&self) -> Option<&str> {
        match self {
            Self::Hosted { .. } => None,
            Self::Local { api_base, .. } => api_base.as_deref(),
        }
    }

    pub fn model_reference(&self) -> ModelReference {
        match self {
            Self::Hosted { model } => ModelReference::Named(model.clone()),
            Self::Local {
                api_base, stream, ..
            } => ModelReference::Client(LiteLlmClient {
                model: self.model_string(),
                api_base: api_base.clone(),
                stream: *stream,
            }),
        }
    }
}

/// Arguments for a LiteLLM-backed model client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteLlmClient {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub stream: bool,
}

/// The model handed to an agent constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ModelReference {
    /// Plain model name, resolved by the framework itself.
    Named(String),
    Client(LiteLlmClient),
}

impl ModelReference {
    /// Model identifier regardless of variant.
    pub fn model(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Client(client) => &client.model,
        }
    }
}

/// Client descriptor targeting the chat-completion namespace. Built for
/// either backend kind; hosted backends carry no endpoint.
pub fn chat_client(config: &BackendConfig) -> LiteLlmClient {
    let backend = Backend::from_config(config);
    LiteLlmClient {
        model: format!("{OLLAMA_CHAT_PREFIX}/{}", backend.model_string()),
        api_base: backend.api_base().map(str::to_string),
        stream: config.stream(),
    }
}

/// Pick the model reference for a validated configuration.
pub fn select_model(config: &BackendConfig) -> ModelReference {
    let reference = Backend::from_config(config).model_reference();
    debug!(kind = %config.kind(), model = reference.model(), "model selected");
    reference
}
