use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({endpoint}): {message}")]
    Api {
        endpoint: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Ollama server at {endpoint} is unreachable: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("Agent framework error ({agent}): {message}")]
    Framework { agent: String, message: String },
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn api_with_status(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    pub fn unreachable(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreachable {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn framework(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Framework {
            agent: agent.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message() {
        let err = Error::config("MODEL_TYPE 'openai' is not supported");
        assert_eq!(
            err.to_string(),
            "Config error: MODEL_TYPE 'openai' is not supported"
        );
    }

    #[test]
    fn api_error_keeps_status() {
        let err = Error::api_with_status("localhost:11434", "not found", 404);
        match err {
            Error::Api { status_code, .. } => assert_eq!(status_code, Some(404)),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn unreachable_names_endpoint() {
        let err = Error::unreachable("http://localhost:11434", "connection refused");
        assert_eq!(
            err.to_string(),
            "Ollama server at http://localhost:11434 is unreachable: connection refused"
        );
    }
}
