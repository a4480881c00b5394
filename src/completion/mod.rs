use async_trait::async_trait;

mod openai;

pub use openai::OpenAiCompletionClient;

/// Parameters of a single text-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of completions to sample; only the first is returned.
    pub samples: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode completion response: {0}")]
    Decode(String),
    #[error("completion response contained no choices")]
    EmptyResponse,
}

/// Sends a prompt to a text-generation backend and returns the raw text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
