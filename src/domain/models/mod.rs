pub mod config;
pub mod link;
pub mod transcript;

pub use config::{
    Config, LlmConfig, LogFormat, LoggingConfig, ResolverConfig, RetryConfig, RotationPolicy,
    VerifierConfig,
};
pub use link::{is_url, LinkCandidate, RejectedUrls, ResolutionState, Span, Suggestion};
pub use transcript::{ChatMessage, ChatRole, Transcript, TranscriptEntry};
