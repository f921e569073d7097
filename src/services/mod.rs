pub mod command;
pub mod document_processor;
pub mod link_extractor;
pub mod patcher;
pub mod prompt;
pub mod resolver;
pub mod response_parser;
pub mod sentence;

pub use command::UserCommand;
pub use document_processor::{DocumentProcessor, OutputTarget, RunSummary};
pub use link_extractor::LinkExtractor;
pub use patcher::DocumentPatcher;
pub use resolver::ConversationalResolver;
pub use response_parser::parse_reply;
pub use sentence::extract_sentence;
