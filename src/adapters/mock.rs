//! Scripted adapters for driving the resolver without a network or a
//! terminal.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ChatMessage, LinkCandidate, Suggestion};
use crate::domain::ports::{Interaction, QueryService, ResolverEvent, UrlVerifier, Verification};

/// Format a reply the way the suggestion prompt asks for it.
pub fn formatted_reply(url: &str, confidence: f64, reasoning: &str) -> String {
    format!("URL: {url}\nCONFIDENCE: {confidence}\nREASONING: {reasoning}")
}

/// Query service that plays back queued replies.
///
/// Every call records the conversation it received. Once the queue is
/// drained further calls fail with a service error.
pub struct ScriptedQueryService {
    replies: Arc<RwLock<VecDeque<DomainResult<String>>>>,
    received: Arc<RwLock<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedQueryService {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(VecDeque::new())),
            received: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Build a service that answers with `replies` in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = replies.into_iter().map(|r| Ok(r.into())).collect();
        Self {
            replies: Arc::new(RwLock::new(queue)),
            received: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.replies.write().await.push_back(Ok(reply.into()));
    }

    /// Queue a failure.
    pub async fn push_failure(&self, error: DomainError) {
        self.replies.write().await.push_back(Err(error));
    }

    /// Number of completed calls.
    pub async fn call_count(&self) -> usize {
        self.received.read().await.len()
    }

    /// Conversations received, in call order.
    pub async fn conversations(&self) -> Vec<Vec<ChatMessage>> {
        self.received.read().await.clone()
    }
}

impl Default for ScriptedQueryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryService for ScriptedQueryService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> DomainResult<String> {
        self.received.write().await.push(messages.to_vec());
        self.replies
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::ServiceCall("no scripted reply left".to_string())))
    }
}

/// Verifier answering from a fixed table; unknown URLs are reachable.
#[derive(Default)]
pub struct StaticVerifier {
    statuses: HashMap<String, u16>,
    probed: Arc<RwLock<Vec<String>>>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `status` for `url`; 0 simulates a transport failure.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.statuses.insert(url.into(), status);
        self
    }

    /// URLs probed so far, in order.
    pub async fn probed(&self) -> Vec<String> {
        self.probed.read().await.clone()
    }
}

#[async_trait]
impl UrlVerifier for StaticVerifier {
    async fn verify(&self, url: &str) -> Verification {
        self.probed.write().await.push(url.to_string());
        match self.statuses.get(url) {
            Some(0) => Verification::unreachable(),
            Some(&status) => Verification::from_status(status),
            None => Verification::from_status(200),
        }
    }
}

/// Interaction that replays queued input and records everything shown.
///
/// Once the command queue is empty the input counts as closed.
/// Confirmation questions are answered from their own queue and default
/// to "no" once it is empty.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    commands: VecDeque<String>,
    confirmations: VecDeque<bool>,
    browser_error: Option<String>,
    /// Events reported by the resolver.
    pub events: Vec<ResolverEvent>,
    /// Suggestion lists presented, one per decision prompt.
    pub presented: Vec<Vec<Suggestion>>,
    /// Confirmation questions asked.
    pub questions: Vec<String>,
    /// URLs passed to the browser.
    pub opened: Vec<String>,
    /// Labels of candidates that entered the loop.
    pub candidates_seen: Vec<String>,
    /// Candidate counts announced per document.
    pub documents: Vec<usize>,
}

impl ScriptedInteraction {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Answers for `confirm`, in order.
    pub fn with_confirmations(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations = answers.into_iter().collect();
        self
    }

    /// Make `open_in_browser` fail with `message`.
    pub fn with_browser_error(mut self, message: impl Into<String>) -> Self {
        self.browser_error = Some(message.into());
        self
    }

    /// Commands not consumed yet.
    pub fn remaining_commands(&self) -> usize {
        self.commands.len()
    }

    /// Count events matching `predicate`.
    pub fn count_events(&self, predicate: impl Fn(&ResolverEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

#[async_trait]
impl Interaction for ScriptedInteraction {
    async fn begin_document(&mut self, candidates: &[LinkCandidate]) {
        self.documents.push(candidates.len());
    }

    async fn begin_candidate(&mut self, candidate: &LinkCandidate) {
        self.candidates_seen.push(candidate.label().to_string());
    }

    async fn report(&mut self, event: ResolverEvent) {
        self.events.push(event);
    }

    async fn present(&mut self, _candidate: &LinkCandidate, suggestions: &[Suggestion]) {
        self.presented.push(suggestions.to_vec());
    }

    async fn read_command(&mut self) -> Option<String> {
        self.commands.pop_front()
    }

    async fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }

    async fn open_in_browser(&mut self, url: &str) -> DomainResult<()> {
        self.opened.push(url.to_string());
        match &self.browser_error {
            Some(message) => Err(DomainError::Browser(message.clone())),
            None => Ok(()),
        }
    }
}
