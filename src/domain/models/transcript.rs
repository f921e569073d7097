//! Conversation transcript exchanged with the query/answer service.

use serde::{Deserialize, Serialize};

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One recorded entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// A (re)built seed prompt. The newest one heads the conversation.
    Seed(ChatMessage),
    /// A follow-up turn from either side.
    Turn(ChatMessage),
}

/// Append-only log of everything exchanged for one candidate.
///
/// Entries are never edited or removed. When the rejected-URL clause of the
/// seed prompt changes, a new `Seed` entry is appended; the conversation sent
/// to the service is the latest seed followed by every turn in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first seed has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries, seed revisions included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Record a seed prompt (initial or revised).
    pub fn push_seed(&mut self, content: impl Into<String>) {
        self.entries
            .push(TranscriptEntry::Seed(ChatMessage::user(content)));
    }

    /// Record a follow-up turn.
    pub fn push_turn(&mut self, message: ChatMessage) {
        self.entries.push(TranscriptEntry::Turn(message));
    }

    /// The seed currently heading the conversation.
    pub fn current_seed(&self) -> Option<&ChatMessage> {
        self.entries.iter().rev().find_map(|entry| match entry {
            TranscriptEntry::Seed(message) => Some(message),
            TranscriptEntry::Turn(_) => None,
        })
    }

    /// Number of seed revisions recorded so far.
    pub fn seed_revisions(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, TranscriptEntry::Seed(_)))
            .count()
    }

    /// Messages to send to the service: latest seed, then all turns.
    pub fn conversation(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.entries.len());
        if let Some(seed) = self.current_seed() {
            messages.push(seed.clone());
        }
        messages.extend(self.entries.iter().filter_map(|entry| match entry {
            TranscriptEntry::Turn(message) => Some(message.clone()),
            TranscriptEntry::Seed(_) => None,
        }));
        messages
    }

    /// Last assistant reply, if any.
    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.entries.iter().rev().find_map(|entry| match entry {
            TranscriptEntry::Turn(message) if message.role == ChatRole::Assistant => Some(message),
            _ => None,
        })
    }
}
