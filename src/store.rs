//! In-memory conversation and request counter storage
//!
//! The [`ConversationStore`] keeps a bounded log of turns per sender plus the
//! chat message counter, behind a single mutex. [`RequestCounter`] tracks the
//! improver and model listing request totals. Both are constructed once per
//! process and shared with the services through `Arc`; nothing here is
//! persisted across restarts.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum number of turns retained per sender (the last 5 exchanges)
pub const MAX_HISTORY_TURNS: usize = 10;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message sent by the client
    User,
    /// Reply produced by the model
    Assistant,
}

impl Role {
    /// Role name in the completion API vocabulary
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a sender's conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn
    pub role: Role,
    /// Turn text as stored (assistant turns hold the formatted reply)
    pub text: String,
}

impl Turn {
    /// Creates a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
struct ConversationState {
    conversations: HashMap<String, VecDeque<Turn>>,
    total_messages: u64,
}

/// Per-sender conversation logs and the chat message counter
///
/// Every method takes the lock for the duration of an in-memory update
/// only; callers must not hold results across upstream calls expecting
/// them to stay current.
///
/// # Examples
///
/// ```
/// use prompthash::store::ConversationStore;
///
/// let store = ConversationStore::new();
/// let (history, total) = store.record_exchange("alice", "hi", "hello!");
/// assert_eq!(history.len(), 2);
/// assert_eq!(total, 1);
/// assert!(store.history("bob").is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ConversationStore {
    inner: Mutex<ConversationState>,
}

impl ConversationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        // State is updated in a single step under the lock, so a panic in
        // another holder cannot leave it half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the sender's log, or an empty log if unseen
    pub fn history(&self, sender: &str) -> Vec<Turn> {
        self.lock()
            .conversations
            .get(sender)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the number of recorded exchanges across all senders
    pub fn total_messages(&self) -> u64 {
        self.lock().total_messages
    }

    /// Returns the sender's log and the message total read under one lock
    pub fn snapshot(&self, sender: &str) -> (Vec<Turn>, u64) {
        let state = self.lock();
        let history = state
            .conversations
            .get(sender)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default();
        (history, state.total_messages)
    }

    /// Appends a user turn and an assistant turn for `sender`
    ///
    /// Keeps only the most recent [`MAX_HISTORY_TURNS`] turns and bumps the
    /// message counter by one.
    ///
    /// # Returns
    ///
    /// The sender's log after truncation and the new message total
    pub fn record_exchange(
        &self,
        sender: &str,
        user_text: &str,
        assistant_text: &str,
    ) -> (Vec<Turn>, u64) {
        let mut state = self.lock();

        let log = state.conversations.entry(sender.to_string()).or_default();
        log.push_back(Turn::user(user_text));
        log.push_back(Turn::assistant(assistant_text));
        while log.len() > MAX_HISTORY_TURNS {
            log.pop_front();
        }
        let history: Vec<Turn> = log.iter().cloned().collect();

        state.total_messages += 1;
        (history, state.total_messages)
    }
}

/// Monotonic request counter for a single service
///
/// # Examples
///
/// ```
/// use prompthash::store::RequestCounter;
///
/// let counter = RequestCounter::new();
/// assert_eq!(counter.increment(), 1);
/// assert_eq!(counter.increment(), 2);
/// assert_eq!(counter.get(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RequestCounter {
    total: AtomicU64,
}

impl RequestCounter {
    /// Creates a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one and returns the new total
    pub fn increment(&self) -> u64 {
        self.total.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current total
    pub fn get(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }
}
