//! Roll call persistence: the `DataStore` capability and an in-memory store.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{ChatId, RollCall, RollCallResponse};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no roll call in progress for chat {chat_id}")]
    NoRollCall { chat_id: ChatId },
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for the single active roll call of each chat.
///
/// Implementations own per-chat serialization; the bot issues at most one
/// read and one write per command and never retries.
pub trait DataStore {
    /// Create the roll call for its chat, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn start_roll_call(&mut self, roll_call: RollCall) -> StoreResult<()>;

    /// Fetch the active roll call. `Ok(None)` when the chat has none.
    ///
    /// # Errors
    ///
    /// Backend failures only; a missing roll call is not an error.
    fn get_roll_call(&self, chat_id: ChatId) -> StoreResult<Option<RollCall>>;

    /// Remove the chat's active roll call.
    ///
    /// # Errors
    ///
    /// `NoRollCall` if the chat has none, or backend failures.
    fn end_roll_call(&mut self, roll_call: &RollCall) -> StoreResult<()>;

    /// # Errors
    ///
    /// `NoRollCall` if the chat has none, or backend failures.
    fn set_quiet(&mut self, roll_call: &RollCall, quiet: bool) -> StoreResult<()>;

    /// Append a response to the matching list of its chat's roll call.
    ///
    /// # Errors
    ///
    /// `NoRollCall` if the chat has none, or backend failures.
    fn set_response(&mut self, response: RollCallResponse) -> StoreResult<()>;
}

/// Roll calls held in a map keyed by chat id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roll_calls: HashMap<ChatId, RollCall>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with an active roll call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roll_calls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roll_calls.is_empty()
    }

    fn active_mut(&mut self, chat_id: ChatId) -> StoreResult<&mut RollCall> {
        self.roll_calls
            .get_mut(&chat_id)
            .ok_or(StoreError::NoRollCall { chat_id })
    }
}

impl DataStore for MemoryStore {
    fn start_roll_call(&mut self, roll_call: RollCall) -> StoreResult<()> {
        tracing::debug!(chat_id = roll_call.chat_id, "storing new roll call");
        self.roll_calls.insert(roll_call.chat_id, roll_call);
        Ok(())
    }

    fn get_roll_call(&self, chat_id: ChatId) -> StoreResult<Option<RollCall>> {
        Ok(self.roll_calls.get(&chat_id).cloned())
    }

    fn end_roll_call(&mut self, roll_call: &RollCall) -> StoreResult<()> {
        self.roll_calls
            .remove(&roll_call.chat_id)
            .map(|_| ())
            .ok_or(StoreError::NoRollCall {
                chat_id: roll_call.chat_id,
            })
    }

    fn set_quiet(&mut self, roll_call: &RollCall, quiet: bool) -> StoreResult<()> {
        self.active_mut(roll_call.chat_id)?.quiet = quiet;
        Ok(())
    }

    fn set_response(&mut self, response: RollCallResponse) -> StoreResult<()> {
        self.active_mut(response.chat_id)?.record(response);
        Ok(())
    }
}
