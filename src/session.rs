//! Line-oriented chat session for driving the bot from a terminal.
//!
//! Each input line is one chat message. A line may start with `name: ` to
//! speak as another participant; otherwise the default user speaks.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Context;

use crate::bot::WhosInBot;
use crate::domain::{ChatId, Response, User, UserId, parse_message};
use crate::error::{BotError, ExitError};
use crate::store::{DataStore, StoreError};

pub struct ChatSession<S> {
    bot: WhosInBot<S>,
    chat_id: ChatId,
    bot_name: String,
    default_user: String,
    user_ids: HashMap<String, UserId>,
}

impl<S: DataStore> ChatSession<S> {
    #[must_use]
    pub fn new(store: S, chat_id: ChatId, bot_name: &str, default_user: &str) -> Self {
        Self {
            bot: WhosInBot::new(store),
            chat_id,
            bot_name: bot_name.to_string(),
            default_user: default_user.to_string(),
            user_ids: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn bot(&self) -> &WhosInBot<S> {
        &self.bot
    }

    /// Resolve a participant, assigning ids in order of first appearance.
    pub fn user(&mut self, username: &str) -> User {
        let next = UserId::try_from(self.user_ids.len()).map_or(UserId::MAX, |n| n + 1);
        let user_id = *self.user_ids.entry(username.to_string()).or_insert(next);
        User {
            user_id,
            username: username.to_string(),
        }
    }

    /// Handle one message. `Ok(None)` means nothing to send back.
    ///
    /// # Errors
    ///
    /// Store failures from the bot. Unrecognized commands are logged and
    /// skipped.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Response>, StoreError> {
        let (speaker, text) = split_speaker(line);
        let speaker = speaker.unwrap_or(&self.default_user).to_string();
        let from = self.user(&speaker);

        let Some(command) = parse_message(text, self.chat_id, from, &self.bot_name) else {
            return Ok(None);
        };

        match self.bot.handle_command(&command) {
            Ok(response) => Ok(Some(response)),
            Err(BotError::UnrecognizedCommand { name }) => {
                tracing::warn!(%name, "ignoring unrecognized command");
                Ok(None)
            }
            Err(BotError::Store(err)) => Err(err),
        }
    }

    /// Read messages until EOF, writing each reply's text as it is produced.
    ///
    /// # Errors
    ///
    /// I/O failures, or `ExitError::Store` when the store fails; the session
    /// stops at the first store failure.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading chat input")?;
            let reply = self.handle_line(&line).map_err(ExitError::from)?;
            if let Some(response) = reply {
                writeln!(output, "{}", response.text).context("writing reply")?;
                output.flush().context("writing reply")?;
            }
        }
        Ok(())
    }
}

/// Split `name: message` into speaker and message. Commands and text
/// without a single-word prefix have no speaker.
fn split_speaker(line: &str) -> (Option<&str>, &str) {
    let trimmed = line.trim_start();
    if trimmed.starts_with('/') {
        return (None, trimmed);
    }
    match trimmed.split_once(':') {
        Some((name, rest)) if !name.is_empty() && !name.contains(char::is_whitespace) => {
            (Some(name), rest.trim_start())
        }
        _ => (None, trimmed),
    }
}
